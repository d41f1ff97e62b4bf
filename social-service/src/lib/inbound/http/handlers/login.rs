use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange credentials for an access token.
///
/// Takes an OAuth2 password-flow form where `username` carries the email.
pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let token = state
        .user_service
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: token.0,
            token_type: "bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}
