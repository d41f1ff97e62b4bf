use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<ApiSuccess<ConfirmEmailResponseData>, ApiError> {
    state
        .user_service
        .confirm_email(&token)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ConfirmEmailResponseData {
            detail: "User confirmed successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmEmailResponseData {
    pub detail: String,
}
