use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, EmailError> {
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterUserCommand::new(email, self.password))
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::UnprocessableEntity(format!("Invalid email: {}", err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub detail: String,
    pub email: String,
}

impl From<&Registration> for RegisterResponseData {
    fn from(registration: &Registration) -> Self {
        Self {
            detail: "User created. Please check your email for a confirmation link.".to_string(),
            email: registration.user.email.as_str().to_string(),
        }
    }
}
