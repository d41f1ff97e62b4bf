use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for confirmation mail delivery
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Failed to deliver confirmation email: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already registered")]
    EmailAlreadyExists(String),

    #[error("Password hashing failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::TokenError> for UserError {
    fn from(err: auth::TokenError) -> Self {
        UserError::Auth(auth::AuthError::Token(err))
    }
}
