use thiserror::Error;

use crate::jwt::TokenError;

/// Authentication and authorization failures.
///
/// Every variant except `Directory` is an unauthorized-class outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately
    /// indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not confirmed")]
    UserNotConfirmed,

    #[error(transparent)]
    Token(#[from] TokenError),

    /// The user directory could not be queried.
    #[error("User directory error: {0}")]
    Directory(String),
}

impl AuthError {
    /// Whether the error should be reported as unauthorized to the caller.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(
            self,
            AuthError::Directory(_) | AuthError::Token(TokenError::EncodingFailed(_))
        )
    }
}
