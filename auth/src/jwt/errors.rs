use thiserror::Error;

use super::claims::TokenType;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Malformed, unparseable or wrongly signed token.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has incorrect type, expected '{expected}'")]
    WrongTokenType { expected: TokenType },

    #[error("Token is missing 'sub' field")]
    MissingSubject,
}
