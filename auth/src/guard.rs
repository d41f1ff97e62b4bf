use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::errors::AuthError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenType;

/// Resolves the authenticated user behind an access token.
///
/// Holds no session state: the token is the whole proof of identity for its
/// lifetime, and every call is resolved independently.
pub struct AccessGuard<D: UserDirectory> {
    directory: Arc<D>,
    codec: Arc<TokenCodec>,
}

impl<D: UserDirectory> AccessGuard<D> {
    pub fn new(directory: Arc<D>, codec: Arc<TokenCodec>) -> Self {
        Self { directory, codec }
    }

    /// Resolve the user owning a bearer access token.
    ///
    /// # Errors
    /// * `Token(..)` - The token failed to decode as an access token
    /// * `Token(InvalidToken)` - The subject no longer exists
    /// * `Directory` - User lookup failed
    pub async fn resolve_current_user(&self, token: &str) -> Result<D::User, AuthError> {
        let email = self.codec.decode(token, TokenType::Access)?;

        self.directory
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::Directory(e.to_string()))?
            .ok_or(AuthError::Token(TokenError::InvalidToken))
    }
}
