use std::sync::Arc;
use std::sync::OnceLock;

use crate::directory::AccountRecord;
use crate::directory::UserDirectory;
use crate::errors::AuthError;
use crate::password::PasswordHasher;

/// Hash checked against when the email is unknown, so that lookups of
/// absent and present users cost the same Argon2 work.
fn placeholder_hash() -> Option<&'static str> {
    static HASH: OnceLock<Option<String>> = OnceLock::new();

    HASH.get_or_init(|| PasswordHasher::new().hash("placeholder-password").ok())
        .as_deref()
}

/// Verifies email and password credentials against a user directory.
pub struct Authenticator<D: UserDirectory> {
    directory: Arc<D>,
    password_hasher: PasswordHasher,
}

impl<D: UserDirectory> Authenticator<D> {
    /// Create a new authenticator over a user directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Verify credentials and return the matching user.
    ///
    /// # Arguments
    /// * `email` - Email the user registered with
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The confirmed user owning the credentials
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user, or the password does not match
    /// * `UserNotConfirmed` - Credentials match but the email is unconfirmed
    /// * `Directory` - User lookup failed
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<D::User, AuthError> {
        tracing::debug!("Authenticating user");

        let user = match self
            .directory
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Directory(e.to_string()))?
        {
            Some(user) => user,
            None => {
                if let Some(hash) = placeholder_hash() {
                    self.password_hasher.verify(password, hash);
                }
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.password_hasher.verify(password, user.password_hash()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_confirmed() {
            return Err(AuthError::UserNotConfirmed);
        }

        Ok(user)
    }
}
