//! Authentication core
//!
//! Provides the security pieces shared by the service layer:
//! - Password hashing (Argon2id)
//! - Typed, expiring JWTs (`access` and `confirm` classes, one signing key)
//! - Credential verification against a user directory
//! - Current-user resolution from a bearer access token
//!
//! The consuming service owns persistence and plugs it in through
//! [`UserDirectory`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Typed Tokens
//! ```
//! use auth::{TokenCodec, TokenError, TokenType};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue_confirmation("alice@example.com").unwrap();
//!
//! assert_eq!(
//!     codec.decode(&token, TokenType::Confirm).unwrap(),
//!     "alice@example.com"
//! );
//! assert!(matches!(
//!     codec.decode(&token, TokenType::Access),
//!     Err(TokenError::WrongTokenType { .. })
//! ));
//! ```

pub mod authenticator;
pub mod directory;
pub mod errors;
pub mod guard;
pub mod jwt;
pub mod password;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use directory::AccountRecord;
pub use directory::UserDirectory;
pub use errors::AuthError;
pub use guard::AccessGuard;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenLifetimes;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
