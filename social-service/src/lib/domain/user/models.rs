use std::fmt;
use std::str::FromStr;

use crate::user::errors::EmailError;

/// User aggregate entity.
///
/// Represents a registered user. `confirmed` only ever moves from false to
/// true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub confirmed: bool,
}

impl auth::AccountRecord for User {
    fn email(&self) -> &str {
        self.email.as_str()
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// User identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// User data handed to the repository on registration; the store assigns
/// the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Outcome of a registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub confirmation_url: String,
}

/// Access token issued at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = EmailAddress::new("a@b.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(EmailAddress::new(String::new()).is_err());
    }
}
