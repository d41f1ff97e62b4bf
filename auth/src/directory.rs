use async_trait::async_trait;

/// Read access to a stored account, as needed by credential checks.
pub trait AccountRecord {
    fn email(&self) -> &str;

    fn password_hash(&self) -> &str;

    fn is_confirmed(&self) -> bool;
}

/// Lookup of user records by email.
///
/// Implemented by the persistence layer of the consuming service; the auth
/// core never writes through it.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    type User: AccountRecord + Send;
    type Error: std::fmt::Display + Send;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Self::User>, Self::Error>;
}
