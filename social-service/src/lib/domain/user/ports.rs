use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::user::errors::MailerError;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new, unconfirmed user and send them a confirmation link.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created user and the confirmation URL that was sent
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Registration, UserError>;

    /// Confirm the email address named by a confirmation token.
    ///
    /// Confirming an already confirmed user succeeds without changes.
    ///
    /// # Returns
    /// The confirmed user
    ///
    /// # Errors
    /// * `Auth(Token(..))` - Token is invalid, expired, untyped or not a
    ///   confirmation token, or its subject does not exist
    /// * `DatabaseError` - Database operation failed
    async fn confirm_email(&self, token: &str) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `Auth(InvalidCredentials)` - Unknown email or wrong password
    /// * `Auth(UserNotConfirmed)` - Credentials match an unconfirmed user
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, UserError>;

    /// Resolve the user behind a bearer access token.
    ///
    /// # Errors
    /// * `Auth(Token(..))` - Token rejected, or its subject no longer exists
    async fn current_user(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Lookup by email is inherited from [`auth::UserDirectory`].
#[async_trait]
pub trait UserRepository:
    auth::UserDirectory<User = User, Error = UserError> + Send + Sync + 'static
{
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user with its store-assigned id, unconfirmed
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Mark the user with this email as confirmed.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_confirmed(&self, email: &EmailAddress) -> Result<(), UserError>;
}

/// Delivery of confirmation links.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync + 'static {
    /// Send the confirmation link to a freshly registered address.
    ///
    /// # Errors
    /// * `DeliveryFailed` - The message could not be handed off
    async fn send_confirmation(
        &self,
        email: &EmailAddress,
        confirmation_url: &str,
    ) -> Result<(), MailerError>;
}
