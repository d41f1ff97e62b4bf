use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessGuard;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenError;
use auth::TokenType;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::telemetry::mask_email;
use crate::user::errors::UserError;
use crate::user::ports::ConfirmationMailer;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, M>
where
    UR: UserRepository,
    M: ConfirmationMailer,
{
    repository: Arc<UR>,
    mailer: Arc<M>,
    codec: Arc<TokenCodec>,
    authenticator: Authenticator<UR>,
    guard: AccessGuard<UR>,
    password_hasher: PasswordHasher,
    public_url: String,
}

impl<UR, M> UserService<UR, M>
where
    UR: UserRepository,
    M: ConfirmationMailer,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `mailer` - Confirmation link delivery
    /// * `codec` - Token codec shared with the rest of the process
    /// * `public_url` - Base URL confirmation links point to
    pub fn new(
        repository: Arc<UR>,
        mailer: Arc<M>,
        codec: Arc<TokenCodec>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            authenticator: Authenticator::new(Arc::clone(&repository)),
            guard: AccessGuard::new(Arc::clone(&repository), Arc::clone(&codec)),
            repository,
            mailer,
            codec,
            password_hasher: PasswordHasher::new(),
            public_url: public_url.into(),
        }
    }

    fn confirmation_url(&self, token: &str) -> String {
        format!("{}/confirm/{}", self.public_url.trim_end_matches('/'), token)
    }
}

#[async_trait]
impl<UR, M> UserServicePort for UserService<UR, M>
where
    UR: UserRepository,
    M: ConfirmationMailer,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Registration, UserError> {
        let email = command.email;

        if self.repository.find_by_email(email.as_str()).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;
        let token = self
            .codec
            .issue_confirmation(email.as_str())
            .map_err(|e| UserError::TokenGeneration(e.to_string()))?;

        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %mask_email(user.email.as_str()), "User registered");

        let confirmation_url = self.confirmation_url(&token);
        if let Err(e) = self
            .mailer
            .send_confirmation(&user.email, &confirmation_url)
            .await
        {
            tracing::error!(user_id = %user.id, error = %e, "Failed to send confirmation email");
        }

        Ok(Registration {
            user,
            confirmation_url,
        })
    }

    async fn confirm_email(&self, token: &str) -> Result<User, UserError> {
        let email = self.codec.decode(token, TokenType::Confirm)?;

        let mut user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(TokenError::InvalidToken)?;

        if !user.confirmed {
            self.repository.set_confirmed(&user.email).await?;
            user.confirmed = true;
            tracing::info!(user_id = %user.id, "User confirmed");
        }

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, UserError> {
        let user = self
            .authenticator
            .authenticate(email, password)
            .await
            .inspect_err(|e| {
                tracing::info!(email = %mask_email(email), reason = %e, "Login rejected");
            })?;

        let token = self
            .codec
            .issue_access(user.email.as_str())
            .map_err(|e| UserError::TokenGeneration(e.to_string()))?;

        Ok(AccessToken(token))
    }

    async fn current_user(&self, token: &str) -> Result<User, UserError> {
        self.guard
            .resolve_current_user(token)
            .await
            .map_err(UserError::from)
    }
}
