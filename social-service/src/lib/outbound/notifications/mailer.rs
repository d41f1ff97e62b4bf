use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::ConfirmationMailer;
use crate::telemetry::mask_email;
use crate::user::errors::MailerError;

/// Confirmation mailer that records the outgoing link in the service log.
///
/// Stands in for a mail transport; operators pick the link up from the log.
#[derive(Debug, Default, Clone)]
pub struct LoggingConfirmationMailer;

impl LoggingConfirmationMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConfirmationMailer for LoggingConfirmationMailer {
    async fn send_confirmation(
        &self,
        email: &EmailAddress,
        confirmation_url: &str,
    ) -> Result<(), MailerError> {
        tracing::info!(
            email = %mask_email(email.as_str()),
            confirmation_url = %confirmation_url,
            "Confirmation email queued"
        );
        Ok(())
    }
}
