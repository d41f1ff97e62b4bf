pub mod mailer;

pub use mailer::LoggingConfirmationMailer;
