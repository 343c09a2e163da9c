//! Email service for verification codes and feedback reminders.
//!
//! Only the `console` provider is wired up: messages are written to the log
//! instead of being delivered. The verification flow works end-to-end in
//! development by copying the token out of the log output.

use crate::config::EmailConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Recipient name (optional)
    pub to_name: Option<String>,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body: String,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message),
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Send email verification message with the one-time token.
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        to_name: &str,
        verification_token: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("Verify your email - {}", self.config.sender_name);

        let body = format!(
            r#"Hi {name},

Your verification code is: {token}

Enter this code in the app the first time you log in, or open:

{base_url}/verify?token={token}

If you didn't sign up for {sender}, you can safely ignore this email."#,
            name = to_name,
            token = verification_token,
            base_url = self.config.base_url,
            sender = self.config.sender_name,
        );

        self.send(EmailMessage {
            to: to_email.to_string(),
            to_name: Some(to_name.to_string()),
            subject,
            body,
        })
        .await
    }

    /// Send a post-event feedback reminder.
    pub async fn send_feedback_reminder(
        &self,
        to_email: &str,
        to_name: &str,
        event_title: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("How was {}?", event_title);

        let body = format!(
            r#"Hi {name},

Thanks for attending {title}! We'd love to hear what you thought.
Open the app and rate the event to help us plan better ones.

{sender}"#,
            name = to_name,
            title = event_title,
            sender = self.config.sender_name,
        );

        self.send(EmailMessage {
            to: to_email.to_string(),
            to_name: Some(to_name.to_string()),
            subject,
            body,
        })
        .await
    }

    /// Console provider: write the message to the log.
    fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            from = %self.config.sender_email,
            subject = %message.subject,
            "Email (console provider):\n{}",
            message.body
        );
        Ok(())
    }
}
