//! SMTP email sink.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::app::{Result, WatchError};
use crate::config::email::{ADDRESS_VAR, PASSWORD_VAR};
use crate::config::{EmailCredentials, EmailSettings};
use crate::notifier::NotificationSink;

/// Sends a plain-text email from the configured mailbox to itself.
pub struct EmailSink {
    settings: EmailSettings,
    credentials: EmailCredentials,
}

impl EmailSink {
    pub fn new(settings: EmailSettings, credentials: EmailCredentials) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    /// Build the self-addressed message for `address`.
    pub fn build_message(&self, address: &str, body: &str) -> Result<Message> {
        let mailbox: Mailbox = address
            .parse()
            .map_err(|e| WatchError::Email(format!("invalid address '{}': {}", address, e)))?;

        Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(self.settings.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| WatchError::Email(e.to_string()))
    }
}

#[async_trait]
impl NotificationSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn send(&self, message: &str) -> Result<()> {
        let (address, password) = match (&self.credentials.address, &self.credentials.password) {
            (Some(address), Some(password)) => (address, password),
            _ => {
                return Err(WatchError::Email(format!(
                    "{} and {} must both be set",
                    ADDRESS_VAR, PASSWORD_VAR
                )))
            }
        };

        let email = self.build_message(address, message)?;

        debug!(
            host = %self.settings.smtp_host,
            port = self.settings.smtp_port,
            "Opening SMTP session"
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.smtp_host)
            .map_err(|e| WatchError::Email(e.to_string()))?
            .port(self.settings.smtp_port)
            .credentials(Credentials::new(address.clone(), password.clone()))
            .build();

        transport
            .send(email)
            .await
            .map_err(|e| WatchError::Email(e.to_string()))?;

        Ok(())
    }
}
