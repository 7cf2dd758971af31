//! Outbound email
//!
//! `SmtpMailer` relays through an SMTP server with STARTTLS. When no server
//! is configured `LogMailer` records the message in the log instead, which
//! keeps local runs working without credentials.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Mail configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP relay host; unset means log-only delivery
    pub server: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address for every outgoing message
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: None,
            port: 2525,
            username: None,
            password: None,
            from: "admin@planetary-api.com".to_string(),
        }
    }
}

/// Error type for mail delivery
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A plain-text message to a single recipient
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// Mailer delivering through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the relay transport; no connection is made until the first send
    pub fn new(config: &MailConfig, server: &str) -> Result<Self, MailError> {
        let from: Mailbox = config.from.parse()?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)?.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!("SMTP mailer configured for {}:{}", server, config.port);

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        self.transport.send(message).await?;
        info!("Mail sent to {}", mail.to);

        Ok(())
    }
}

/// Mailer that only logs
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let _: Mailbox = mail.to.parse()?;
        info!(to = %mail.to, subject = %mail.subject, "No SMTP server configured, mail not sent");
        Ok(())
    }
}

/// Pick the mailer the configuration asks for
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.server {
        Some(server) => Ok(Arc::new(SmtpMailer::new(config, server)?)),
        None => {
            info!("MAIL server not set, using log-only mailer");
            Ok(Arc::new(LogMailer))
        }
    }
}
