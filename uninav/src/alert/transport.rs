//! Mail delivery to the responder.

use std::time::Duration;

use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::{AlertConfig, SmtpCredentials};

/// A plaintext message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Something that can deliver a message with the given login.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(
        &self,
        credentials: &SmtpCredentials,
        mail: OutgoingMail,
    ) -> Result<(), TransportError>;
}

/// STARTTLS submission to an authenticated SMTP relay.
pub struct SmtpMailer {
    relay: String,
    port: u16,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            relay: config.relay.clone(),
            port: config.port,
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(
        &self,
        credentials: &SmtpCredentials,
        mail: OutgoingMail,
    ) -> Result<(), TransportError> {
        let message = Message::builder()
            .from(parse_mailbox(&mail.from)?)
            .to(parse_mailbox(&mail.to)?)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.relay)?
            .port(self.port)
            .credentials(Credentials::new(
                credentials.login.clone(),
                credentials.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        log::debug!("Submitting alert to {}:{}", self.relay, self.port);
        transport.send(message).await?;
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address.parse().map_err(|source| TransportError::Address {
        address: address.to_string(),
        source,
    })
}
