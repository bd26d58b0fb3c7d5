//! Recording mail transport for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::transport::{MailTransport, OutgoingMail, TransportError};
use crate::config::SmtpCredentials;

#[derive(Default)]
pub struct FakeTransport {
    sent: Mutex<Vec<OutgoingMail>>,
    attempts: Mutex<usize>,
    reject: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send with an address error.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for FakeTransport {
    async fn send(
        &self,
        _credentials: &SmtpCredentials,
        mail: OutgoingMail,
    ) -> Result<(), TransportError> {
        *self.attempts.lock().unwrap() += 1;
        if self.reject {
            return Err(TransportError::Address {
                address: mail.to.clone(),
                source: "rejected".parse::<lettre::message::Mailbox>().unwrap_err(),
            });
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}
