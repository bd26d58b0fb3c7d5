//! Turns a session snapshot into a delivered panic alert.

use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use super::report::{AlertReport, SUBJECT};
use super::transport::{MailTransport, OutgoingMail, TransportError};
use crate::config::AlertConfig;
use crate::models::NavigationSession;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("alerts are not configured: {0}")]
    Unavailable(String),

    #[error("failed to deliver alert: {0}")]
    DeliveryFailed(#[from] TransportError),
}

/// Proof of a handed-off alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub recipient: String,
    pub timestamp: String,
}

/// Sends distress reports to the configured responder. One attempt per call.
pub struct AlertDispatcher {
    config: AlertConfig,
    transport: Arc<dyn MailTransport>,
}

impl AlertDispatcher {
    pub fn new(config: AlertConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self { config, transport }
    }

    pub async fn dispatch(
        &self,
        session: &NavigationSession,
    ) -> Result<DispatchReceipt, DispatchError> {
        let credentials = self.config.credentials().map_err(DispatchError::Unavailable)?;
        let responder = self
            .config
            .responder
            .clone()
            .ok_or_else(|| {
                DispatchError::Unavailable("no responder address configured".to_string())
            })?;

        let report = AlertReport::from_session(session, &Local::now());
        let mail = OutgoingMail {
            from: self
                .config
                .from
                .clone()
                .unwrap_or_else(|| credentials.login.clone()),
            to: responder.clone(),
            subject: SUBJECT.to_string(),
            body: report.to_string(),
        };

        self.transport
            .send(&credentials, mail)
            .await
            .inspect_err(|e| log::warn!("Panic alert to {responder} failed: {e}"))?;

        log::info!(
            "Panic alert for {} sent to {responder}",
            report.sender_name
        );
        Ok(DispatchReceipt {
            recipient: responder,
            timestamp: report.timestamp,
        })
    }
}
