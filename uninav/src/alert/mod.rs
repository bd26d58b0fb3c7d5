//! Distress alerts: report assembly and delivery.

mod dispatcher;
mod report;
mod transport;

#[cfg(test)]
pub mod fake;

pub use dispatcher::{AlertDispatcher, DispatchError};
pub use transport::SmtpMailer;
