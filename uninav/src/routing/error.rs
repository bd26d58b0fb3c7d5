//! Error types for geocoding and routing.

use serde::Deserialize;
use thiserror::Error;

/// Error body the provider sends with non-success statuses.
#[derive(Deserialize, Debug)]
pub struct ApiErrorPayload {
    pub message: String,
}

/// Failure talking to the geocoding/routing provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Transport(reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid provider url: {0}")]
    Url(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

/// Outcome of turning user input into a coordinate.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("'{input}' is not a valid \"lat,lon\" pair: {reason}")]
    MalformedCoordinate { input: String, reason: String },

    #[error("could not recognize '{query}': {reason}")]
    NotFound { query: String, reason: String },
}

/// Outcome of a failed route request. Never carries a partial route.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("no walking route found between these points")]
    NoPath,

    #[error("routing service unavailable: {0}")]
    Upstream(#[from] ProviderError),

    #[error("routing service returned invalid geometry: {0}")]
    InvalidGeometry(String),
}
