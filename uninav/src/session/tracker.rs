//! Live position updates and distance to the active destination.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{SessionKey, SessionStore};
use crate::models::Coordinate;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("invalid position sample: {0}")]
    InvalidSample(String),
}

/// Outcome of an accepted position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackResult {
    /// Time recorded alongside the position.
    pub timestamp: DateTime<Utc>,
    /// Meters to the active destination. `None` when no route has been
    /// planned, which is not the same as arriving.
    pub distance_to_destination: Option<f64>,
}

/// Great-circle distance in meters (haversine formula).
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.lat().to_radians();
    let phi2 = to.lat().to_radians();
    // sin² is even, so the sign of the deltas does not matter.
    let d_phi = (to.lat() - from.lat()).abs().to_radians();
    let d_lambda = (to.lng() - from.lng()).abs().to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Record a position sample for `key`.
///
/// Invalid samples are rejected before the store is touched.
pub async fn track(
    store: &SessionStore,
    key: &SessionKey,
    lat: f64,
    lng: f64,
) -> Result<TrackResult, TrackError> {
    let position =
        Coordinate::new(lat, lng).map_err(|e| TrackError::InvalidSample(e.to_string()))?;
    let timestamp = Utc::now();

    let destination = store.set_position(key, position, timestamp).await;
    let distance_to_destination = destination.map(|d| haversine_distance(position, d));

    log::debug!("Session {key} at {position}, {distance_to_destination:?} m to go");

    Ok(TrackResult {
        timestamp,
        distance_to_destination,
    })
}
