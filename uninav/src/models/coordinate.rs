//! Geographic coordinate value type.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Rejected latitude/longitude values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is not a finite value in [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is not a finite value in [-180, 180]")]
    Longitude(f64),
}

/// A WGS84 point in degrees.
///
/// Always holds finite values inside the valid ranges; the only way in is
/// [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Validate and build a coordinate. NaN and infinities fail the range check.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// `[lat, lng]` pair, the order map widgets expect.
    pub const fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
