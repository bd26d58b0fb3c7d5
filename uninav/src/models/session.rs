//! Per-user navigation session state.

use chrono::{DateTime, Utc};

use super::Coordinate;

/// A position sample together with the time it was recorded.
///
/// Position and timestamp travel as one value so neither can be observed
/// without the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub at: DateTime<Utc>,
}

/// Everything the server remembers about one user between requests.
///
/// A session that was never written to, or that has been forgotten, is the
/// `Default` value: every field unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationSession {
    /// Destination of the last successfully planned route.
    pub destination: Option<Coordinate>,
    /// Geometry of the last successfully planned route.
    pub last_route_coords: Option<Vec<Coordinate>>,
    /// Latest accepted position sample.
    pub position: Option<PositionFix>,
    /// Name given at login.
    pub display_name: Option<String>,
    /// Contact address given at login.
    pub contact_email: Option<String>,
}

impl NavigationSession {
    pub fn current_position(&self) -> Option<Coordinate> {
        self.position.map(|fix| fix.coordinate)
    }
}
