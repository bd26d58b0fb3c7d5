//! Normalized result of a routing request.

use serde::Serialize;

use super::Coordinate;

/// A walking route as presented to the user.
///
/// Produced once per route request and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Turn instructions in travel order.
    pub instructions: Vec<String>,
    /// Path geometry in travel order.
    pub path: Vec<Coordinate>,
    /// Total distance, kilometres rounded to 2 decimals.
    pub distance_km: f64,
    /// Total duration, minutes rounded to 1 decimal.
    pub duration_min: f64,
}
