//! The seam between the planner/resolver and a concrete routing service.

use async_trait::async_trait;

use super::error::ProviderError;
use super::types::{GeocodeResponse, RouteResponse};
use crate::models::Coordinate;

/// The external geocoding and routing service.
///
/// Implementations return the provider's response as parsed; interpreting
/// it is left to the resolver and planner.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Look up a free-text place name.
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse, ProviderError>;

    /// Request a walking route between two points.
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteResponse, ProviderError>;
}
