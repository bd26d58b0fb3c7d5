//! Geocoding and route planning against an external provider.

mod error;
mod graphhopper;
mod planner;
mod provider;
mod resolver;
mod types;

#[cfg(test)]
pub mod fake;

pub use error::{ResolveError, RouteError};
pub use graphhopper::GraphHopperClient;
pub use planner::plan;
pub use provider::RoutingProvider;
pub use resolver::{parse_coordinate, resolve};
