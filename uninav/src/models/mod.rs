//! Data models for navigation sessions.

mod coordinate;
mod route;
mod session;

pub use coordinate::Coordinate;
pub use route::RouteSummary;
pub use session::{NavigationSession, PositionFix};
