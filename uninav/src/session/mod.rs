//! Navigation session state and live tracking.

mod key;
mod store;
mod tracker;

pub use key::SessionKey;
pub use store::SessionStore;
pub use tracker::{track, TrackError};
