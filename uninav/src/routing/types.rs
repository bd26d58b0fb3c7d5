//! Wire types for the provider's geocode and route endpoints.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub hits: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeHit {
    pub point: GeoPoint,
}

#[derive(Debug, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub paths: Vec<RoutePath>,
}

#[derive(Debug, Deserialize)]
pub struct RoutePath {
    /// Meters.
    pub distance: f64,
    /// Milliseconds.
    pub time: f64,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    pub points: PathPoints,
}

#[derive(Debug, Deserialize)]
pub struct Instruction {
    pub text: String,
}

/// Unencoded geometry. Each entry is `[lon, lat]`, optionally followed by
/// elevation.
#[derive(Debug, Deserialize)]
pub struct PathPoints {
    pub coordinates: Vec<Vec<f64>>,
}
