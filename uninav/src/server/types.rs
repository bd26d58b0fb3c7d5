//! Request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, RouteSummary};

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub current: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub instructions: Vec<String>,
    pub summary: RouteSummaryBody,
    /// `[lat, lng]` pairs.
    pub route_coords: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummaryBody {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl From<RouteSummary> for RouteResponse {
    fn from(route: RouteSummary) -> Self {
        Self {
            route_coords: route.path.iter().map(|c| c.to_pair()).collect(),
            summary: RouteSummaryBody {
                distance_km: route.distance_km,
                duration_min: route.duration_min,
            },
            instructions: route.instructions,
        }
    }
}

/// Geometry of the last planned route, for the map page.
#[derive(Debug, Serialize)]
pub struct LastRouteResponse {
    pub route_coords: Vec<[f64; 2]>,
    pub destination: Option<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct ErrorList {
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Legacy body carrying the position as a `"lat,lon"` string.
#[derive(Debug, Deserialize)]
pub struct SaveLocationRequest {
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PositionAccepted {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_to_destination_meters: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PositionRejected {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

impl PositionResponse {
    pub const fn new(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            lat: coordinate.lat(),
            lng: coordinate.lng(),
            timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
