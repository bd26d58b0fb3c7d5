//! Requests a walking route and normalizes the provider's answer.

use super::error::RouteError;
use super::provider::RoutingProvider;
use super::types::RouteResponse;
use crate::models::{Coordinate, RouteSummary};

/// Plan a walking route from `origin` to `destination`.
pub async fn plan(
    provider: &dyn RoutingProvider,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<RouteSummary, RouteError> {
    let response = provider
        .route(origin, destination)
        .await
        .inspect_err(|e| log::warn!("Routing {origin} -> {destination} failed: {e}"))?;

    normalize(response)
}

/// Convert a provider response into a [`RouteSummary`] using its first path.
pub fn normalize(response: RouteResponse) -> Result<RouteSummary, RouteError> {
    let path = response.paths.into_iter().next().ok_or(RouteError::NoPath)?;

    let geometry = path
        .points
        .coordinates
        .iter()
        .map(|point| lon_lat_to_coordinate(point))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteSummary {
        instructions: path.instructions.into_iter().map(|i| i.text).collect(),
        path: geometry,
        distance_km: round_to(path.distance / 1000.0, 2),
        duration_min: round_to(path.time / 60_000.0, 1),
    })
}

// Provider geometry is [lon, lat(, elevation)].
fn lon_lat_to_coordinate(point: &[f64]) -> Result<Coordinate, RouteError> {
    match *point {
        [lng, lat, ..] => {
            Coordinate::new(lat, lng).map_err(|e| RouteError::InvalidGeometry(e.to_string()))
        }
        _ => Err(RouteError::InvalidGeometry(format!(
            "expected [lon, lat], got {point:?}"
        ))),
    }
}

// Exact ties go to the even neighbour: 1.125 km reads as 1.12.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::routing::fake::FakeProvider;
    use crate::routing::error::ProviderError;

    fn single_path() -> serde_json::Value {
        json!({
            "paths": [{
                "distance": 5000,
                "time": 3_600_000,
                "instructions": [
                    {"text": "Continue onto Oxford Street"},
                    {"text": "Turn left onto Ring Road"},
                    {"text": "Arrive at destination"}
                ],
                "points": {"coordinates": [[-0.1870, 5.6037], [-0.1950, 5.5800], [-0.2057, 5.5600]]}
            }]
        })
    }

    #[tokio::test]
    async fn single_path_is_normalized() {
        let origin = Coordinate::new(5.6037, -0.1870).unwrap();
        let destination = Coordinate::new(5.5600, -0.2057).unwrap();
        let provider = FakeProvider::new().with_route(single_path());

        let route = plan(&provider, origin, destination).await.unwrap();

        assert_eq!(route.distance_km, 5.0);
        assert_eq!(route.duration_min, 60.0);
        assert_eq!(
            route.instructions,
            vec![
                "Continue onto Oxford Street",
                "Turn left onto Ring Road",
                "Arrive at destination"
            ]
        );
        // Geometry flipped to lat,lng and kept in order.
        assert_eq!(route.path.first(), Some(&origin));
        assert_eq!(route.path.last(), Some(&destination));
        assert_eq!(route.path[1].to_pair(), [5.58, -0.195]);
    }

    #[test]
    fn rounds_distance_and_duration() {
        let response: RouteResponse = serde_json::from_value(json!({
            "paths": [{
                "distance": 1234.567,
                "time": 1_000_000,
                "points": {"coordinates": []}
            }]
        }))
        .unwrap();

        let route = normalize(response).unwrap();
        assert_eq!(route.distance_km, 1.23);
        assert_eq!(route.duration_min, 16.7);
        assert!(route.instructions.is_empty());
    }

    #[test]
    fn ties_round_to_even() {
        let tie = |distance: f64, time: f64| {
            let response: RouteResponse = serde_json::from_value(json!({
                "paths": [{
                    "distance": distance,
                    "time": time,
                    "points": {"coordinates": []}
                }]
            }))
            .unwrap();
            normalize(response).unwrap()
        };

        let route = tie(1125.0, 15_000.0);
        assert_eq!(route.distance_km, 1.12);
        assert_eq!(route.duration_min, 0.2);

        let route = tie(625.0, 45_000.0);
        assert_eq!(route.distance_km, 0.62);
        assert_eq!(route.duration_min, 0.8);
    }

    #[test]
    fn zero_paths_is_no_path() {
        let response: RouteResponse = serde_json::from_value(json!({"paths": []})).unwrap();
        assert!(matches!(normalize(response), Err(RouteError::NoPath)));

        let response: RouteResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(normalize(response), Err(RouteError::NoPath)));
    }

    #[test]
    fn elevation_is_ignored_and_short_points_rejected() {
        let with_elevation: RouteResponse = serde_json::from_value(json!({
            "paths": [{"distance": 1, "time": 1, "points": {"coordinates": [[-0.19, 5.6, 40.0]]}}]
        }))
        .unwrap();
        assert_eq!(normalize(with_elevation).unwrap().path[0].to_pair(), [5.6, -0.19]);

        let short: RouteResponse = serde_json::from_value(json!({
            "paths": [{"distance": 1, "time": 1, "points": {"coordinates": [[5.6]]}}]
        }))
        .unwrap();
        assert!(matches!(normalize(short), Err(RouteError::InvalidGeometry(_))));
    }

    #[tokio::test]
    async fn provider_failure_is_route_error() {
        let provider = FakeProvider::new().failing();
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let err = plan(&provider, a, a).await.unwrap_err();
        assert!(matches!(
            err,
            RouteError::Upstream(ProviderError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_route_error() {
        let provider = FakeProvider::new().with_route(json!({"paths": "nope"}));
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let err = plan(&provider, a, a).await.unwrap_err();
        assert!(matches!(err, RouteError::Upstream(ProviderError::Decode(_))));
    }
}
