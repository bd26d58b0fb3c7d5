//! Turns user input into a coordinate.

use super::error::ResolveError;
use super::provider::RoutingProvider;
use crate::models::Coordinate;

/// Parse a `"lat,lon"` string. Whitespace around each number is ignored.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, ResolveError> {
    let malformed = |reason: String| ResolveError::MalformedCoordinate {
        input: input.to_string(),
        reason,
    };

    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| malformed("expected a comma between latitude and longitude".to_string()))?;
    if lng.contains(',') {
        return Err(malformed("expected exactly one comma".to_string()));
    }

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| malformed(format!("latitude: {e}")))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| malformed(format!("longitude: {e}")))?;

    Coordinate::new(lat, lng).map_err(|e| malformed(e.to_string()))
}

/// Resolve raw coordinates or a place name.
///
/// Input containing a comma is always treated as coordinates and never
/// reaches the provider. Anything else is geocoded and the first hit wins.
pub async fn resolve(
    provider: &dyn RoutingProvider,
    input: &str,
) -> Result<Coordinate, ResolveError> {
    if input.contains(',') {
        return parse_coordinate(input);
    }

    let query = input.trim();
    let not_found = |reason: String| ResolveError::NotFound {
        query: query.to_string(),
        reason,
    };

    if query.is_empty() {
        return Err(not_found("no place name given".to_string()));
    }

    let response = provider.geocode(query).await.map_err(|e| {
        log::warn!("Geocoding \"{query}\" failed: {e}");
        not_found(e.to_string())
    })?;

    let hit = response
        .hits
        .first()
        .ok_or_else(|| not_found("no matching places".to_string()))?;

    Coordinate::new(hit.point.lat, hit.point.lng).map_err(|e| not_found(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::fake::FakeProvider;

    #[tokio::test]
    async fn coordinates_resolve_without_provider_call() {
        let provider = FakeProvider::new();

        let current = resolve(&provider, "5.6037,-0.1870").await.unwrap();
        let destination = resolve(&provider, " 5.5600 , -0.2057 ").await.unwrap();

        assert_eq!(current.lat(), 5.6037);
        assert_eq!(current.lng(), -0.1870);
        assert_eq!(destination.lat(), 5.56);
        assert_eq!(destination.lng(), -0.2057);
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        for input in ["abc,1.0", "1.0,", "1,2,3", "91,0", "0,181", "nan,0"] {
            assert!(
                matches!(
                    parse_coordinate(input),
                    Err(ResolveError::MalformedCoordinate { .. })
                ),
                "{input} should be malformed"
            );
        }
    }

    #[tokio::test]
    async fn place_names_take_first_hit() {
        let provider = FakeProvider::new()
            .with_place("Accra Mall", 5.6217, -0.1733)
            .with_place("Accra Mall", 6.0, 0.0);

        let coord = resolve(&provider, "  Accra Mall ").await.unwrap();
        assert_eq!(coord, Coordinate::new(5.6217, -0.1733).unwrap());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn unknown_place_is_not_found() {
        let provider = FakeProvider::new();
        let err = resolve(&provider, "Atlantis").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { ref query, .. } if query == "Atlantis"));
    }

    #[tokio::test]
    async fn provider_failure_is_not_found() {
        let provider = FakeProvider::new().failing();
        let err = resolve(&provider, "Legon").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_input_skips_provider() {
        let provider = FakeProvider::new();
        assert!(resolve(&provider, "   ").await.is_err());
        assert_eq!(provider.calls(), 0);
    }
}
