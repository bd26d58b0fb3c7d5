//! In-memory provider for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::ProviderError;
use super::provider::RoutingProvider;
use super::types::{GeoPoint, GeocodeHit, GeocodeResponse, RouteResponse};
use crate::models::Coordinate;

#[derive(Default)]
pub struct FakeProvider {
    places: Vec<(String, f64, f64)>,
    route: Option<serde_json::Value>,
    failing: bool,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geocoding hit. Repeated names yield several hits in insertion order.
    pub fn with_place(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.places.push((name.to_string(), lat, lng));
        self
    }

    /// Raw route response body returned for every route request.
    pub fn with_route(mut self, body: serde_json::Value) -> Self {
        self.route = Some(body);
        self
    }

    /// Answer every request with a 503.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> ProviderError {
        ProviderError::Status {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl RoutingProvider for FakeProvider {
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Self::unavailable());
        }

        let hits = self
            .places
            .iter()
            .filter(|(name, _, _)| name == query)
            .map(|&(_, lat, lng)| GeocodeHit {
                point: GeoPoint { lat, lng },
            })
            .collect();
        Ok(GeocodeResponse { hits })
    }

    async fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RouteResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.route {
            Some(body) if !self.failing => Ok(serde_json::from_value(body.clone())?),
            _ => Err(Self::unavailable()),
        }
    }
}
