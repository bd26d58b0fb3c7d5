//! HTTP client for the GraphHopper geocode and route APIs.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::error::{ApiErrorPayload, ProviderError};
use super::provider::RoutingProvider;
use super::types::{GeocodeResponse, RouteResponse};
use crate::config::ProviderConfig;
use crate::models::Coordinate;

#[derive(Clone)]
pub struct GraphHopperClient {
    inner: reqwest::Client,
    base: Url,
    api_key: Option<String>,
    locale: String,
}

impl GraphHopperClient {
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        // Every request is bounded; a stalled upstream surfaces as ProviderError::Timeout.
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = base
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", config.base_url, e))?;

        Ok(Self {
            inner,
            base,
            api_key: config.api_key.clone(),
            locale: config.locale.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base
            .join(path)
            .map_err(|e| ProviderError::Url(format!("error joining url: {e}")))
    }

    fn with_common_params(
        &self,
        mut params: Vec<(&'static str, String)>,
    ) -> Vec<(&'static str, String)> {
        params.push(("locale", self.locale.clone()));
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&'static str, String)],
    ) -> Result<T, ProviderError> {
        let response = self.inner.get(url).query(params).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorPayload>(&text)
                .map(|payload| payload.message)
                .unwrap_or(text);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::debug!("Unparseable provider body: {text}");
            ProviderError::Decode(e)
        })
    }
}

#[async_trait]
impl RoutingProvider for GraphHopperClient {
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse, ProviderError> {
        log::debug!("[PROVIDER] geocode \"{query}\"");
        let url = self.endpoint("geocode")?;
        let params = self.with_common_params(vec![("q", query.to_string())]);
        self.get_json(url, &params).await
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteResponse, ProviderError> {
        log::debug!("[PROVIDER] route {origin} -> {destination}");
        let url = self.endpoint("route")?;
        let params = self.with_common_params(vec![
            ("point", origin.to_string()),
            ("point", destination.to_string()),
            ("vehicle", "foot".to_string()),
            ("points_encoded", "false".to_string()),
        ]);
        self.get_json(url, &params).await
    }
}
