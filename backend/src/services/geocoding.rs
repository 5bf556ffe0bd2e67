//! Network geocoding client.
//!
//! Speaks the Google Geocoding JSON shape:
//! `{"results": [{"geometry": {"location": {"lat": .., "lng": ..}}}], ..}`.
//! Only the first result is ever used.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::models::Coordinates;

/// Default request timeout for a geocoding lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Reasons a geocoding lookup produced no coordinate.
///
/// Never leaves the location resolver.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    Transport(String),

    #[error("Geocoding request timed out")]
    Timeout,

    #[error("Geocoding service returned HTTP {0}")]
    Status(u16),

    #[error("Geocoding response could not be decoded: {0}")]
    Malformed(String),

    #[error("No geocoding results for address")]
    NoResults,
}

/// Anything that can turn an address into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up an address. Implementations make at most one attempt.
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodingError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Extract the first result's coordinates from a response body.
pub fn parse_response(body: &str) -> Result<Coordinates, GeocodingError> {
    let parsed: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeocodingError::Malformed(e.to_string()))?;

    parsed
        .results
        .into_iter()
        .next()
        .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))
        .ok_or(GeocodingError::NoResults)
}

/// Geocoder backed by the Google Geocoding HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeocodingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodingError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodingError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;
        debug!(address, bytes = body.len(), "geocoding response received");

        parse_response(&body)
    }
}
