//! Directions API HTTP client.

use crate::domain::Coord;

use super::error::DirectionsError;
use super::types::{DirectionsResponse, WalkingDirections};

/// Default base URL for the Directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for walking directions.
///
/// Makes a single attempt per call; callers decide what a failure means.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectionsClient {
    /// Create a new Directions client.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Fetch walking directions between two points.
    pub async fn fetch_walking(
        &self,
        from: Coord,
        to: Coord,
    ) -> Result<WalkingDirections, DirectionsError> {
        if !self.is_configured() {
            return Err(DirectionsError::NotConfigured(
                "DIRECTIONS_API_KEY is not set".to_string(),
            ));
        }

        let url = format!("{}/maps/api/directions/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", format_coord(from)),
                ("destination", format_coord(to)),
                ("mode", "walking".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
            })?;

        parsed.into_walking_directions()
    }
}

/// Format a coordinate as the provider's `lat,lon` parameter.
fn format_coord(c: Coord) -> String {
    format!("{},{}", c.lat, c.lon)
}
