//! Directions provider error types.

use std::time::Duration;

/// Errors that can occur when asking the provider for walking directions.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, client timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider answered but had no usable route
    #[error("no walking route (provider status {0})")]
    NoRoute(String),

    /// The call did not finish within the allotted time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Provider credentials are missing
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DirectionsError::Api {
            status: 403,
            message: "Forbidden".into(),
        };
        assert_eq!(err.to_string(), "API error 403: Forbidden");

        let err = DirectionsError::NoRoute("ZERO_RESULTS".into());
        assert_eq!(
            err.to_string(),
            "no walking route (provider status ZERO_RESULTS)"
        );

        let err = DirectionsError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "timed out after 10s");
    }
}
