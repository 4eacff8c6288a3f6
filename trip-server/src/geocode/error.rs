//! Geocoding error types.

use std::sync::Arc;

/// Errors from place search and reverse geocoding.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the provider
    #[error("rate limited by geocoding provider")]
    RateLimited,

    /// Failed to parse the response body
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The query was blank
    #[error("search query is empty")]
    EmptyQuery,

    /// A failure shared between coalesced requests
    #[error("{0}")]
    Shared(Arc<GeocodeError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = GeocodeError::Shared(Arc::new(GeocodeError::RateLimited));
        assert_eq!(err.to_string(), "rate limited by geocoding provider");

        assert_eq!(GeocodeError::EmptyQuery.to_string(), "search query is empty");
    }
}
