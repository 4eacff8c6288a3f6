//! HTTP geocoder backed by Nominatim (search) and BigDataCloud (reverse).

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::domain::Coordinate;

use super::Geocoder;
use super::error::GeocodeError;
use super::types::{NominatimPlace, PlaceCandidate, PlaceDescriptor, ReverseGeocodeResponse};

/// Default place search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default reverse geocoding endpoint.
pub const DEFAULT_REVERSE_URL: &str =
    "https://api.bigdatacloud.net/data/reverse-geocode-client";

const DEFAULT_USER_AGENT: &str = concat!("trip-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    pub search_url: String,
    pub reverse_url: String,
    /// ISO 3166-1 alpha-2 code searches are restricted to.
    pub country_code: String,
    /// Country name appended to free-text queries.
    pub country_name: String,
    pub user_agent: String,
    /// Maximum results per search
    pub result_limit: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodeConfig {
    pub fn new() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            reverse_url: DEFAULT_REVERSE_URL.to_string(),
            country_code: "in".to_string(),
            country_name: "India".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            result_limit: 5,
            timeout_secs: 10,
        }
    }

    /// Set a custom search URL (for testing).
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Set a custom reverse geocoding URL (for testing).
    pub fn with_reverse_url(mut self, url: impl Into<String>) -> Self {
        self.reverse_url = url.into();
        self
    }

    pub fn with_country(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.country_code = code.into();
        self.country_name = name.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Geocoder that calls public HTTP services.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    http: reqwest::Client,
    config: GeocodeConfig,
}

impl HttpGeocoder {
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();

        // Nominatim's usage policy requires an identifying User-Agent
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeocodeConfig {
        &self.config
    }

    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodeError> {
        let limit = self.config.result_limit.to_string();
        let request = self.http.get(&self.config.search_url).query(&[
            ("format", "json"),
            ("q", query),
            ("limit", limit.as_str()),
            ("addressdetails", "1"),
            ("countrycodes", self.config.country_code.as_str()),
        ]);

        let places: Vec<NominatimPlace> = fetch_json(request).await?;
        let candidates: Vec<PlaceCandidate> = places
            .into_iter()
            .filter_map(NominatimPlace::into_candidate)
            .collect();

        tracing::debug!(query, results = candidates.len(), "place search");
        Ok(candidates)
    }

    async fn reverse(&self, at: Coordinate) -> Result<PlaceDescriptor, GeocodeError> {
        let latitude = at.latitude().to_string();
        let longitude = at.longitude().to_string();
        let request = self.http.get(&self.config.reverse_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("localityLanguage", "en"),
        ]);

        let response: ReverseGeocodeResponse = fetch_json(request).await?;
        let descriptor = response.into_descriptor();

        tracing::debug!(%at, label = %descriptor.label, "reverse geocode");
        Ok(descriptor)
    }
}

impl Geocoder for HttpGeocoder {
    fn search_places<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PlaceCandidate>, GeocodeError>> {
        self.search(query).boxed()
    }

    fn reverse_geocode(&self, at: Coordinate) -> BoxFuture<'_, Result<PlaceDescriptor, GeocodeError>> {
        self.reverse(at).boxed()
    }
}

async fn fetch_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, GeocodeError> {
    let response = request.send().await?;
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GeocodeError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
        message: e.to_string(),
    })
}
