//! In-memory geocoder for tests and offline development.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::Coordinate;

use super::Geocoder;
use super::error::GeocodeError;
use super::types::{PlaceCandidate, PlaceDescriptor};

/// A geocoder answering from canned data.
///
/// Searches match queries exactly. Unknown queries return no results.
/// Every call is recorded so tests can assert on what was asked.
#[derive(Debug, Default)]
pub struct MockGeocoder {
    places: HashMap<String, Vec<PlaceCandidate>>,
    descriptor: Option<PlaceDescriptor>,
    failing: bool,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `results`.
    pub fn with_results(mut self, query: impl Into<String>, results: Vec<PlaceCandidate>) -> Self {
        self.places.insert(query.into(), results);
        self
    }

    /// Answer every reverse lookup with `descriptor`.
    pub fn with_descriptor(mut self, descriptor: PlaceDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Fail every call with an API error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Search queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    fn record(&self, query: Option<&str>) -> Result<(), GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let (Some(query), Ok(mut queries)) = (query, self.queries.lock()) {
            queries.push(query.to_string());
        }
        if self.failing {
            return Err(GeocodeError::Api {
                status: 503,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Geocoder for MockGeocoder {
    fn search_places<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PlaceCandidate>, GeocodeError>> {
        let result = self
            .record(Some(query))
            .map(|()| self.places.get(query).cloned().unwrap_or_default());
        futures::future::ready(result).boxed()
    }

    fn reverse_geocode(&self, _at: Coordinate) -> BoxFuture<'_, Result<PlaceDescriptor, GeocodeError>> {
        let result = self
            .record(None)
            .map(|()| self.descriptor.clone().unwrap_or_else(PlaceDescriptor::unknown));
        futures::future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_known_queries() {
        let geocoder = MockGeocoder::new()
            .with_results("Pune, India", vec![PlaceCandidate::new("Pune", 18.52, 73.85)]);

        let results = geocoder.search_places("Pune, India").await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(geocoder.search_places("Goa").await.unwrap().is_empty());
        assert_eq!(geocoder.calls(), 2);
        assert_eq!(geocoder.queries(), vec!["Pune, India", "Goa"]);
    }

    #[tokio::test]
    async fn reverse_defaults_to_unknown() {
        let geocoder = MockGeocoder::new();
        let at = Coordinate::new(0.0, 0.0).unwrap();
        assert_eq!(
            geocoder.reverse_geocode(at).await.unwrap(),
            PlaceDescriptor::unknown()
        );
    }

    #[tokio::test]
    async fn failing_mock_errors() {
        let geocoder = MockGeocoder::new().failing();
        assert!(geocoder.search_places("anything").await.is_err());
        assert_eq!(geocoder.calls(), 1);
    }
}
