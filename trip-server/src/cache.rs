//! Caching layer for geocoding responses.
//!
//! Place search backs an autocomplete box, so the same query tends to be
//! sent many times in quick succession. Concurrent lookups of one key are
//! coalesced into a single upstream request, and failures are not cached.
//!
//! Reverse lookups are keyed by coordinates rounded to about a metre.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;
use crate::geocode::{GeocodeError, Geocoder, PlaceCandidate, PlaceDescriptor};

/// Cache key for reverse lookups: coordinates in units of 1e-5 degrees.
type ReverseKey = (i64, i64);

/// Cached search result list.
type SearchEntry = Arc<Vec<PlaceCandidate>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per lookup kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 1000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and is itself one.
pub struct CachedGeocoder<G> {
    inner: G,
    searches: MokaCache<String, SearchEntry>,
    reverses: MokaCache<ReverseKey, PlaceDescriptor>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let reverses = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            searches,
            reverses,
        }
    }

    /// Access the wrapped geocoder.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    async fn cached_search(&self, query: &str) -> Result<Vec<PlaceCandidate>, GeocodeError> {
        let key = search_key(query);
        let entry = self
            .searches
            .try_get_with(key, async {
                self.inner.search_places(query).await.map(Arc::new)
            })
            .await
            .map_err(GeocodeError::Shared)?;

        Ok(entry.as_ref().clone())
    }

    async fn cached_reverse(&self, at: Coordinate) -> Result<PlaceDescriptor, GeocodeError> {
        self.reverses
            .try_get_with(reverse_key(at), self.inner.reverse_geocode(at))
            .await
            .map_err(GeocodeError::Shared)
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.searches.entry_count() + self.reverses.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.searches.invalidate_all();
        self.reverses.invalidate_all();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn search_places<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PlaceCandidate>, GeocodeError>> {
        self.cached_search(query).boxed()
    }

    fn reverse_geocode(&self, at: Coordinate) -> BoxFuture<'_, Result<PlaceDescriptor, GeocodeError>> {
        self.cached_reverse(at).boxed()
    }
}

/// Queries differing only in case or surrounding whitespace share an entry.
fn search_key(query: &str) -> String {
    query.trim().to_lowercase()
}

fn reverse_key(at: Coordinate) -> ReverseKey {
    (
        (at.latitude() * 1e5).round() as i64,
        (at.longitude() * 1e5).round() as i64,
    )
}
