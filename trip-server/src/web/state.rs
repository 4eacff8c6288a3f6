//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::Geocoder;
use crate::store::TripStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Trip persistence
    pub store: Arc<dyn TripStore>,

    /// Place search and reverse geocoding
    pub geocoder: Arc<dyn Geocoder>,

    /// Country appended to free-text place queries
    pub country: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        store: impl TripStore + 'static,
        geocoder: impl Geocoder + 'static,
        country: &str,
    ) -> Self {
        Self {
            store: Arc::new(store),
            geocoder: Arc::new(geocoder),
            country: Arc::from(country),
        }
    }
}
