//! Place search and reverse geocoding.
//!
//! The [`Geocoder`] trait abstracts the provider. [`HttpGeocoder`] talks to
//! public services; [`MockGeocoder`] answers from canned data.

mod client;
mod error;
mod lookup;
mod mock;
mod types;

use futures::future::BoxFuture;

use crate::domain::Coordinate;

pub use client::{DEFAULT_REVERSE_URL, DEFAULT_SEARCH_URL, GeocodeConfig, HttpGeocoder};
pub use error::GeocodeError;
pub use lookup::{MIN_SUGGEST_QUERY_LEN, search_destination, shorten_place_name, suggest_places};
pub use mock::MockGeocoder;
pub use types::{
    CURRENT_LOCATION, LocalityInfo, NamedArea, NominatimPlace, PlaceCandidate, PlaceDescriptor,
    ReverseGeocodeResponse,
};

/// A source of place search results and location descriptions.
pub trait Geocoder: Send + Sync {
    /// Search for places matching free text.
    fn search_places<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PlaceCandidate>, GeocodeError>>;

    /// Describe the place at a coordinate.
    fn reverse_geocode(&self, at: Coordinate) -> BoxFuture<'_, Result<PlaceDescriptor, GeocodeError>>;
}
