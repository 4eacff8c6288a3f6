//! Place types and provider response shapes.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// Fallback label when reverse geocoding yields nothing usable.
pub const CURRENT_LOCATION: &str = "Current Location";

/// Maximum number of address parts in a reverse-geocoded label.
const MAX_LABEL_PARTS: usize = 4;

/// A place returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceCandidate {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// The candidate's position, if it is a valid coordinate.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude, self.longitude).ok()
    }
}

/// A human-readable description of a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDescriptor {
    /// Address-like label, most specific part first.
    pub label: String,
    pub locality: Option<String>,
    pub region: Option<String>,
}

impl PlaceDescriptor {
    /// Descriptor used when nothing is known about a location.
    pub fn unknown() -> Self {
        Self {
            label: CURRENT_LOCATION.to_string(),
            locality: None,
            region: None,
        }
    }
}

/// One result of a Nominatim search.
///
/// Nominatim returns coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl NominatimPlace {
    /// Convert to a candidate, dropping results with unusable coordinates.
    pub fn into_candidate(self) -> Option<PlaceCandidate> {
        let latitude: f64 = self.lat.trim().parse().ok()?;
        let longitude: f64 = self.lon.trim().parse().ok()?;
        let candidate = PlaceCandidate::new(self.display_name, latitude, longitude);
        candidate.coordinate().map(|_| candidate)
    }
}

/// Response of the BigDataCloud client-side reverse geocoder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocodeResponse {
    pub locality: Option<String>,
    pub city: Option<String>,
    pub principal_subdivision: Option<String>,
    #[serde(default)]
    pub locality_info: LocalityInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalityInfo {
    #[serde(default)]
    pub administrative: Vec<NamedArea>,
    #[serde(default)]
    pub informative: Vec<NamedArea>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedArea {
    pub name: Option<String>,
}

impl ReverseGeocodeResponse {
    /// Build a descriptor from the most specific address parts available.
    ///
    /// Parts, in order: first informative area; administrative entry 4
    /// (else 3); administrative entry 2; locality (else city); principal
    /// subdivision. At most four parts are kept.
    pub fn into_descriptor(self) -> PlaceDescriptor {
        let informative = area_name(&self.locality_info.informative, 0);
        let neighbourhood = area_name(&self.locality_info.administrative, 4)
            .or_else(|| area_name(&self.locality_info.administrative, 3));
        let district = area_name(&self.locality_info.administrative, 2);
        let locality = non_empty(self.locality.as_deref()).or_else(|| non_empty(self.city.as_deref()));
        let region = non_empty(self.principal_subdivision.as_deref());

        let parts: Vec<&str> = [informative, neighbourhood, district, locality, region]
            .into_iter()
            .flatten()
            .take(MAX_LABEL_PARTS)
            .collect();

        let label = if parts.is_empty() {
            CURRENT_LOCATION.to_string()
        } else {
            parts.join(", ")
        };

        PlaceDescriptor {
            label,
            locality: locality.map(str::to_string),
            region: region.map(str::to_string),
        }
    }
}

fn area_name(areas: &[NamedArea], index: usize) -> Option<&str> {
    areas.get(index).and_then(|a| non_empty(a.name.as_deref()))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
