//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Coordinate, TransportMode, TripId, TripPurpose, TripRecord, distance_km, round_to,
};
use crate::geocode::PlaceCandidate;
use crate::pricing::CostQuery;

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response to a saved trip.
#[derive(Debug, Serialize)]
pub struct TripCreatedResponse {
    pub id: TripId,
    pub message: String,
}

/// Response to a single delete.
#[derive(Debug, Serialize)]
pub struct TripDeletedResponse {
    pub message: String,
    pub id: TripId,
}

/// Response to deleting every trip.
#[derive(Debug, Serialize)]
pub struct TripsClearedResponse {
    pub message: String,
    pub count: usize,
}

/// Downloadable snapshot of every trip.
#[derive(Debug, Serialize)]
pub struct TripExport {
    pub trips: Vec<TripRecord>,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
}

impl TripExport {
    /// File name offered to the browser for this export.
    pub fn file_name(&self) -> String {
        format!("trips_export_{}.json", self.export_date.format("%Y-%m-%d"))
    }
}

/// Request to price a trip.
///
/// When `distance_km` is absent it is derived from `origin` and
/// `destination`. `date` defaults to today.
#[derive(Debug, Default, Deserialize)]
pub struct EstimateRequest {
    pub mode: Option<TransportMode>,
    pub distance_km: Option<f64>,
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    #[serde(default)]
    pub companions: u32,
    pub purpose: Option<TripPurpose>,
    pub date: Option<NaiveDate>,
}

impl EstimateRequest {
    /// The distance to price, preferring an explicit value.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
            .or_else(|| Some(round_to(distance_km(self.origin?, self.destination?), 2)))
    }

    pub fn cost_query(&self) -> CostQuery {
        CostQuery {
            mode: self.mode,
            distance_km: self.distance_km(),
            companions: self.companions,
            purpose: self.purpose,
        }
    }
}

/// Estimated distance and cost. A cost of 0 means no estimate.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub distance_km: Option<f64>,
    pub cost: u64,
}

/// Free-text place query.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceQuery {
    #[serde(default)]
    pub q: String,
}

/// Places matching a query.
#[derive(Debug, Serialize)]
pub struct PlaceSearchResponse {
    pub places: Vec<PlaceCandidate>,
}

/// Reverse geocode request.
///
/// Kept as strings so malformed numbers get the JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct ReverseQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl ReverseQuery {
    /// Parse into a validated coordinate.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.lat.as_deref()?.trim().parse().ok()?;
        let lng = self.lng.as_deref()?.trim().parse().ok()?;
        Coordinate::new(lat, lng).ok()
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_prefers_explicit_distance() {
        let req: EstimateRequest = serde_json::from_str(
            r#"{"mode": "car", "distance_km": 10, "origin": {"lat": 0, "lng": 0}, "destination": {"lat": 1, "lng": 0}}"#,
        )
        .unwrap();
        assert_eq!(req.distance_km(), Some(10.0));
    }

    #[test]
    fn estimate_derives_distance_from_coordinates() {
        let req: EstimateRequest = serde_json::from_str(
            r#"{"mode": "train", "origin": {"lat": 0, "lng": 0}, "destination": {"lat": 1, "lng": 0}}"#,
        )
        .unwrap();
        assert_eq!(req.distance_km(), Some(111.19));
        assert_eq!(req.cost_query().companions, 0);
    }

    #[test]
    fn estimate_without_distance_or_coordinates() {
        let req: EstimateRequest = serde_json::from_str(r#"{"mode": "bus"}"#).unwrap();
        assert_eq!(req.distance_km(), None);
    }

    #[test]
    fn reverse_query_validates() {
        let query = ReverseQuery {
            lat: Some("18.52".into()),
            lng: Some(" 73.85 ".into()),
        };
        assert!(query.coordinate().is_some());

        let query = ReverseQuery {
            lat: Some("north".into()),
            lng: Some("73.85".into()),
        };
        assert!(query.coordinate().is_none());

        let query = ReverseQuery {
            lat: Some("95".into()),
            lng: Some("0".into()),
        };
        assert!(query.coordinate().is_none());

        assert!(ReverseQuery::default().coordinate().is_none());
    }

    #[test]
    fn export_file_name_uses_date() {
        let export = TripExport {
            trips: Vec::new(),
            export_date: DateTime::from_timestamp(1_760_000_000, 0).unwrap(),
        };
        assert_eq!(export.file_name(), "trips_export_2025-10-09.json");

        let value = serde_json::to_value(&export).unwrap();
        assert!(value.get("exportDate").is_some());
    }
}
