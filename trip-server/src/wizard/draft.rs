//! The in-progress trip owned by a wizard session.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{
    Coordinate, Frequency, TransportMode, TripPayload, TripPurpose, distance_km,
    is_valid_latitude, is_valid_longitude, round_to,
};
use crate::pricing::CostQuery;

use super::stage::{Field, Stage};

/// Which end of the trip a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Origin,
    Destination,
}

/// Location fields for one end of the trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndpointDraft {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place: Option<String>,
    /// Start time for the origin, end time for the destination.
    pub time: Option<NaiveDateTime>,
}

impl EndpointDraft {
    /// The validated coordinate, if both components are present and in range.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude?, self.longitude?).ok()
    }
}

/// Where the draft's cost came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    Estimated,
    Manual,
}

/// A single field edit.
///
/// `None` clears the field. Non-finite numbers are treated as cleared, as
/// are negative distances and costs.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    TripNumber(Option<u32>),
    OriginLatitude(Option<f64>),
    OriginLongitude(Option<f64>),
    OriginPlace(Option<String>),
    StartTime(Option<NaiveDateTime>),
    DestinationLatitude(Option<f64>),
    DestinationLongitude(Option<f64>),
    DestinationPlace(Option<String>),
    EndTime(Option<NaiveDateTime>),
    Mode(Option<TransportMode>),
    DistanceKm(Option<f64>),
    Purpose(Option<TripPurpose>),
    Companions(Option<u32>),
    Frequency(Option<Frequency>),
    Cost(Option<f64>),
}

impl FieldUpdate {
    /// The field this update writes.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::TripNumber(_) => Field::TripNumber,
            FieldUpdate::OriginLatitude(_) => Field::OriginLatitude,
            FieldUpdate::OriginLongitude(_) => Field::OriginLongitude,
            FieldUpdate::OriginPlace(_) => Field::OriginPlace,
            FieldUpdate::StartTime(_) => Field::StartTime,
            FieldUpdate::DestinationLatitude(_) => Field::DestinationLatitude,
            FieldUpdate::DestinationLongitude(_) => Field::DestinationLongitude,
            FieldUpdate::DestinationPlace(_) => Field::DestinationPlace,
            FieldUpdate::EndTime(_) => Field::EndTime,
            FieldUpdate::Mode(_) => Field::Mode,
            FieldUpdate::DistanceKm(_) => Field::DistanceKm,
            FieldUpdate::Purpose(_) => Field::Purpose,
            FieldUpdate::Companions(_) => Field::Companions,
            FieldUpdate::Frequency(_) => Field::Frequency,
            FieldUpdate::Cost(_) => Field::Cost,
        }
    }
}

/// Trip fields collected so far. Every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripDraft {
    pub trip_number: Option<u32>,
    pub origin: EndpointDraft,
    pub destination: EndpointDraft,
    pub mode: Option<TransportMode>,
    pub distance_km: Option<f64>,
    pub purpose: Option<TripPurpose>,
    pub companions: Option<u32>,
    pub frequency: Option<Frequency>,
    pub cost: Option<f64>,
    pub cost_source: Option<CostSource>,
}

impl TripDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> &EndpointDraft {
        match endpoint {
            Endpoint::Origin => &self.origin,
            Endpoint::Destination => &self.destination,
        }
    }

    pub fn endpoint_mut(&mut self, endpoint: Endpoint) -> &mut EndpointDraft {
        match endpoint {
            Endpoint::Origin => &mut self.origin,
            Endpoint::Destination => &mut self.destination,
        }
    }

    /// Write a field, without any recomputation.
    pub(crate) fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::TripNumber(v) => self.trip_number = v,
            FieldUpdate::OriginLatitude(v) => self.origin.latitude = finite(v),
            FieldUpdate::OriginLongitude(v) => self.origin.longitude = finite(v),
            FieldUpdate::OriginPlace(v) => self.origin.place = non_blank(v),
            FieldUpdate::StartTime(v) => self.origin.time = v,
            FieldUpdate::DestinationLatitude(v) => self.destination.latitude = finite(v),
            FieldUpdate::DestinationLongitude(v) => self.destination.longitude = finite(v),
            FieldUpdate::DestinationPlace(v) => self.destination.place = non_blank(v),
            FieldUpdate::EndTime(v) => self.destination.time = v,
            FieldUpdate::Mode(v) => self.mode = v,
            FieldUpdate::DistanceKm(v) => self.distance_km = non_negative(v),
            FieldUpdate::Purpose(v) => self.purpose = v,
            FieldUpdate::Companions(v) => self.companions = v,
            FieldUpdate::Frequency(v) => self.frequency = v,
            FieldUpdate::Cost(v) => {
                self.cost = non_negative(v);
                self.cost_source = self.cost.map(|_| CostSource::Manual);
            }
        }
    }

    /// Returns true if the field holds a usable value.
    ///
    /// An out-of-range latitude or longitude counts as empty.
    pub fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::TripNumber => self.trip_number.is_some(),
            Field::OriginLatitude => self.origin.latitude.is_some_and(is_valid_latitude),
            Field::OriginLongitude => self.origin.longitude.is_some_and(is_valid_longitude),
            Field::OriginPlace => self.origin.place.is_some(),
            Field::StartTime => self.origin.time.is_some(),
            Field::DestinationLatitude => self.destination.latitude.is_some_and(is_valid_latitude),
            Field::DestinationLongitude => {
                self.destination.longitude.is_some_and(is_valid_longitude)
            }
            Field::DestinationPlace => self.destination.place.is_some(),
            Field::EndTime => self.destination.time.is_some(),
            Field::Mode => self.mode.is_some(),
            Field::DistanceKm => self.distance_km.is_some(),
            Field::Purpose => self.purpose.is_some(),
            Field::Companions => self.companions.is_some(),
            Field::Frequency => self.frequency.is_some(),
            Field::Cost => self.cost.is_some(),
        }
    }

    /// Required fields of `stage` that are still empty, in form order.
    pub fn missing_fields(&self, stage: Stage) -> Vec<Field> {
        stage
            .required_fields()
            .iter()
            .copied()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    /// Distance between origin and destination, rounded to 0.01 km.
    ///
    /// `None` until all four coordinates are present and valid.
    pub fn derived_distance_km(&self) -> Option<f64> {
        let from = self.origin.coordinate()?;
        let to = self.destination.coordinate()?;
        Some(round_to(distance_km(from, to), 2))
    }

    /// The estimator inputs held by the draft.
    pub fn cost_query(&self) -> CostQuery {
        CostQuery {
            mode: self.mode,
            distance_km: self.distance_km,
            companions: self.companions.unwrap_or(0),
            purpose: self.purpose,
        }
    }

    /// Snapshot the draft as a submission payload.
    pub fn to_payload(&self) -> TripPayload {
        TripPayload {
            trip_number: self.trip_number,
            origin_lat: self.origin.latitude,
            origin_lng: self.origin.longitude,
            origin_place: self.origin.place.clone(),
            start_time: self.origin.time,
            destination_lat: self.destination.latitude,
            destination_lng: self.destination.longitude,
            destination_place: self.destination.place.clone(),
            end_time: self.destination.time,
            mode: self.mode,
            distance: self.distance_km,
            purpose: self.purpose,
            companions: self.companions,
            frequency: self.frequency,
            cost: self.cost,
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    finite(value).filter(|v| *v >= 0.0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
