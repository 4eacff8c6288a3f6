//! Trip records and submission payloads.
//!
//! A [`TripPayload`] is what a client submits: every field is optional.
//! Resolving it fills in the submission defaults and yields a [`NewTrip`],
//! which the store turns into a [`TripRecord`] by assigning an id and
//! creation time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use super::coordinate::{is_valid_latitude, is_valid_longitude};
use super::mode::TransportMode;
use super::purpose::{Frequency, TripPurpose};

/// Place name used when none was captured.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Distance recorded when none (or zero) was captured, in kilometres.
pub const DEFAULT_DISTANCE_KM: f64 = 1.0;

/// Exclusive upper bound for generated trip numbers.
pub const GENERATED_TRIP_NUMBER_BOUND: u32 = 1000;

/// Store-assigned identifier of a persisted trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub u64);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TripId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TripId)
    }
}

/// A fully-resolved trip, ready to be persisted.
///
/// Field names match the columns of the trips table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    pub trip_number: u32,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub origin_place: String,
    pub start_time: NaiveDateTime,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub destination_place: String,
    pub end_time: NaiveDateTime,
    pub mode: TransportMode,
    pub distance: f64,
    pub purpose: TripPurpose,
    pub companions: u32,
    pub frequency: Frequency,
    pub cost: f64,
}

/// A persisted trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: TripId,
    #[serde(flatten)]
    pub trip: NewTrip,
    pub created_at: DateTime<Utc>,
}

/// A trip as submitted by a client, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPayload {
    pub trip_number: Option<u32>,
    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,
    pub origin_place: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_time: Option<NaiveDateTime>,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,
    pub destination_place: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_time: Option<NaiveDateTime>,
    pub mode: Option<TransportMode>,
    pub distance: Option<f64>,
    pub purpose: Option<TripPurpose>,
    pub companions: Option<u32>,
    pub frequency: Option<Frequency>,
    pub cost: Option<f64>,
}

impl TripPayload {
    /// Fill every missing field with its submission default.
    ///
    /// Zero, blank, and non-finite values count as missing, except for
    /// companions where zero is already the default. So do out-of-range
    /// coordinates and negative distances or costs.
    pub fn resolve(self, now: NaiveDateTime, rng: &mut impl Rng) -> NewTrip {
        let trip_number = self
            .trip_number
            .filter(|n| *n > 0)
            .unwrap_or_else(|| rng.gen_range(0..GENERATED_TRIP_NUMBER_BOUND));

        NewTrip {
            trip_number,
            origin_lat: self.origin_lat.filter(|v| is_valid_latitude(*v)).unwrap_or(0.0),
            origin_lng: self.origin_lng.filter(|v| is_valid_longitude(*v)).unwrap_or(0.0),
            origin_place: place_or_unknown(self.origin_place),
            start_time: self.start_time.unwrap_or(now),
            destination_lat: self
                .destination_lat
                .filter(|v| is_valid_latitude(*v))
                .unwrap_or(0.0),
            destination_lng: self
                .destination_lng
                .filter(|v| is_valid_longitude(*v))
                .unwrap_or(0.0),
            destination_place: place_or_unknown(self.destination_place),
            end_time: self.end_time.unwrap_or(now),
            mode: self.mode.unwrap_or(TransportMode::Car),
            distance: self
                .distance
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(DEFAULT_DISTANCE_KM),
            purpose: self.purpose.unwrap_or(TripPurpose::Other),
            companions: self.companions.unwrap_or(0),
            frequency: self.frequency.unwrap_or(Frequency::Rarely),
            cost: self
                .cost
                .filter(|c| c.is_finite() && *c >= 0.0)
                .unwrap_or(0.0),
        }
    }
}

fn place_or_unknown(place: Option<String>) -> String {
    place
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

/// Parse a timestamp as produced by browsers and by this server.
///
/// Accepts `datetime-local` input values (`2026-10-18T09:30`), full
/// ISO-8601 local times with seconds, and RFC 3339 instants (converted to
/// UTC wall time).
///
/// # Examples
///
/// ```
/// use trip_server::domain::parse_timestamp;
///
/// assert!(parse_timestamp("2026-10-18T09:30").is_some());
/// assert!(parse_timestamp("2026-10-18T09:30:15").is_some());
/// assert!(parse_timestamp("2026-10-18T09:30:15.250Z").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s:?}"))),
    }
}
