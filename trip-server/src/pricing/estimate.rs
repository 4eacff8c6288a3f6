//! Trip cost estimation.
//!
//! A static heuristic: a per-kilometre base rate for the mode, followed by
//! a fixed pipeline of modifiers. The modifiers compound on a running
//! total, so their order is part of the result.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::{TransportMode, TripPurpose};

/// Flat fare added to every flight.
pub const FLIGHT_BASE_FARE: f64 = 4500.0;

/// Per-kilometre rate for flights, on top of [`FLIGHT_BASE_FARE`].
pub const FLIGHT_RATE_PER_KM: f64 = 3.0;

/// Fractional increase per companion for shared vehicles.
pub const COMPANION_SURCHARGE: f64 = 0.3;

/// Amount knocked off walking and cycling trips.
pub const ECO_DISCOUNT: f64 = 20.0;

/// Multiplier for road trips on Saturdays and Sundays.
pub const WEEKEND_SURGE: f64 = 1.3;

/// Inputs to the estimator.
///
/// Mode and distance are optional: without either there is no estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostQuery {
    pub mode: Option<TransportMode>,
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub companions: u32,
    pub purpose: Option<TripPurpose>,
}

impl CostQuery {
    /// Create a query with every input present.
    pub fn new(
        mode: TransportMode,
        distance_km: f64,
        companions: u32,
        purpose: TripPurpose,
    ) -> Self {
        Self {
            mode: Some(mode),
            distance_km: Some(distance_km),
            companions,
            purpose: Some(purpose),
        }
    }
}

/// Per-kilometre base rate for a mode.
///
/// Flights are priced by [`FLIGHT_BASE_FARE`] and [`FLIGHT_RATE_PER_KM`]
/// instead; this returns the per-km component for them.
pub fn base_rate_per_km(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walking => 0.0,
        TransportMode::Cycling => 5.0,
        TransportMode::Car => 12.0,
        TransportMode::Bus => 8.0,
        TransportMode::Train => 6.0,
        TransportMode::Flight => FLIGHT_RATE_PER_KM,
    }
}

/// Multiplier applied for the trip's purpose.
pub fn purpose_multiplier(purpose: Option<TripPurpose>) -> f64 {
    match purpose {
        Some(TripPurpose::Medical) => 1.5,
        Some(TripPurpose::Work) => 1.2,
        Some(TripPurpose::Education) => 0.8,
        _ => 1.0,
    }
}

/// Returns true on Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Estimate the cost of a trip taken on `date`.
///
/// The pipeline, in order:
/// 1. Base price: rate × distance, or flat fare plus per-km rate for flights.
/// 2. Companions: shared vehicles (car, flight) add 30% per companion.
/// 3. Purpose: medical ×1.5, work ×1.2, education ×0.8.
/// 4. Eco discount: walking and cycling lose 20, floored at zero.
/// 5. Weekend surge: car and bus ×1.3 on Saturday or Sunday.
/// 6. Round to the nearest whole unit.
///
/// Returns 0 when mode or distance is missing, or when the distance is zero,
/// negative or not a number; 0 means "no estimate", not "free".
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trip_server::domain::{TransportMode, TripPurpose};
/// use trip_server::pricing::{CostQuery, estimate_cost};
///
/// let wednesday = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
/// let query = CostQuery::new(TransportMode::Car, 10.0, 2, TripPurpose::Work);
/// assert_eq!(estimate_cost(&query, wednesday), 230);
/// ```
pub fn estimate_cost(query: &CostQuery, date: NaiveDate) -> u64 {
    let (Some(mode), Some(distance_km)) = (query.mode, query.distance_km) else {
        return 0;
    };
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return 0;
    }

    let mut price = match mode {
        TransportMode::Flight => FLIGHT_BASE_FARE + distance_km * FLIGHT_RATE_PER_KM,
        _ => base_rate_per_km(mode) * distance_km,
    };

    if query.companions > 0 && mode.is_shared_vehicle() {
        price *= 1.0 + f64::from(query.companions) * COMPANION_SURCHARGE;
    }

    price *= purpose_multiplier(query.purpose);

    if mode.is_active() {
        price = (price - ECO_DISCOUNT).max(0.0);
    }

    if is_weekend(date) && mode.is_road() {
        price *= WEEKEND_SURGE;
    }

    price.round().max(0.0) as u64
}
