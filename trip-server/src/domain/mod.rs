//! Domain types for the trip logger.
//!
//! This module contains the validated values shared by the estimator, the
//! wizard, the store and the web layer. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod coordinate;
mod error;
mod mode;
mod purpose;
mod trip;

pub use coordinate::{
    Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, distance_km, haversine_km,
    is_valid_latitude, is_valid_longitude, round_to,
};
pub use error::InvalidChoice;
pub use mode::TransportMode;
pub use purpose::{Frequency, TripPurpose};
pub use trip::{
    DEFAULT_DISTANCE_KM, GENERATED_TRIP_NUMBER_BOUND, NewTrip, TripId, TripPayload, TripRecord,
    UNKNOWN_LOCATION, parse_timestamp,
};
