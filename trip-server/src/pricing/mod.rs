//! Trip cost estimation.
//!
//! Pure functions only: the caller supplies the date so that the weekend
//! surge is deterministic, which also lets the server re-validate costs
//! submitted by clients.

mod estimate;

pub use estimate::{
    COMPANION_SURCHARGE, CostQuery, ECO_DISCOUNT, FLIGHT_BASE_FARE, FLIGHT_RATE_PER_KM,
    WEEKEND_SURGE, base_rate_per_km, estimate_cost, is_weekend, purpose_multiplier,
};
