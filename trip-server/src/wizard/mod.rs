//! Four-stage trip entry wizard.
//!
//! A [`TripWizard`] collects a trip across four stages (trip number, origin,
//! destination, details), keeps distance and cost in step with their inputs,
//! and hands the finished trip to a [`TripStore`](crate::store::TripStore).

mod clock;
mod config;
mod draft;
mod error;
mod machine;
mod stage;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, LocalClock, UtcClock};
pub use config::{CostOverridePolicy, WizardConfig};
pub use draft::{CostSource, Endpoint, EndpointDraft, FieldUpdate, TripDraft};
pub use error::WizardError;
pub use machine::{Recomputed, TripWizard};
pub use stage::{Field, Stage};
