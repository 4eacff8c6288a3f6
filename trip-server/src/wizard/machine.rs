//! The trip wizard state machine.

use chrono::NaiveDateTime;
use rand::Rng;

use crate::domain::{Coordinate, Frequency, TransportMode, TripId, TripPurpose, round_to};
use crate::geocode::{PlaceCandidate, PlaceDescriptor, shorten_place_name};
use crate::pricing::estimate_cost;
use crate::store::TripStore;

use super::clock::Clock;
use super::config::{CostOverridePolicy, WizardConfig};
use super::draft::{CostSource, Endpoint, FieldUpdate, TripDraft};
use super::error::WizardError;
use super::stage::{Field, Stage};

/// Decimal places kept for coordinates picked from a place.
const PLACE_COORDINATE_PLACES: i32 = 6;

/// Values recomputed as a consequence of an edit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Recomputed {
    /// New derived distance, if the edit produced one.
    pub distance_km: Option<f64>,
    /// New cost written to the draft, if any.
    pub cost: Option<u64>,
}

/// One user's in-progress trip entry.
///
/// Owns its draft exclusively. Every edit goes through [`TripWizard::update`]
/// (or one of the setters built on it) so that derived distance and cost
/// stay in step with their inputs.
#[derive(Debug)]
pub struct TripWizard<C> {
    draft: TripDraft,
    stage: Stage,
    config: WizardConfig,
    clock: C,
}

impl<C: Clock> TripWizard<C> {
    /// Start a wizard with an empty draft at stage 1.
    pub fn new(config: WizardConfig, clock: C) -> Self {
        Self {
            draft: TripDraft::new(),
            stage: Stage::FIRST,
            config,
            clock,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &TripDraft {
        &self.draft
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// How far through the wizard the user is, from 25 to 100.
    pub fn progress_percent(&self) -> u8 {
        self.stage.number() * 100 / Stage::COUNT
    }

    /// Required fields of the current stage that are still empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        self.draft.missing_fields(self.stage)
    }

    /// Write one field and run the reactive recomputation rules.
    ///
    /// A coordinate edit that completes all four coordinates replaces the
    /// distance, which in turn re-prices the trip when a mode is chosen. An
    /// edit to mode, distance, companions or purpose re-prices the trip. A
    /// new estimate only replaces the cost when it is positive and the cost
    /// policy allows it.
    pub fn update(&mut self, update: FieldUpdate) -> Recomputed {
        let field = update.field();
        self.draft.apply(update);

        let mut recomputed = Recomputed::default();
        let mut reprice = field.is_cost_input();

        if field.is_coordinate()
            && let Some(distance) = self.draft.derived_distance_km()
        {
            self.draft.distance_km = Some(distance);
            recomputed.distance_km = Some(distance);
            reprice = self.draft.mode.is_some();
        }

        if reprice {
            recomputed.cost = self.reprice();
        }

        recomputed
    }

    fn reprice(&mut self) -> Option<u64> {
        let estimate = estimate_cost(&self.draft.cost_query(), self.clock.now().date());
        if estimate == 0 {
            return None;
        }

        if self.config.cost_policy == CostOverridePolicy::PreserveManual
            && self.draft.cost_source == Some(CostSource::Manual)
        {
            tracing::debug!(estimate, "keeping manually entered cost");
            return None;
        }

        self.draft.cost = Some(estimate as f64);
        self.draft.cost_source = Some(CostSource::Estimated);
        Some(estimate)
    }

    pub fn set_trip_number(&mut self, value: Option<u32>) -> Recomputed {
        self.update(FieldUpdate::TripNumber(value))
    }

    pub fn set_latitude(&mut self, endpoint: Endpoint, value: Option<f64>) -> Recomputed {
        self.update(match endpoint {
            Endpoint::Origin => FieldUpdate::OriginLatitude(value),
            Endpoint::Destination => FieldUpdate::DestinationLatitude(value),
        })
    }

    pub fn set_longitude(&mut self, endpoint: Endpoint, value: Option<f64>) -> Recomputed {
        self.update(match endpoint {
            Endpoint::Origin => FieldUpdate::OriginLongitude(value),
            Endpoint::Destination => FieldUpdate::DestinationLongitude(value),
        })
    }

    pub fn set_place(&mut self, endpoint: Endpoint, value: Option<String>) -> Recomputed {
        self.update(match endpoint {
            Endpoint::Origin => FieldUpdate::OriginPlace(value),
            Endpoint::Destination => FieldUpdate::DestinationPlace(value),
        })
    }

    /// Set the start time (origin) or end time (destination).
    pub fn set_time(&mut self, endpoint: Endpoint, value: Option<NaiveDateTime>) -> Recomputed {
        self.update(match endpoint {
            Endpoint::Origin => FieldUpdate::StartTime(value),
            Endpoint::Destination => FieldUpdate::EndTime(value),
        })
    }

    pub fn set_mode(&mut self, value: Option<TransportMode>) -> Recomputed {
        self.update(FieldUpdate::Mode(value))
    }

    pub fn set_distance_km(&mut self, value: Option<f64>) -> Recomputed {
        self.update(FieldUpdate::DistanceKm(value))
    }

    pub fn set_purpose(&mut self, value: Option<TripPurpose>) -> Recomputed {
        self.update(FieldUpdate::Purpose(value))
    }

    pub fn set_companions(&mut self, value: Option<u32>) -> Recomputed {
        self.update(FieldUpdate::Companions(value))
    }

    pub fn set_frequency(&mut self, value: Option<Frequency>) -> Recomputed {
        self.update(FieldUpdate::Frequency(value))
    }

    /// Set the cost by hand.
    pub fn set_cost(&mut self, value: Option<f64>) -> Recomputed {
        self.update(FieldUpdate::Cost(value))
    }

    /// Fill an endpoint from a search result.
    ///
    /// Coordinates are rounded to six decimals, the name is shortened and
    /// the endpoint's time is set to the current minute. Candidates with
    /// invalid coordinates are ignored.
    pub fn apply_place(&mut self, endpoint: Endpoint, place: &PlaceCandidate) -> Recomputed {
        let Some(at) = place.coordinate() else {
            tracing::warn!(name = %place.name, "ignoring place with invalid coordinates");
            return Recomputed::default();
        };
        self.fill_endpoint(endpoint, at, shorten_place_name(&place.name))
    }

    /// Fill an endpoint from the device's position and its description.
    pub fn apply_current_location(
        &mut self,
        endpoint: Endpoint,
        at: Coordinate,
        descriptor: &PlaceDescriptor,
    ) -> Recomputed {
        self.fill_endpoint(endpoint, at, descriptor.label.clone())
    }

    fn fill_endpoint(&mut self, endpoint: Endpoint, at: Coordinate, name: String) -> Recomputed {
        let latitude = round_to(at.latitude(), PLACE_COORDINATE_PLACES);
        let longitude = round_to(at.longitude(), PLACE_COORDINATE_PLACES);
        let now = self.clock.now_minute();

        self.set_place(endpoint, Some(name));
        self.set_time(endpoint, Some(now));
        let first = self.set_latitude(endpoint, Some(latitude));
        let second = self.set_longitude(endpoint, Some(longitude));

        Recomputed {
            distance_km: second.distance_km.or(first.distance_km),
            cost: second.cost.or(first.cost),
        }
    }

    /// Move to the next stage if the current one is complete.
    ///
    /// On failure the stage is unchanged.
    pub fn advance(&mut self) -> Result<Stage, WizardError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(WizardError::Validation {
                stage: self.stage,
                missing,
            });
        }

        let next = self.stage.next().ok_or(WizardError::NoNextStage)?;
        self.stage = next;
        Ok(next)
    }

    /// Move to the previous stage. Does nothing at stage 1.
    pub fn retreat(&mut self) -> Stage {
        if let Some(previous) = self.stage.previous() {
            self.stage = previous;
        }
        self.stage
    }

    /// Save the trip and start over.
    ///
    /// Only possible from the final stage with every required field filled.
    /// Missing optional values are defaulted. If the store fails, the draft
    /// and stage are left as they were so the user can retry.
    pub fn submit<S>(&mut self, store: &S, rng: &mut impl Rng) -> Result<TripId, WizardError>
    where
        S: TripStore + ?Sized,
    {
        if !self.stage.is_final() {
            return Err(WizardError::NotAtFinalStage(self.stage));
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(WizardError::Validation {
                stage: self.stage,
                missing,
            });
        }

        let trip = self.draft.to_payload().resolve(self.clock.now(), rng);
        let id = store.create(trip).inspect_err(|e| {
            tracing::warn!(error = %e, "trip submission failed");
        })?;

        tracing::info!(%id, "trip submitted");
        self.reset();
        Ok(id)
    }

    /// Discard the draft and return to stage 1.
    pub fn reset(&mut self) {
        self.draft = TripDraft::new();
        self.stage = Stage::FIRST;
    }
}
