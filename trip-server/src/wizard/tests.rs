//! Behavioural tests for the trip wizard.

use super::*;
use crate::domain::{
    Coordinate, Frequency, NewTrip, TransportMode, TripId, TripPurpose, TripRecord,
    UNKNOWN_LOCATION,
};
use crate::geocode::{PlaceCandidate, PlaceDescriptor};
use crate::store::{StoreError, TripStore};
use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;

fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Wednesday 2026-10-14, 09:41:27
fn weekday_clock() -> FixedClock {
    FixedClock(at(14, 9, 41, 27))
}

/// Saturday 2026-10-17, 11:00:00
fn weekend_clock() -> FixedClock {
    FixedClock(at(17, 11, 0, 0))
}

fn wizard() -> TripWizard<FixedClock> {
    TripWizard::new(WizardConfig::default(), weekday_clock())
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

/// Store that records every trip it is given, optionally failing.
#[derive(Default)]
struct RecordingStore {
    created: Mutex<Vec<NewTrip>>,
    fail: bool,
}

impl RecordingStore {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn created(&self) -> Vec<NewTrip> {
        self.created.lock().unwrap().clone()
    }
}

impl TripStore for RecordingStore {
    fn create(&self, trip: NewTrip) -> Result<TripId, StoreError> {
        let mut created = self.created.lock().unwrap();
        created.push(trip);
        if self.fail {
            return Err(StoreError::Io {
                message: "disk full".into(),
            });
        }
        Ok(TripId(created.len() as u64))
    }

    fn list(&self) -> Result<Vec<TripRecord>, StoreError> {
        Ok(Vec::new())
    }

    fn delete_by_id(&self, id: TripId) -> Result<(), StoreError> {
        Err(StoreError::NotFound(id))
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}

fn fill_origin(w: &mut TripWizard<FixedClock>) {
    w.set_latitude(Endpoint::Origin, Some(0.0));
    w.set_longitude(Endpoint::Origin, Some(0.0));
    w.set_time(Endpoint::Origin, Some(at(14, 8, 0, 0)));
}

fn fill_destination(w: &mut TripWizard<FixedClock>) {
    w.set_latitude(Endpoint::Destination, Some(1.0));
    w.set_longitude(Endpoint::Destination, Some(0.0));
    w.set_time(Endpoint::Destination, Some(at(14, 9, 30, 0)));
}

fn fill_details(w: &mut TripWizard<FixedClock>) {
    w.set_mode(Some(TransportMode::Train));
    w.set_purpose(Some(TripPurpose::Work));
    w.set_companions(Some(1));
    w.set_frequency(Some(Frequency::Daily));
}

/// A wizard at the final stage with every required field filled.
fn ready_to_submit() -> TripWizard<FixedClock> {
    let mut w = wizard();
    w.set_trip_number(Some(7));
    w.advance().unwrap();
    fill_origin(&mut w);
    w.advance().unwrap();
    fill_destination(&mut w);
    w.advance().unwrap();
    fill_details(&mut w);
    assert_eq!(w.stage(), Stage::Details);
    assert!(w.missing_fields().is_empty());
    w
}

#[test]
fn starts_empty_at_first_stage() {
    let w = wizard();
    assert_eq!(w.stage(), Stage::TripNumber);
    assert_eq!(w.draft(), &TripDraft::new());
    assert_eq!(w.progress_percent(), 25);
}

#[test]
fn advance_with_missing_field_keeps_stage() {
    let mut w = wizard();

    let err = w.advance().unwrap_err();
    assert!(matches!(
        err,
        WizardError::Validation { stage: Stage::TripNumber, ref missing } if missing == &[Field::TripNumber]
    ));
    assert_eq!(w.stage(), Stage::TripNumber);

    w.set_trip_number(Some(3));
    assert_eq!(w.advance().unwrap(), Stage::Origin);

    // Only latitude and longitude: start time still missing
    w.set_latitude(Endpoint::Origin, Some(12.0));
    w.set_longitude(Endpoint::Origin, Some(77.0));
    let err = w.advance().unwrap_err();
    assert!(matches!(
        err,
        WizardError::Validation { ref missing, .. } if missing == &[Field::StartTime]
    ));
    assert_eq!(w.stage(), Stage::Origin);
}

/// The update that empties `field`.
fn cleared(field: Field) -> FieldUpdate {
    match field {
        Field::TripNumber => FieldUpdate::TripNumber(None),
        Field::OriginLatitude => FieldUpdate::OriginLatitude(None),
        Field::OriginLongitude => FieldUpdate::OriginLongitude(None),
        Field::OriginPlace => FieldUpdate::OriginPlace(None),
        Field::StartTime => FieldUpdate::StartTime(None),
        Field::DestinationLatitude => FieldUpdate::DestinationLatitude(None),
        Field::DestinationLongitude => FieldUpdate::DestinationLongitude(None),
        Field::DestinationPlace => FieldUpdate::DestinationPlace(None),
        Field::EndTime => FieldUpdate::EndTime(None),
        Field::Mode => FieldUpdate::Mode(None),
        Field::DistanceKm => FieldUpdate::DistanceKm(None),
        Field::Purpose => FieldUpdate::Purpose(None),
        Field::Companions => FieldUpdate::Companions(None),
        Field::Frequency => FieldUpdate::Frequency(None),
        Field::Cost => FieldUpdate::Cost(None),
    }
}

/// A fully-filled wizard moved back to `stage`.
fn filled_at(stage: Stage) -> TripWizard<FixedClock> {
    let mut w = ready_to_submit();
    while w.stage() != stage {
        w.retreat();
    }
    w
}

#[test]
fn any_empty_required_field_blocks_advance() {
    for stage in [
        Stage::TripNumber,
        Stage::Origin,
        Stage::Destination,
        Stage::Details,
    ] {
        for &field in stage.required_fields() {
            let mut w = filled_at(stage);
            w.update(cleared(field));

            let err = w.advance().unwrap_err();
            assert!(
                matches!(err, WizardError::Validation { ref missing, .. } if missing == &[field]),
                "{stage} without {field}: {err:?}"
            );
            assert_eq!(w.stage(), stage, "{stage} without {field}");
        }
    }
}

#[test]
fn out_of_range_coordinates_block_advance() {
    let cases = [
        (Stage::Origin, FieldUpdate::OriginLatitude(Some(120.0))),
        (Stage::Origin, FieldUpdate::OriginLongitude(Some(-180.5))),
        (Stage::Destination, FieldUpdate::DestinationLatitude(Some(-90.01))),
        (Stage::Destination, FieldUpdate::DestinationLongitude(Some(200.0))),
    ];

    for (stage, update) in cases {
        let field = update.field();
        let mut w = filled_at(stage);
        w.update(update);

        let err = w.advance().unwrap_err();
        assert!(
            matches!(err, WizardError::Validation { ref missing, .. } if missing == &[field]),
            "{stage} with bad {field}: {err:?}"
        );
        assert_eq!(w.stage(), stage);
    }
}

#[test]
fn negative_distance_and_cost_are_never_submitted() {
    let mut w = ready_to_submit();
    w.set_distance_km(Some(-5.0));
    w.set_cost(Some(-50.0));
    assert_eq!(w.draft().distance_km, None);
    assert_eq!(w.draft().cost, None);

    let store = RecordingStore::default();
    assert!(matches!(
        w.submit(&store, &mut rng()),
        Err(WizardError::Validation { stage: Stage::Details, ref missing })
            if missing == &[Field::DistanceKm, Field::Cost]
    ));
    assert!(store.created().is_empty());
}

#[test]
fn clearing_a_field_blocks_advance_again() {
    let mut w = wizard();
    w.set_trip_number(Some(3));
    w.set_trip_number(None);
    assert!(w.advance().is_err());
    assert_eq!(w.stage(), Stage::TripNumber);
}

#[test]
fn progress_tracks_stage() {
    let mut w = ready_to_submit();
    assert_eq!(w.progress_percent(), 100);
    w.retreat();
    assert_eq!(w.progress_percent(), 75);
    w.retreat();
    assert_eq!(w.progress_percent(), 50);
}

#[test]
fn advance_from_final_stage() {
    let mut w = ready_to_submit();
    assert!(matches!(w.advance(), Err(WizardError::NoNextStage)));
    assert_eq!(w.stage(), Stage::Details);

    w.set_frequency(None);
    assert!(matches!(w.advance(), Err(WizardError::Validation { .. })));
}

#[test]
fn retreat_from_first_stage_is_noop() {
    let mut w = wizard();
    assert_eq!(w.retreat(), Stage::TripNumber);
    assert_eq!(w.retreat(), Stage::TripNumber);
    assert_eq!(w.stage(), Stage::TripNumber);
}

#[test]
fn retreat_keeps_entered_values() {
    let mut w = ready_to_submit();
    assert_eq!(w.retreat(), Stage::Destination);
    assert_eq!(w.draft().mode, Some(TransportMode::Train));
    assert_eq!(w.advance().unwrap(), Stage::Details);
}

#[test]
fn completing_coordinates_derives_distance() {
    let mut w = wizard();
    fill_origin(&mut w);
    w.set_latitude(Endpoint::Destination, Some(1.0));
    assert_eq!(w.draft().distance_km, None);

    let recomputed = w.set_longitude(Endpoint::Destination, Some(0.0));
    assert_eq!(recomputed.distance_km, Some(111.19));
    // No mode yet, so no price
    assert_eq!(recomputed.cost, None);
    assert_eq!(w.draft().distance_km, Some(111.19));
    assert_eq!(w.draft().cost, None);
}

#[test]
fn coordinates_reprice_when_mode_is_set() {
    let mut w = wizard();
    w.set_mode(Some(TransportMode::Train));
    fill_origin(&mut w);
    let recomputed = w.set_latitude(Endpoint::Destination, Some(1.0));
    assert_eq!(recomputed, Recomputed::default());

    let recomputed = w.set_longitude(Endpoint::Destination, Some(0.0));
    // 6 per km x 111.19 km
    assert_eq!(recomputed.cost, Some(667));
    assert_eq!(w.draft().cost, Some(667.0));
    assert_eq!(w.draft().cost_source, Some(CostSource::Estimated));
}

#[test]
fn cost_inputs_reprice() {
    let mut w = wizard();
    w.set_mode(Some(TransportMode::Car));
    assert_eq!(w.draft().cost, None);

    assert_eq!(w.set_distance_km(Some(10.0)).cost, Some(120));
    assert_eq!(w.set_companions(Some(2)).cost, Some(192));
    assert_eq!(w.set_purpose(Some(TripPurpose::Work)).cost, Some(230));
    assert_eq!(w.draft().cost, Some(230.0));

    // Frequency is not a cost input
    assert_eq!(w.set_frequency(Some(Frequency::Daily)).cost, None);
}

#[test]
fn weekend_surge_uses_clock_date() {
    let mut w = TripWizard::new(WizardConfig::default(), weekend_clock());
    w.set_mode(Some(TransportMode::Car));
    w.set_distance_km(Some(10.0));
    w.set_companions(Some(2));
    w.set_purpose(Some(TripPurpose::Work));
    assert_eq!(w.draft().cost, Some(300.0));
}

#[test]
fn zero_estimate_does_not_overwrite_cost() {
    let mut w = wizard();
    w.set_cost(Some(15.0));
    w.set_mode(Some(TransportMode::Walking));
    w.set_distance_km(Some(3.0));
    assert_eq!(w.draft().cost, Some(15.0));
    assert_eq!(w.draft().cost_source, Some(CostSource::Manual));
}

#[test]
fn always_recompute_overwrites_manual_cost() {
    let mut w = wizard();
    w.set_mode(Some(TransportMode::Car));
    w.set_distance_km(Some(10.0));
    w.set_cost(Some(50.0));
    assert_eq!(w.draft().cost_source, Some(CostSource::Manual));

    w.set_distance_km(Some(20.0));
    assert_eq!(w.draft().cost, Some(240.0));
    assert_eq!(w.draft().cost_source, Some(CostSource::Estimated));
}

#[test]
fn preserve_manual_keeps_manual_cost() {
    let config = WizardConfig::default().with_cost_policy(CostOverridePolicy::PreserveManual);
    let mut w = TripWizard::new(config, weekday_clock());
    w.set_mode(Some(TransportMode::Car));
    w.set_distance_km(Some(10.0));
    assert_eq!(w.draft().cost, Some(120.0));

    w.set_cost(Some(50.0));
    assert_eq!(w.set_distance_km(Some(20.0)).cost, None);
    assert_eq!(w.draft().cost, Some(50.0));

    // Clearing the manual cost re-enables estimates
    w.set_cost(None);
    assert_eq!(w.set_companions(Some(0)).cost, Some(240));
    assert_eq!(w.draft().cost_source, Some(CostSource::Estimated));
}

#[test]
fn preserve_manual_still_estimates_untouched_cost() {
    let config = WizardConfig::default().with_cost_policy(CostOverridePolicy::PreserveManual);
    let mut w = TripWizard::new(config, weekday_clock());
    w.set_mode(Some(TransportMode::Bus));
    w.set_distance_km(Some(10.0));
    assert_eq!(w.draft().cost, Some(80.0));
    w.set_distance_km(Some(20.0));
    assert_eq!(w.draft().cost, Some(160.0));
}

#[test]
fn apply_place_fills_endpoint() {
    let mut w = wizard();
    let place = PlaceCandidate::new(
        "India Gate, Rajpath, New Delhi, Delhi, 110001, India",
        28.612912345,
        77.229512345,
    );

    w.apply_place(Endpoint::Destination, &place);

    let destination = &w.draft().destination;
    assert_eq!(destination.latitude, Some(28.612912));
    assert_eq!(destination.longitude, Some(77.229512));
    assert_eq!(destination.place.as_deref(), Some("India Gate, Rajpath, New Delhi"));
    assert_eq!(destination.time, Some(at(14, 9, 41, 0)));
}

#[test]
fn apply_place_completes_distance() {
    let mut w = wizard();
    w.set_mode(Some(TransportMode::Train));
    fill_origin(&mut w);

    let recomputed = w.apply_place(Endpoint::Destination, &PlaceCandidate::new("North", 1.0, 0.0));
    assert_eq!(recomputed.distance_km, Some(111.19));
    assert_eq!(recomputed.cost, Some(667));
}

#[test]
fn apply_place_ignores_invalid_coordinates() {
    let mut w = wizard();
    let recomputed = w.apply_place(Endpoint::Origin, &PlaceCandidate::new("Nowhere", 200.0, 0.0));
    assert_eq!(recomputed, Recomputed::default());
    assert_eq!(w.draft(), &TripDraft::new());
}

#[test]
fn apply_current_location_uses_descriptor_label() {
    let mut w = wizard();
    let here = Coordinate::new(18.5204303, 73.8567437).unwrap();
    let descriptor = PlaceDescriptor {
        label: "Shivajinagar, Pune, Maharashtra".into(),
        locality: Some("Pune".into()),
        region: Some("Maharashtra".into()),
    };

    w.apply_current_location(Endpoint::Origin, here, &descriptor);

    let origin = &w.draft().origin;
    assert_eq!(origin.latitude, Some(18.52043));
    assert_eq!(origin.longitude, Some(73.856744));
    assert_eq!(origin.place.as_deref(), Some("Shivajinagar, Pune, Maharashtra"));
    assert_eq!(origin.time, Some(at(14, 9, 41, 0)));
}

#[test]
fn submit_saves_once_and_resets() {
    let mut w = ready_to_submit();
    let store = RecordingStore::default();

    let id = w.submit(&store, &mut rng()).unwrap();

    assert_eq!(id, TripId(1));
    assert_eq!(store.created().len(), 1);
    assert_eq!(w.stage(), Stage::TripNumber);
    assert_eq!(w.draft(), &TripDraft::new());
}

#[test]
fn submit_passes_draft_values() {
    let mut w = ready_to_submit();
    w.set_place(Endpoint::Origin, Some("Home".into()));
    let store = RecordingStore::default();

    w.submit(&store, &mut rng()).unwrap();

    let trip = &store.created()[0];
    assert_eq!(trip.trip_number, 7);
    assert_eq!(trip.origin_place, "Home");
    assert_eq!(trip.start_time, at(14, 8, 0, 0));
    assert_eq!(trip.end_time, at(14, 9, 30, 0));
    assert_eq!(trip.mode, TransportMode::Train);
    assert_eq!(trip.distance, 111.19);
    assert_eq!(trip.purpose, TripPurpose::Work);
    assert_eq!(trip.companions, 1);
    assert_eq!(trip.frequency, Frequency::Daily);
    // Train 111.19 km, work trip
    assert_eq!(trip.cost, 801.0);
}

#[test]
fn submit_defaults_unset_values() {
    let mut w = ready_to_submit();
    w.set_trip_number(Some(0));
    let store = RecordingStore::default();

    w.submit(&store, &mut rng()).unwrap();

    let trip = &store.created()[0];
    assert!(trip.trip_number < 1000);
    assert_eq!(trip.origin_place, UNKNOWN_LOCATION);
    assert_eq!(trip.destination_place, UNKNOWN_LOCATION);
}

#[test]
fn failed_submit_preserves_draft() {
    let mut w = ready_to_submit();
    let before = w.draft().clone();
    let store = RecordingStore::failing();

    let err = w.submit(&store, &mut rng()).unwrap_err();

    assert!(matches!(err, WizardError::Store(StoreError::Io { .. })));
    assert_eq!(w.stage(), Stage::Details);
    assert_eq!(w.draft(), &before);

    // Retrying against a working store succeeds
    let store = RecordingStore::default();
    assert!(w.submit(&store, &mut rng()).is_ok());
}

#[test]
fn submit_requires_final_stage() {
    let mut w = wizard();
    w.set_trip_number(Some(1));
    let store = RecordingStore::default();

    assert!(matches!(
        w.submit(&store, &mut rng()),
        Err(WizardError::NotAtFinalStage(Stage::TripNumber))
    ));
    assert!(store.created().is_empty());
}

#[test]
fn submit_requires_complete_details() {
    let mut w = ready_to_submit();
    w.set_cost(None);
    let store = RecordingStore::default();

    assert!(matches!(
        w.submit(&store, &mut rng()),
        Err(WizardError::Validation { stage: Stage::Details, ref missing }) if missing == &[Field::Cost]
    ));
    assert!(store.created().is_empty());
    assert_eq!(w.stage(), Stage::Details);
}

#[test]
fn submit_through_trait_object() {
    let mut w = ready_to_submit();
    let store: Box<dyn TripStore> = Box::new(RecordingStore::default());
    assert_eq!(w.submit(store.as_ref(), &mut rng()).unwrap(), TripId(1));
}
