//! Wizard stages and the fields they collect.

use std::fmt;

use serde::Serialize;

/// A single input of the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TripNumber,
    OriginLatitude,
    OriginLongitude,
    OriginPlace,
    StartTime,
    DestinationLatitude,
    DestinationLongitude,
    DestinationPlace,
    EndTime,
    Mode,
    DistanceKm,
    Purpose,
    Companions,
    Frequency,
    Cost,
}

impl Field {
    /// Wire name of the field, matching the trip payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::TripNumber => "trip_number",
            Field::OriginLatitude => "origin_lat",
            Field::OriginLongitude => "origin_lng",
            Field::OriginPlace => "origin_place",
            Field::StartTime => "start_time",
            Field::DestinationLatitude => "destination_lat",
            Field::DestinationLongitude => "destination_lng",
            Field::DestinationPlace => "destination_place",
            Field::EndTime => "end_time",
            Field::Mode => "mode",
            Field::DistanceKm => "distance",
            Field::Purpose => "purpose",
            Field::Companions => "companions",
            Field::Frequency => "frequency",
            Field::Cost => "cost",
        }
    }

    /// Changing one of these may produce a new distance.
    pub fn is_coordinate(&self) -> bool {
        matches!(
            self,
            Field::OriginLatitude
                | Field::OriginLongitude
                | Field::DestinationLatitude
                | Field::DestinationLongitude
        )
    }

    /// Changing one of these may produce a new cost estimate.
    pub fn is_cost_input(&self) -> bool {
        matches!(
            self,
            Field::Mode | Field::DistanceKm | Field::Companions | Field::Purpose
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four sequential steps of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage 1: trip number.
    TripNumber,
    /// Stage 2: where and when the trip started.
    Origin,
    /// Stage 3: where and when the trip ended.
    Destination,
    /// Stage 4: mode, distance, purpose, companions, frequency, cost.
    Details,
}

impl Stage {
    /// Total number of stages.
    pub const COUNT: u8 = 4;

    /// The first stage of a fresh wizard.
    pub const FIRST: Stage = Stage::TripNumber;

    /// One-based position of the stage.
    pub fn number(&self) -> u8 {
        match self {
            Stage::TripNumber => 1,
            Stage::Origin => 2,
            Stage::Destination => 3,
            Stage::Details => 4,
        }
    }

    /// Look a stage up by its one-based position.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Stage::TripNumber),
            2 => Some(Stage::Origin),
            3 => Some(Stage::Destination),
            4 => Some(Stage::Details),
            _ => None,
        }
    }

    /// The stage after this one, if any.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The stage before this one, if any.
    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Returns true for the stage that submits.
    pub fn is_final(&self) -> bool {
        *self == Stage::Details
    }

    /// Fields that must be filled before leaving this stage.
    pub fn required_fields(&self) -> &'static [Field] {
        match self {
            Stage::TripNumber => &[Field::TripNumber],
            Stage::Origin => &[Field::OriginLatitude, Field::OriginLongitude, Field::StartTime],
            Stage::Destination => &[
                Field::DestinationLatitude,
                Field::DestinationLongitude,
                Field::EndTime,
            ],
            Stage::Details => &[
                Field::Mode,
                Field::DistanceKm,
                Field::Purpose,
                Field::Companions,
                Field::Frequency,
                Field::Cost,
            ],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.number())
    }
}
