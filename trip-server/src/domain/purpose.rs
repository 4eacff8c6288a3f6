//! Trip purpose and frequency.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InvalidChoice;

/// Why a trip was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripPurpose {
    Work,
    Education,
    Shopping,
    Recreation,
    Medical,
    Other,
}

impl TripPurpose {
    pub const ALL: [TripPurpose; 6] = [
        TripPurpose::Work,
        TripPurpose::Education,
        TripPurpose::Shopping,
        TripPurpose::Recreation,
        TripPurpose::Medical,
        TripPurpose::Other,
    ];

    /// Parse a purpose from its lowercase name.
    pub fn parse(s: &str) -> Result<Self, InvalidChoice> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| InvalidChoice::new("trip purpose", s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripPurpose::Work => "work",
            TripPurpose::Education => "education",
            TripPurpose::Shopping => "shopping",
            TripPurpose::Recreation => "recreation",
            TripPurpose::Medical => "medical",
            TripPurpose::Other => "other",
        }
    }
}

impl fmt::Display for TripPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripPurpose {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How often the user makes a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Rarely,
    ];

    /// Parse a frequency from its lowercase name.
    pub fn parse(s: &str) -> Result<Self, InvalidChoice> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| InvalidChoice::new("frequency", s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Rarely => "rarely",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_roundtrips_names() {
        for purpose in TripPurpose::ALL {
            assert_eq!(purpose.as_str().parse::<TripPurpose>().unwrap(), purpose);
        }
    }

    #[test]
    fn frequency_roundtrips_names() {
        for frequency in Frequency::ALL {
            assert_eq!(frequency.as_str().parse::<Frequency>().unwrap(), frequency);
        }
    }

    #[test]
    fn unknown_values_rejected() {
        let err = TripPurpose::parse("leisure").unwrap_err();
        assert_eq!(err.kind(), "trip purpose");
        assert!(Frequency::parse("hourly").is_err());
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(TripPurpose::Medical.to_string(), "medical");
        assert_eq!(Frequency::Rarely.to_string(), "rarely");
        assert_eq!(
            serde_json::to_string(&Frequency::Weekly).unwrap(),
            "\"weekly\""
        );
    }
}
