//! Transport mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InvalidChoice;

/// How a trip was made.
///
/// # Examples
///
/// ```
/// use trip_server::domain::TransportMode;
///
/// let mode = TransportMode::parse("train").unwrap();
/// assert_eq!(mode, TransportMode::Train);
/// assert_eq!(mode.as_str(), "train");
///
/// // Parsing is case-insensitive and trims whitespace
/// assert_eq!(TransportMode::parse(" Car ").unwrap(), TransportMode::Car);
///
/// assert!(TransportMode::parse("rocket").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Cycling,
    Car,
    Bus,
    Train,
    Flight,
}

impl TransportMode {
    /// Every mode, in the order the form offers them.
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Walking,
        TransportMode::Cycling,
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Flight,
    ];

    /// Parse a mode from its lowercase name.
    pub fn parse(s: &str) -> Result<Self, InvalidChoice> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| InvalidChoice::new("transport mode", s))
    }

    /// Returns the wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Flight => "flight",
        }
    }

    /// Human-powered modes, which earn the eco discount.
    pub fn is_active(&self) -> bool {
        matches!(self, TransportMode::Walking | TransportMode::Cycling)
    }

    /// Modes whose price scales with the number of companions.
    pub fn is_shared_vehicle(&self) -> bool {
        matches!(self, TransportMode::Car | TransportMode::Flight)
    }

    /// Modes subject to the weekend surge.
    pub fn is_road(&self) -> bool {
        matches!(self, TransportMode::Car | TransportMode::Bus)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
