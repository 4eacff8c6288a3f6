//! Wizard configuration.

use std::fmt;
use std::str::FromStr;

use crate::domain::InvalidChoice;

/// What happens to a cost the user typed when its inputs later change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CostOverridePolicy {
    /// Every recomputation overwrites the cost, including manual edits.
    #[default]
    AlwaysRecompute,
    /// A manually entered cost is kept until the user clears it or the
    /// draft is reset.
    PreserveManual,
}

impl CostOverridePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostOverridePolicy::AlwaysRecompute => "always-recompute",
            CostOverridePolicy::PreserveManual => "preserve-manual",
        }
    }
}

impl fmt::Display for CostOverridePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostOverridePolicy {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always-recompute" => Ok(CostOverridePolicy::AlwaysRecompute),
            "preserve-manual" => Ok(CostOverridePolicy::PreserveManual),
            _ => Err(InvalidChoice::new("cost override policy", s)),
        }
    }
}

/// Configuration for a wizard session.
#[derive(Debug, Clone, Default)]
pub struct WizardConfig {
    /// How manual cost edits interact with automatic estimates.
    pub cost_policy: CostOverridePolicy,
}

impl WizardConfig {
    /// Set the cost override policy.
    pub fn with_cost_policy(mut self, policy: CostOverridePolicy) -> Self {
        self.cost_policy = policy;
        self
    }
}
