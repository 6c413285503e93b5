//! Risk tag vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named qualitative risk signal
///
/// External detectors decide which tags are active on a proposition and hand
/// them over as strings. This enum is the fixed vocabulary those strings are
/// resolved against; anything outside it carries no rule and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTag {
    /// Starting center's role is unstable
    CenterDisplacementRiskOn,

    /// A bench big has a path to 20+ minutes
    BenchBigMinutesSpike,

    /// Starter minutes are capped below 30
    StarterBigMinutesCap,
}

impl RiskTag {
    /// Every tag in the vocabulary
    pub const ALL: [RiskTag; 3] = [
        RiskTag::CenterDisplacementRiskOn,
        RiskTag::BenchBigMinutesSpike,
        RiskTag::StarterBigMinutesCap,
    ];

    /// Get the wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTag::CenterDisplacementRiskOn => "CENTER_DISPLACEMENT_RISK_ON",
            RiskTag::BenchBigMinutesSpike => "BENCH_BIG_MINUTES_SPIKE",
            RiskTag::StarterBigMinutesCap => "STARTER_BIG_MINUTES_CAP",
        }
    }

    /// Resolve a detector string to a tag (exact match on the wire name)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }

    /// Minutes-cap class tags impose a hard tier ceiling and a stricter
    /// live-flow requirement.
    pub fn is_minutes_cap_class(&self) -> bool {
        matches!(self, RiskTag::StarterBigMinutesCap)
    }
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
