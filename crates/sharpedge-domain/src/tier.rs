//! Tier module - confidence buckets for propositions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence tier for a proposition
///
/// Tiers govern how aggressively a proposition may be recommended:
/// - Lock: Highest confidence, broad distribution
/// - Strong: Moderate confidence, hedged distribution
/// - Limited: Single-unit exposure only
/// - NoPlay: Not publishable
///
/// Variants are declared lowest first so the derived `Ord` gives
/// `NoPlay < Limited < Strong < Lock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Below every publication threshold
    NoPlay,

    /// One-book limit
    Limited,

    /// Boosts / ladder alternates
    Strong,

    /// Lock it in everywhere
    Lock,
}

impl Tier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::NoPlay => "NO_PLAY",
            Tier::Limited => "LIMITED",
            Tier::Strong => "STRONG",
            Tier::Lock => "LOCK",
        }
    }

    /// Whether this tier permits publication at all
    pub fn is_playable(&self) -> bool {
        *self != Tier::NoPlay
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
