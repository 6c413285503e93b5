//! Tag penalty engine
//!
//! Shifts a proposition's projection by a fixed delta for every active risk
//! tag, but only in the starter-big OVER zone.

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};
use sharpedge_domain::{clamp_win_probability, Proposition, RiskTag};
use std::collections::BTreeMap;

/// Version label of the built-in penalty table
pub const DEFAULT_TABLE_VERSION: &str = "v1";

/// Deltas and rationale for one risk tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagPenaltyRule {
    /// Added to the median
    pub median_delta: f64,
    /// Added to the mean
    pub mean_delta: f64,
    /// Added to the win probability (clamped afterwards)
    pub win_probability_delta: f64,
    /// Added to the edge
    pub edge_delta: f64,
    /// Human-readable reason, echoed into decision notes
    pub rationale: String,
}

impl TagPenaltyRule {
    fn new(median: f64, mean: f64, win_probability: f64, edge: f64, rationale: &str) -> Self {
        Self {
            median_delta: median,
            mean_delta: mean,
            win_probability_delta: win_probability,
            edge_delta: edge,
            rationale: rationale.to_string(),
        }
    }
}

/// Versioned penalty table keyed by risk tag
///
/// On the wire the keys are tag names; unknown names fail deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPenaltyTable", into = "RawPenaltyTable")]
pub struct TagPenaltyTable {
    version: String,
    rules: BTreeMap<RiskTag, TagPenaltyRule>,
}

#[derive(Serialize, Deserialize)]
struct RawPenaltyTable {
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    rules: BTreeMap<String, TagPenaltyRule>,
}

fn default_version() -> String {
    DEFAULT_TABLE_VERSION.to_string()
}

impl TryFrom<RawPenaltyTable> for TagPenaltyTable {
    type Error = GatekeeperError;

    fn try_from(raw: RawPenaltyTable) -> Result<Self, Self::Error> {
        let mut rules = BTreeMap::new();
        for (name, rule) in raw.rules {
            let tag = RiskTag::parse(&name).ok_or(GatekeeperError::UnknownTag(name))?;
            rules.insert(tag, rule);
        }
        Ok(Self {
            version: raw.version,
            rules,
        })
    }
}

impl From<TagPenaltyTable> for RawPenaltyTable {
    fn from(table: TagPenaltyTable) -> Self {
        Self {
            version: table.version,
            rules: table
                .rules
                .into_iter()
                .map(|(tag, rule)| (tag.as_str().to_string(), rule))
                .collect(),
        }
    }
}

impl Default for TagPenaltyTable {
    fn default() -> Self {
        let rules = BTreeMap::from([
            (
                RiskTag::CenterDisplacementRiskOn,
                TagPenaltyRule::new(
                    -0.8,
                    -0.6,
                    -0.05,
                    -0.015,
                    "Starter C role unstable → downgrade starter REB overs.",
                ),
            ),
            (
                RiskTag::BenchBigMinutesSpike,
                TagPenaltyRule::new(
                    -0.6,
                    -0.5,
                    -0.04,
                    -0.012,
                    "Bench big path to 20+ minutes → steal rebound share from starters.",
                ),
            ),
            (
                RiskTag::StarterBigMinutesCap,
                TagPenaltyRule::new(
                    -0.9,
                    -0.7,
                    -0.06,
                    -0.018,
                    "Starter minutes cap (<30) → hard suppress rebound volume ceiling.",
                ),
            ),
        ]);
        Self {
            version: DEFAULT_TABLE_VERSION.to_string(),
            rules,
        }
    }
}

impl TagPenaltyTable {
    /// Create an empty table
    pub fn empty(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            rules: BTreeMap::new(),
        }
    }

    /// Add or replace a rule
    pub fn with_rule(mut self, tag: RiskTag, rule: TagPenaltyRule) -> Self {
        self.rules.insert(tag, rule);
        self
    }

    /// Table version label
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rule for a tag, if registered
    pub fn rule(&self, tag: RiskTag) -> Option<&TagPenaltyRule> {
        self.rules.get(&tag)
    }

    /// Registered tags in vocabulary order
    pub fn tags(&self) -> impl Iterator<Item = RiskTag> + '_ {
        self.rules.keys().copied()
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve a detector string to a registered rule
    fn lookup(&self, name: &str) -> Option<(RiskTag, &TagPenaltyRule)> {
        let tag = RiskTag::parse(name)?;
        self.rules.get(&tag).map(|rule| (tag, rule))
    }

    /// Active tags with a registered rule, in proposition order
    pub fn applied_tags(&self, prop: &Proposition) -> Vec<String> {
        prop.tags_active
            .iter()
            .filter(|t| self.lookup(t).is_some())
            .cloned()
            .collect()
    }

    /// Whether any active tag has a registered rule
    pub fn any_registered(&self, prop: &Proposition) -> bool {
        prop.tags_active.iter().any(|t| self.lookup(t).is_some())
    }

    /// Reject non-finite deltas
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        for (tag, rule) in &self.rules {
            let fields = [
                ("median_delta", rule.median_delta),
                ("mean_delta", rule.mean_delta),
                ("win_probability_delta", rule.win_probability_delta),
                ("edge_delta", rule.edge_delta),
            ];
            for (field, value) in fields {
                if !value.is_finite() {
                    return Err(GatekeeperError::InvalidThreshold {
                        field: format!("penalties.{}.{}", tag, field),
                        reason: format!("{} is not a finite number", value),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Adjusted projection plus the notes of every rule that fired
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyOutcome {
    /// Adjusted mean
    pub mean: f64,
    /// Adjusted median
    pub median: f64,
    /// Adjusted win probability, clamped
    pub win_probability: f64,
    /// Adjusted edge
    pub edge: f64,
    /// `"{TAG}: {rationale}"` per applied rule
    pub notes: Vec<String>,
}

/// Apply tag penalties to a proposition
///
/// Outside the starter-big OVER zone the projection passes through
/// untouched (win probability is still clamped). Tags without a rule are
/// ignored; a tag listed twice is applied twice.
pub fn apply_tag_penalties(prop: &Proposition, table: &TagPenaltyTable) -> PenaltyOutcome {
    let mut outcome = PenaltyOutcome {
        mean: prop.mean,
        median: prop.median,
        win_probability: prop.win_probability,
        edge: prop.edge,
        notes: Vec::new(),
    };

    if prop.is_starter_big_over() {
        for (tag, rule) in prop.tags_active.iter().filter_map(|t| table.lookup(t)) {
            outcome.median += rule.median_delta;
            outcome.mean += rule.mean_delta;
            outcome.win_probability += rule.win_probability_delta;
            outcome.edge += rule.edge_delta;
            outcome.notes.push(format!("{}: {}", tag, rule.rationale));
        }
    }

    outcome.win_probability = clamp_win_probability(outcome.win_probability);
    outcome
}
