//! Proposition module - the unit of evaluation

use crate::RiskTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest win probability any adjustment may produce
pub const MIN_WIN_PROBABILITY: f64 = 0.01;

/// Highest win probability any adjustment may produce
pub const MAX_WIN_PROBABILITY: f64 = 0.99;

/// Clamp a win probability into [0.01, 0.99]
///
/// Additive penalty stacking can push a probability out of range; that is an
/// expected outcome and is corrected here rather than reported.
///
/// # Examples
///
/// ```
/// use sharpedge_domain::clamp_win_probability;
///
/// assert_eq!(clamp_win_probability(1.2), 0.99);
/// assert_eq!(clamp_win_probability(-0.3), 0.01);
/// assert_eq!(clamp_win_probability(0.55), 0.55);
/// assert_eq!(clamp_win_probability(f64::NAN), 0.01);
/// ```
pub fn clamp_win_probability(p: f64) -> f64 {
    if p.is_nan() {
        return MIN_WIN_PROBABILITY;
    }
    p.clamp(MIN_WIN_PROBABILITY, MAX_WIN_PROBABILITY)
}

/// Side of a proposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Over the line
    #[serde(alias = "over", alias = "Over")]
    Over,
    /// Under the line
    #[serde(alias = "under", alias = "Under")]
    Under,
}

impl Side {
    /// Get the side name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Over => "OVER",
            Side::Under => "UNDER",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation mode
///
/// Live-flow is in-game re-evaluation with stricter execution gating;
/// pre-game is the initial publication pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvalMode {
    /// Initial pre-game publication
    #[default]
    #[serde(alias = "pregame")]
    Pregame,
    /// In-game re-evaluation
    #[serde(alias = "liveflow")]
    Liveflow,
}

impl EvalMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvalMode::Pregame => "PREGAME",
            EvalMode::Liveflow => "LIVEFLOW",
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bettable statement being evaluated
///
/// Constructed fresh per evaluation from upstream projections. Evaluation
/// never mutates it.
///
/// # Examples
///
/// ```
/// use sharpedge_domain::{Proposition, Side};
///
/// let prop = Proposition::new("A. Center", "BOS", "REB", Side::Over, 8.5, -115)
///     .with_projection(9.4, 9.0, 0.64, 0.03)
///     .with_starter_big(true)
///     .with_tags(["STARTER_BIG_MINUTES_CAP"]);
///
/// assert!(prop.is_starter_big_over());
/// assert_eq!(prop.active_risk_tags().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposition {
    /// Player name
    pub player: String,

    /// Team code
    pub team: String,

    /// Market (e.g. "REB")
    pub market: String,

    /// Over or under
    pub side: Side,

    /// Numeric threshold
    pub line: f64,

    /// American odds
    pub odds_american: i32,

    /// Projected mean of the stat
    pub mean: f64,

    /// Projected median of the stat
    pub median: f64,

    /// Model win probability before any gating
    #[serde(alias = "win_prob")]
    pub win_probability: f64,

    /// Signed expected-value edge
    pub edge: f64,

    /// Risk tags marked active by the detector, in detector order
    #[serde(default)]
    pub tags_active: Vec<String>,

    /// Projected minutes, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_minutes: Option<f64>,

    /// Starting frontcourt role (None = unknown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_starter_big: Option<bool>,

    /// Bench big with a path to starter minutes (None = unknown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bench_big_candidate: Option<bool>,
}

impl Proposition {
    /// Create a proposition with zeroed projections and no context flags
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        market: impl Into<String>,
        side: Side,
        line: f64,
        odds_american: i32,
    ) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            market: market.into(),
            side,
            line,
            odds_american,
            mean: 0.0,
            median: 0.0,
            win_probability: 0.0,
            edge: 0.0,
            tags_active: Vec::new(),
            projected_minutes: None,
            is_starter_big: None,
            bench_big_candidate: None,
        }
    }

    /// Set the upstream projection
    pub fn with_projection(
        mut self,
        mean: f64,
        median: f64,
        win_probability: f64,
        edge: f64,
    ) -> Self {
        self.mean = mean;
        self.median = median;
        self.win_probability = win_probability;
        self.edge = edge;
        self
    }

    /// Set the active tag strings
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags_active = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the starter-big role flag
    pub fn with_starter_big(mut self, is_starter_big: bool) -> Self {
        self.is_starter_big = Some(is_starter_big);
        self
    }

    /// Set projected minutes
    pub fn with_projected_minutes(mut self, minutes: f64) -> Self {
        self.projected_minutes = Some(minutes);
        self
    }

    /// Whether this is a starter-big OVER, the zone every risk rule targets
    ///
    /// An unknown starter flag does not qualify.
    pub fn is_starter_big_over(&self) -> bool {
        self.side == Side::Over && self.is_starter_big == Some(true)
    }

    /// Active tags resolved against the vocabulary, in detector order
    ///
    /// Unknown strings are dropped.
    pub fn active_risk_tags(&self) -> Vec<RiskTag> {
        self.tags_active
            .iter()
            .filter_map(|t| RiskTag::parse(t))
            .collect()
    }

    /// Whether a given vocabulary tag is active
    pub fn has_tag(&self, tag: RiskTag) -> bool {
        self.tags_active.iter().any(|t| t == tag.as_str())
    }
}
