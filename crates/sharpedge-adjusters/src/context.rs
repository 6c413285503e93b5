//! Game and player contexts that adjusters read and rewrite
//!
//! Every input is optional. Adjusters resolve missing values to named
//! defaults in their own modules, so callers only supply what they know.

use serde::{Deserialize, Serialize};

/// Positional class of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Big / rim protector (also accepts "pf/c" and "c")
    #[serde(alias = "pf/c", alias = "c")]
    Big,
    /// Wing
    Wing,
    /// Guard
    Guard,
}

impl Position {
    /// Whether the position belongs to the big/center class
    pub fn is_big(&self) -> bool {
        matches!(self, Position::Big)
    }
}

/// Rotation role of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Bench player
    Bench,
    /// Rotation role player
    Role,
    /// Primary option
    Star,
}

/// Transition profile for one side of a matchup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionProfile {
    /// Share of plays in transition (0.0-0.4 typical)
    pub freq: f64,
    /// Points per transition play (1.05-1.40 typical)
    pub eff: f64,
}

/// Matchup descriptors feeding the high-volatility totals guardrail
///
/// All values are soft signals; the guardrail never drives the total on its
/// own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityInputs {
    /// Multiple three-level scorers on the floor
    pub high_shot_makers: bool,
    /// Both teams run and leak in transition
    pub high_transition_risk: bool,
    /// Both teams project under 13% turnovers
    pub low_tov_environment: bool,
    /// Both sides launch heavy three-point volume
    pub high_three_volume_matchup: bool,
    /// Recent games finishing 20+ over the closing total
    pub recent_extreme_overs: u32,
    /// Pace percentile (0.5 = league average)
    pub pace_tier: f64,
    /// Combined halfcourt offense percentile
    pub halfcourt_offense_tier: f64,
    /// Combined halfcourt defense weakness percentile
    pub halfcourt_defense_weak_tier: f64,
}

impl Default for VolatilityInputs {
    fn default() -> Self {
        Self {
            high_shot_makers: false,
            high_transition_risk: false,
            low_tov_environment: false,
            high_three_volume_matchup: false,
            recent_extreme_overs: 0,
            pace_tier: 0.5,
            halfcourt_offense_tier: 0.5,
            halfcourt_defense_weak_tier: 0.5,
        }
    }
}

/// Game-level context: possessions, game state, totals
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameContext {
    /// Projected possessions per team
    pub possessions_per_team: Option<f64>,
    /// Current quarter (1-4)
    pub quarter: Option<u8>,
    /// Whether the game is in overtime
    pub is_overtime: bool,
    /// Points per possession in order (non-positive entries are stops)
    pub scoring_sequence: Vec<i32>,
    /// Baseline transition rate
    pub baseline_transition_rate: Option<f64>,
    /// Observed transition rate
    pub observed_transition_rate: Option<f64>,
    /// Overtime periods played or projected
    pub num_ot: u32,
    /// Projected total median
    pub pred_total_median: Option<f64>,
    /// Projected total standard deviation
    pub pred_total_sigma: Option<f64>,
    /// Live-rebound transition frequency
    pub live_reb_trans_freq: Option<f64>,
    /// Steal transition frequency
    pub steal_trans_freq: Option<f64>,
    /// Three-point attempt rate
    pub three_rate: Option<f64>,
    /// Offense transition profile (team A)
    pub offense_transition: Option<TransitionProfile>,
    /// Defense transition profile allowed (team B)
    pub defense_transition: Option<TransitionProfile>,
    /// Volatility descriptors
    pub volatility: Option<VolatilityInputs>,

    /// Combined pace-spike damp factor applied (before the floor)
    pub pace_spike_damp: Option<f64>,
    /// Transition pace multiplier applied
    pub pace_multiplier: Option<f64>,
    /// OT inflation fired
    pub ot_inflation_applied: bool,
    /// Blended totals transition multiplier applied
    pub totals_transition_multiplier: Option<f64>,
    /// Volatility risk score (0-6)
    pub hv_risk_score: Option<f64>,
    /// Points added by the volatility guardrail
    pub hv_volatility_boost: Option<f64>,
    /// Unders are dangerous unless the edge is very strong
    pub under_cap_active: bool,
}

/// Player-level context: role, fouls, minutes, variance, rates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerContext {
    /// Positional class
    pub position: Option<Position>,
    /// Rotation role
    pub role: Option<Role>,
    /// Historical fouls per minute
    pub fouls_per_min: Option<f64>,
    /// Fouls picked up in the first stint
    pub early_foul_count: Option<u32>,
    /// Projected minutes
    pub projected_minutes: Option<f64>,
    /// Rebound variance
    pub var_reb: Option<f64>,
    /// Points variance
    pub var_pts: Option<f64>,
    /// Baseline rebound chance
    pub base_rebound_chance: Option<f64>,
    /// Possessions per team for the pace term
    pub possessions_per_team: Option<f64>,
    /// Share of misses producing long rebounds
    pub long_rebound_share: Option<f64>,
    /// Usage rate (0-1)
    pub usage_rate: Option<f64>,
    /// Field goal percentage (0-1)
    pub fg_pct: Option<f64>,
    /// Three-point percentage (0-1)
    pub three_pt_pct: Option<f64>,

    /// Foul-risk gate fired
    pub foul_risk_active: bool,
    /// Adjusted rebound chance
    pub rebound_chance: Option<f64>,
    /// A usage or efficiency spike was drawn
    pub variance_spike: bool,
}
