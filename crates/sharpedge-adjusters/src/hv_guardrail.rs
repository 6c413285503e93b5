//! High-volatility totals guardrail
//!
//! Scores how volatile a game environment is and nudges the projected total
//! upward in high-variance matchups. When the score is high enough, unders
//! are flagged as dangerous.

use crate::adjuster::{require_non_negative, Adjuster, AdjusterSchema};
use crate::{AdjusterError, GameContext, VolatilityInputs};
use serde::{Deserialize, Serialize};

/// Registry key
pub const HV_GUARDRAIL: &str = "hv_guardrail";

/// Configuration for the volatility guardrail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HvGuardrailConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Upper bound on the risk score
    pub max_score: f64,
    /// Fraction of the base total added per score unit
    pub boost_per_score: f64,
    /// Upper bound on the boost in points
    pub max_boost: f64,
    /// Score at which unders are capped
    pub under_cap_score: f64,
}

impl Default for HvGuardrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_score: 6.0,
            boost_per_score: 0.015,
            max_boost: 8.0,
            under_cap_score: 3.0,
        }
    }
}

/// Guardrail outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HvResult {
    /// Risk score (0 to `max_score`)
    pub risk_score: f64,
    /// Points added to the total
    pub volatility_boost: f64,
    /// Do not take unders unless the edge is very strong
    pub under_cap_active: bool,
}

impl HvResult {
    fn neutral() -> Self {
        Self {
            risk_score: 0.0,
            volatility_boost: 0.0,
            under_cap_active: false,
        }
    }
}

impl HvGuardrailConfig {
    /// Raw volatility score from flags and percentile tiers, before clamping
    pub fn raw_score(hv: &VolatilityInputs) -> f64 {
        let mut score = 0.0;

        if hv.high_shot_makers {
            score += 1.2;
        }
        if hv.high_transition_risk {
            score += 1.0;
        }
        if hv.low_tov_environment {
            score += 0.8;
        }
        if hv.high_three_volume_matchup {
            score += 1.0;
        }

        if hv.recent_extreme_overs >= 1 {
            score += 0.7;
        }
        if hv.recent_extreme_overs >= 2 {
            score += 0.5;
        }

        if hv.pace_tier > 0.70 {
            score += 0.6;
        }
        if hv.pace_tier > 0.85 {
            score += 0.4;
        }

        // Strong halfcourt offense and weak halfcourt defense together
        let combined_halfcourt = 0.5 * (hv.halfcourt_offense_tier + hv.halfcourt_defense_weak_tier);
        if combined_halfcourt > 0.65 {
            score += 0.6;
        }
        if combined_halfcourt > 0.80 {
            score += 0.5;
        }

        score
    }

    /// Compute the guardrail for a base total
    ///
    /// No volatility context means no adjustment.
    pub fn compute(&self, base_total: f64, hv: Option<&VolatilityInputs>) -> HvResult {
        let Some(hv) = hv else {
            return HvResult::neutral();
        };

        let score = Self::raw_score(hv).max(0.0).min(self.max_score);
        let boost = (base_total * self.boost_per_score * score).max(0.0).min(self.max_boost);

        HvResult {
            risk_score: score,
            volatility_boost: boost,
            under_cap_active: score >= self.under_cap_score,
        }
    }
}

impl AdjusterSchema for HvGuardrailConfig {
    fn name(&self) -> &'static str {
        HV_GUARDRAIL
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_non_negative(HV_GUARDRAIL, "max_score", self.max_score)?;
        require_non_negative(HV_GUARDRAIL, "boost_per_score", self.boost_per_score)?;
        require_non_negative(HV_GUARDRAIL, "max_boost", self.max_boost)?;
        require_non_negative(HV_GUARDRAIL, "under_cap_score", self.under_cap_score)
    }
}

impl Adjuster for HvGuardrailConfig {
    type Context = GameContext;

    fn transform(&self, ctx: &GameContext) -> GameContext {
        let Some(base_total) = ctx.pred_total_median else {
            return ctx.clone();
        };
        let result = self.compute(base_total, ctx.volatility.as_ref());

        GameContext {
            pred_total_median: Some(base_total + result.volatility_boost),
            hv_risk_score: Some(result.risk_score),
            hv_volatility_boost: Some(result.volatility_boost),
            under_cap_active: result.under_cap_active,
            ..ctx.clone()
        }
    }
}
