//! Rebound-chance adjuster
//!
//! Scales a player's baseline rebound chance by pace, shot mix and foul risk.

use crate::adjuster::{
    require_fraction, require_non_negative, require_positive, Adjuster, AdjusterSchema,
};
use crate::{AdjusterError, PlayerContext};
use serde::{Deserialize, Serialize};

/// Registry key
pub const REBOUND_CHANCE: &str = "rebound_chance";

/// Long-rebound share at which the shot-mix term is neutral
pub const NEUTRAL_LONG_REBOUND_SHARE: f64 = 0.35;

/// Configuration for the rebound-chance adjuster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReboundChanceConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Reference possessions per team
    pub pace_ref: f64,
    /// Pace elasticity exponent
    pub pace_elasticity: f64,
    /// Weight of the long-rebound share deviation
    pub shot_mix_weight: f64,
    /// Fractional damp applied while the foul gate is on
    pub foul_risk_damp: f64,
}

impl Default for ReboundChanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pace_ref: 96.0,
            pace_elasticity: 0.70,
            shot_mix_weight: 0.25,
            foul_risk_damp: 0.10,
        }
    }
}

/// Compute rebound chances adjusted for pace, shot mix, and foul risk
///
/// `base * (poss / pace_ref)^elasticity * (1 + w * (share - 0.35)) * damp`
/// where `damp = 1 - foul_risk_damp` only while the foul gate is on.
/// Returns `base_chance` unchanged when the config is disabled.
///
/// # Examples
///
/// ```
/// use sharpedge_adjusters::{dynamic_rebound_chance, ReboundChanceConfig};
///
/// let cfg = ReboundChanceConfig::default();
/// // Reference pace, neutral shot mix, no foul trouble: unchanged
/// let chance = dynamic_rebound_chance(0.25, 96.0, 0.35, false, &cfg);
/// assert!((chance - 0.25).abs() < 1e-12);
/// ```
pub fn dynamic_rebound_chance(
    base_chance: f64,
    poss_per_team: f64,
    long_rebound_share: f64,
    foul_gate_on: bool,
    cfg: &ReboundChanceConfig,
) -> f64 {
    if !cfg.enabled {
        return base_chance;
    }
    let pace_ratio = (poss_per_team / cfg.pace_ref).powf(cfg.pace_elasticity);
    let mix_boost = 1.0 + cfg.shot_mix_weight * (long_rebound_share - NEUTRAL_LONG_REBOUND_SHARE);
    let foul_damp = if foul_gate_on { 1.0 - cfg.foul_risk_damp } else { 1.0 };
    base_chance * pace_ratio * mix_boost * foul_damp
}

impl AdjusterSchema for ReboundChanceConfig {
    fn name(&self) -> &'static str {
        REBOUND_CHANCE
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_positive(REBOUND_CHANCE, "pace_ref", self.pace_ref)?;
        require_non_negative(REBOUND_CHANCE, "pace_elasticity", self.pace_elasticity)?;
        require_non_negative(REBOUND_CHANCE, "shot_mix_weight", self.shot_mix_weight)?;
        require_fraction(REBOUND_CHANCE, "foul_risk_damp", self.foul_risk_damp)
    }
}

impl Adjuster for ReboundChanceConfig {
    type Context = PlayerContext;

    /// Writes `rebound_chance`. The foul gate is the foul-risk adjuster's
    /// flag, so running foul-risk first chains the two. Without a baseline
    /// chance there is nothing to scale.
    fn transform(&self, ctx: &PlayerContext) -> PlayerContext {
        let Some(base) = ctx.base_rebound_chance else {
            return ctx.clone();
        };
        let poss = ctx.possessions_per_team.unwrap_or(self.pace_ref);
        let share = ctx.long_rebound_share.unwrap_or(NEUTRAL_LONG_REBOUND_SHARE);

        PlayerContext {
            rebound_chance: Some(dynamic_rebound_chance(
                base,
                poss,
                share,
                ctx.foul_risk_active,
                self,
            )),
            ..ctx.clone()
        }
    }
}
