//! Role-player shot variance
//!
//! Bench and role players occasionally have usage or hot-shooting spike
//! games. This adjuster draws those spikes from an injected RNG so runs stay
//! reproducible under a fixed seed.

use crate::adjuster::{require_fraction, require_positive, AdjusterSchema};
use crate::{AdjusterError, PlayerContext, Role};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Registry key
pub const ROLEPLAYER_VARIANCE: &str = "roleplayer_variance";

/// Usage rate assumed when none is supplied
pub const DEFAULT_USAGE_RATE: f64 = 0.18;

/// Field goal percentage assumed when none is supplied
pub const DEFAULT_FG_PCT: f64 = 0.45;

/// Three-point percentage assumed when none is supplied
pub const DEFAULT_THREE_PT_PCT: f64 = 0.35;

/// Hard ceiling on a spiked field goal percentage
pub const MAX_SPIKE_FG_PCT: f64 = 0.70;

/// Hard ceiling on a spiked three-point percentage
pub const MAX_SPIKE_THREE_PT_PCT: f64 = 0.60;

/// Configuration for role-player variance spikes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleplayerVarianceConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Chance of a usage spike game
    pub usage_spike_prob: f64,
    /// Chance of a hot shooting game
    pub eff_spike_prob: f64,
    /// Usage multiplier in a spike
    pub usage_mult: f64,
    /// Shooting multiplier in a spike
    pub eff_mult: f64,
    /// Usage ceiling so role players never become stars
    pub max_spike_role_usg: f64,
}

impl Default for RoleplayerVarianceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            usage_spike_prob: 0.12,
            eff_spike_prob: 0.10,
            usage_mult: 1.35,
            eff_mult: 1.10,
            max_spike_role_usg: 0.24,
        }
    }
}

impl RoleplayerVarianceConfig {
    /// Draw spikes for a player context
    ///
    /// Returns an exact copy when disabled or when the player is not a bench
    /// or role player. Two uniform draws are consumed otherwise: usage first,
    /// then efficiency.
    pub fn adjust_with<R: Rng + ?Sized>(&self, ctx: &PlayerContext, rng: &mut R) -> PlayerContext {
        if !self.enabled || !matches!(ctx.role, Some(Role::Bench | Role::Role)) {
            return ctx.clone();
        }

        let mut usage = ctx.usage_rate.unwrap_or(DEFAULT_USAGE_RATE);
        let mut fg = ctx.fg_pct.unwrap_or(DEFAULT_FG_PCT);
        let mut tp = ctx.three_pt_pct.unwrap_or(DEFAULT_THREE_PT_PCT);
        let mut spike_used = false;

        if rng.gen::<f64>() < self.usage_spike_prob {
            usage = (usage * self.usage_mult).min(self.max_spike_role_usg);
            spike_used = true;
        }

        if rng.gen::<f64>() < self.eff_spike_prob {
            fg = (fg * self.eff_mult).min(MAX_SPIKE_FG_PCT);
            tp = (tp * self.eff_mult).min(MAX_SPIKE_THREE_PT_PCT);
            spike_used = true;
        }

        PlayerContext {
            usage_rate: Some(usage),
            fg_pct: Some(fg),
            three_pt_pct: Some(tp),
            variance_spike: spike_used,
            ..ctx.clone()
        }
    }
}

impl AdjusterSchema for RoleplayerVarianceConfig {
    fn name(&self) -> &'static str {
        ROLEPLAYER_VARIANCE
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_fraction(ROLEPLAYER_VARIANCE, "usage_spike_prob", self.usage_spike_prob)?;
        require_fraction(ROLEPLAYER_VARIANCE, "eff_spike_prob", self.eff_spike_prob)?;
        require_positive(ROLEPLAYER_VARIANCE, "usage_mult", self.usage_mult)?;
        require_positive(ROLEPLAYER_VARIANCE, "eff_mult", self.eff_mult)?;
        require_fraction(ROLEPLAYER_VARIANCE, "max_spike_role_usg", self.max_spike_role_usg)
    }
}
