//! Transition adjusters: pace multiplier and totals patch

use crate::adjuster::{
    require_fraction, require_non_negative, require_positive, Adjuster, AdjusterSchema,
};
use crate::{AdjusterError, GameContext, TransitionProfile};
use serde::{Deserialize, Serialize};

/// Registry key for the pace multiplier
pub const TRANSITION_PACE: &str = "transition_pace";

/// Registry key for the totals patch
pub const TOTALS_TRANSITION: &str = "totals_transition";

/// Configuration for transition + pace volatility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionPaceConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Baseline possessions per team
    pub base_pace: f64,
    /// Weight of live-rebound transition frequency
    pub live_reb_freq_boost: f64,
    /// Weight of steal transition frequency
    pub steal_freq_boost: f64,
    /// Weight of three-point attempt rate
    pub three_vol_boost: f64,
    /// Max distance of the multiplier from 1.0 either way
    pub max_pace_delta: f64,
}

impl Default for TransitionPaceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_pace: 98.0,
            live_reb_freq_boost: 0.35,
            steal_freq_boost: 0.25,
            three_vol_boost: 0.20,
            max_pace_delta: 0.15,
        }
    }
}

impl TransitionPaceConfig {
    /// Capped pace multiplier for a transition profile
    ///
    /// Returns 1.0 when disabled.
    pub fn multiplier(
        &self,
        poss_per_team: f64,
        live_reb_trans_freq: f64,
        steal_trans_freq: f64,
        three_rate: f64,
    ) -> f64 {
        if !self.enabled {
            return 1.0;
        }
        let base_ratio = poss_per_team / self.base_pace;
        let live_term = self.live_reb_freq_boost * live_reb_trans_freq;
        let steal_term = self.steal_freq_boost * steal_trans_freq;
        let three_term = self.three_vol_boost * three_rate;

        let raw = base_ratio * (1.0 + live_term + steal_term + three_term);
        raw.max(1.0 - self.max_pace_delta).min(1.0 + self.max_pace_delta)
    }
}

impl AdjusterSchema for TransitionPaceConfig {
    fn name(&self) -> &'static str {
        TRANSITION_PACE
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_positive(TRANSITION_PACE, "base_pace", self.base_pace)?;
        require_non_negative(TRANSITION_PACE, "live_reb_freq_boost", self.live_reb_freq_boost)?;
        require_non_negative(TRANSITION_PACE, "steal_freq_boost", self.steal_freq_boost)?;
        require_non_negative(TRANSITION_PACE, "three_vol_boost", self.three_vol_boost)?;
        require_fraction(TRANSITION_PACE, "max_pace_delta", self.max_pace_delta)
    }
}

impl Adjuster for TransitionPaceConfig {
    type Context = GameContext;

    /// Records the multiplier and scales possessions when they are known.
    fn transform(&self, ctx: &GameContext) -> GameContext {
        let poss = ctx.possessions_per_team.unwrap_or(self.base_pace);
        let multiplier = self.multiplier(
            poss,
            ctx.live_reb_trans_freq.unwrap_or(0.0),
            ctx.steal_trans_freq.unwrap_or(0.0),
            ctx.three_rate.unwrap_or(0.0),
        );

        GameContext {
            possessions_per_team: ctx.possessions_per_team.map(|p| p * multiplier),
            pace_multiplier: Some(multiplier),
            ..ctx.clone()
        }
    }
}

/// Configuration for the transition totals patch
///
/// Turns halfcourt/transition profiles into a bounded percentage bump on a
/// simulated game total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalsTransitionConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// League share of plays in transition
    pub freq_ref: f64,
    /// League points per transition play
    pub eff_ref: f64,
    /// Weight of the frequency deviation
    pub freq_weight: f64,
    /// Weight of the efficiency deviation
    pub eff_weight: f64,
    /// Max fractional move of the total
    pub max_adj: f64,
}

impl Default for TotalsTransitionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            freq_ref: 0.18,
            eff_ref: 1.20,
            freq_weight: 0.60,
            eff_weight: 0.40,
            max_adj: 0.08,
        }
    }
}

impl TotalsTransitionConfig {
    /// Multiplier for one side's transition profile
    pub fn side_multiplier(&self, freq: f64, eff: f64) -> f64 {
        if !self.enabled || self.freq_ref <= 0.0 || self.eff_ref <= 0.0 {
            return 1.0;
        }
        let freq_delta = freq / self.freq_ref - 1.0;
        let eff_delta = eff / self.eff_ref - 1.0;
        let raw = self.freq_weight * freq_delta + self.eff_weight * eff_delta;
        1.0 + raw.max(-self.max_adj).min(self.max_adj)
    }

    /// Blend the offense and defense multipliers
    pub fn combined_multiplier(
        &self,
        offense: TransitionProfile,
        defense: TransitionProfile,
    ) -> f64 {
        let off_mult = self.side_multiplier(offense.freq, offense.eff);
        let def_mult = self.side_multiplier(defense.freq, defense.eff);
        (off_mult + def_mult) / 2.0
    }

    /// Patch a game total using both sides' transition profiles
    ///
    /// # Examples
    ///
    /// ```
    /// use sharpedge_adjusters::{TotalsTransitionConfig, TransitionProfile};
    ///
    /// let cfg = TotalsTransitionConfig::default();
    /// let league = TransitionProfile { freq: 0.18, eff: 1.20 };
    /// assert!((cfg.patch_total(228.7, league, league) - 228.7).abs() < 1e-9);
    /// ```
    pub fn patch_total(
        &self,
        base_total: f64,
        offense: TransitionProfile,
        defense: TransitionProfile,
    ) -> f64 {
        if !self.enabled {
            return base_total;
        }
        base_total * self.combined_multiplier(offense, defense)
    }

    fn league_profile(&self) -> TransitionProfile {
        TransitionProfile {
            freq: self.freq_ref,
            eff: self.eff_ref,
        }
    }
}

impl AdjusterSchema for TotalsTransitionConfig {
    fn name(&self) -> &'static str {
        TOTALS_TRANSITION
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_positive(TOTALS_TRANSITION, "freq_ref", self.freq_ref)?;
        require_positive(TOTALS_TRANSITION, "eff_ref", self.eff_ref)?;
        require_non_negative(TOTALS_TRANSITION, "freq_weight", self.freq_weight)?;
        require_non_negative(TOTALS_TRANSITION, "eff_weight", self.eff_weight)?;
        require_fraction(TOTALS_TRANSITION, "max_adj", self.max_adj)
    }
}

impl Adjuster for TotalsTransitionConfig {
    type Context = GameContext;

    /// A missing side is treated as league average.
    fn transform(&self, ctx: &GameContext) -> GameContext {
        let offense = ctx.offense_transition.unwrap_or_else(|| self.league_profile());
        let defense = ctx.defense_transition.unwrap_or_else(|| self.league_profile());
        let multiplier = self.combined_multiplier(offense, defense);

        GameContext {
            pred_total_median: ctx.pred_total_median.map(|t| t * multiplier),
            totals_transition_multiplier: Some(multiplier),
            ..ctx.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_multiplier_neutral_at_baseline() {
        let cfg = TransitionPaceConfig::default();
        assert!((cfg.multiplier(98.0, 0.0, 0.0, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pace_multiplier_weighted_terms() {
        let cfg = TransitionPaceConfig::default();
        // 1 + 0.035 + 0.025 + 0.08
        let m = cfg.multiplier(98.0, 0.10, 0.10, 0.40);
        assert!((m - 1.14).abs() < 1e-9);
    }

    #[test]
    fn test_pace_multiplier_clamped_symmetrically() {
        let cfg = TransitionPaceConfig::default();
        assert!((cfg.multiplier(120.0, 0.3, 0.3, 0.5) - 1.15).abs() < 1e-12);
        assert!((cfg.multiplier(70.0, 0.0, 0.0, 0.0) - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_pace_context_scales_possessions() {
        let cfg = TransitionPaceConfig::default();
        let ctx = GameContext {
            possessions_per_team: Some(98.0),
            three_rate: Some(0.40),
            ..Default::default()
        };
        let out = cfg.adjust(&ctx);
        assert!((out.pace_multiplier.unwrap() - 1.08).abs() < 1e-9);
        assert!((out.possessions_per_team.unwrap() - 105.84).abs() < 1e-9);
    }

    #[test]
    fn test_totals_side_multiplier_clamped() {
        let cfg = TotalsTransitionConfig::default();
        // freq delta 0.5 * 0.6 = 0.3, capped at 0.08
        assert!((cfg.side_multiplier(0.27, 1.20) - 1.08).abs() < 1e-12);
        assert!((cfg.side_multiplier(0.0, 0.0) - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_totals_patch_averages_sides() {
        let cfg = TotalsTransitionConfig::default();
        let hot = TransitionProfile { freq: 0.27, eff: 1.20 };
        let league = TransitionProfile { freq: 0.18, eff: 1.20 };
        let total = cfg.patch_total(220.0, hot, league);
        assert!((total - 228.8).abs() < 1e-9);
    }

    #[test]
    fn test_totals_degenerate_reference_is_neutral() {
        let cfg = TotalsTransitionConfig {
            freq_ref: 0.0,
            ..Default::default()
        };
        assert_eq!(cfg.side_multiplier(0.3, 1.3), 1.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_totals_context_without_profiles_is_neutral() {
        let cfg = TotalsTransitionConfig::default();
        let ctx = GameContext {
            pred_total_median: Some(221.0),
            ..Default::default()
        };
        let out = cfg.adjust(&ctx);
        assert!((out.pred_total_median.unwrap() - 221.0).abs() < 1e-9);
        assert!((out.totals_transition_multiplier.unwrap() - 1.0).abs() < 1e-12);
    }
}
