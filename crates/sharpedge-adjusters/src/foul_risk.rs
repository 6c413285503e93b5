//! Foul-risk gate for bigs
//!
//! Shaves projected minutes and widens variance bands when a big/center is
//! in early foul trouble or carries a high foul rate.

use crate::adjuster::{require_non_negative, Adjuster, AdjusterSchema};
use crate::{AdjusterError, PlayerContext};
use serde::{Deserialize, Serialize};

/// Registry key
pub const FOUL_RISK: &str = "foul_risk";

/// Projected minutes assumed when none are supplied
pub const DEFAULT_PROJECTED_MINUTES: f64 = 0.0;

/// Variance assumed for a band that was never set
pub const DEFAULT_VARIANCE: f64 = 1.0;

/// Configuration for the foul-risk gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoulRiskConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Fouls in the first stint that flag high risk
    pub early_foul_threshold: u32,
    /// Fouls per minute that flag high risk
    pub high_risk_foul_rate: f64,
    /// Minutes shaved per early foul beyond the first
    pub minutes_penalty_per_foul: f64,
    /// Rebound variance bump
    pub vol_inflate_reb: f64,
    /// Points variance bump
    pub vol_inflate_pts: f64,
}

impl Default for FoulRiskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            early_foul_threshold: 2,
            high_risk_foul_rate: 0.045,
            minutes_penalty_per_foul: 1.5,
            vol_inflate_reb: 0.15,
            vol_inflate_pts: 0.12,
        }
    }
}

impl FoulRiskConfig {
    /// Whether the context trips either foul trigger
    pub fn is_high_risk(&self, ctx: &PlayerContext) -> bool {
        let early_fouls = ctx.early_foul_count.unwrap_or(0);
        let foul_rate = ctx.fouls_per_min.unwrap_or(0.0);
        early_fouls >= self.early_foul_threshold || foul_rate >= self.high_risk_foul_rate
    }
}

impl AdjusterSchema for FoulRiskConfig {
    fn name(&self) -> &'static str {
        FOUL_RISK
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_non_negative(FOUL_RISK, "high_risk_foul_rate", self.high_risk_foul_rate)?;
        require_non_negative(FOUL_RISK, "minutes_penalty_per_foul", self.minutes_penalty_per_foul)?;
        require_non_negative(FOUL_RISK, "vol_inflate_reb", self.vol_inflate_reb)?;
        require_non_negative(FOUL_RISK, "vol_inflate_pts", self.vol_inflate_pts)
    }
}

impl Adjuster for FoulRiskConfig {
    type Context = PlayerContext;

    fn transform(&self, ctx: &PlayerContext) -> PlayerContext {
        // Only bigs / rim protectors are exposed
        if !ctx.position.is_some_and(|p| p.is_big()) {
            return ctx.clone();
        }
        if !self.is_high_risk(ctx) {
            return ctx.clone();
        }

        let early_fouls = ctx.early_foul_count.unwrap_or(0);
        let minutes_before = ctx.projected_minutes.unwrap_or(DEFAULT_PROJECTED_MINUTES);
        let penalty = self.minutes_penalty_per_foul * f64::from(early_fouls.saturating_sub(1));

        tracing::debug!(
            early_fouls,
            minutes_before,
            penalty,
            "Foul-risk gate fired"
        );

        PlayerContext {
            projected_minutes: Some((minutes_before - penalty).max(0.0)),
            var_reb: Some(ctx.var_reb.unwrap_or(DEFAULT_VARIANCE) * (1.0 + self.vol_inflate_reb)),
            var_pts: Some(ctx.var_pts.unwrap_or(DEFAULT_VARIANCE) * (1.0 + self.vol_inflate_pts)),
            foul_risk_active: true,
            ..ctx.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn create_big(early_fouls: u32, minutes: f64) -> PlayerContext {
        PlayerContext {
            position: Some(Position::Big),
            early_foul_count: Some(early_fouls),
            projected_minutes: Some(minutes),
            var_reb: Some(2.0),
            var_pts: Some(4.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_early_fouls_shave_minutes_and_inflate_variance() {
        let cfg = FoulRiskConfig::default();
        let out = cfg.adjust(&create_big(3, 32.0));

        assert!(out.foul_risk_active);
        assert!((out.projected_minutes.unwrap() - 29.0).abs() < 1e-9);
        assert!((out.var_reb.unwrap() - 2.3).abs() < 1e-9);
        assert!((out.var_pts.unwrap() - 4.48).abs() < 1e-9);
    }

    #[test]
    fn test_foul_rate_trigger_without_early_fouls() {
        let cfg = FoulRiskConfig::default();
        let ctx = PlayerContext {
            fouls_per_min: Some(0.05),
            ..create_big(0, 30.0)
        };
        let out = cfg.adjust(&ctx);

        assert!(out.foul_risk_active);
        // No early fouls beyond the first: no minutes penalty
        assert_eq!(out.projected_minutes, Some(30.0));
    }

    #[test]
    fn test_minutes_floored_at_zero() {
        let cfg = FoulRiskConfig::default();
        let out = cfg.adjust(&create_big(5, 4.0));
        assert_eq!(out.projected_minutes, Some(0.0));
    }

    #[test]
    fn test_non_big_untouched() {
        let cfg = FoulRiskConfig::default();
        let ctx = PlayerContext {
            position: Some(Position::Guard),
            ..create_big(4, 30.0)
        };
        assert_eq!(cfg.adjust(&ctx), ctx);

        let unknown = PlayerContext {
            position: None,
            ..create_big(4, 30.0)
        };
        assert_eq!(cfg.adjust(&unknown), unknown);
    }

    #[test]
    fn test_below_thresholds_untouched() {
        let cfg = FoulRiskConfig::default();
        let ctx = create_big(1, 30.0);
        assert_eq!(cfg.adjust(&ctx), ctx);
    }

    #[test]
    fn test_missing_variance_uses_defaults() {
        let cfg = FoulRiskConfig::default();
        let ctx = PlayerContext {
            position: Some(Position::Big),
            early_foul_count: Some(2),
            ..Default::default()
        };
        let out = cfg.adjust(&ctx);
        assert_eq!(out.projected_minutes, Some(0.0));
        assert!((out.var_reb.unwrap() - 1.15).abs() < 1e-9);
        assert!((out.var_pts.unwrap() - 1.12).abs() < 1e-9);
    }
}
