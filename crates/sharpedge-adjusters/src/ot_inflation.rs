//! Overtime inflation layer
//!
//! Adds the expected points of overtime periods to a projected total and
//! widens its standard deviation in quadrature.

use crate::adjuster::{require_non_negative, Adjuster, AdjusterSchema};
use crate::{AdjusterError, GameContext};
use serde::{Deserialize, Serialize};

/// Registry key
pub const OT_INFLATION: &str = "ot_inflation";

/// Total median assumed when none is supplied
pub const DEFAULT_TOTAL_MEDIAN: f64 = 0.0;

/// Total sigma assumed when none is supplied
pub const DEFAULT_TOTAL_SIGMA: f64 = 12.0;

/// Configuration for OT inflation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtInflationConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Possessions per team in a single overtime
    pub base_possessions_per_ot: f64,
    /// Extra possessions per team for each further overtime
    pub possessions_var: f64,
    /// League overtime points per possession
    pub points_per_poss: f64,
    /// Extra-points sigma as a fraction of the extra-points mean
    pub points_var: f64,
}

impl Default for OtInflationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_possessions_per_ot: 6.0,
            possessions_var: 2.0,
            points_per_poss: 1.08,
            points_var: 0.10,
        }
    }
}

/// Extra possessions and points for a number of overtime periods
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OtExtra {
    /// Extra possessions (both teams)
    pub possessions: f64,
    /// Extra expected points
    pub points_mean: f64,
    /// Standard deviation of the extra points
    pub points_sigma: f64,
}

impl OtInflationConfig {
    /// Compute the extra possessions/points for `num_ot` periods
    pub fn extra_for(&self, num_ot: u32) -> OtExtra {
        let n = f64::from(num_ot);
        let poss_add_per_team = self.base_possessions_per_ot + self.possessions_var * (n - 1.0);
        let possessions = 2.0 * poss_add_per_team * n;
        let points_mean = possessions * self.points_per_poss;
        OtExtra {
            possessions,
            points_mean,
            points_sigma: points_mean * self.points_var,
        }
    }
}

impl AdjusterSchema for OtInflationConfig {
    fn name(&self) -> &'static str {
        OT_INFLATION
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_non_negative(
            OT_INFLATION,
            "base_possessions_per_ot",
            self.base_possessions_per_ot,
        )?;
        require_non_negative(OT_INFLATION, "possessions_var", self.possessions_var)?;
        require_non_negative(OT_INFLATION, "points_per_poss", self.points_per_poss)?;
        require_non_negative(OT_INFLATION, "points_var", self.points_var)
    }
}

impl Adjuster for OtInflationConfig {
    type Context = GameContext;

    fn transform(&self, ctx: &GameContext) -> GameContext {
        if ctx.num_ot == 0 {
            return ctx.clone();
        }

        let base_total = ctx.pred_total_median.unwrap_or(DEFAULT_TOTAL_MEDIAN);
        let base_sigma = ctx.pred_total_sigma.unwrap_or(DEFAULT_TOTAL_SIGMA);
        let extra = self.extra_for(ctx.num_ot);

        GameContext {
            pred_total_median: Some(base_total + extra.points_mean),
            // Independent sources combine in quadrature, never linearly
            pred_total_sigma: Some(base_sigma.hypot(extra.points_sigma)),
            ot_inflation_applied: true,
            ..ctx.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_overtimes() {
        let cfg = OtInflationConfig::default();
        let ctx = GameContext {
            num_ot: 2,
            pred_total_median: Some(210.0),
            pred_total_sigma: Some(12.0),
            ..Default::default()
        };
        let out = cfg.adjust(&ctx);

        // 8 possessions per team per OT, 2 teams, 2 periods = 32 possessions
        let extra = cfg.extra_for(2);
        assert!((extra.possessions - 32.0).abs() < 1e-9);
        assert!((extra.points_mean - 34.56).abs() < 1e-9);

        assert!((out.pred_total_median.unwrap() - 244.56).abs() < 1e-9);
        let expected_sigma = (144.0f64 + 3.456 * 3.456).sqrt();
        assert!((out.pred_total_sigma.unwrap() - expected_sigma).abs() < 1e-9);
        assert!(out.pred_total_sigma.unwrap() > 12.0);
        assert!(out.ot_inflation_applied);
    }

    #[test]
    fn test_single_overtime_uses_default_sigma() {
        let cfg = OtInflationConfig::default();
        let ctx = GameContext {
            num_ot: 1,
            pred_total_median: Some(220.0),
            ..Default::default()
        };
        let out = cfg.adjust(&ctx);
        // 12 possessions * 1.08
        assert!((out.pred_total_median.unwrap() - 232.96).abs() < 1e-9);
        assert!(out.pred_total_sigma.unwrap() > DEFAULT_TOTAL_SIGMA);
    }

    #[test]
    fn test_no_overtime_is_noop() {
        let cfg = OtInflationConfig::default();
        let ctx = GameContext {
            pred_total_median: Some(210.0),
            pred_total_sigma: Some(12.0),
            ..Default::default()
        };
        assert_eq!(cfg.adjust(&ctx), ctx);
    }

    #[test]
    fn test_disabled_is_noop() {
        let cfg = OtInflationConfig {
            enabled: false,
            ..Default::default()
        };
        let ctx = GameContext {
            num_ot: 3,
            pred_total_median: Some(210.0),
            ..Default::default()
        };
        assert_eq!(cfg.adjust(&ctx), ctx);
    }
}
