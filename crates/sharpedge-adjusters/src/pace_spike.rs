//! Pace-spike dampener
//!
//! Reduces overreaction to sudden pace spikes (late-quarter acceleration,
//! scoring runs, transition surges, overtime) by compounding damp factors on
//! projected possessions. The adjusted value only ever dampens and is floored
//! at a fixed fraction of the unadjusted projection.

use crate::adjuster::{require_fraction, require_positive, Adjuster, AdjusterSchema};
use crate::{AdjusterError, GameContext};
use serde::{Deserialize, Serialize};

/// Registry key
pub const PACE_SPIKE: &str = "pace_spike";

/// Damp penalty for one designated quarter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterPenalty {
    /// Quarter number
    pub quarter: u8,
    /// Fractional damp applied in that quarter
    pub penalty: f64,
}

/// Configuration for the pace-spike dampener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceSpikeConfig {
    /// Enable the adjuster
    pub enabled: bool,
    /// Cap on the transition excess dampening
    pub max_dampen: f64,
    /// Cumulative points that count as a scoring run
    pub run_threshold: i32,
    /// Damp applied when a run is detected
    pub run_penalty: f64,
    /// Multiple of the baseline transition rate that triggers dampening
    pub transition_threshold: f64,
    /// Dampening per unit of transition excess
    pub transition_excess_weight: f64,
    /// Damp applied in overtime
    pub ot_penalty: f64,
    /// Late-quarter damp table
    pub quarter_penalties: Vec<QuarterPenalty>,
    /// Adjusted possessions never drop below this fraction of the projection
    pub floor_fraction: f64,
}

impl Default for PaceSpikeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dampen: 0.18,
            run_threshold: 7,
            run_penalty: 0.12,
            transition_threshold: 1.35,
            transition_excess_weight: 0.5,
            ot_penalty: 0.20,
            quarter_penalties: vec![
                QuarterPenalty { quarter: 3, penalty: 0.10 },
                QuarterPenalty { quarter: 4, penalty: 0.15 },
            ],
            floor_fraction: 0.82,
        }
    }
}

impl PaceSpikeConfig {
    /// Whether a scoring run reaches the threshold
    ///
    /// Points accumulate across consecutive scoring possessions; a
    /// non-positive entry (a stop) resets the counter to zero.
    pub fn detect_scoring_run(&self, scoring_sequence: &[i32]) -> bool {
        let mut current = 0;
        for &pts in scoring_sequence {
            current += pts;
            if current >= self.run_threshold {
                return true;
            }
            if pts <= 0 {
                current = 0;
            }
        }
        false
    }

    /// Damp factor from transition inflation over the baseline rate
    ///
    /// 1.0 unless the observed rate exceeds `baseline * transition_threshold`;
    /// otherwise the damp scales with the excess, capped at `max_dampen`.
    pub fn transition_damp(&self, baseline_rate: f64, observed_rate: f64) -> f64 {
        if baseline_rate <= 0.0 || observed_rate <= baseline_rate * self.transition_threshold {
            return 1.0;
        }
        let excess = observed_rate / baseline_rate - 1.0;
        1.0 - self.max_dampen.min(excess * self.transition_excess_weight)
    }

    /// Damp for a designated late quarter, if any
    pub fn quarter_penalty(&self, quarter: u8) -> Option<f64> {
        self.quarter_penalties
            .iter()
            .find(|q| q.quarter == quarter)
            .map(|q| q.penalty)
    }

    /// Combined damp factor for a game state
    pub fn damp_factor(&self, ctx: &GameContext) -> f64 {
        let mut damp = 1.0;

        if ctx.is_overtime {
            damp *= 1.0 - self.ot_penalty;
        }

        if let Some(penalty) = ctx.quarter.and_then(|q| self.quarter_penalty(q)) {
            damp *= 1.0 - penalty;
        }

        if self.detect_scoring_run(&ctx.scoring_sequence) {
            damp *= 1.0 - self.run_penalty;
        }

        if let (Some(baseline), Some(observed)) =
            (ctx.baseline_transition_rate, ctx.observed_transition_rate)
        {
            damp *= self.transition_damp(baseline, observed);
        }

        damp
    }

    /// Dampen projected possessions, floored at `floor_fraction` of the input
    pub fn adjust_possessions(&self, projected: f64, ctx: &GameContext) -> f64 {
        let adjusted = projected * self.damp_factor(ctx);
        adjusted.max(projected * self.floor_fraction)
    }
}

impl AdjusterSchema for PaceSpikeConfig {
    fn name(&self) -> &'static str {
        PACE_SPIKE
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        require_fraction(PACE_SPIKE, "max_dampen", self.max_dampen)?;
        require_fraction(PACE_SPIKE, "run_penalty", self.run_penalty)?;
        require_positive(PACE_SPIKE, "transition_threshold", self.transition_threshold)?;
        require_positive(PACE_SPIKE, "transition_excess_weight", self.transition_excess_weight)?;
        require_fraction(PACE_SPIKE, "ot_penalty", self.ot_penalty)?;
        require_fraction(PACE_SPIKE, "floor_fraction", self.floor_fraction)?;
        if self.run_threshold <= 0 {
            return Err(AdjusterError::InvalidValue {
                adjuster: PACE_SPIKE,
                field: "run_threshold".to_string(),
                reason: format!("{} must be greater than 0", self.run_threshold),
            });
        }
        for q in &self.quarter_penalties {
            require_fraction(PACE_SPIKE, &format!("quarter_penalties[{}]", q.quarter), q.penalty)?;
        }
        Ok(())
    }
}

impl Adjuster for PaceSpikeConfig {
    type Context = GameContext;

    fn transform(&self, ctx: &GameContext) -> GameContext {
        let Some(projected) = ctx.possessions_per_team else {
            return ctx.clone();
        };

        GameContext {
            possessions_per_team: Some(self.adjust_possessions(projected, ctx)),
            pace_spike_damp: Some(self.damp_factor(ctx)),
            ..ctx.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with_possessions(poss: f64) -> GameContext {
        GameContext {
            possessions_per_team: Some(poss),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_scoring_run() {
        let cfg = PaceSpikeConfig::default();
        assert!(cfg.detect_scoring_run(&[2, 3, 2]));
        // The stop resets the counter before the run completes
        assert!(!cfg.detect_scoring_run(&[3, 3, 0, 2, 3]));
        assert!(!cfg.detect_scoring_run(&[]));
    }

    #[test]
    fn test_scoring_run_threshold_checked_before_reset() {
        let cfg = PaceSpikeConfig::default();
        assert!(cfg.detect_scoring_run(&[3, 2, 2, 0]));
    }

    #[test]
    fn test_transition_damp() {
        let cfg = PaceSpikeConfig::default();
        // Within 1.35x of baseline: no damp
        assert_eq!(cfg.transition_damp(0.15, 0.20), 1.0);
        // Excess 0.356 -> damp 0.178
        assert!((cfg.transition_damp(0.20, 0.2712) - 0.822).abs() < 1e-9);
        // Large excess is capped at max_dampen
        assert!((cfg.transition_damp(0.15, 0.30) - 0.82).abs() < 1e-9);
        // Degenerate baseline never divides by zero
        assert_eq!(cfg.transition_damp(0.0, 0.30), 1.0);
    }

    #[test]
    fn test_quarter_penalty() {
        let cfg = PaceSpikeConfig::default();
        let ctx = GameContext {
            quarter: Some(3),
            ..game_with_possessions(100.0)
        };
        let out = cfg.adjust(&ctx);
        assert!((out.possessions_per_team.unwrap() - 90.0).abs() < 1e-9);
        assert!((out.pace_spike_damp.unwrap() - 0.9).abs() < 1e-9);

        let early = GameContext {
            quarter: Some(1),
            ..game_with_possessions(100.0)
        };
        assert_eq!(cfg.adjust(&early).possessions_per_team, Some(100.0));
    }

    #[test]
    fn test_floor_limits_compounded_damp() {
        let cfg = PaceSpikeConfig::default();
        // Q4 (0.85) * run (0.88) = 0.748, below the 0.82 floor
        let ctx = GameContext {
            quarter: Some(4),
            scoring_sequence: vec![2, 3, 2],
            ..game_with_possessions(100.0)
        };
        let out = cfg.adjust(&ctx);
        assert!((out.possessions_per_team.unwrap() - 82.0).abs() < 1e-9);
        assert!((out.pace_spike_damp.unwrap() - 0.748).abs() < 1e-9);
    }

    #[test]
    fn test_never_amplifies() {
        let cfg = PaceSpikeConfig::default();
        let ctx = GameContext {
            is_overtime: true,
            quarter: Some(4),
            baseline_transition_rate: Some(0.10),
            observed_transition_rate: Some(0.40),
            ..game_with_possessions(97.5)
        };
        let adjusted = cfg.adjust(&ctx).possessions_per_team.unwrap();
        assert!(adjusted <= 97.5);
        assert!(adjusted >= 97.5 * 0.82 - 1e-9);
    }

    #[test]
    fn test_missing_possessions_passes_through() {
        let cfg = PaceSpikeConfig::default();
        let ctx = GameContext {
            quarter: Some(4),
            ..Default::default()
        };
        assert_eq!(cfg.adjust(&ctx), ctx);
    }

    #[test]
    fn test_validate_quarter_table() {
        let mut cfg = PaceSpikeConfig::default();
        cfg.quarter_penalties.push(QuarterPenalty { quarter: 2, penalty: 1.5 });
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("quarter_penalties[2]"));
    }
}
