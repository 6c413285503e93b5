//! Decision assembly

use crate::penalties::apply_tag_penalties;
use crate::tiering::{base_tier, confidence_override};
use crate::{liveflow_execution_gate, GateConfig, GateOutcome, GatekeeperError};
use serde::{Deserialize, Serialize};
use sharpedge_domain::traits::DecisionSink;
use sharpedge_domain::{Decision, DecisionLog, EvalMode, Proposition, Tier};
use std::fmt;

const NO_PLAY_BLOCK: &str = "Tier block: confidence tier = NO_PLAY after gate.";

/// The Gatekeeper turns propositions into publish/block decisions
///
/// Immutable once built; evaluation is a total function of the proposition,
/// the mode and the configuration.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: GateConfig,
}

impl Gatekeeper {
    /// Create a Gatekeeper, validating the configuration
    pub fn new(config: GateConfig) -> Result<Self, GatekeeperError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self {
            config: GateConfig::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate a single proposition
    ///
    /// Steps: base tier on the raw win probability, tag penalties, tier
    /// override, live-flow gate (LIVEFLOW only), then the NO_PLAY floor.
    /// The proposition is never modified.
    pub fn evaluate(&self, prop: &Proposition, mode: EvalMode) -> Decision {
        let table = &self.config.penalties;

        let base = base_tier(prop.win_probability);
        let penalties = apply_tag_penalties(prop, table);
        let tiering = confidence_override(base, prop, table);

        let gate = match mode {
            EvalMode::Liveflow => liveflow_execution_gate(
                prop,
                penalties.win_probability,
                penalties.edge,
                table,
                &self.config.liveflow,
            ),
            EvalMode::Pregame => GateOutcome {
                allowed: true,
                blocks: Vec::new(),
            },
        };

        let mut allowed = gate.allowed;
        let mut blocks = gate.blocks;
        if !tiering.tier.is_playable() {
            allowed = false;
            blocks.push(NO_PLAY_BLOCK.to_string());
        }

        let mut notes = penalties.notes;
        notes.extend(tiering.reasons);

        let decision = Decision {
            allowed,
            base_tier: base,
            final_tier: tiering.tier,
            tier_overridden: tiering.overridden,
            adj_mean: penalties.mean,
            adj_median: penalties.median,
            adj_win_probability: penalties.win_probability,
            adj_edge: penalties.edge,
            blocks,
            notes,
            tags_applied: table.applied_tags(prop),
            mode,
        };

        tracing::debug!(
            player = %prop.player,
            market = %prop.market,
            side = %prop.side,
            mode = mode.as_str(),
            base_tier = %decision.base_tier,
            final_tier = %decision.final_tier,
            allowed = decision.allowed,
            "Evaluated proposition"
        );

        decision
    }

    /// Evaluate a batch, preserving input order
    pub fn evaluate_batch(&self, props: &[Proposition], mode: EvalMode) -> Vec<Decision> {
        let decisions: Vec<Decision> = props.iter().map(|p| self.evaluate(p, mode)).collect();
        let summary = BatchSummary::from_decisions(&decisions);
        tracing::info!(
            total = summary.total,
            allowed = summary.allowed,
            blocked = summary.blocked,
            overridden = summary.overridden,
            "Batch evaluated"
        );
        decisions
    }

    /// Evaluate and hand the audit record to a sink
    pub fn evaluate_and_record<S: DecisionSink>(
        &self,
        prop: &Proposition,
        mode: EvalMode,
        sink: &mut S,
    ) -> Result<Decision, S::Error> {
        let decision = self.evaluate(prop, mode);
        sink.record(&DecisionLog::new(prop, &decision))?;
        Ok(decision)
    }
}

/// Counts over a batch of decisions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Decisions counted
    pub total: usize,
    /// Allowed decisions
    pub allowed: usize,
    /// Blocked decisions
    pub blocked: usize,
    /// Decisions whose tier was overridden
    pub overridden: usize,
    /// Final tier LOCK
    pub lock: usize,
    /// Final tier STRONG
    pub strong: usize,
    /// Final tier LIMITED
    pub limited: usize,
    /// Final tier NO_PLAY
    pub no_play: usize,
}

impl BatchSummary {
    /// Tally a slice of decisions
    pub fn from_decisions(decisions: &[Decision]) -> Self {
        let mut summary = Self::default();
        for decision in decisions {
            summary.record(decision);
        }
        summary
    }

    /// Add one decision to the tally
    pub fn record(&mut self, decision: &Decision) {
        self.total += 1;
        if decision.allowed {
            self.allowed += 1;
        } else {
            self.blocked += 1;
        }
        if decision.tier_overridden {
            self.overridden += 1;
        }
        match decision.final_tier {
            Tier::Lock => self.lock += 1,
            Tier::Strong => self.strong += 1,
            Tier::Limited => self.limited += 1,
            Tier::NoPlay => self.no_play += 1,
        }
    }

    /// Count for a final tier
    pub fn tier_count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Lock => self.lock,
            Tier::Strong => self.strong,
            Tier::Limited => self.limited,
            Tier::NoPlay => self.no_play,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} evaluated: {} allowed, {} blocked, {} overridden (LOCK {}, STRONG {}, LIMITED {}, NO_PLAY {})",
            self.total,
            self.allowed,
            self.blocked,
            self.overridden,
            self.lock,
            self.strong,
            self.limited,
            self.no_play
        )
    }
}
