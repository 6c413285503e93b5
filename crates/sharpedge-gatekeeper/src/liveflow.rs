//! Live-flow execution gate

use crate::{LiveFlowThresholds, TagPenaltyTable};
use sharpedge_domain::{Proposition, RiskTag};

/// Result of the live-flow gate
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// True iff no block was raised
    pub allowed: bool,
    /// One message per failed requirement
    pub blocks: Vec<String>,
}

/// Require stronger post-penalty numbers for risky starter-big OVERs
///
/// Only starter-big OVERs with a registered tag active are gated; anything
/// else passes. Both comparisons are strict, so a value exactly at the bar
/// passes.
pub fn liveflow_execution_gate(
    prop: &Proposition,
    adj_win_probability: f64,
    adj_edge: f64,
    table: &TagPenaltyTable,
    thresholds: &LiveFlowThresholds,
) -> GateOutcome {
    let mut blocks = Vec::new();

    if prop.is_starter_big_over() && table.any_registered(prop) {
        let mut required_wp = thresholds.min_win_probability;
        let required_edge = thresholds.min_edge;

        if prop
            .active_risk_tags()
            .iter()
            .any(RiskTag::is_minutes_cap_class)
        {
            required_wp += thresholds.minutes_cap_extra_win_probability;
        }

        if adj_win_probability < required_wp {
            blocks.push(format!(
                "LiveFlow block: adj_win_prob {:.3} < required {:.3} for starter REB OVER w/ volatility tags.",
                adj_win_probability, required_wp
            ));
        }
        if adj_edge < required_edge {
            blocks.push(format!(
                "LiveFlow block: adj_edge {:.4} < required {:.4} for starter REB OVER w/ volatility tags.",
                adj_edge, required_edge
            ));
        }
    }

    GateOutcome {
        allowed: blocks.is_empty(),
        blocks,
    }
}
