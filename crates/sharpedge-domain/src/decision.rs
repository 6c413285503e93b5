//! Decision records produced by the gating pipeline

use crate::{EvalMode, Proposition, Side, Tier};
use serde::{Deserialize, Serialize};

/// The audited outcome of evaluating one proposition
///
/// Produced exactly once per evaluation call and never mutated afterwards.
/// `blocks` is empty iff `allowed`; `notes` is populated whenever any rule or
/// override fired, allowed or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the proposition may be published
    pub allowed: bool,

    /// Tier from the raw (pre-penalty) win probability
    pub base_tier: Tier,

    /// Tier after overrides
    pub final_tier: Tier,

    /// Whether any override changed the tier
    pub tier_overridden: bool,

    /// Mean after tag penalties
    pub adj_mean: f64,

    /// Median after tag penalties
    pub adj_median: f64,

    /// Win probability after tag penalties, in [0.01, 0.99]
    pub adj_win_probability: f64,

    /// Edge after tag penalties
    pub adj_edge: f64,

    /// Block reasons in the order they were raised
    pub blocks: Vec<String>,

    /// Rationale from every penalty and override that fired
    pub notes: Vec<String>,

    /// Active tags that matched a registered penalty rule
    pub tags_applied: Vec<String>,

    /// Mode the decision was evaluated under
    pub mode: EvalMode,
}

/// Flattened audit view joining a proposition with its decision
///
/// One record per evaluation, intended for append-only storage. The layout is
/// serialization-agnostic; the CLI happens to write it as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLog {
    /// Player name
    pub player: String,
    /// Team code
    pub team: String,
    /// Market
    pub market: String,
    /// Side
    pub side: Side,
    /// Line
    pub line: f64,
    /// American odds
    pub odds_american: i32,
    /// Upstream mean
    pub base_mean: f64,
    /// Upstream median
    pub base_median: f64,
    /// Upstream win probability
    pub base_win_probability: f64,
    /// Upstream edge
    pub base_edge: f64,
    /// Tags active at evaluation time
    pub tags_active: Vec<String>,
    /// The decision itself
    pub decision: Decision,
}

impl DecisionLog {
    /// Join a proposition and its decision into one audit record
    pub fn new(proposition: &Proposition, decision: &Decision) -> Self {
        Self {
            player: proposition.player.clone(),
            team: proposition.team.clone(),
            market: proposition.market.clone(),
            side: proposition.side,
            line: proposition.line,
            odds_american: proposition.odds_american,
            base_mean: proposition.mean,
            base_median: proposition.median,
            base_win_probability: proposition.win_probability,
            base_edge: proposition.edge,
            tags_active: proposition.tags_active.clone(),
            decision: decision.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_decision() -> Decision {
        Decision {
            allowed: false,
            base_tier: Tier::NoPlay,
            final_tier: Tier::NoPlay,
            tier_overridden: false,
            adj_mean: 7.1,
            adj_median: 7.0,
            adj_win_probability: 0.45,
            adj_edge: -0.01,
            blocks: vec!["Tier block: confidence tier = NO_PLAY after gate.".to_string()],
            notes: vec![],
            tags_applied: vec![],
            mode: EvalMode::Pregame,
        }
    }

    #[test]
    fn test_log_joins_base_fields() {
        let prop = Proposition::new("Test Big", "NYK", "REB", Side::Under, 7.5, 105)
            .with_projection(7.1, 7.0, 0.45, -0.01)
            .with_tags(["BENCH_BIG_MINUTES_SPIKE"]);
        let decision = create_test_decision();

        let log = DecisionLog::new(&prop, &decision);
        assert_eq!(log.player, "Test Big");
        assert_eq!(log.base_win_probability, 0.45);
        assert_eq!(log.tags_active, vec!["BENCH_BIG_MINUTES_SPIKE"]);
        assert!(!log.decision.allowed);
    }

    #[test]
    fn test_log_serializes_nested_decision() {
        let prop = Proposition::new("Test Big", "NYK", "REB", Side::Under, 7.5, 105);
        let log = DecisionLog::new(&prop, &create_test_decision());

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["side"], "UNDER");
        assert_eq!(value["decision"]["final_tier"], "NO_PLAY");
        assert_eq!(value["decision"]["mode"], "PREGAME");
    }
}
