//! Integration tests for sharpedge-gatekeeper
//!
//! These tests run full evaluations through the public API and check the
//! decision invariants end to end.

use proptest::prelude::*;
use sharpedge_domain::{DecisionLog, EvalMode, Proposition, RiskTag, Side, Tier};
use sharpedge_gatekeeper::{GateConfig, Gatekeeper, TagPenaltyRule, TagPenaltyTable};

fn starter_big_over(win_probability: f64, edge: f64, tags: &[&str]) -> Proposition {
    Proposition::new("Starter Big", "NYK", "REB", Side::Over, 11.5, -110)
        .with_projection(12.4, 12.0, win_probability, edge)
        .with_tags(tags.iter().copied())
        .with_starter_big(true)
        .with_projected_minutes(28.0)
}

#[test]
fn test_minutes_cap_liveflow_scenario() {
    let gatekeeper = Gatekeeper::default_config();
    let prop = starter_big_over(0.72, 0.04, &["STARTER_BIG_MINUTES_CAP"]);

    let decision = gatekeeper.evaluate(&prop, EvalMode::Liveflow);

    // 0.72 - 0.06 = 0.66 clears the 0.62 + 0.03 bar
    assert!((decision.adj_win_probability - 0.66).abs() < 1e-9);
    assert!((decision.adj_edge - 0.022).abs() < 1e-9);
    assert!(decision.allowed, "blocks: {:?}", decision.blocks);
    assert!(decision.blocks.is_empty());
    assert_eq!(decision.base_tier, Tier::Lock);
    assert_eq!(decision.final_tier, Tier::Limited);
    assert!(decision.tier_overridden);
    assert_eq!(decision.tags_applied, vec!["STARTER_BIG_MINUTES_CAP".to_string()]);
    // One tag note, two override reasons
    assert_eq!(decision.notes.len(), 3);
    assert!((decision.adj_median - 11.1).abs() < 1e-9);
    assert!((decision.adj_mean - 11.7).abs() < 1e-9);
}

#[test]
fn test_no_play_scenario() {
    let gatekeeper = Gatekeeper::default_config();
    let prop = Proposition::new("Wing", "LAL", "REB", Side::Under, 5.5, 105)
        .with_projection(5.0, 5.0, 0.45, 0.02);

    for mode in [EvalMode::Pregame, EvalMode::Liveflow] {
        let decision = gatekeeper.evaluate(&prop, mode);
        assert!(!decision.allowed);
        assert_eq!(decision.final_tier, Tier::NoPlay);
        assert_eq!(
            decision.blocks,
            vec!["Tier block: confidence tier = NO_PLAY after gate.".to_string()]
        );
        assert!(!decision.tier_overridden);
    }
}

#[test]
fn test_pregame_bypasses_liveflow_gate() {
    let gatekeeper = Gatekeeper::default_config();
    // Fails both live-flow requirements after penalties
    let prop = starter_big_over(0.61, 0.0, &["CENTER_DISPLACEMENT_RISK_ON"]);

    let pregame = gatekeeper.evaluate(&prop, EvalMode::Pregame);
    assert!(pregame.allowed);
    assert!(pregame.blocks.is_empty());
    assert_eq!(pregame.final_tier, Tier::Strong);

    let live = gatekeeper.evaluate(&prop, EvalMode::Liveflow);
    assert!(!live.allowed);
    assert_eq!(live.blocks.len(), 2);
    assert_eq!(live.adj_win_probability, pregame.adj_win_probability);
}

#[test]
fn test_input_not_mutated() {
    let gatekeeper = Gatekeeper::default_config();
    let prop = starter_big_over(0.72, 0.04, &["STARTER_BIG_MINUTES_CAP"]);
    let before = prop.clone();

    let _ = gatekeeper.evaluate(&prop, EvalMode::Liveflow);
    assert_eq!(prop, before);
}

#[test]
fn test_substituted_penalty_table() {
    let table = TagPenaltyTable::empty("test").with_rule(
        RiskTag::BenchBigMinutesSpike,
        TagPenaltyRule {
            median_delta: -2.0,
            mean_delta: -2.0,
            win_probability_delta: -0.20,
            edge_delta: -0.05,
            rationale: "Heavy".to_string(),
        },
    );
    let config = GateConfig {
        penalties: table,
        ..GateConfig::default()
    };
    let gatekeeper = Gatekeeper::new(config).unwrap();

    // Not in the substituted table: ignored entirely
    let prop = starter_big_over(0.72, 0.04, &["STARTER_BIG_MINUTES_CAP"]);
    let decision = gatekeeper.evaluate(&prop, EvalMode::Liveflow);
    assert_eq!(decision.final_tier, Tier::Lock);
    assert!(decision.notes.is_empty());

    let prop = starter_big_over(0.72, 0.04, &["BENCH_BIG_MINUTES_SPIKE"]);
    let decision = gatekeeper.evaluate(&prop, EvalMode::Liveflow);
    assert_eq!(decision.notes[0], "BENCH_BIG_MINUTES_SPIKE: Heavy");
    assert!(!decision.allowed);
}

#[test]
fn test_batch_preserves_order() {
    let gatekeeper = Gatekeeper::default_config();
    let props: Vec<Proposition> = [0.45, 0.55, 0.65, 0.75]
        .iter()
        .map(|&wp| starter_big_over(wp, 0.05, &[]))
        .collect();

    let decisions = gatekeeper.evaluate_batch(&props, EvalMode::Pregame);
    let tiers: Vec<Tier> = decisions.iter().map(|d| d.final_tier).collect();
    assert_eq!(tiers, vec![Tier::NoPlay, Tier::Limited, Tier::Strong, Tier::Lock]);
}

#[test]
fn test_decision_log_json() {
    let gatekeeper = Gatekeeper::default_config();
    let prop = starter_big_over(0.72, 0.04, &["STARTER_BIG_MINUTES_CAP"]);
    let decision = gatekeeper.evaluate(&prop, EvalMode::Liveflow);
    let log = DecisionLog::new(&prop, &decision);

    let value = serde_json::to_value(&log).unwrap();
    assert_eq!(value["base_win_probability"], 0.72);
    assert_eq!(value["decision"]["final_tier"], "LIMITED");
    assert_eq!(value["decision"]["allowed"], true);
}

#[test]
fn test_gatekeeper_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Gatekeeper>();
}

fn any_proposition() -> impl Strategy<Value = Proposition> {
    (
        0.0f64..1.0,
        -0.1f64..0.1,
        any::<bool>(),
        proptest::option::of(any::<bool>()),
        proptest::sample::subsequence(
            vec![
                "CENTER_DISPLACEMENT_RISK_ON",
                "BENCH_BIG_MINUTES_SPIKE",
                "STARTER_BIG_MINUTES_CAP",
                "UNKNOWN_TAG",
            ],
            0..=4,
        ),
    )
        .prop_map(|(wp, edge, over, starter, tags)| {
            let side = if over { Side::Over } else { Side::Under };
            let mut prop = Proposition::new("P", "T", "REB", side, 8.5, -110)
                .with_projection(9.0, 9.0, wp, edge)
                .with_tags(tags);
            prop.is_starter_big = starter;
            prop
        })
}

fn minutes_capped_starter_big_over() -> impl Strategy<Value = Proposition> {
    (
        0.0f64..1.0,
        -0.1f64..0.1,
        proptest::sample::subsequence(
            vec![
                "CENTER_DISPLACEMENT_RISK_ON",
                "BENCH_BIG_MINUTES_SPIKE",
                "UNKNOWN_TAG",
            ],
            0..=3,
        ),
        0usize..=3,
    )
        .prop_map(|(wp, edge, mut tags, cap_at)| {
            tags.insert(cap_at.min(tags.len()), "STARTER_BIG_MINUTES_CAP");
            starter_big_over(wp, edge, &tags)
        })
}

fn any_mode() -> impl Strategy<Value = EvalMode> {
    prop_oneof![Just(EvalMode::Pregame), Just(EvalMode::Liveflow)]
}

proptest! {
    #[test]
    fn blocks_empty_iff_allowed(prop in any_proposition(), mode in any_mode()) {
        let decision = Gatekeeper::default_config().evaluate(&prop, mode);
        prop_assert_eq!(decision.allowed, decision.blocks.is_empty());
    }

    #[test]
    fn no_play_implies_blocked(prop in any_proposition(), mode in any_mode()) {
        let decision = Gatekeeper::default_config().evaluate(&prop, mode);
        if decision.final_tier == Tier::NoPlay {
            prop_assert!(!decision.allowed);
        }
    }

    #[test]
    fn adjusted_probability_in_bounds(prop in any_proposition(), mode in any_mode()) {
        let decision = Gatekeeper::default_config().evaluate(&prop, mode);
        prop_assert!((0.01..=0.99).contains(&decision.adj_win_probability));
    }

    #[test]
    fn final_tier_never_above_base(prop in any_proposition(), mode in any_mode()) {
        let decision = Gatekeeper::default_config().evaluate(&prop, mode);
        prop_assert!(decision.final_tier <= decision.base_tier);
        prop_assert_eq!(decision.tier_overridden, decision.final_tier != decision.base_tier);
    }

    #[test]
    fn minutes_cap_ceiling(prop in minutes_capped_starter_big_over(), mode in any_mode()) {
        prop_assert!(prop.has_tag(RiskTag::StarterBigMinutesCap));
        let decision = Gatekeeper::default_config().evaluate(&prop, mode);
        prop_assert!(decision.final_tier <= Tier::Limited);
    }

    #[test]
    fn pregame_only_blocks_no_play(prop in any_proposition()) {
        let decision = Gatekeeper::default_config().evaluate(&prop, EvalMode::Pregame);
        prop_assert_eq!(decision.allowed, decision.final_tier != Tier::NoPlay);
    }

    #[test]
    fn untargeted_propositions_pass_through(prop in any_proposition(), mode in any_mode()) {
        prop_assume!(!prop.is_starter_big_over());
        let decision = Gatekeeper::default_config().evaluate(&prop, mode);
        prop_assert_eq!(decision.adj_mean, prop.mean);
        prop_assert_eq!(decision.adj_edge, prop.edge);
        prop_assert!(!decision.tier_overridden);
        prop_assert_eq!(decision.allowed, decision.final_tier != Tier::NoPlay);
    }
}
