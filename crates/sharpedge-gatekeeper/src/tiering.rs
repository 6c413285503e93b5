//! Tier classification and risk-driven overrides

use crate::TagPenaltyTable;
use sharpedge_domain::{Proposition, RiskTag, Tier};

/// Minimum win probability for LOCK
pub const LOCK_THRESHOLD: f64 = 0.70;

/// Minimum win probability for STRONG
pub const STRONG_THRESHOLD: f64 = 0.60;

/// Minimum win probability for LIMITED
pub const LIMITED_THRESHOLD: f64 = 0.50;

const NO_LOCK_REASON: &str =
    "Tier override: starter REB OVER + volatility tag → no LOCK allowed.";
const MINUTES_CAP_REASON: &str =
    "Tier override: STARTER_BIG_MINUTES_CAP → max tier = LIMITED (one-book limit).";

/// Bucket a raw win probability into a tier
///
/// Boundaries are inclusive on the lower edge. NaN falls through to NO_PLAY.
pub fn base_tier(win_probability: f64) -> Tier {
    if win_probability >= LOCK_THRESHOLD {
        Tier::Lock
    } else if win_probability >= STRONG_THRESHOLD {
        Tier::Strong
    } else if win_probability >= LIMITED_THRESHOLD {
        Tier::Limited
    } else {
        Tier::NoPlay
    }
}

/// Result of the override pass
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideOutcome {
    /// Tier after overrides
    pub tier: Tier,
    /// Whether any step changed the tier
    pub overridden: bool,
    /// One reason per step that fired
    pub reasons: Vec<String>,
}

/// Cap the tier of risky starter-big OVERs
///
/// Fires only for a starter-big OVER with at least one registered tag
/// active. LOCK drops to STRONG first; then, if a minutes-cap tag is active
/// and the tier is still STRONG or better, it is forced to LIMITED. Never
/// raises a tier.
pub fn confidence_override(
    base: Tier,
    prop: &Proposition,
    table: &TagPenaltyTable,
) -> OverrideOutcome {
    let mut outcome = OverrideOutcome {
        tier: base,
        overridden: false,
        reasons: Vec::new(),
    };

    if !prop.is_starter_big_over() || !table.any_registered(prop) {
        return outcome;
    }

    if outcome.tier == Tier::Lock {
        outcome.tier = Tier::Strong;
        outcome.overridden = true;
        outcome.reasons.push(NO_LOCK_REASON.to_string());
    }

    let minutes_capped = prop
        .active_risk_tags()
        .iter()
        .any(RiskTag::is_minutes_cap_class);
    if minutes_capped && outcome.tier >= Tier::Strong {
        outcome.tier = Tier::Limited;
        outcome.overridden = true;
        outcome.reasons.push(MINUTES_CAP_REASON.to_string());
    }

    outcome
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use sharpedge_domain::Side;

    fn any_tier() -> impl Strategy<Value = Tier> {
        prop_oneof![
            Just(Tier::NoPlay),
            Just(Tier::Limited),
            Just(Tier::Strong),
            Just(Tier::Lock),
        ]
    }

    fn any_tags() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::sample::subsequence(
            vec![
                "CENTER_DISPLACEMENT_RISK_ON",
                "BENCH_BIG_MINUTES_SPIKE",
                "STARTER_BIG_MINUTES_CAP",
                "OTHER",
            ],
            0..=4,
        )
    }

    proptest! {
        #[test]
        fn base_tier_is_monotonic(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(base_tier(lo) <= base_tier(hi));
        }

        #[test]
        fn override_never_raises(
            base in any_tier(),
            tags in any_tags(),
            over in any::<bool>(),
            starter in any::<bool>(),
        ) {
            let side = if over { Side::Over } else { Side::Under };
            let prop = Proposition::new("P", "T", "REB", side, 9.5, -110)
                .with_tags(tags)
                .with_starter_big(starter);
            let out = confidence_override(base, &prop, &TagPenaltyTable::default());
            prop_assert!(out.tier <= base);
            prop_assert_eq!(out.overridden, out.tier != base);
            prop_assert_eq!(out.overridden, !out.reasons.is_empty());
        }

        #[test]
        fn minutes_cap_ceiling(base in any_tier(), tags in any_tags()) {
            let prop = Proposition::new("P", "T", "REB", Side::Over, 9.5, -110)
                .with_tags(tags)
                .with_starter_big(true);
            prop_assume!(prop.has_tag(RiskTag::StarterBigMinutesCap));
            let out = confidence_override(base, &prop, &TagPenaltyTable::default());
            prop_assert!(out.tier <= Tier::Limited);
        }
    }
}
