//! SharpEdge Adjusters
//!
//! Closed-form context transforms that sit between upstream simulation and
//! the decision gate.
//!
//! # Overview
//!
//! Every adjuster is a pure function of (context, config). It takes a
//! context by reference and returns a new one; a disabled adjuster returns
//! an exact copy. Missing optional inputs fall back to named constants in
//! the adjuster's module, so evaluation never fails.
//!
//! | Adjuster | Context | Effect |
//! |----------|---------|--------|
//! | **pace_spike** | game | Dampens projected possessions after runs, late quarters, OT |
//! | **transition_pace** | game | Bounded pace multiplier from transition frequency |
//! | **ot_inflation** | game | Adds overtime points and widens the total's sigma |
//! | **totals_transition** | game | Bounded bump on the total from transition profiles |
//! | **hv_guardrail** | game | Volatility boost on the total, flags unsafe unders |
//! | **foul_risk** | player | Shaves minutes and widens variance for bigs in foul trouble |
//! | **rebound_chance** | player | Pace, shot-mix and foul-aware rebound chance |
//! | **roleplayer_variance** | player | Seeded usage and shooting spikes for bench/role players |
//!
//! # Usage
//!
//! ```
//! use sharpedge_adjusters::{AdjusterRegistry, GameContext};
//!
//! let registry = AdjusterRegistry::with_defaults();
//! let ctx = GameContext {
//!     num_ot: 1,
//!     pred_total_median: Some(220.0),
//!     ..Default::default()
//! };
//! let adjusted = registry.apply_game(&ctx);
//! assert!(adjusted.ot_inflation_applied);
//! assert!(adjusted.pred_total_median.unwrap() > 220.0);
//! ```
//!
//! ## Overrides
//!
//! ```
//! use sharpedge_adjusters::{AdjusterRegistry, AdjusterSettings};
//!
//! let settings: AdjusterSettings = toml::from_str(
//!     "[pace_spike]\nenabled = false\n",
//! ).unwrap();
//! let registry = AdjusterRegistry::from_settings(settings).unwrap();
//! assert!(registry.get("pace_spike").is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod adjuster;
mod context;
mod error;
mod foul_risk;
mod hv_guardrail;
mod ot_inflation;
mod pace_spike;
mod rebound;
mod registry;
mod roleplayer;
mod transition;

pub use adjuster::{Adjuster, AdjusterSchema};
pub use context::{GameContext, PlayerContext, Position, Role, TransitionProfile, VolatilityInputs};
pub use error::AdjusterError;
pub use foul_risk::{FoulRiskConfig, FOUL_RISK};
pub use hv_guardrail::{HvGuardrailConfig, HvResult, HV_GUARDRAIL};
pub use ot_inflation::{OtExtra, OtInflationConfig, OT_INFLATION};
pub use pace_spike::{PaceSpikeConfig, QuarterPenalty, PACE_SPIKE};
pub use rebound::{dynamic_rebound_chance, ReboundChanceConfig, REBOUND_CHANCE};
pub use registry::{AdjusterConfig, AdjusterRegistry, AdjusterSettings, GAME_ORDER, PLAYER_ORDER};
pub use roleplayer::{RoleplayerVarianceConfig, ROLEPLAYER_VARIANCE};
pub use transition::{
    TotalsTransitionConfig, TransitionPaceConfig, TOTALS_TRANSITION, TRANSITION_PACE,
};
