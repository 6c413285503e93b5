//! SharpEdge Gatekeeper
//!
//! Decides whether a proposition may be published and at what tier.
//!
//! The Gatekeeper provides:
//! - Tag penalties on the starter-big OVER zone
//! - Tier classification from the raw win probability
//! - Tier overrides when volatility tags are active
//! - A stricter live-flow execution gate
//! - Decision assembly with an audit trail
//!
//! # Examples
//!
//! ```
//! use sharpedge_domain::{EvalMode, Proposition, Side, Tier};
//! use sharpedge_gatekeeper::Gatekeeper;
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let prop = Proposition::new("Starter Big", "NYK", "REB", Side::Over, 11.5, -110)
//!     .with_projection(12.4, 12.0, 0.72, 0.04)
//!     .with_tags(["STARTER_BIG_MINUTES_CAP"])
//!     .with_starter_big(true);
//!
//! let decision = gatekeeper.evaluate(&prop, EvalMode::Liveflow);
//! assert!(decision.allowed);
//! assert_eq!(decision.final_tier, Tier::Limited);
//! ```

#![warn(missing_docs)]

mod assembler;
mod config;
mod error;
mod liveflow;
mod penalties;
mod tiering;

pub use assembler::{BatchSummary, Gatekeeper};
pub use config::{GateConfig, LiveFlowThresholds};
pub use error::GatekeeperError;
pub use liveflow::{liveflow_execution_gate, GateOutcome};
pub use penalties::{
    apply_tag_penalties, PenaltyOutcome, TagPenaltyRule, TagPenaltyTable, DEFAULT_TABLE_VERSION,
};
pub use tiering::{
    base_tier, confidence_override, OverrideOutcome, LIMITED_THRESHOLD, LOCK_THRESHOLD,
    STRONG_THRESHOLD,
};
