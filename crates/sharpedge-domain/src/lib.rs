//! SharpEdge Domain Layer
//!
//! This crate contains the value objects shared by every stage of the
//! signal adjustment and decision gating pipeline. It holds no evaluation
//! logic of its own beyond small invariants (probability clamping, tier
//! ordering) that every other layer relies on.
//!
//! ## Key Concepts
//!
//! - **Proposition**: A single bettable statement (player/market/side/line)
//! - **Risk Tag**: A qualitative risk signal marked active by an external detector
//! - **Tier**: Confidence bucket (LOCK > STRONG > LIMITED > NO_PLAY)
//! - **Decision**: The audited publish/block outcome for one proposition
//!
//! ## Architecture
//!
//! - Pure data and invariants only
//! - Evaluation lives in `sharpedge-gatekeeper`, context adjusters in
//!   `sharpedge-adjusters`
//! - Trait definitions for the downstream persistence collaborator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decision;
pub mod proposition;
pub mod tag;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use decision::{Decision, DecisionLog};
pub use proposition::{
    clamp_win_probability, EvalMode, Proposition, Side, MAX_WIN_PROBABILITY, MIN_WIN_PROBABILITY,
};
pub use tag::RiskTag;
pub use tier::Tier;
