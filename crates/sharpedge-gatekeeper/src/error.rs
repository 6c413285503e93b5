//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while loading or validating gate configuration
///
/// Evaluation itself never fails; blocked propositions are reported in the
/// decision, not as errors.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// A penalty table names a tag outside the vocabulary
    #[error("Unknown risk tag in penalty table: {0}")]
    UnknownTag(String),

    /// A threshold or delta is malformed
    #[error("Invalid threshold {field}: {reason}")]
    InvalidThreshold {
        /// Offending field
        field: String,
        /// Description of the issue
        reason: String,
    },

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
