//! Error types for adjuster configuration

use thiserror::Error;

/// Errors raised while validating or registering adjuster configurations
///
/// Adjusters never fail during evaluation; every variant here is a
/// configuration problem surfaced before any context is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdjusterError {
    /// A numeric knob is malformed or out of range
    #[error("Invalid value for {adjuster}.{field}: {reason}")]
    InvalidValue {
        /// Adjuster name
        adjuster: &'static str,
        /// Offending field
        field: String,
        /// Description of the issue
        reason: String,
    },

    /// The same adjuster was registered twice
    #[error("Adjuster already registered: {0}")]
    Duplicate(&'static str),
}
