//! Error types for the CLI application.

use sharpedge_adjusters::AdjusterError;
use sharpedge_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Gate configuration rejected
    #[error("Gate error: {0}")]
    Gate(#[from] GatekeeperError),

    /// Adjuster configuration rejected
    #[error("Adjuster error: {0}")]
    Adjuster(#[from] AdjusterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A line of an input file could not be parsed
    #[error("Invalid input at line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// Parser message
        reason: String,
    },
}
