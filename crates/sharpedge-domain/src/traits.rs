//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pure gating core and the
//! collaborators around it. Implementations live in other crates.

use crate::DecisionLog;

/// Trait for persisting decision audit records
///
/// Implemented by the downstream persistence layer (the CLI writes JSON lines).
/// Storage is append-only: records are never rewritten.
pub trait DecisionSink {
    /// Error type for sink operations
    type Error;

    /// Append one audit record
    fn record(&mut self, log: &DecisionLog) -> Result<(), Self::Error>;

    /// Flush buffered records, if the sink buffers
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl DecisionSink for Vec<DecisionLog> {
    type Error = std::convert::Infallible;

    fn record(&mut self, log: &DecisionLog) -> Result<(), Self::Error> {
        self.push(log.clone());
        Ok(())
    }
}
