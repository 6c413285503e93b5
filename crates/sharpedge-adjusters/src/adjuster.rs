//! Adjuster capability traits and schema validation helpers

use crate::AdjusterError;

/// Configuration schema shared by every adjuster
///
/// Each adjuster owns its config type; the config *is* the adjuster, since
/// every transform is a pure function of (context, config).
pub trait AdjusterSchema {
    /// Registry key for this adjuster
    fn name(&self) -> &'static str;

    /// Whether the adjuster is switched on
    fn is_enabled(&self) -> bool;

    /// Validate the numeric knobs, failing fast on malformed values
    fn validate(&self) -> Result<(), AdjusterError>;
}

/// A deterministic context transform
pub trait Adjuster: AdjusterSchema {
    /// Context this adjuster reads and writes
    type Context: Clone;

    /// Apply the closed-form transform (enabled path only)
    ///
    /// Returns a new context; fields the adjuster does not own are copied
    /// through unchanged.
    fn transform(&self, ctx: &Self::Context) -> Self::Context;

    /// Adjust a context, returning an exact copy when disabled
    fn adjust(&self, ctx: &Self::Context) -> Self::Context {
        if !self.is_enabled() {
            return ctx.clone();
        }
        self.transform(ctx)
    }
}

/// Reject NaN and infinities
pub(crate) fn require_finite(
    adjuster: &'static str,
    field: &str,
    value: f64,
) -> Result<(), AdjusterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(adjuster, field, format!("{} is not a finite number", value)))
    }
}

/// Require a finite value strictly above zero
pub(crate) fn require_positive(
    adjuster: &'static str,
    field: &str,
    value: f64,
) -> Result<(), AdjusterError> {
    require_finite(adjuster, field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(adjuster, field, format!("{} must be greater than 0", value)))
    }
}

/// Require a finite value at or above zero
pub(crate) fn require_non_negative(
    adjuster: &'static str,
    field: &str,
    value: f64,
) -> Result<(), AdjusterError> {
    require_finite(adjuster, field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(adjuster, field, format!("{} must not be negative", value)))
    }
}

/// Require a finite value in [0.0, 1.0]
pub(crate) fn require_fraction(
    adjuster: &'static str,
    field: &str,
    value: f64,
) -> Result<(), AdjusterError> {
    require_finite(adjuster, field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(adjuster, field, format!("{} is outside [0.0, 1.0]", value)))
    }
}

fn invalid(adjuster: &'static str, field: &str, reason: String) -> AdjusterError {
    AdjusterError::InvalidValue {
        adjuster,
        field: field.to_string(),
        reason,
    }
}
