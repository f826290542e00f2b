//! Error types for momentum-core.
//!
//! The engine follows a "repair, don't crash" policy for user data: malformed
//! metrics and out-of-range competency fields are clamped to safe defaults and
//! the clamp is reported through [`crate::types::RepairReport`], not through an
//! error. [`MomentumError`] is reserved for programmer errors (unknown ids in
//! fixed registries) and genuine invariant violations.

use thiserror::Error;

use crate::types::ToolId;

/// Top-level unified error type for the momentum engine.
///
/// All evaluation entry points return [`Result`]. Data-quality problems are
/// repaired and reported, so the variants here indicate misuse of the fixed
/// configuration surface rather than bad customer data.
#[derive(Debug, Error)]
pub enum MomentumError {
    /// A milestone id was referenced that is not present in the static
    /// registry. The registry is fixed configuration loaded at process start,
    /// so this is a programmer error and fails fast.
    #[error("unknown milestone id: {0}")]
    UnknownMilestone(String),

    /// A tool was referenced that has no gate definition in the engine
    /// configuration.
    #[error("unknown tool in gate configuration: {0}")]
    UnknownTool(ToolId),

    /// Input failed validation in a way that has no safe default repair.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invariant violation inside the engine. These indicate bugs and should
    /// be investigated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MomentumError {
    /// True when retrying with corrected inputs can succeed.
    ///
    /// Registry lookups and internal invariant failures are not recoverable
    /// at the call site; validation failures are, once the caller fixes the
    /// offending input.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Convenience constructor for validation errors.
    #[inline]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Convenience constructor for internal errors.
    #[inline]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias for momentum-core operations.
pub type Result<T> = std::result::Result<T, MomentumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverability_classification() {
        assert!(MomentumError::validation("bad input").is_recoverable());
        assert!(!MomentumError::UnknownMilestone("nope".into()).is_recoverable());
        assert!(!MomentumError::internal("bug").is_recoverable());
    }

    #[test]
    fn display_includes_offending_id() {
        let err = MomentumError::UnknownMilestone("value_champion".into());
        assert!(err.to_string().contains("value_champion"));
    }
}
