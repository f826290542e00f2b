//! Structured reporting for the "repair, don't crash" policy.
//!
//! When a safe default exists for malformed input (negative points, an
//! out-of-range competency score, an unknown level string), the engine clamps
//! the value and records what it did here instead of returning an error, so
//! callers can audit repairs without the evaluation pipeline failing.

use serde::{Deserialize, Serialize};

/// One applied repair: which field was touched and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRepair {
    /// Dotted path of the repaired field, e.g. `metrics.time_spent_secs`.
    pub field: String,
    /// Human-readable description of the original value and the clamp applied.
    pub reason: String,
}

/// Accumulated repairs from one evaluation or sanitize pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    pub repairs: Vec<FieldRepair>,
}

impl RepairReport {
    /// An empty report.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no repairs were needed.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }

    /// Record a repair and emit a warning for audit trails.
    pub fn record(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        let repair = FieldRepair {
            field: field.into(),
            reason: reason.into(),
        };
        tracing::warn!(field = %repair.field, reason = %repair.reason, "input repaired");
        self.repairs.push(repair);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: RepairReport) {
        self.repairs.extend(other.repairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clean_and_accumulates() {
        let mut report = RepairReport::new();
        assert!(report.is_clean());

        report.record("metrics.score", "negative score clamped to 0");
        assert!(!report.is_clean());
        assert_eq!(report.repairs.len(), 1);
        assert_eq!(report.repairs[0].field, "metrics.score");
    }

    #[test]
    fn merge_preserves_both_sides() {
        let mut a = RepairReport::new();
        a.record("x", "r1");
        let mut b = RepairReport::new();
        b.record("y", "r2");

        a.merge(b);
        assert_eq!(a.repairs.len(), 2);
    }
}
