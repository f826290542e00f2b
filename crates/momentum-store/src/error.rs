//! Error types for the customer-state store boundary.

use thiserror::Error;
use uuid::Uuid;

/// Errors from customer-state persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the customer.
    #[error("customer not found: {0}")]
    NotFound(Uuid),

    /// The record changed since it was loaded. Two evaluations raced; the
    /// loser reloads fresh state and re-runs the cycle.
    #[error("version conflict for customer {customer_id}: expected {expected}, stored {stored}")]
    VersionConflict {
        customer_id: Uuid,
        expected: u64,
        stored: u64,
    },

    /// Stored payload could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend failure (HTTP transport, timeouts, quota). Retry policy is
    /// the backend client's concern, not this trait's.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True when reloading fresh state and retrying can succeed.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::VersionConflict { .. } | Self::Backend(_))
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
