//! The `CustomerStore` trait: the engine's only external collaborator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::snapshot::{CustomerPatch, CustomerSnapshot};

/// Async access to per-customer progression state.
///
/// The remote tabular store is the system of record; implementations wrap
/// its HTTP API. The engine itself never calls this trait — the integration
/// layer loads a snapshot, runs a cycle, and writes the outcome back.
///
/// # Concurrency
///
/// Writes carry the version read with the snapshot. A concurrent write to
/// the same customer bumps the stored version, and the late writer gets
/// [`StoreError::VersionConflict`]; it must reload and re-run its cycle
/// against fresh state. This is the per-customer serialization the engine
/// assumes.
///
/// # Implementation notes
///
/// - Log failures via `tracing` before returning them.
/// - Retry/backoff for transient backend failures belongs inside the
///   implementation, not in callers.
///
/// [`StoreError::VersionConflict`]: crate::error::StoreError::VersionConflict
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Load the full state for a customer.
    ///
    /// A customer with no record yet yields a default snapshot at version 0,
    /// not an error: new customers legitimately have no history, and absence
    /// of data must stay distinguishable from fabricated data.
    async fn load_customer_state(&self, customer_id: Uuid) -> Result<CustomerSnapshot>;

    /// Apply a patch to a customer's record.
    ///
    /// `expected_version` must equal the stored version or the write fails
    /// with a version conflict. Returns the new version on success.
    async fn save_customer_state(
        &self,
        customer_id: Uuid,
        patch: CustomerPatch,
        expected_version: u64,
    ) -> Result<u64>;
}
