//! In-memory `CustomerStore` for tests and development.
//!
//! Not for production: no persistence, whole-record copies on every access.
//! It does implement the same optimistic-concurrency contract as the real
//! backend, so race handling can be exercised without a network.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::snapshot::{CustomerPatch, CustomerSnapshot};
use crate::store::CustomerStore;

/// Thread-safe in-memory store keyed by customer id.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    records: DashMap<Uuid, CustomerSnapshot>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of customers with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seed a record directly, bypassing version checks. Test setup only.
    pub fn seed(&self, customer_id: Uuid, snapshot: CustomerSnapshot) {
        self.records.insert(customer_id, snapshot);
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn load_customer_state(&self, customer_id: Uuid) -> Result<CustomerSnapshot> {
        // New customers start from the zero snapshot at version 0.
        Ok(self
            .records
            .get(&customer_id)
            .map(|r| r.clone())
            .unwrap_or_default())
    }

    async fn save_customer_state(
        &self,
        customer_id: Uuid,
        patch: CustomerPatch,
        expected_version: u64,
    ) -> Result<u64> {
        let mut entry = self.records.entry(customer_id).or_default();
        let record = entry.value_mut();

        if record.version != expected_version {
            tracing::warn!(
                %customer_id,
                expected = expected_version,
                stored = record.version,
                "concurrent modification detected"
            );
            return Err(StoreError::VersionConflict {
                customer_id,
                expected: expected_version,
                stored: record.version,
            });
        }

        record.history.extend(patch.append_history);
        if let Some(competency) = patch.competency {
            record.competency = competency;
        }
        if let Some(tool_access) = patch.tool_access {
            // Write-once unlock timestamps survive a patch that lost them.
            for (tool, status) in tool_access {
                let merged = match record.tool_access.get(&tool) {
                    Some(prev) => status.merge_unlocked_at(Some(prev)),
                    None => status,
                };
                record.tool_access.insert(tool, merged);
            }
        }
        for (id, progress) in patch.milestone_progress {
            record.milestone_progress.insert(id, progress);
        }

        record.version += 1;
        tracing::debug!(%customer_id, version = record.version, "customer state saved");
        Ok(record.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_core::types::{ActionEvent, ActionMetrics};

    fn icp_event(score: f64) -> ActionEvent {
        let at = "2026-03-01T10:00:00Z".parse().unwrap();
        ActionEvent::new(ActionMetrics::Icp { score }, at).0
    }

    #[tokio::test]
    async fn missing_customer_loads_empty_snapshot() {
        let store = InMemoryCustomerStore::new();
        let snapshot = store.load_customer_state(Uuid::new_v4()).await.unwrap();
        assert_eq!(snapshot.version, 0);
        assert!(snapshot.history.is_empty());
    }

    #[tokio::test]
    async fn save_appends_history_and_bumps_version() {
        let store = InMemoryCustomerStore::new();
        let customer = Uuid::new_v4();

        let patch = CustomerPatch {
            append_history: vec![icp_event(80.0)],
            ..Default::default()
        };
        let version = store.save_customer_state(customer, patch, 0).await.unwrap();
        assert_eq!(version, 1);

        let snapshot = store.load_customer_state(customer).await.unwrap();
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(snapshot.version, 1);
    }

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let store = InMemoryCustomerStore::new();
        let customer = Uuid::new_v4();

        store
            .save_customer_state(customer, CustomerPatch::default(), 0)
            .await
            .unwrap();

        let err = store
            .save_customer_state(customer, CustomerPatch::default(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { stored: 1, .. }));
    }
}
