//! Customer-state persistence boundary for the momentum engine.
//!
//! Defines the async [`CustomerStore`] trait the integration layer uses to
//! load and save per-customer progression state, the snapshot/patch records
//! it exchanges, and an in-memory implementation for tests. The production
//! implementation wraps the remote tabular store's HTTP API and lives with
//! the service that owns those credentials.
//!
//! Concurrency is optimistic: every snapshot carries a version, every write
//! asserts it, and the loser of a race gets a retryable
//! [`StoreError::VersionConflict`].

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryCustomerStore;
pub use snapshot::{CustomerPatch, CustomerSnapshot};
pub use store::CustomerStore;
