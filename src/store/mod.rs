//! # Storage Handle
//!
//! A single logical collection of Sinaxario records, shared by every
//! request for the lifetime of the process.
//!
//! ## Implementations
//! - `MongoStore`: the production handle, backed by a MongoDB collection.
//! - `InMemoryStore`: a process-local handle for tests and local runs.
//!
//! ## Id sequence
//! Each store owns an atomic sequence used by the identity assigner.
//! `seed_sequence` only ever raises it; `next_sequence` increments it and
//! returns the new value in one atomic step.

mod errors;
mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{InsertedId, Sinaxario};

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use mongo::{MongoStore, MongoStoreConfig, COUNTERS_COLLECTION};

/// Shared handle type passed to the service and transport layers
pub type SharedStore = Arc<dyn SinaxarioStore>;

/// Operations the service needs from the backing store
#[async_trait]
pub trait SinaxarioStore: Send + Sync {
    /// Liveness check
    async fn ping(&self) -> StoreResult<()>;

    /// Number of stored records
    async fn count(&self) -> StoreResult<u64>;

    /// Highest `id` among stored records, if any
    async fn max_id(&self) -> StoreResult<Option<i64>>;

    /// Raise the id sequence to at least `floor`
    async fn seed_sequence(&self, floor: i64) -> StoreResult<()>;

    /// Atomically increment the id sequence and return the new value
    async fn next_sequence(&self) -> StoreResult<i64>;

    /// Persist a record as-is
    async fn insert(&self, record: &Sinaxario) -> StoreResult<InsertedId>;

    /// Every record, in store order
    async fn find_all(&self) -> StoreResult<Vec<Sinaxario>>;

    /// The lowest-id record whose `data` equals `data` exactly
    async fn find_by_date(&self, data: &str) -> StoreResult<Option<Sinaxario>>;
}
