//! # Identity Assigner
//!
//! Hands out the sequential, human-readable `id` of new records.
//!
//! The next id is one past the number of stored records. Rather than
//! reading the count on every create (two concurrent creates would read
//! the same count), the count is read once to prime an atomic sequence
//! owned by the store, and every create then increments that sequence.
//!
//! ## Invariants
//! - Ids handed out by `assign` are unique, including across processes
//!   sharing the same store.
//! - On a store holding N records with ids `1..=N`, the first id is N+1.
//! - Ids taken by a create whose insert later fails are not reused.

use tokio::sync::OnceCell;

use crate::store::{SharedStore, StoreError, StoreResult};

/// Sequential id allocator over a shared store
pub struct IdentityAssigner {
    store: SharedStore,
    primed: OnceCell<i64>,
}

impl IdentityAssigner {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            primed: OnceCell::new(),
        }
    }

    /// Raise the store sequence to the current record count (or the
    /// highest stored id, if larger). Runs at most once; later calls
    /// return the floor computed the first time.
    pub async fn prime(&self) -> StoreResult<i64> {
        self.primed
            .get_or_try_init(|| async {
                let count = i64::try_from(self.store.count().await?).unwrap_or(i64::MAX);
                let highest = self.store.max_id().await?.unwrap_or(0);
                let floor = count.max(highest);

                self.store.seed_sequence(floor).await?;
                tracing::info!(count, highest, floor, "Id sequence primed");
                Ok::<i64, StoreError>(floor)
            })
            .await
            .copied()
    }

    /// Next id for a new record
    pub async fn assign(&self) -> StoreResult<i64> {
        self.prime().await?;
        self.store.next_sequence().await
    }
}
