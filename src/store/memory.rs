//! In-memory store.
//!
//! Records are kept in insertion order, which is also the listing order.
//! The id sequence lives under the same lock as the records.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::model::{InsertedId, Sinaxario};

use super::errors::{StoreError, StoreResult};
use super::SinaxarioStore;

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<(InsertedId, Sinaxario)>,
    sequence: i64,
}

/// Process-local store for tests and `serve --in-memory`
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`, ids kept as given.
    ///
    /// The sequence starts at zero, as it would for a collection written
    /// before the sequence existed.
    pub fn with_records(records: impl IntoIterator<Item = Sinaxario>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (InsertedId::generate(), record))
            .collect();

        Self {
            state: RwLock::new(MemoryState {
                records,
                sequence: 0,
            }),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| StoreError::query("Lock poisoned"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| StoreError::write("Lock poisoned"))
    }
}

#[async_trait]
impl SinaxarioStore for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.read().map(|_| ())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.read()?.records.len() as u64)
    }

    async fn max_id(&self) -> StoreResult<Option<i64>> {
        Ok(self.read()?.records.iter().map(|(_, r)| r.id).max())
    }

    async fn seed_sequence(&self, floor: i64) -> StoreResult<()> {
        let mut state = self.write()?;
        state.sequence = state.sequence.max(floor);
        Ok(())
    }

    async fn next_sequence(&self) -> StoreResult<i64> {
        let mut state = self.write()?;
        state.sequence += 1;
        Ok(state.sequence)
    }

    async fn insert(&self, record: &Sinaxario) -> StoreResult<InsertedId> {
        let inserted = InsertedId::generate();
        self.write()?.records.push((inserted.clone(), record.clone()));
        Ok(inserted)
    }

    async fn find_all(&self) -> StoreResult<Vec<Sinaxario>> {
        Ok(self
            .read()?
            .records
            .iter()
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn find_by_date(&self, data: &str) -> StoreResult<Option<Sinaxario>> {
        Ok(self
            .read()?
            .records
            .iter()
            .map(|(_, record)| record)
            .filter(|record| record.data == data)
            .min_by_key(|record| record.id)
            .cloned())
    }
}
