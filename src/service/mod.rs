//! # Record Service
//!
//! The three operations the system exposes, independent of transport:
//!
//! - **Create**: decode, assign the next id, insert
//! - **List-All**: every record, in store order, no pagination
//! - **Find-By-Date**: exact match on `data`, lowest id wins
//!
//! Each call is one independent round trip to the store; nothing is
//! cached between calls.

mod errors;

pub use errors::{ServiceError, ServiceResult, NOT_FOUND_MESSAGE};

use crate::identity::IdentityAssigner;
use crate::model::{InsertedId, Sinaxario};
use crate::store::SharedStore;

/// Record operations over a shared store
pub struct RecordService {
    store: SharedStore,
    identity: IdentityAssigner,
}

impl RecordService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            identity: IdentityAssigner::new(store.clone()),
            store,
        }
    }

    /// The underlying store handle
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Prime the id sequence ahead of the first create
    pub async fn prepare(&self) -> ServiceResult<i64> {
        Ok(self.identity.prime().await?)
    }

    /// Create a record from a raw JSON request body.
    ///
    /// A body that does not decode is rejected before the store is touched.
    pub async fn create(&self, body: &[u8]) -> ServiceResult<InsertedId> {
        let payload = Sinaxario::from_json_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Rejected create payload");
            ServiceError::from(e)
        })?;

        self.create_record(payload).await
    }

    /// Create an already-decoded record. Its `id` is overwritten.
    pub async fn create_record(&self, payload: Sinaxario) -> ServiceResult<InsertedId> {
        let id = self.identity.assign().await.map_err(|e| {
            tracing::error!(error = %e, "Id assignment failed");
            e
        })?;

        let record = payload.with_id(id);
        let inserted = self.store.insert(&record).await.map_err(|e| {
            tracing::error!(id, error = %e, "Insert failed");
            e
        })?;

        tracing::info!(id, inserted_id = %inserted, data = %record.data, "Sinaxario created");
        Ok(inserted)
    }

    /// Every stored record
    pub async fn list_all(&self) -> ServiceResult<Vec<Sinaxario>> {
        let records = self.store.find_all().await.map_err(|e| {
            tracing::error!(error = %e, "List failed");
            e
        })?;

        tracing::debug!(count = records.len(), "Listed sinaxario records");
        Ok(records)
    }

    /// The record whose `data` equals `data` exactly
    pub async fn find_by_date(&self, data: &str) -> ServiceResult<Sinaxario> {
        let found = self.store.find_by_date(data).await.map_err(|e| {
            tracing::error!(data, error = %e, "Find by date failed");
            e
        })?;

        found.ok_or(ServiceError::NotFound)
    }
}
