//! MongoDB-backed store.
//!
//! Records live in one collection; the id sequence lives in a `counters`
//! collection of the same database as `{ _id: "sinaxario", seq: <i64> }`.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{
    ClientOptions, IndexOptions, ReturnDocument, ServerApi, ServerApiVersion,
};
use mongodb::{Client, Collection, IndexModel};

use crate::model::{InsertedId, Sinaxario};

use super::errors::{StoreError, StoreResult};
use super::SinaxarioStore;

/// Collection holding the id sequence; records may not live here
pub const COUNTERS_COLLECTION: &str = "counters";
const SEQUENCE_KEY: &str = "sinaxario";
const APP_NAME: &str = "sinaxario";

/// Connection settings for `MongoStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoStoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Production store over a MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    records: Collection<Sinaxario>,
    counters: Collection<Document>,
}

impl MongoStore {
    /// Connect, ping, and make sure the `id` index exists.
    ///
    /// Any failure to build the client or answer the ping is a
    /// `StoreError::Connection`.
    pub async fn connect(config: &MongoStoreConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::connection(format!("Invalid connection string: {}", e)))?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)
            .map_err(|e| StoreError::connection(format!("Failed to create client: {}", e)))?;

        let database = client.database(&config.database);
        let store = Self {
            records: database.collection(&config.collection),
            counters: database.collection(COUNTERS_COLLECTION),
            client,
        };

        store.ping().await?;
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Pinged deployment, connected to MongoDB"
        );

        store.ensure_id_index().await;
        Ok(store)
    }

    /// Unique index on `id`. Collections written by racing creators may
    /// already hold duplicates; that is logged and tolerated.
    async fn ensure_id_index(&self) {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        if let Err(e) = self.records.create_index(index).await {
            tracing::warn!(error = %e, "Could not create unique index on id");
        }
    }
}

fn is_decode_error(err: &MongoError) -> bool {
    matches!(*err.kind, ErrorKind::BsonDeserialization(_))
}

fn read_error(context: &str, err: MongoError) -> StoreError {
    if is_decode_error(&err) {
        StoreError::decode(format!("{}: {}", context, err))
    } else {
        StoreError::query(format!("{}: {}", context, err))
    }
}

fn sequence_value(doc: &Document) -> StoreResult<i64> {
    match doc.get("seq") {
        Some(Bson::Int64(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(i64::from(*v)),
        other => Err(StoreError::decode(format!(
            "Sequence document has no integer seq: {:?}",
            other
        ))),
    }
}

#[async_trait]
impl SinaxarioStore for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| StoreError::connection(format!("Ping failed: {}", e)))
    }

    async fn count(&self) -> StoreResult<u64> {
        self.records
            .count_documents(doc! {})
            .await
            .map_err(|e| read_error("Count failed", e))
    }

    async fn max_id(&self) -> StoreResult<Option<i64>> {
        let highest = self
            .records
            .find_one(doc! {})
            .sort(doc! { "id": -1 })
            .await
            .map_err(|e| read_error("Max id lookup failed", e))?;

        Ok(highest.map(|record| record.id))
    }

    async fn seed_sequence(&self, floor: i64) -> StoreResult<()> {
        self.counters
            .update_one(
                doc! { "_id": SEQUENCE_KEY },
                doc! { "$max": { "seq": floor } },
            )
            .upsert(true)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::write(format!("Sequence seed failed: {}", e)))
    }

    async fn next_sequence(&self) -> StoreResult<i64> {
        let updated = self
            .counters
            .find_one_and_update(
                doc! { "_id": SEQUENCE_KEY },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError::write(format!("Sequence increment failed: {}", e)))?
            .ok_or_else(|| StoreError::write("Sequence increment returned no document"))?;

        sequence_value(&updated)
    }

    async fn insert(&self, record: &Sinaxario) -> StoreResult<InsertedId> {
        let result = self
            .records
            .insert_one(record)
            .await
            .map_err(|e| StoreError::write(format!("Insert failed: {}", e)))?;

        Ok(InsertedId::from(result.inserted_id))
    }

    async fn find_all(&self) -> StoreResult<Vec<Sinaxario>> {
        let cursor = self
            .records
            .find(doc! {})
            .await
            .map_err(|e| read_error("Find failed", e))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| read_error("Cursor read failed", e))
    }

    async fn find_by_date(&self, data: &str) -> StoreResult<Option<Sinaxario>> {
        self.records
            .find_one(doc! { "data": data })
            .sort(doc! { "id": 1 })
            .await
            .map_err(|e| read_error("Find by date failed", e))
    }
}
