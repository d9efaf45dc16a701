//! Document store collaborator
//!
//! All persistence is delegated to an external backend exposing named
//! collections with CRUD, string filter expressions, chronological sort
//! and realtime push. The server talks to it through [`DocumentStore`]:
//!
//! - [`HttpStore`](http::HttpStore) - REST client for the real backend
//! - [`MemoryStore`](memory::MemoryStore) - in-process store for tests
//!   and local development (`STORE_BACKEND=memory`)

pub mod filter;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

pub use filter::Filter;
pub use http::HttpStore;
pub use memory::MemoryStore;

/// Store operation errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record does not exist
    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Backend rejected the operation (constraint violation, bad enum
    /// value, missing required field). Never swallowed by the server.
    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Transport-level failure (connection, timeout, TLS)
    #[error("store transport error: {0}")]
    Transport(String),

    /// Response body did not decode
    #[error("store decode error: {0}")]
    Decode(String),
}

/// List query options: filter expression and sort fields
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filter: Option<String>,
    /// Sort spec, `-field` for descending (e.g. `-created`)
    pub sort: Option<String>,
}

impl ListOptions {
    pub fn filtered(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// One page of records
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage {
    pub items: Vec<Value>,
    #[serde(default)]
    pub page: u32,
    #[serde(default, rename = "perPage")]
    pub per_page: u32,
    #[serde(default, rename = "totalItems")]
    pub total_items: u64,
}

/// Realtime change pushed by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// `create` | `update` | `delete`
    pub action: String,
    pub record: Value,
}

/// The external document store contract.
///
/// Operations are single-shot and fallible; retries are the caller's
/// business (only the table fallback-write path retries, exactly once,
/// against the secondary collection).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every record of a collection (store return order preserved)
    async fn get_full_list(
        &self,
        collection: &str,
        opts: ListOptions,
    ) -> Result<Vec<Value>, StoreError>;

    /// Fetch one page of records
    async fn get_list(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        opts: ListOptions,
    ) -> Result<RecordPage, StoreError>;

    async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    async fn create(&self, collection: &str, data: Value) -> Result<Value, StoreError>;

    async fn update(&self, collection: &str, id: &str, data: Value)
    -> Result<Value, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Realtime pass-through: change events for one collection topic.
    /// The server never consumes these itself; UI layers do.
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<RealtimeEvent>, StoreError>;
}

/// Decode a raw record into a typed model
pub fn decode<T: serde::de::DeserializeOwned>(record: Value) -> Result<T, StoreError> {
    serde_json::from_value(record).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Decode a full record list, surfacing the first bad record
pub fn decode_list<T: serde::de::DeserializeOwned>(
    records: Vec<Value>,
) -> Result<Vec<T>, StoreError> {
    records.into_iter().map(decode).collect()
}
