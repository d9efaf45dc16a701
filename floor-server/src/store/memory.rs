//! In-process document store
//!
//! Backs tests and local development (`STORE_BACKEND=memory`). Records are
//! kept per collection in insertion order. Filter expressions are NOT
//! evaluated — every list call returns the whole collection, which is safe
//! for the server's callers because they re-validate records locally
//! (the hold applier's contract requires that anyway).
//!
//! Collections can be marked as failing to exercise fallback-write paths.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{RwLock, mpsc};

use super::{DocumentStore, ListOptions, RealtimeEvent, RecordPage, StoreError};

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    subscribers: HashMap<String, Vec<mpsc::Sender<RealtimeEvent>>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
    /// Writes against these collections are rejected
    failing: Arc<HashSet<String>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes fail for the given collections
    pub fn failing<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: Arc::new(collections.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Seed a record, assigning an id when the payload has none
    pub async fn seed(&self, collection: &str, mut record: Value) -> String {
        let id = match record.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = self.generate_id();
                record["id"] = json!(id);
                id
            }
        };
        let mut inner = self.inner.write().await;
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
        id
    }

    fn generate_id(&self) -> String {
        format!("rec{:08}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn reject_if_failing(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing.contains(collection) {
            return Err(StoreError::Rejected {
                status: 400,
                message: format!("collection {collection} unavailable"),
            });
        }
        Ok(())
    }

    async fn publish(&self, collection: &str, action: &str, record: &Value) {
        let mut inner = self.inner.write().await;
        if let Some(subscribers) = inner.subscribers.get_mut(collection) {
            let event = RealtimeEvent {
                action: action.to_string(),
                record: record.clone(),
            };
            subscribers.retain(|tx| tx.try_send(event.clone()).is_ok());
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_full_list(
        &self,
        collection: &str,
        _opts: ListOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get_list(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        opts: ListOptions,
    ) -> Result<RecordPage, StoreError> {
        let all = self.get_full_list(collection, opts).await?;
        let total_items = all.len() as u64;
        let start = ((page.max(1) - 1) * per_page) as usize;
        let items = all.into_iter().skip(start).take(per_page as usize).collect();
        Ok(RecordPage {
            items,
            page,
            per_page,
            total_items,
        })
    }

    async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let inner = self.inner.read().await;
        inner
            .collections
            .get(collection)
            .and_then(|records| {
                records
                    .iter()
                    .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            })
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn create(&self, collection: &str, mut data: Value) -> Result<Value, StoreError> {
        self.reject_if_failing(collection)?;
        if data.get("id").and_then(Value::as_str).is_none_or(str::is_empty) {
            data["id"] = json!(self.generate_id());
        }
        {
            let mut inner = self.inner.write().await;
            inner
                .collections
                .entry(collection.to_string())
                .or_default()
                .push(data.clone());
        }
        self.publish(collection, "create", &data).await;
        Ok(data)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Value, StoreError> {
        self.reject_if_failing(collection)?;
        let updated = {
            let mut inner = self.inner.write().await;
            let records = inner.collections.entry(collection.to_string()).or_default();
            let record = records
                .iter_mut()
                .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            if let (Value::Object(target), Value::Object(patch)) = (&mut *record, &data) {
                for (k, v) in patch {
                    target.insert(k.clone(), v.clone());
                }
            }
            record.clone()
        };
        self.publish(collection, "update", &updated).await;
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.reject_if_failing(collection)?;
        let removed = {
            let mut inner = self.inner.write().await;
            let records = inner.collections.entry(collection.to_string()).or_default();
            let before = records.len();
            records.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
            if records.len() == before {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            }
            json!({ "id": id })
        };
        self.publish(collection, "delete", &removed).await;
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<RealtimeEvent>, StoreError> {
        let (tx, rx) = mpsc::channel(64);
        let mut inner = self.inner.write().await;
        inner
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        Ok(rx)
    }
}
