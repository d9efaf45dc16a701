//! REST client for the external document store
//!
//! Speaks the backend's collection API:
//! `/api/collections/{name}/records` for CRUD with `filter` / `sort` /
//! `page` / `perPage` query parameters, and `/api/realtime` (SSE) for the
//! subscribe pass-through.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{DocumentStore, ListOptions, RealtimeEvent, RecordPage, StoreError};

/// Page size used when materializing a full list
const FULL_LIST_PAGE_SIZE: u32 = 500;

/// Buffered realtime events per subscriber
const REALTIME_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn records_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{}/records", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.records_url(collection), id)
    }

    fn list_query(page: u32, per_page: u32, opts: &ListOptions) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        if let Some(filter) = &opts.filter {
            query.push(("filter", filter.clone()));
        }
        if let Some(sort) = &opts.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }

    /// Turn a non-success response into a [`StoreError`]
    async fn check(
        response: reqwest::Response,
        collection: &str,
        id: Option<&str>,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport(e.to_string())
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn get_full_list(
        &self,
        collection: &str,
        opts: ListOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .get_list(collection, page, FULL_LIST_PAGE_SIZE, opts.clone())
                .await?;
            let item_count = batch.items.len() as u32;
            all.extend(batch.items);
            if item_count < FULL_LIST_PAGE_SIZE {
                return Ok(all);
            }
            page += 1;
        }
    }

    async fn get_list(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        opts: ListOptions,
    ) -> Result<RecordPage, StoreError> {
        debug!(collection, page, filter = ?opts.filter, "store list");
        let response = self
            .client
            .get(self.records_url(collection))
            .query(&Self::list_query(page, per_page, &opts))
            .send()
            .await?;
        let response = Self::check(response, collection, None).await?;
        Self::decode_body(response).await
    }

    async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let response = self
            .client
            .get(self.record_url(collection, id))
            .send()
            .await?;
        let response = Self::check(response, collection, Some(id)).await?;
        Self::decode_body(response).await
    }

    async fn create(&self, collection: &str, data: Value) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(self.records_url(collection))
            .json(&data)
            .send()
            .await?;
        let response = Self::check(response, collection, None).await?;
        Self::decode_body(response).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Value, StoreError> {
        let response = self
            .client
            .patch(self.record_url(collection, id))
            .json(&data)
            .send()
            .await?;
        let response = Self::check(response, collection, Some(id)).await?;
        Self::decode_body(response).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.record_url(collection, id))
            .send()
            .await?;
        Self::check(response, collection, Some(id)).await?;
        Ok(())
    }

    /// SSE subscription pass-through.
    ///
    /// Protocol: open the event stream, wait for the connect event carrying
    /// a `clientId`, register the topic, then forward every event whose
    /// name matches the topic. The forwarding task ends when the receiver
    /// is dropped or the stream closes.
    async fn subscribe(&self, topic: &str) -> Result<mpsc::Receiver<RealtimeEvent>, StoreError> {
        let (tx, rx) = mpsc::channel(REALTIME_CHANNEL_CAPACITY);
        let realtime_url = format!("{}/api/realtime", self.base_url);
        let response = self.client.get(&realtime_url).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Rejected {
                status: response.status().as_u16(),
                message: "realtime endpoint refused connection".into(),
            });
        }

        let topic = topic.to_string();
        let client = self.client.clone();
        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();
            let mut registered = false;

            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(error = %e, "realtime stream broke");
                        break;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // SSE frames are separated by a blank line
                while let Some(idx) = buffer.find("\n\n") {
                    let frame = buffer[..idx].to_string();
                    buffer.drain(..idx + 2);

                    let mut event_name = String::new();
                    let mut data = String::new();
                    for line in frame.lines() {
                        if let Some(rest) = line.strip_prefix("event:") {
                            event_name = rest.trim().to_string();
                        } else if let Some(rest) = line.strip_prefix("data:") {
                            data.push_str(rest.trim());
                        }
                    }

                    if !registered {
                        // First frame carries the client id; register our topic
                        if let Ok(v) = serde_json::from_str::<Value>(&data)
                            && let Some(client_id) = v.get("clientId").and_then(Value::as_str)
                        {
                            let result = client
                                .post(&realtime_url)
                                .json(&json!({
                                    "clientId": client_id,
                                    "subscriptions": [topic.clone()],
                                }))
                                .send()
                                .await;
                            if let Err(e) = result {
                                warn!(error = %e, "realtime subscription registration failed");
                                return;
                            }
                            registered = true;
                        }
                        continue;
                    }

                    if event_name != topic {
                        continue;
                    }
                    match serde_json::from_str::<RealtimeEvent>(&data) {
                        Ok(event) => {
                            if tx.send(event).await.is_err() {
                                return; // receiver dropped
                            }
                        }
                        Err(e) => warn!(error = %e, "undecodable realtime event"),
                    }
                }
            }
        });

        Ok(rx)
    }
}
