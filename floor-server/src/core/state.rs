use std::sync::Arc;

use crate::core::config::{Config, StoreBackend};
use crate::store::{DocumentStore, HttpStore, MemoryStore};
use crate::tables::TableService;
use crate::tickets::TicketService;

/// Server state holding shared references to the configuration and the
/// document store.
///
/// Cloning is shallow (Arc) and cheap; every handler receives a clone
/// through axum's `State` extractor.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
}

impl ServerState {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store }
    }

    /// Build the state from configuration, choosing the store backend.
    pub fn initialize(config: Config) -> Self {
        let store: Arc<dyn DocumentStore> = match config.store_backend {
            StoreBackend::Http => Arc::new(HttpStore::new(config.store_url.clone())),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Self::new(config, store)
    }

    /// State backed by an in-process store, for tests
    pub fn in_memory(config: Config, store: MemoryStore) -> Self {
        Self::new(config, Arc::new(store))
    }

    pub fn ticket_service(&self) -> TicketService {
        TicketService::new(self.store.clone())
    }

    pub fn table_service(&self) -> TableService {
        TableService::new(self.store.clone())
    }
}
