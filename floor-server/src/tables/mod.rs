//! Table status tracking
//!
//! Table status is never written directly: staff record a [`TableAction`]
//! which lands as an append-only `table_updates` audit record, and the
//! resulting status is derived from the action and applied through the
//! [`fallback`] write pipeline.

pub mod fallback;

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use shared::models::table::{Table, TableStatus, TableUpdate, TableUpdateCreate};
use shared::util::format_datetime;

use crate::store::{DocumentStore, ListOptions, decode, decode_list};
use crate::utils::AppError;

pub use fallback::{Attempt, TABLES, TABLES_FALLBACK, WriteOutcome, write_table_status};

/// Append-only audit collection
pub const TABLE_UPDATES: &str = "table_updates";

/// Result of recording one table update
#[derive(Debug, Clone, Serialize)]
pub struct TableUpdateResult {
    pub update: TableUpdate,
    pub status: TableStatus,
    pub write: WriteOutcome,
}

#[derive(Clone)]
pub struct TableService {
    store: Arc<dyn DocumentStore>,
}

impl TableService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Table>, AppError> {
        let records = self
            .store
            .get_full_list(TABLES, ListOptions::default().with_sort("table_name"))
            .await?;
        Ok(decode_list(records)?)
    }

    pub async fn get(&self, id: &str) -> Result<Table, AppError> {
        Ok(decode(self.store.get_one(TABLES, id).await?)?)
    }

    /// Find a table by its unique display name (validated locally — the
    /// store filter narrows the fetch but is not trusted).
    pub async fn find_by_name(&self, table_name: &str) -> Result<Table, AppError> {
        let filter = crate::store::Filter::eq("table_name", table_name).build();
        let records = self
            .store
            .get_full_list(TABLES, ListOptions::filtered(filter))
            .await?;
        let tables: Vec<Table> = decode_list(records)?;
        tables
            .into_iter()
            .find(|t| t.table_name == table_name)
            .ok_or_else(|| AppError::not_found(format!("Table {table_name} not found")))
    }

    /// Newest audit records first.
    pub async fn list_updates(&self) -> Result<Vec<TableUpdate>, AppError> {
        let records = self
            .store
            .get_full_list(TABLE_UPDATES, ListOptions::default().with_sort("-created"))
            .await?;
        Ok(decode_list(records)?)
    }

    /// Record a table-changing action.
    ///
    /// The audit record is written first; if that fails the whole
    /// operation fails and no status write happens. The derived status
    /// then goes to the table through the primary/fallback pipeline, and
    /// the attempt chain is part of the result.
    pub async fn record_update(
        &self,
        input: TableUpdateCreate,
        now: NaiveDateTime,
    ) -> Result<TableUpdateResult, AppError> {
        if input.table_name.trim().is_empty() {
            return Err(AppError::validation("table_name is required"));
        }
        if input.performed_by.trim().is_empty() {
            return Err(AppError::validation("performed_by is required"));
        }

        let table = self.find_by_name(&input.table_name).await?;
        let status = input.action.resulting_status();

        // Party size follows the action: only a seated table carries one
        let party_size = match status {
            TableStatus::Occupied => {
                let size = input.party_size.unwrap_or(0);
                if size <= 0 {
                    return Err(AppError::validation(
                        "party_size must be positive when seating",
                    ));
                }
                if size > table.capacity {
                    return Err(AppError::validation(format!(
                        "party of {size} exceeds capacity {} of table {}",
                        table.capacity, table.table_name
                    )));
                }
                size
            }
            _ => 0,
        };

        let record = self
            .store
            .create(
                TABLE_UPDATES,
                json!({
                    "table_name": input.table_name,
                    "action": input.action,
                    "performed_by": input.performed_by,
                    "notes": input.notes,
                    "created": format_datetime(&now),
                }),
            )
            .await?;
        let update: TableUpdate = decode(record)?;

        let write = write_table_status(
            self.store.as_ref(),
            &table.id,
            json!({
                "status": status,
                "current_party_size": party_size,
            }),
        )
        .await;

        info!(
            table = %update.table_name,
            action = ?update.action,
            status = %status,
            updated = write.updated,
            "table update recorded"
        );

        Ok(TableUpdateResult {
            update,
            status,
            write,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use shared::models::table::TableAction;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 31)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    async fn seeded(store: &MemoryStore) {
        store
            .seed(
                TABLES,
                json!({
                    "id": "t1",
                    "table_name": "P1",
                    "capacity": 4,
                    "status": "available",
                    "current_party_size": 0
                }),
            )
            .await;
    }

    fn update(action: TableAction, party: Option<i32>) -> TableUpdateCreate {
        TableUpdateCreate {
            table_name: "P1".into(),
            action,
            performed_by: "staff1".into(),
            notes: None,
            party_size: party,
        }
    }

    #[tokio::test]
    async fn seating_occupies_and_sets_party_size() {
        let store = Arc::new(MemoryStore::new());
        seeded(&store).await;
        let service = TableService::new(store.clone());

        let result = service
            .record_update(update(TableAction::Seated, Some(3)), at(18, 0))
            .await
            .unwrap();
        assert_eq!(result.status, TableStatus::Occupied);
        assert!(result.write.updated);

        let table = service.get("t1").await.unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.current_party_size, 3);
    }

    #[tokio::test]
    async fn clearing_resets_party_size() {
        let store = Arc::new(MemoryStore::new());
        seeded(&store).await;
        let service = TableService::new(store.clone());

        service
            .record_update(update(TableAction::Seated, Some(4)), at(18, 0))
            .await
            .unwrap();
        let result = service
            .record_update(update(TableAction::Cleared, None), at(19, 30))
            .await
            .unwrap();
        assert_eq!(result.status, TableStatus::Cleaning);

        let table = service.get("t1").await.unwrap();
        assert_eq!(table.current_party_size, 0);
    }

    #[tokio::test]
    async fn seating_beyond_capacity_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        seeded(&store).await;
        let service = TableService::new(store.clone());

        let err = service
            .record_update(update(TableAction::Seated, Some(9)), at(18, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // No audit record on a rejected update
        assert!(service.list_updates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn audit_record_survives_status_write_failure() {
        let store = Arc::new(MemoryStore::failing([TABLES, TABLES_FALLBACK]));
        store
            .seed(
                TABLES,
                json!({
                    "id": "t1",
                    "table_name": "P1",
                    "capacity": 4,
                    "status": "available",
                    "current_party_size": 0
                }),
            )
            .await;
        let service = TableService::new(store.clone());

        let result = service
            .record_update(update(TableAction::OutOfOrder, None), at(9, 0))
            .await
            .unwrap();
        assert!(!result.write.updated);
        assert_eq!(result.write.attempts.len(), 2);
        assert_eq!(service.list_updates().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_table_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = TableService::new(store);
        let err = service
            .record_update(update(TableAction::Cleaned, None), at(9, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
