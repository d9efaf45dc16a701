//! Fallback-write pipeline for table status
//!
//! Every table-status write targets the primary collection first and, on
//! any error, retries the same patch once against the secondary collection
//! holding the same logical table set. Both outcomes are first-class
//! values — the attempt chain comes back to the caller instead of being
//! buried in nested error handling, so diagnostics and tests can inspect
//! exactly what happened.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::store::DocumentStore;

/// Primary table collection
pub const TABLES: &str = "tables";
/// Secondary collection consulted only after a primary write failure
pub const TABLES_FALLBACK: &str = "tables_collection";

/// One write attempt against one collection
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub collection: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of the primary/fallback write chain
#[derive(Debug, Clone, Serialize)]
pub struct WriteOutcome {
    pub updated: bool,
    pub attempts: Vec<Attempt>,
}

/// Patch a table record, falling back to the secondary collection on
/// failure. Attempts are strictly sequential; the fallback only runs
/// after the primary failed.
pub async fn write_table_status(
    store: &dyn DocumentStore,
    table_id: &str,
    patch: Value,
) -> WriteOutcome {
    let mut attempts = Vec::with_capacity(2);

    for collection in [TABLES, TABLES_FALLBACK] {
        match store.update(collection, table_id, patch.clone()).await {
            Ok(_) => {
                attempts.push(Attempt {
                    collection,
                    ok: true,
                    error: None,
                });
                return WriteOutcome {
                    updated: true,
                    attempts,
                };
            }
            Err(e) => {
                warn!(
                    table = table_id,
                    collection,
                    error = %e,
                    "table status write failed"
                );
                attempts.push(Attempt {
                    collection,
                    ok: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    WriteOutcome {
        updated: false,
        attempts,
    }
}
