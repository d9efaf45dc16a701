//! Table Model
//!
//! Physical tables and the append-only [`TableUpdate`] audit record. Table
//! status is never mutated directly by callers: every change flows through
//! a [`TableAction`] (or the reservation hold applier), and each action
//! maps deterministically to exactly one resulting status.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::util::naive_dt;

/// Table occupancy status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
    OutOfOrder,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Cleaning => "cleaning",
            TableStatus::OutOfOrder => "out_of_order",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table-changing action recorded by staff
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TableAction {
    Seated,
    Cleared,
    Cleaned,
    Reserved,
    OutOfOrder,
    BackInService,
}

impl TableAction {
    /// The table status this action results in (total mapping).
    pub fn resulting_status(self) -> TableStatus {
        match self {
            TableAction::Seated => TableStatus::Occupied,
            TableAction::Cleared => TableStatus::Cleaning,
            TableAction::Cleaned => TableStatus::Available,
            TableAction::Reserved => TableStatus::Reserved,
            TableAction::OutOfOrder => TableStatus::OutOfOrder,
            TableAction::BackInService => TableStatus::Available,
        }
    }

    /// Resolve a raw action string from the store.
    ///
    /// Unknown values derive `available`, matching long-standing behavior
    /// of the table-update flow; a warning is logged so bad input does not
    /// vanish silently.
    pub fn status_for_raw(raw: &str) -> TableStatus {
        match serde_json::from_value::<TableAction>(serde_json::Value::String(raw.to_string())) {
            Ok(action) => action.resulting_status(),
            Err(_) => {
                tracing::warn!(action = raw, "unknown table action, defaulting to available");
                TableStatus::Available
            }
        }
    }
}

/// Table entity (physical seating unit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    /// Unique display name (e.g. "P12")
    pub table_name: String,
    pub capacity: i32,
    pub status: TableStatus,
    /// Zero unless the table is `occupied`
    #[serde(default)]
    pub current_party_size: i32,
    /// Floor-plan coordinates, opaque to the server
    #[serde(default)]
    pub pos_x: f64,
    #[serde(default)]
    pub pos_y: f64,
}

/// Append-only audit record of one table-status-changing action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    pub id: String,
    pub table_name: String,
    pub action: TableAction,
    /// Staff reference
    pub performed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "naive_dt")]
    pub created: NaiveDateTime,
}

/// Create table-update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdateCreate {
    pub table_name: String,
    pub action: TableAction,
    pub performed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Party size for `seated`; ignored for every other action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_to_status_mapping_is_fixed() {
        let cases = [
            (TableAction::Seated, TableStatus::Occupied),
            (TableAction::Cleared, TableStatus::Cleaning),
            (TableAction::Cleaned, TableStatus::Available),
            (TableAction::Reserved, TableStatus::Reserved),
            (TableAction::OutOfOrder, TableStatus::OutOfOrder),
            (TableAction::BackInService, TableStatus::Available),
        ];
        for (action, expected) in cases {
            assert_eq!(action.resulting_status(), expected);
        }
    }

    #[test]
    fn raw_action_resolution() {
        assert_eq!(TableAction::status_for_raw("seated"), TableStatus::Occupied);
        assert_eq!(
            TableAction::status_for_raw("back_in_service"),
            TableStatus::Available
        );
        // Unknown action falls back to available (legacy behavior, warned)
        assert_eq!(TableAction::status_for_raw("flambéed"), TableStatus::Available);
    }

    #[test]
    fn action_serde_round_trip() {
        let s = serde_json::to_string(&TableAction::OutOfOrder).unwrap();
        assert_eq!(s, "\"out_of_order\"");
        let back: TableAction = serde_json::from_str("\"cleared\"").unwrap();
        assert_eq!(back, TableAction::Cleared);
    }
}
