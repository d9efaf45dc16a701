//! Reservation hold application
//!
//! Triggered externally (scheduled call or the apply-holds endpoint):
//! scan the day's reservations, find those whose hold-activation window
//! contains "now", and flip the associated table to `reserved` through
//! the primary/fallback write pipeline. The reservation itself is never
//! written.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use shared::models::reservation::Reservation;
use shared::models::table::TableStatus;

use crate::store::{DocumentStore, Filter, ListOptions, StoreError, decode_list};
use crate::tables::{Attempt, write_table_status};

/// Reservation collection
pub const RESERVATIONS: &str = "reservations";

/// Hold window configuration
#[derive(Debug, Clone, Copy)]
pub struct HoldConfig {
    /// How far before the reservation start the hold becomes active (H)
    pub hold_minutes: i64,
    /// Assumed occupancy duration of a reservation (B)
    pub block_minutes: i64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            hold_minutes: 120,
            block_minutes: 120,
        }
    }
}

/// Per-reservation outcome
#[derive(Debug, Clone, Serialize)]
pub struct HoldOutcome {
    pub id: String,
    pub updated: bool,
    pub attempts: Vec<Attempt>,
}

/// Report of one applier run
#[derive(Debug, Clone, Serialize)]
pub struct HoldReport {
    pub eligible: usize,
    pub applied: usize,
    pub results: Vec<HoldOutcome>,
}

/// Fetch the day's reservations: half-open range filter first, equality
/// fallback when the range comes back empty (stores keeping date-only
/// values miss the range form).
pub async fn fetch_day_reservations(
    store: &dyn DocumentStore,
    day: chrono::NaiveDate,
) -> Result<Vec<Reservation>, StoreError> {
    let range = Filter::day_range("reservation_date", day).build();
    let records = store
        .get_full_list(RESERVATIONS, ListOptions::filtered(range))
        .await?;

    let records = if records.is_empty() {
        let equality = Filter::eq("reservation_date", &day.format("%Y-%m-%d").to_string()).build();
        store
            .get_full_list(RESERVATIONS, ListOptions::filtered(equality))
            .await?
    } else {
        records
    };

    decode_list(records)
}

/// Is this reservation's hold window active at `now`?
///
/// Requires: active status (canceled drop out), an assigned table, the
/// same local calendar day as `now` (cross-day reservations are never
/// eligible, whatever the absolute time math says), and
/// `startAt - H <= now <= startAt + B`.
fn hold_active(reservation: &Reservation, now: NaiveDateTime, config: &HoldConfig) -> bool {
    if !reservation.status.is_active() {
        return false;
    }
    if reservation.table_id.as_deref().is_none_or(str::is_empty) {
        return false;
    }
    if reservation.reservation_date != now.date() {
        return false;
    }
    let Some(start_at) = reservation.start_at() else {
        return false;
    };
    let window_start = start_at - Duration::minutes(config.hold_minutes);
    let window_end = start_at + Duration::minutes(config.block_minutes);
    window_start <= now && now <= window_end
}

/// Run one hold-application pass.
///
/// Reservations are processed in store return order; table writes are
/// strictly sequential. A failed write isolates to its reservation —
/// the rest of the batch continues. Read failures abort the whole run.
pub async fn apply_holds(
    store: &dyn DocumentStore,
    now: NaiveDateTime,
    config: &HoldConfig,
) -> Result<HoldReport, StoreError> {
    let reservations = fetch_day_reservations(store, now.date()).await?;
    debug!(count = reservations.len(), "reservations fetched for hold pass");

    let mut results = Vec::new();
    let mut applied = 0;

    for reservation in &reservations {
        if !hold_active(reservation, now, config) {
            continue;
        }
        // Checked by hold_active
        let Some(table_id) = reservation.table_id.as_deref() else {
            continue;
        };

        // Party size only applies to occupied tables
        let outcome = write_table_status(
            store,
            table_id,
            serde_json::json!({
                "status": TableStatus::Reserved,
                "current_party_size": 0,
            }),
        )
        .await;
        if outcome.updated {
            applied += 1;
        }
        results.push(HoldOutcome {
            id: reservation.id.clone(),
            updated: outcome.updated,
            attempts: outcome.attempts,
        });
    }

    info!(eligible = results.len(), applied, "hold pass finished");
    Ok(HoldReport {
        eligible: results.len(),
        applied,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RecordPage};
    use crate::tables::{TABLES, TABLES_FALLBACK};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    async fn seed_reservation(
        store: &MemoryStore,
        id: &str,
        date: NaiveDate,
        start: &str,
        status: &str,
        table_id: Option<&str>,
    ) {
        store
            .seed(
                RESERVATIONS,
                json!({
                    "id": id,
                    "reservation_date": date.format("%Y-%m-%d").to_string(),
                    "start_time": start,
                    "status": status,
                    "party_size": 2,
                    "table_id": table_id,
                    "customer_name": ""
                }),
            )
            .await;
    }

    async fn seed_table(store: &MemoryStore, collection: &str, id: &str) {
        store
            .seed(
                collection,
                json!({
                    "id": id,
                    "table_name": id,
                    "capacity": 4,
                    "status": "available",
                    "current_party_size": 0
                }),
            )
            .await;
    }

    /// Mixed-day scenario: r2 out of window, r4 on the wrong day; the
    /// seated r3 is still active (only canceled drops out).
    #[tokio::test]
    async fn applies_exactly_the_in_window_same_day_actives() {
        let store = MemoryStore::new();
        let next_day = day().succ_opt().unwrap();
        seed_reservation(&store, "r1", day(), "18:00", "booked", Some("t1")).await;
        seed_reservation(&store, "r2", day(), "14:00", "booked", Some("t2")).await;
        seed_reservation(&store, "r3", day(), "18:30", "seated", Some("t3")).await;
        seed_reservation(&store, "r4", next_day, "18:00", "booked", Some("t4")).await;
        for id in ["t1", "t2", "t3", "t4"] {
            seed_table(&store, TABLES, id).await;
        }

        let report = apply_holds(&store, at(day(), 17, 0), &HoldConfig::default())
            .await
            .unwrap();

        assert_eq!(report.applied, 2);
        let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);

        assert_eq!(store.get_one(TABLES, "t1").await.unwrap()["status"], "reserved");
        assert_eq!(store.get_one(TABLES, "t3").await.unwrap()["status"], "reserved");
        assert_eq!(store.get_one(TABLES, "t2").await.unwrap()["status"], "available");
        assert_eq!(store.get_one(TABLES, "t4").await.unwrap()["status"], "available");
    }

    #[tokio::test]
    async fn window_ends_are_inclusive() {
        for (h, m, expected) in [
            (15, 59, 0),
            (16, 0, 1), // windowStart = 18:00 - 120min
            (18, 0, 1),
            (20, 0, 1), // windowEnd = 18:00 + 120min
            (20, 1, 0),
        ] {
            let store = MemoryStore::new();
            seed_reservation(&store, "r1", day(), "18:00", "booked", Some("t1")).await;
            seed_table(&store, TABLES, "t1").await;

            let report = apply_holds(&store, at(day(), h, m), &HoldConfig::default())
                .await
                .unwrap();
            assert_eq!(report.applied, expected, "now = {h}:{m:02}");
        }
    }

    #[tokio::test]
    async fn same_wall_clock_on_adjacent_days_never_activates() {
        let store = MemoryStore::new();
        seed_reservation(&store, "r1", day(), "18:00", "booked", Some("t1")).await;
        seed_table(&store, TABLES, "t1").await;

        for other in [day().pred_opt().unwrap(), day().succ_opt().unwrap()] {
            let report = apply_holds(&store, at(other, 17, 0), &HoldConfig::default())
                .await
                .unwrap();
            assert_eq!(report.applied, 0);
        }
    }

    #[tokio::test]
    async fn holding_an_occupied_table_clears_its_party_size() {
        let store = MemoryStore::new();
        seed_reservation(&store, "r1", day(), "18:00", "seated", Some("t1")).await;
        store
            .seed(
                TABLES,
                json!({
                    "id": "t1",
                    "table_name": "t1",
                    "capacity": 4,
                    "status": "occupied",
                    "current_party_size": 3
                }),
            )
            .await;

        let report = apply_holds(&store, at(day(), 17, 0), &HoldConfig::default())
            .await
            .unwrap();
        assert_eq!(report.applied, 1);

        let table = store.get_one(TABLES, "t1").await.unwrap();
        assert_eq!(table["status"], "reserved");
        assert_eq!(table["current_party_size"], 0);
    }

    #[tokio::test]
    async fn canceled_and_tableless_are_skipped() {
        let store = MemoryStore::new();
        seed_reservation(&store, "r1", day(), "18:00", "canceled", Some("t1")).await;
        seed_reservation(&store, "r2", day(), "18:00", "booked", None).await;
        seed_table(&store, TABLES, "t1").await;

        let report = apply_holds(&store, at(day(), 17, 0), &HoldConfig::default())
            .await
            .unwrap();
        assert_eq!(report.eligible, 0);
        assert_eq!(store.get_one(TABLES, "t1").await.unwrap()["status"], "available");
    }

    #[tokio::test]
    async fn primary_failure_falls_back_and_still_counts_as_applied() {
        let store = MemoryStore::failing([TABLES]);
        seed_reservation(&store, "r1", day(), "18:00", "booked", Some("t1")).await;
        seed_table(&store, TABLES_FALLBACK, "t1").await;

        let report = apply_holds(&store, at(day(), 17, 0), &HoldConfig::default())
            .await
            .unwrap();
        assert_eq!(report.applied, 1);

        let result = &report.results[0];
        assert!(result.updated);
        assert_eq!(result.attempts.len(), 2);
        assert_eq!(result.attempts[0].collection, TABLES);
        assert!(!result.attempts[0].ok);
        assert_eq!(result.attempts[1].collection, TABLES_FALLBACK);
        assert!(result.attempts[1].ok);
    }

    #[tokio::test]
    async fn one_bad_table_does_not_block_the_batch() {
        let store = MemoryStore::new();
        seed_reservation(&store, "r1", day(), "18:00", "booked", Some("missing")).await;
        seed_reservation(&store, "r2", day(), "18:30", "booked", Some("t2")).await;
        seed_table(&store, TABLES, "t2").await;

        let report = apply_holds(&store, at(day(), 17, 0), &HoldConfig::default())
            .await
            .unwrap();
        assert_eq!(report.eligible, 2);
        assert_eq!(report.applied, 1);
        assert!(!report.results[0].updated);
        assert!(report.results[1].updated);
    }

    /// Store double that only answers the equality form of the
    /// reservation-date filter, like backends storing date-only values.
    struct DateOnlyStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl DocumentStore for DateOnlyStore {
        async fn get_full_list(
            &self,
            collection: &str,
            opts: ListOptions,
        ) -> Result<Vec<Value>, StoreError> {
            if opts.filter.as_deref().is_some_and(|f| f.contains(">=")) {
                return Ok(Vec::new());
            }
            self.inner.get_full_list(collection, opts).await
        }

        async fn get_list(
            &self,
            collection: &str,
            page: u32,
            per_page: u32,
            opts: ListOptions,
        ) -> Result<RecordPage, StoreError> {
            self.inner.get_list(collection, page, per_page, opts).await
        }

        async fn get_one(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
            self.inner.get_one(collection, id).await
        }

        async fn create(&self, collection: &str, data: Value) -> Result<Value, StoreError> {
            self.inner.create(collection, data).await
        }

        async fn update(
            &self,
            collection: &str,
            id: &str,
            data: Value,
        ) -> Result<Value, StoreError> {
            self.inner.update(collection, id, data).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
            self.inner.delete(collection, id).await
        }

        async fn subscribe(
            &self,
            topic: &str,
        ) -> Result<mpsc::Receiver<crate::store::RealtimeEvent>, StoreError> {
            self.inner.subscribe(topic).await
        }
    }

    #[tokio::test]
    async fn empty_range_query_falls_back_to_equality_filter() {
        let inner = MemoryStore::new();
        seed_reservation(&inner, "r1", day(), "18:00", "booked", Some("t1")).await;
        seed_table(&inner, TABLES, "t1").await;
        let store = DateOnlyStore { inner };

        let report = apply_holds(&store, at(day(), 17, 0), &HoldConfig::default())
            .await
            .unwrap();
        assert_eq!(report.applied, 1);
    }
}
