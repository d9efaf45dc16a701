//! Reservation API handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::holds::{applier::fetch_day_reservations, reservations_in_window};
use crate::utils::{AppError, AppResult};
use shared::Reservation;
use shared::util::parse_date;

#[derive(Deserialize)]
pub struct ListQuery {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`; when present, narrow to reservations overlapping the
    /// block starting at this time
    pub time: Option<String>,
}

/// GET /api/reservations?date=YYYY-MM-DD[&time=HH:MM]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let date = parse_date(&query.date)
        .ok_or_else(|| AppError::validation(format!("invalid date: {}", query.date)))?;

    let reservations = fetch_day_reservations(state.store.as_ref(), date).await?;

    // The store filter is advisory; keep only the requested day
    let reservations: Vec<Reservation> = reservations
        .into_iter()
        .filter(|r| r.reservation_date == date)
        .collect();

    match &query.time {
        Some(time) => {
            let block = state.config.reservation_block_minutes as i32;
            let matching: Vec<Reservation> = reservations_in_window(&reservations, date, time, block)
                .into_iter()
                .cloned()
                .collect();
            Ok(Json(matching))
        }
        None => Ok(Json(reservations)),
    }
}
