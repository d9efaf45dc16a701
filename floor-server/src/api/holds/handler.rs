//! Hold application handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::holds::{HoldOutcome, apply_holds};
use crate::utils::AppResult;

#[derive(Deserialize)]
pub struct ApplyQuery {
    /// `debug=1` includes per-reservation results in the response
    #[serde(default)]
    pub debug: Option<String>,
}

#[derive(Serialize)]
pub struct ApplyResponse {
    pub ok: bool,
    pub applied: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<HoldOutcome>>,
}

/// POST /api/holds/apply - run one hold pass over today's reservations
pub async fn apply(
    State(state): State<ServerState>,
    Query(query): Query<ApplyQuery>,
) -> AppResult<Json<ApplyResponse>> {
    let now = chrono::Local::now().naive_local();
    let report = apply_holds(state.store.as_ref(), now, &state.config.hold_config()).await?;

    let debug = query.debug.as_deref() == Some("1");
    Ok(Json(ApplyResponse {
        ok: true,
        applied: report.applied,
        results: debug.then_some(report.results),
    }))
}
