//! Table API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::tables::TableUpdateResult;
use crate::utils::AppResult;
use shared::models::table::{Table, TableUpdate, TableUpdateCreate};

/// GET /api/tables - all tables, by display name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Table>>> {
    let tables = state.table_service().list().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Table>> {
    let table = state.table_service().get(&id).await?;
    Ok(Json(table))
}

/// GET /api/table-updates - audit trail, newest first
pub async fn list_updates(State(state): State<ServerState>) -> AppResult<Json<Vec<TableUpdate>>> {
    let updates = state.table_service().list_updates().await?;
    Ok(Json(updates))
}

/// POST /api/table-updates - record an action and move the table
pub async fn create_update(
    State(state): State<ServerState>,
    Json(payload): Json<TableUpdateCreate>,
) -> AppResult<Json<TableUpdateResult>> {
    let now = chrono::Local::now().naive_local();
    let result = state.table_service().record_update(payload, now).await?;
    Ok(Json(result))
}
