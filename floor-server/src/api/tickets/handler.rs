//! Ticket API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::tickets::AmountsPatch;
use crate::utils::AppResult;
use shared::{Ticket, TicketStatus};
use shared::models::ticket::TicketCreate;

/// GET /api/tickets - all tickets, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = state.ticket_service().list().await?;
    Ok(Json(tickets))
}

/// GET /api/tickets/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Ticket>> {
    let ticket = state.ticket_service().get(&id).await?;
    Ok(Json(ticket))
}

/// POST /api/tickets - open a new ticket
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TicketCreate>,
) -> AppResult<Json<Ticket>> {
    let now = chrono::Local::now().naive_local();
    let ticket = state.ticket_service().create(payload, now).await?;
    Ok(Json(ticket))
}

#[derive(Deserialize)]
pub struct StatusPatch {
    pub status: TicketStatus,
}

/// PATCH /api/tickets/:id/status - apply one lifecycle transition
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPatch>,
) -> AppResult<Json<Ticket>> {
    let now = chrono::Local::now().naive_local();
    let ticket = state
        .ticket_service()
        .set_status(&id, payload.status, now)
        .await?;
    Ok(Json(ticket))
}

/// PATCH /api/tickets/:id/amounts - write the validated payment amounts
pub async fn set_amounts(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AmountsPatch>,
) -> AppResult<Json<Ticket>> {
    let ticket = state.ticket_service().set_amounts(&id, payload).await?;
    Ok(Json(ticket))
}
