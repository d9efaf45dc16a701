//! Ticket API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_capability;
use crate::core::ServerState;
use shared::Capability;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_capability(
            Capability::ViewTickets,
        )));

    let create_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_capability(
            Capability::CreateTickets,
        )));

    let status_routes = Router::new()
        .route("/{id}/status", axum::routing::patch(handler::set_status))
        .route("/{id}/amounts", axum::routing::patch(handler::set_amounts))
        .layer(middleware::from_fn(require_capability(
            Capability::UpdateTicketStatus,
        )));

    read_routes.merge(create_routes).merge(status_routes)
}
