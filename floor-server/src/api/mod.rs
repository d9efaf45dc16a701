//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`tickets`] - ticket lifecycle
//! - [`tables`] - table state and audit actions
//! - [`reservations`] - reservation window queries
//! - [`holds`] - reservation hold application
//! - [`permissions`] - role capability introspection

pub mod health;
pub mod holds;
pub mod permissions;
pub mod reservations;
pub mod tables;
pub mod tickets;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::extract_staff;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// All resource routers, stateless
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(tickets::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(holds::router())
        .merge(permissions::router())
}

/// The complete application with middleware stack applied
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // Role extraction applies router-wide; extract_staff itself
        // skips public paths
        .layer(middleware::from_fn(extract_staff))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
