//! Table and table-update API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_capability;
use crate::core::ServerState;
use shared::Capability;

pub fn router() -> Router<ServerState> {
    let table_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_capability(Capability::Tables)));

    let update_read_routes = Router::new()
        .route("/", get(handler::list_updates))
        .layer(middleware::from_fn(require_capability(Capability::Tables)));

    let update_write_routes = Router::new()
        .route("/", axum::routing::post(handler::create_update))
        .layer(middleware::from_fn(require_capability(
            Capability::CreateTableUpdates,
        )));

    Router::new()
        .nest("/api/tables", table_routes)
        .nest(
            "/api/table-updates",
            update_read_routes.merge(update_write_routes),
        )
}
