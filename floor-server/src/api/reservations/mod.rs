//! Reservation API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_capability;
use crate::core::ServerState;
use shared::Capability;

pub fn router() -> Router<ServerState> {
    let routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_capability(Capability::Tables)));

    Router::new().nest("/api/reservations", routes)
}
