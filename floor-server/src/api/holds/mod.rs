//! Hold application API module

mod handler;

use axum::{Router, middleware};

use crate::auth::require_capability;
use crate::core::ServerState;
use shared::Capability;

pub fn router() -> Router<ServerState> {
    let routes = Router::new()
        .route("/apply", axum::routing::post(handler::apply))
        .layer(middleware::from_fn(require_capability(Capability::Tables)));

    Router::new().nest("/api/holds", routes)
}
