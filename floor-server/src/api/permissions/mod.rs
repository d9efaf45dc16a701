//! Role capability introspection
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/permissions/{role} | GET | any recognized role |

use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::StaffRole;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/permissions/{role}", get(get_role_capabilities))
}

#[derive(Serialize)]
pub struct RoleCapabilities {
    pub role: StaffRole,
    /// capability name -> granted
    pub capabilities: std::collections::BTreeMap<&'static str, bool>,
}

/// GET /api/permissions/:role - the full capability map for one role
async fn get_role_capabilities(Path(role): Path<String>) -> AppResult<Json<RoleCapabilities>> {
    let role = StaffRole::parse(&role)
        .ok_or_else(|| AppError::not_found(format!("Unknown role: {role}")))?;

    let capabilities = role
        .capability_map()
        .into_iter()
        .map(|(c, granted)| (c.as_str(), granted))
        .collect();

    Ok(Json(RoleCapabilities { role, capabilities }))
}
