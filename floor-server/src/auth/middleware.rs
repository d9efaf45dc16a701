//! Role extraction and capability middleware

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::utils::AppError;
use shared::{Capability, StaffRole};

/// Header carrying the acting staff member's role
pub const STAFF_ROLE_HEADER: &str = "x-staff-role";

/// The staff member acting on this request
#[derive(Debug, Clone)]
pub struct CurrentStaff {
    pub role: StaffRole,
}

impl CurrentStaff {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.role.has_capability(capability)
    }
}

/// Role extraction middleware
///
/// Reads `x-staff-role` and injects [`CurrentStaff`] into request
/// extensions. Skipped paths keep working without a role:
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - `/api/health`
///
/// A missing or unrecognized role header on any other `/api/` path is
/// 401; manager-only route-prefix denial is 403. Everything finer
/// grained is left to the per-route capability layers.
pub async fn extract_staff(mut req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") || path == "/api/health" {
        return Ok(next.run(req).await);
    }

    let role_header = req
        .headers()
        .get(STAFF_ROLE_HEADER)
        .and_then(|h| h.to_str().ok());

    let Some(raw) = role_header else {
        warn!(uri = %req.uri(), "missing staff role header");
        return Err(AppError::Unauthorized);
    };
    let Some(role) = StaffRole::parse(raw) else {
        warn!(role = raw, uri = %req.uri(), "unrecognized staff role");
        return Err(AppError::Unauthorized);
    };

    if !role.can_access_route(req.uri().path()) {
        warn!(role = %role, uri = %req.uri(), "route denied for role");
        return Err(AppError::forbidden(format!(
            "Role {role} cannot access this route"
        )));
    }

    req.extensions_mut().insert(CurrentStaff { role });
    Ok(next.run(req).await)
}

/// Capability check middleware
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/tickets", post(handler::create))
///     .layer(middleware::from_fn(require_capability(Capability::CreateTickets)));
/// ```
///
/// Missing capability returns 403 Forbidden.
pub fn require_capability(
    capability: Capability,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let staff = req
                .extensions()
                .get::<CurrentStaff>()
                .ok_or(AppError::Unauthorized)?;

            if !staff.has_capability(capability) {
                warn!(
                    role = %staff.role,
                    capability = capability.as_str(),
                    "capability denied"
                );
                return Err(AppError::forbidden(format!(
                    "Capability required: {}",
                    capability.as_str()
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
