//! Tenant presence guard.
//!
//! Rejects any request that reaches a tenant-scoped route without resolved
//! tenant context. A fixed allow-list of public prefixes (registration,
//! slug availability, auth) always passes regardless of tenant presence.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use barberhub_core::events::EventType;

use crate::error::rejection;
use crate::middleware::SecurityContext;
use crate::state::AppState;

/// Routes reachable without an established tenant context (exact-prefix match).
pub const PUBLIC_ROUTE_PREFIXES: &[&str] = &[
    "/api/auth",
    "/api/barbershops/register",
    "/api/barbershops/check-slug",
];

pub async fn tenant_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if PUBLIC_ROUTE_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return next.run(req).await;
    }

    let Some(ctx) = req.extensions().get::<SecurityContext>() else {
        // Context middleware not mounted; treat as missing tenant.
        return rejection(
            StatusCode::FORBIDDEN,
            "TENANT_CONTEXT_REQUIRED",
            "Tenant context required",
        );
    };

    if ctx.tenant.is_none() {
        state
            .security_log
            .log_event(
                &ctx.client,
                None,
                ctx.user.as_ref(),
                EventType::QueryWithoutTenant,
                serde_json::json!({
                    "attemptedPath": path,
                    "method": req.method().as_str(),
                }),
            )
            .await;
        return rejection(
            StatusCode::FORBIDDEN,
            "TENANT_CONTEXT_REQUIRED",
            "Tenant context required",
        );
    }

    next.run(req).await
}
