//! Cross-tenant access detector.
//!
//! Compares the authenticated user's tenant against the tenant resolved for
//! the request. A mismatch is always denied and logged; actors that keep
//! violating past the configured threshold are answered with 429 instead of
//! 403 and flagged as blocked.
//!
//! The counters are cumulative until a bulk reset (admin endpoint or the
//! hourly background job) -- there is no per-key expiry. The
//! `blockDuration` field in the blocked event is advisory metadata for the
//! reporting side.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use barberhub_core::events::EventType;

use crate::error::rejection;
use crate::middleware::SecurityContext;
use crate::security::attempts::AccessAttempts;
use crate::state::AppState;

pub async fn cross_tenant_detector(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(ctx) = req.extensions().get::<SecurityContext>() else {
        return next.run(req).await;
    };

    // Nothing to compare unless both sides carry a tenant id.
    let (Some(tenant), Some(user)) = (&ctx.tenant, &ctx.user) else {
        return next.run(req).await;
    };
    let Some(user_tenant) = &user.barbershop_id else {
        return next.run(req).await;
    };

    if user_tenant == &tenant.barbershop_id {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    state
        .security_log
        .log_event(
            &ctx.client,
            Some(tenant),
            Some(user),
            EventType::CrossTenantAccessAttempt,
            serde_json::json!({
                "userTenant": user_tenant,
                "requestedTenant": tenant.barbershop_id,
                "attemptedResource": path,
            }),
        )
        .await;

    let key = AccessAttempts::key(&ctx.client.ip, &user.id);
    let attempts = state.access_attempts.record(&key);

    if attempts > state.config.cross_tenant_block_threshold {
        state
            .security_log
            .log_event(
                &ctx.client,
                Some(tenant),
                Some(user),
                EventType::IpBlockedCrossTenant,
                serde_json::json!({
                    "attempts": attempts,
                    "blockDuration": "1 hour",
                }),
            )
            .await;
        return rejection(
            StatusCode::TOO_MANY_REQUESTS,
            "CROSS_TENANT_BLOCKED",
            "Too many cross-tenant access attempts",
        );
    }

    rejection(
        StatusCode::FORBIDDEN,
        "CROSS_TENANT_ACCESS_DENIED",
        "Access to another tenant's data is not allowed",
    )
}
