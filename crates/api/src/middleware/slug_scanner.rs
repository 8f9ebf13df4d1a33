//! Suspicious tenant identifier scanner.
//!
//! Inspects the tenant-slug segment of `/app/<slug>` (and `/api/app/<slug>`)
//! paths against the pattern blocklist in [`barberhub_core::patterns`].
//! Paths without a slug segment pass untouched.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use barberhub_core::events::EventType;
use barberhub_core::patterns;

use crate::error::rejection;
use crate::middleware::SecurityContext;
use crate::state::AppState;

pub async fn slug_scanner(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(slug) = patterns::extract_tenant_slug(req.uri().path()) else {
        return next.run(req).await;
    };

    let matched = patterns::scan_slug(slug);
    if matched.is_empty() {
        return next.run(req).await;
    }

    if let Some(ctx) = req.extensions().get::<SecurityContext>() {
        state
            .security_log
            .log_event(
                &ctx.client,
                ctx.tenant.as_ref(),
                ctx.user.as_ref(),
                EventType::TenantNotFoundSuspicious,
                serde_json::json!({
                    "suspiciousSlug": slug,
                    "patterns": matched,
                }),
            )
            .await;
    }

    rejection(
        StatusCode::BAD_REQUEST,
        "INVALID_TENANT_IDENTIFIER",
        "Invalid tenant identifier",
    )
}
