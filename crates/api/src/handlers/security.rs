//! Internal security endpoints: the 24h report and attempt-counter admin.
//!
//! All routes here require an admin identity from the upstream auth layer.
//! A non-admin probe is itself a signal, so it gets logged as
//! `UNAUTHORIZED_ADMIN_ACCESS` before the 403 goes out.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use barberhub_core::error::CoreError;
use barberhub_core::events::EventType;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::SecurityContext;
use crate::response::DataResponse;
use crate::security::report;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub tenant_id: Option<String>,
}

/// Reject (and log) anyone without the admin role.
async fn require_admin(state: &AppState, ctx: &SecurityContext) -> Result<(), CoreError> {
    if ctx.user.as_ref().is_some_and(|u| u.is_admin()) {
        return Ok(());
    }

    state
        .security_log
        .log_event(
            &ctx.client,
            ctx.tenant.as_ref(),
            ctx.user.as_ref(),
            EventType::UnauthorizedAdminAccess,
            json!({ "attemptedPath": ctx.client.url }),
        )
        .await;

    Err(CoreError::Forbidden("admin role required".into()))
}

/// GET /internal/security/report?tenantId=...
///
/// Aggregate the trailing 24 hours of the security log, optionally scoped
/// to one tenant.
pub async fn security_report(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state, &ctx).await?;

    let outcome = report::generate(&state.security_log, params.tenant_id.as_deref()).await;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /internal/security/access-attempts
pub async fn access_attempts(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state, &ctx).await?;

    Ok(Json(DataResponse {
        data: json!({ "tracked": state.access_attempts.len() }),
    }))
}

/// DELETE /internal/security/access-attempts
///
/// Manual counter reset, for unblocking an actor before the hourly sweep.
pub async fn reset_access_attempts(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state, &ctx).await?;

    let cleared = state.access_attempts.clear_all();
    tracing::info!(cleared, "cross-tenant attempt counters reset by admin");

    Ok(Json(DataResponse {
        data: json!({ "cleared": cleared }),
    }))
}
