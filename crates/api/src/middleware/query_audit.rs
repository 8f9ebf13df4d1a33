//! Query audit recorder.
//!
//! Purely observational: for tenant-scoped requests, logs a
//! `TENANT_QUERY_EXECUTED` event when the response is about to go out, with
//! wall-clock execution time (from the request-start capture) and the byte
//! length of the outgoing body. The body is buffered to measure it and sent
//! on unchanged; all responses in this service are small in-memory JSON.

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use barberhub_core::events::EventType;

use crate::middleware::{RequestStart, SecurityContext};
use crate::state::AppState;

pub async fn query_audit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(ctx) = req.extensions().get::<SecurityContext>().cloned() else {
        return next.run(req).await;
    };
    let Some(tenant) = ctx.tenant.clone() else {
        return next.run(req).await;
    };

    let start = req
        .extensions()
        .get::<RequestStart>()
        .map(|s| s.0)
        .unwrap_or_else(Instant::now);
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, "failed to buffer response body for query audit");
            Bytes::new()
        }
    };
    let execution_time_ms = start.elapsed().as_millis() as u64;

    state
        .security_log
        .log_event(
            &ctx.client,
            Some(&tenant),
            ctx.user.as_ref(),
            EventType::TenantQueryExecuted,
            serde_json::json!({
                "method": method,
                "path": path,
                "statusCode": parts.status.as_u16(),
                "responseSize": bytes.len(),
                "executionTime": execution_time_ms,
            }),
        )
        .await;

    Response::from_parts(parts, Body::from(bytes))
}
