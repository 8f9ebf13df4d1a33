//! Integration tests for the suspicious tenant identifier scanner.

mod common;

use axum::http::StatusCode;
use barberhub_core::events::EventType;
use common::{assert_rejection, build_test_app};

// ---------------------------------------------------------------------------
// Test: a reserved-word slug is rejected before any tenant lookup gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_probe_is_rejected_with_400() {
    let app = build_test_app();

    let response = app.get("/app/admin/dashboard", &[]).await;
    assert_rejection(response, StatusCode::BAD_REQUEST, "INVALID_TENANT_IDENTIFIER").await;

    let entries = app.log_entries().await;
    let suspicious: Vec<_> = entries
        .iter()
        .filter(|e| e.event_type == EventType::TenantNotFoundSuspicious)
        .collect();
    assert_eq!(suspicious.len(), 1);
    assert_eq!(suspicious[0].details["suspiciousSlug"], "admin");
    assert_eq!(suspicious[0].details["patterns"][0], "admin");
    // The resolver must not also file a plain TENANT_NOT_FOUND for it.
    assert!(entries
        .iter()
        .all(|e| e.event_type != EventType::TenantNotFound));
}

// ---------------------------------------------------------------------------
// Test: injection-shaped slugs are caught
// ---------------------------------------------------------------------------

#[tokio::test]
async fn traversal_slug_is_rejected() {
    let app = build_test_app();

    let response = app.get("/app/..%2Fsecrets", &[]).await;
    assert_rejection(response, StatusCode::BAD_REQUEST, "INVALID_TENANT_IDENTIFIER").await;
}

#[tokio::test]
async fn sql_shaped_slug_is_rejected() {
    let app = build_test_app();

    let response = app.get("/app/select-id-from-users", &[]).await;
    assert_rejection(response, StatusCode::BAD_REQUEST, "INVALID_TENANT_IDENTIFIER").await;

    let entries = app.log_entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, EventType::TenantNotFoundSuspicious);
}

// ---------------------------------------------------------------------------
// Test: a registered tenant whose slug is clean sails through
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clean_registered_slug_passes() {
    let app = build_test_app();

    let response = app.get("/app/corner-cuts", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: paths outside /app and /api/app are not scanned
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_slug_paths_are_not_scanned() {
    let app = build_test_app();

    // "/health" carries no tenant slug segment; the scanner stays out of it.
    let response = app.get("/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.log_entries().await.is_empty());
}
