//! Integration tests for the cross-tenant access detector and throttling.

mod common;

use axum::http::StatusCode;
use barberhub_core::events::EventType;
use common::{
    admin_user, assert_rejection, body_json, build_test_app, corner_cuts_user, CORNER_CUTS_ID,
    FADE_FACTORY_ID,
};

/// Headers for a corner-cuts member requesting fade-factory's data.
fn cross_tenant_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x-forwarded-for", "203.0.113.9"),
        ("x-user-id", "user-corner-1"),
        ("x-user-tenant", CORNER_CUTS_ID),
        ("x-tenant-slug", "fade-factory"),
    ]
}

// ---------------------------------------------------------------------------
// Test: a tenant mismatch is denied and logged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mismatched_tenant_is_denied() {
    let app = build_test_app();

    let response = app.get("/api/appointments", &cross_tenant_headers()).await;
    assert_rejection(response, StatusCode::FORBIDDEN, "CROSS_TENANT_ACCESS_DENIED").await;

    let entries = app.log_entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, EventType::CrossTenantAccessAttempt);
    assert_eq!(entries[0].details["userTenant"], CORNER_CUTS_ID);
    assert_eq!(entries[0].details["requestedTenant"], FADE_FACTORY_ID);
    assert_eq!(entries[0].details["attemptedResource"], "/api/appointments");
}

// ---------------------------------------------------------------------------
// Test: matching tenant passes untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn matching_tenant_is_not_flagged() {
    let app = build_test_app();

    let response = app.get("/api/appointments", &corner_cuts_user()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries = app.log_entries().await;
    assert!(entries
        .iter()
        .all(|e| e.event_type != EventType::CrossTenantAccessAttempt));
}

// ---------------------------------------------------------------------------
// Test: the fourth violation trips the block and answers 429
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeat_violations_escalate_to_429() {
    let app = build_test_app();

    for _ in 0..3 {
        let response = app.get("/api/appointments", &cross_tenant_headers()).await;
        assert_rejection(response, StatusCode::FORBIDDEN, "CROSS_TENANT_ACCESS_DENIED").await;
    }

    let response = app.get("/api/appointments", &cross_tenant_headers()).await;
    assert_rejection(response, StatusCode::TOO_MANY_REQUESTS, "CROSS_TENANT_BLOCKED").await;

    let entries = app.log_entries().await;
    let attempts = entries
        .iter()
        .filter(|e| e.event_type == EventType::CrossTenantAccessAttempt)
        .count();
    assert_eq!(attempts, 4, "every violation is logged, blocked or not");

    let blocked: Vec<_> = entries
        .iter()
        .filter(|e| e.event_type == EventType::IpBlockedCrossTenant)
        .collect();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].details["attempts"], 4);
    assert_eq!(blocked[0].details["blockDuration"], "1 hour");
}

// ---------------------------------------------------------------------------
// Test: violations from distinct actors are counted separately
// ---------------------------------------------------------------------------

#[tokio::test]
async fn distinct_actors_have_independent_budgets() {
    let app = build_test_app();

    for _ in 0..4 {
        app.get("/api/appointments", &cross_tenant_headers()).await;
    }

    // Same IP, different user: starts from a fresh counter.
    let other_user = vec![
        ("x-forwarded-for", "203.0.113.9"),
        ("x-user-id", "user-corner-2"),
        ("x-user-tenant", CORNER_CUTS_ID),
        ("x-tenant-slug", "fade-factory"),
    ];
    let response = app.get("/api/appointments", &other_user).await;
    assert_rejection(response, StatusCode::FORBIDDEN, "CROSS_TENANT_ACCESS_DENIED").await;
}

// ---------------------------------------------------------------------------
// Test: the admin reset unblocks a throttled actor
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_reset_unblocks_the_actor() {
    let app = build_test_app();

    for _ in 0..4 {
        app.get("/api/appointments", &cross_tenant_headers()).await;
    }
    let response = app.get("/api/appointments", &cross_tenant_headers()).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .delete("/internal/security/access-attempts", &admin_user())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["cleared"], 1);

    // Back to plain denial, not the block.
    let response = app.get("/api/appointments", &cross_tenant_headers()).await;
    assert_rejection(response, StatusCode::FORBIDDEN, "CROSS_TENANT_ACCESS_DENIED").await;
}
