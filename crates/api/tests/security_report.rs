//! Integration tests for the internal security endpoints.

mod common;

use axum::http::StatusCode;
use barberhub_core::events::EventType;
use common::{
    admin_user, assert_rejection, body_json, build_test_app, corner_cuts_user, CORNER_CUTS_ID,
    FADE_FACTORY_ID,
};

// ---------------------------------------------------------------------------
// Test: the report aggregates the traffic the gateway just saw
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_reflects_recent_traffic() {
    let app = build_test_app();

    // One clean tenant-scoped request (audited, low severity).
    app.get("/api/appointments", &corner_cuts_user()).await;
    // One cross-tenant violation (high severity).
    let intruder = vec![
        ("x-forwarded-for", "203.0.113.9"),
        ("x-user-id", "user-corner-1"),
        ("x-user-name", "carla"),
        ("x-user-tenant", CORNER_CUTS_ID),
        ("x-tenant-slug", "fade-factory"),
    ];
    app.get("/api/barbers", &intruder).await;
    // One suspicious probe (high severity, no tenant).
    app.get("/app/admin/dashboard", &[]).await;

    let response = app.get("/internal/security/report", &admin_user()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let report = &json["data"];

    assert_eq!(report["totalEvents"], 3);
    assert_eq!(report["highSeverityCount"], 2);
    assert_eq!(report["securityEvents"]["TENANT_QUERY_EXECUTED"], 1);
    assert_eq!(report["securityEvents"]["CROSS_TENANT_ACCESS_ATTEMPT"], 1);
    assert_eq!(report["securityEvents"]["TENANT_NOT_FOUND_SUSPICIOUS"], 1);

    let attempts = report["crossTenantAttempts"].as_array().unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0]["ip"], "203.0.113.9");
    assert_eq!(attempts[0]["user"], "carla");
    assert_eq!(attempts[0]["fromTenant"], CORNER_CUTS_ID);
    assert_eq!(attempts[0]["toTenant"], FADE_FACTORY_ID);

    assert_eq!(report["tenantStats"][CORNER_CUTS_ID]["events"], 1);
    assert_eq!(
        report["tenantStats"][FADE_FACTORY_ID]["highSeverityEvents"],
        1
    );
}

// ---------------------------------------------------------------------------
// Test: tenantId narrows the report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_filters_by_tenant() {
    let app = build_test_app();

    app.get("/api/appointments", &corner_cuts_user()).await;

    let response = app
        .get(
            &format!("/internal/security/report?tenantId={FADE_FACTORY_ID}"),
            &admin_user(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalEvents"], 0);
}

// ---------------------------------------------------------------------------
// Test: non-admin access is rejected and itself logged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_admin_report_access_is_rejected_and_logged() {
    let app = build_test_app();

    let response = app.get("/internal/security/report", &corner_cuts_user()).await;
    assert_rejection(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let entries = app.log_entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, EventType::UnauthorizedAdminAccess);
}

#[tokio::test]
async fn anonymous_report_access_is_rejected() {
    let app = build_test_app();

    let response = app.get("/internal/security/report", &[]).await;
    assert_rejection(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

// ---------------------------------------------------------------------------
// Test: the attempts gauge reports tracked actors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn attempts_gauge_counts_tracked_actors() {
    let app = build_test_app();

    let response = app
        .get("/internal/security/access-attempts", &admin_user())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tracked"], 0);

    let intruder = vec![
        ("x-forwarded-for", "203.0.113.9"),
        ("x-user-id", "user-corner-1"),
        ("x-user-tenant", CORNER_CUTS_ID),
        ("x-tenant-slug", "fade-factory"),
    ];
    app.get("/api/barbers", &intruder).await;

    let response = app
        .get("/internal/security/access-attempts", &admin_user())
        .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["tracked"], 1);
}

// ---------------------------------------------------------------------------
// Test: a corrupt log line does not break the report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn corrupt_log_line_is_skipped_by_the_report() {
    let app = build_test_app();

    app.get("/api/appointments", &corner_cuts_user()).await;

    // Append garbage the way a partial write would leave it.
    let path = app.state.config.security_log_path.clone();
    let mut contents = tokio::fs::read_to_string(&path).await.unwrap();
    contents.push_str("{\"truncated\": \n");
    tokio::fs::write(&path, contents).await.unwrap();

    let response = app.get("/internal/security/report", &admin_user()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalEvents"], 1);
}
