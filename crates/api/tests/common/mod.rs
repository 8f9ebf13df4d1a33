//! Shared harness for the gateway integration tests.
//!
//! Builds the production router via `barberhub_api::router::build_app_router`
//! so every test exercises the same middleware stack the binary serves,
//! with an isolated temp-dir security log and a seeded tenant directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use barberhub_api::config::ServerConfig;
use barberhub_api::router::build_app_router;
use barberhub_api::security::attempts::AccessAttempts;
use barberhub_api::security::log::SecurityLog;
use barberhub_api::state::AppState;
use barberhub_api::tenants::{TenantDirectory, TenantRecord};

/// Seeded tenant: free tier.
pub const CORNER_CUTS_ID: &str = "shop-corner-cuts";
/// Seeded tenant: pro tier.
pub const FADE_FACTORY_ID: &str = "shop-fade-factory";

/// Build a test `ServerConfig` with safe defaults and the given log path.
pub fn test_config(security_log_path: std::path::PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        security_log_path,
        cross_tenant_block_threshold: 3,
        attempts_reset_interval_secs: 3600,
    }
}

/// A fully wired test application plus handles onto its shared state.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    // Keeps the log directory alive for the test's duration.
    _log_dir: tempfile::TempDir,
}

impl TestApp {
    /// One-shot a request against a clone of the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
        headers: &[(&str, &str)],
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    /// Entries currently persisted in the security log.
    pub async fn log_entries(&self) -> Vec<barberhub_core::entry::SecurityLogEntry> {
        self.state
            .security_log
            .read_entries()
            .await
            .expect("read security log")
    }
}

/// Build the full application with a fresh log and two seeded tenants:
/// `corner-cuts` (free) and `fade-factory` (pro).
pub fn build_test_app() -> TestApp {
    let log_dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(log_dir.path().join("security.log"));

    let tenants = TenantDirectory::with_tenants([
        TenantRecord {
            barbershop_id: CORNER_CUTS_ID.to_string(),
            slug: "corner-cuts".to_string(),
            name: "Corner Cuts".to_string(),
            plan_type: "free".to_string(),
        },
        TenantRecord {
            barbershop_id: FADE_FACTORY_ID.to_string(),
            slug: "fade-factory".to_string(),
            name: "Fade Factory".to_string(),
            plan_type: "pro".to_string(),
        },
    ]);

    let state = AppState {
        config: Arc::new(config.clone()),
        security_log: Arc::new(SecurityLog::new(&config.security_log_path)),
        access_attempts: Arc::new(AccessAttempts::new()),
        tenants: Arc::new(tenants),
    };

    TestApp {
        app: build_app_router(state.clone(), &config),
        state,
        _log_dir: log_dir,
    }
}

/// Headers identifying a member of the `corner-cuts` tenant.
pub fn corner_cuts_user() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x-forwarded-for", "203.0.113.9"),
        ("x-user-id", "user-corner-1"),
        ("x-user-name", "carla"),
        ("x-user-tenant", CORNER_CUTS_ID),
        ("x-tenant-slug", "corner-cuts"),
    ]
}

/// Headers for an admin identity (no tenant scoping).
pub fn admin_user() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x-forwarded-for", "198.51.100.7"),
        ("x-user-id", "user-admin-1"),
        ("x-user-name", "root"),
        ("x-user-role", "admin"),
    ]
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert the standard policy-rejection envelope.
pub async fn assert_rejection(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], code);
    assert!(json["message"].is_string());
}
