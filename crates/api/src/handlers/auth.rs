//! Mock auth endpoints for local development.
//!
//! Real deployments terminate authentication upstream (the auth layer sets
//! the trusted `x-user-*` headers this gateway consumes). These routes only
//! exist so the public-route allow-list has something to point at in dev,
//! mirroring the platform's auth surface.

use axum::response::IntoResponse;
use axum::Json;
use barberhub_core::error::CoreError;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// Dev-only: accepts any non-empty credentials and mints an opaque token.
pub async fn login(Json(input): Json<LoginRequest>) -> AppResult<impl IntoResponse> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("username and password are required".into()).into());
    }

    let token = uuid::Uuid::new_v4().to_string();
    tracing::info!(username = %input.username, "dev login issued");

    Ok(Json(DataResponse {
        data: json!({
            "token": token,
            "username": input.username,
        }),
    }))
}
