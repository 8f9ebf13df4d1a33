//! Barbershop registration and slug availability.
//!
//! Both routes are on the public allow-list: a shop owner has no tenant
//! context yet while signing up.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use barberhub_core::error::CoreError;
use barberhub_core::patterns;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tenants::TenantRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBarbershop {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub plan_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckSlugParams {
    pub slug: String,
}

/// Validate a candidate slug: non-empty, URL-safe charset, and clean
/// against the suspicious-identifier blocklist.
fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "slug must contain only lowercase letters, digits, and hyphens".into(),
        ));
    }
    let matched = patterns::scan_slug(slug);
    if !matched.is_empty() {
        return Err(CoreError::Validation(format!(
            "slug matches reserved patterns: {}",
            matched.join(", ")
        )));
    }
    Ok(())
}

/// POST /api/barbershops/register
///
/// Register a new barbershop and claim its slug.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterBarbershop>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()).into());
    }
    validate_slug(&input.slug)?;

    let record = TenantRecord {
        barbershop_id: uuid::Uuid::new_v4().to_string(),
        slug: input.slug.clone(),
        name: input.name,
        plan_type: input.plan_type.unwrap_or_else(|| "free".into()),
    };

    if !state.tenants.insert(record.clone()) {
        return Err(CoreError::Conflict(format!("slug '{}' is already taken", input.slug)).into());
    }

    tracing::info!(slug = %record.slug, barbershop_id = %record.barbershop_id, "barbershop registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/barbershops/check-slug?slug=...
///
/// Report whether a slug is valid and still available.
pub async fn check_slug(
    State(state): State<AppState>,
    Query(params): Query<CheckSlugParams>,
) -> AppResult<impl IntoResponse> {
    let available = validate_slug(&params.slug).is_ok() && !state.tenants.contains(&params.slug);

    Ok(Json(DataResponse {
        data: json!({
            "slug": params.slug,
            "available": available,
        }),
    }))
}
