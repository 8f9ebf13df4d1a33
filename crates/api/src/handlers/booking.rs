//! Public booking page data.
//!
//! `/app/{slug}` is the customer-facing entry point: the slug in the path
//! names the tenant, so the resolver has already looked it up and the
//! presence guard has already rejected unknown slugs by the time this
//! handler runs.

use axum::response::IntoResponse;
use axum::{Extension, Json};
use barberhub_core::error::CoreError;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::SecurityContext;
use crate::response::DataResponse;

/// GET /app/{slug}
pub async fn booking_page(
    Extension(ctx): Extension<SecurityContext>,
) -> AppResult<impl IntoResponse> {
    let tenant = ctx
        .tenant
        .as_ref()
        .ok_or_else(|| CoreError::Internal("tenant context missing past the guard".into()))?;

    Ok(Json(DataResponse {
        data: json!({
            "barbershopId": tenant.barbershop_id,
            "slug": tenant.slug,
            "name": tenant.name,
            "planType": tenant.plan_type,
        }),
    }))
}
