//! Tenant-scoped resource endpoints.
//!
//! These stand in for the booking platform's data layer: each handler
//! answers from the resolved tenant context so the full filter chain (and
//! the plan gate on the create routes) has real traffic to act on.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use barberhub_core::error::CoreError;
use barberhub_core::plans::{PlanLimits, PlanResource};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::SecurityContext;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointment {
    pub client_name: String,
    pub service_id: String,
    pub starts_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBarber {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    pub name: String,
    pub duration_minutes: u32,
}

/// The presence guard rejects tenant-less traffic before any of these
/// handlers run, so a missing tenant here is a routing bug.
fn tenant_of(ctx: &SecurityContext) -> Result<&crate::tenants::TenantContext, CoreError> {
    ctx.tenant
        .as_ref()
        .ok_or_else(|| CoreError::Internal("tenant context missing past the guard".into()))
}

/// GET /api/appointments
pub async fn list_appointments(
    Extension(ctx): Extension<SecurityContext>,
) -> AppResult<impl IntoResponse> {
    let tenant = tenant_of(&ctx)?;
    Ok(Json(DataResponse {
        data: json!({
            "barbershopId": tenant.barbershop_id,
            "appointments": [],
        }),
    }))
}

/// POST /api/appointments
pub async fn create_appointment(
    Extension(ctx): Extension<SecurityContext>,
    limits: Option<Extension<PlanLimits>>,
    Json(input): Json<CreateAppointment>,
) -> AppResult<impl IntoResponse> {
    let tenant = tenant_of(&ctx)?;
    if input.client_name.trim().is_empty() {
        return Err(CoreError::Validation("clientName must not be empty".into()).into());
    }

    let limit = limits.map(|Extension(l)| l.get(PlanResource::AppointmentsPerMonth));
    tracing::debug!(
        barbershop_id = %tenant.barbershop_id,
        ?limit,
        "appointment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "barbershopId": tenant.barbershop_id,
                "clientName": input.client_name,
                "serviceId": input.service_id,
                "startsAt": input.starts_at,
            }),
        }),
    ))
}

/// GET /api/barbers
pub async fn list_barbers(
    Extension(ctx): Extension<SecurityContext>,
) -> AppResult<impl IntoResponse> {
    let tenant = tenant_of(&ctx)?;
    Ok(Json(DataResponse {
        data: json!({
            "barbershopId": tenant.barbershop_id,
            "barbers": [],
        }),
    }))
}

/// POST /api/barbers
pub async fn create_barber(
    Extension(ctx): Extension<SecurityContext>,
    Json(input): Json<CreateBarber>,
) -> AppResult<impl IntoResponse> {
    let tenant = tenant_of(&ctx)?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()).into());
    }
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "barbershopId": tenant.barbershop_id,
                "name": input.name,
            }),
        }),
    ))
}

/// GET /api/services
pub async fn list_services(
    Extension(ctx): Extension<SecurityContext>,
) -> AppResult<impl IntoResponse> {
    let tenant = tenant_of(&ctx)?;
    Ok(Json(DataResponse {
        data: json!({
            "barbershopId": tenant.barbershop_id,
            "services": [],
        }),
    }))
}

/// POST /api/services
pub async fn create_service(
    Extension(ctx): Extension<SecurityContext>,
    Json(input): Json<CreateService>,
) -> AppResult<impl IntoResponse> {
    let tenant = tenant_of(&ctx)?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()).into());
    }
    if input.duration_minutes == 0 {
        return Err(CoreError::Validation("durationMinutes must be positive".into()).into());
    }
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: json!({
                "id": uuid::Uuid::new_v4().to_string(),
                "barbershopId": tenant.barbershop_id,
                "name": input.name,
                "durationMinutes": input.duration_minutes,
            }),
        }),
    ))
}
