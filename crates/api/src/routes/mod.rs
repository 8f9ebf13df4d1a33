pub mod health;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::routing::{get, post};
use axum::Router;
use barberhub_core::plans::PlanResource;

use crate::handlers;
use crate::middleware::plan_gate::plan_limit_gate;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      dev login (public)
///
/// /barbershops/register            register a barbershop (public)
/// /barbershops/check-slug          slug availability (public)
///
/// /appointments                    list, create (tenant-scoped)
/// /barbers                         list, create (tenant-scoped)
/// /services                        list, create (tenant-scoped)
/// ```
///
/// The create routes for plan-limited resources carry the plan gate as a
/// route layer; everything else in this tree only passes through the shared
/// security chain mounted in [`crate::router`].
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/barbershops/register", post(handlers::barbershops::register))
        .route("/barbershops/check-slug", get(handlers::barbershops::check_slug))
        .route("/appointments", get(handlers::resources::list_appointments))
        .route("/barbers", get(handlers::resources::list_barbers))
        .route("/services", get(handlers::resources::list_services))
        .merge(plan_gated(
            "/appointments",
            post(handlers::resources::create_appointment),
            PlanResource::AppointmentsPerMonth,
            state.clone(),
        ))
        .merge(plan_gated(
            "/barbers",
            post(handlers::resources::create_barber),
            PlanResource::Barbers,
            state.clone(),
        ))
        .merge(plan_gated(
            "/services",
            post(handlers::resources::create_service),
            PlanResource::Services,
            state,
        ))
}

/// A single route with the plan gate mounted as a route layer for one
/// resource kind.
fn plan_gated(
    path: &str,
    handler: axum::routing::MethodRouter<AppState>,
    resource: PlanResource,
    state: AppState,
) -> Router<AppState> {
    Router::new().route(path, handler).route_layer(
        middleware::from_fn_with_state(
            state,
            move |State(state): State<AppState>, req: Request, next: Next| {
                plan_limit_gate(state, resource, req, next)
            },
        ),
    )
}

/// Build the `/app` customer-facing booking tree.
///
/// ```text
/// /app/{slug}                      public booking page data
/// ```
pub fn booking_routes() -> Router<AppState> {
    Router::new().route("/app/{slug}", get(handlers::booking::booking_page))
}

/// Build the `/internal/security` admin tree.
///
/// ```text
/// /internal/security/report              trailing-24h report (admin)
/// /internal/security/access-attempts     counter gauge (admin), reset (DELETE)
/// ```
pub fn internal_routes() -> Router<AppState> {
    Router::new()
        .route("/internal/security/report", get(handlers::security::security_report))
        .route(
            "/internal/security/access-attempts",
            get(handlers::security::access_attempts)
                .delete(handlers::security::reset_access_attempts),
        )
}
