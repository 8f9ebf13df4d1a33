//! Plan limit gate.
//!
//! Route-scoped middleware that resolves the tenant's plan tier to a
//! [`PlanLimits`] table, records a `PLAN_LIMIT_CHECK` event when the guarded
//! resource has a finite limit, and attaches the resolved limits as a
//! request extension for downstream use.
//!
//! The gate never rejects: counting actual usage against the limit needs
//! the external data store and is the integrator's job. `currentUsage` is
//! logged as the placeholder `"unresolved"` until then.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use barberhub_core::events::EventType;
use barberhub_core::plans::{PlanLimits, PlanResource, PlanTier};

use crate::middleware::SecurityContext;
use crate::state::AppState;

pub async fn plan_limit_gate(
    state: AppState,
    resource: PlanResource,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(ctx) = req.extensions().get::<SecurityContext>().cloned() else {
        return next.run(req).await;
    };
    let Some(tenant) = &ctx.tenant else {
        return next.run(req).await;
    };

    let tier = PlanTier::parse(Some(tenant.plan_type.as_str()));
    let limits = PlanLimits::for_tier(tier);
    let limit = limits.get(resource);

    if !limit.is_unlimited() {
        state
            .security_log
            .log_event(
                &ctx.client,
                Some(tenant),
                ctx.user.as_ref(),
                EventType::PlanLimitCheck,
                serde_json::json!({
                    "resource": resource.as_str(),
                    "planType": tier.as_str(),
                    "limit": limit,
                    "currentUsage": "unresolved",
                }),
            )
            .await;
    }

    req.extensions_mut().insert(limits);
    next.run(req).await
}
