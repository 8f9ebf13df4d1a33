//! Client context extraction and tenant/user resolution.
//!
//! Runs first on every request and never rejects. Missing headers and
//! absent tenant/user context degrade to the sentinel defaults from
//! [`barberhub_core::entry::sentinels`]; downstream filters make the actual
//! pass/reject decisions.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use barberhub_core::entry::{sentinels, ClientInfo};
use barberhub_core::patterns;
use barberhub_core::events::EventType;
use chrono::Utc;

use crate::state::AppState;
use crate::tenants::{TenantContext, UserContext};

/// Request-start capture, used by the query audit recorder for wall-clock
/// execution time.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(pub Instant);

/// Everything the security filters need, attached as one request extension.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    pub client: ClientInfo,
    pub tenant: Option<TenantContext>,
    pub user: Option<UserContext>,
}

/// Resolve tenant + user context and derive [`ClientInfo`].
///
/// Tenant resolution order: the `/app/<slug>` path segment, then the
/// `x-tenant-slug` header. A slug that fails lookup logs `TENANT_NOT_FOUND`
/// unless it is suspicious, in which case the slug scanner downstream owns
/// the (high-severity) logging and the rejection.
pub async fn resolve_context(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let headers = req.headers().clone();
    let path = req.uri().path().to_string();

    let user = resolve_user(&headers);

    let slug = patterns::extract_tenant_slug(&path)
        .map(str::to_owned)
        .or_else(|| header(&headers, "x-tenant-slug").map(str::to_owned));
    let tenant = slug.as_deref().and_then(|s| state.tenants.get(s));

    let client = ClientInfo {
        ip: client_ip(&headers, req.extensions().get::<ConnectInfo<SocketAddr>>()),
        user_agent: header(&headers, "user-agent")
            .unwrap_or(sentinels::UNKNOWN_AGENT)
            .to_string(),
        referer: header(&headers, "referer")
            .unwrap_or(sentinels::DIRECT_REFERER)
            .to_string(),
        method: req.method().to_string(),
        url: req.uri().to_string(),
        timestamp: Utc::now(),
        session_id: header(&headers, "x-session-id")
            .unwrap_or(sentinels::NO_SESSION)
            .to_string(),
        user_id: user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| sentinels::ANONYMOUS.to_string()),
        tenant_id: tenant
            .as_ref()
            .map(|t| t.barbershop_id.clone())
            .unwrap_or_else(|| sentinels::NO_TENANT.to_string()),
        tenant_slug: tenant
            .as_ref()
            .map(|t| t.slug.clone())
            .unwrap_or_else(|| sentinels::NO_SLUG.to_string()),
    };

    if let Some(slug) = &slug {
        if tenant.is_none() && patterns::scan_slug(slug).is_empty() {
            state
                .security_log
                .log_event(
                    &client,
                    None,
                    user.as_ref(),
                    EventType::TenantNotFound,
                    serde_json::json!({ "slug": slug }),
                )
                .await;
        }
    }

    let ctx = SecurityContext {
        client,
        tenant,
        user,
    };
    req.extensions_mut().insert(ctx);
    req.extensions_mut().insert(RequestStart(start));

    next.run(req).await
}

/// First `X-Forwarded-For` entry when present, else the raw peer address.
fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    if let Some(forwarded) = header(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    peer.map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| sentinels::UNKNOWN_IP.to_string())
}

/// Identity forwarded by the upstream auth layer via trusted headers.
fn resolve_user(headers: &HeaderMap) -> Option<UserContext> {
    let id = header(headers, "x-user-id")?.to_string();
    Some(UserContext {
        id,
        username: header(headers, "x-user-name").map(str::to_owned),
        role: header(headers, "x-user-role").map(str::to_owned),
        barbershop_id: header(headers, "x-user-tenant").map(str::to_owned),
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
