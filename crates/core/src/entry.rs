//! Security log entry data model.
//!
//! A [`SecurityLogEntry`] is the unit of the append-only security log: one
//! JSON object per line, written once and never mutated. Field names use
//! camelCase on the wire so existing log tooling and dashboards keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{EventType, Severity};

// ---------------------------------------------------------------------------
// Sentinel defaults
// ---------------------------------------------------------------------------

/// Sentinel values used when a request lacks the corresponding context.
///
/// Extraction never fails: missing headers and absent tenant/user context
/// degrade to these documented defaults.
pub mod sentinels {
    pub const UNKNOWN_IP: &str = "unknown";
    pub const UNKNOWN_AGENT: &str = "Unknown";
    pub const DIRECT_REFERER: &str = "Direct";
    pub const NO_SESSION: &str = "no-session";
    pub const ANONYMOUS: &str = "anonymous";
    pub const NO_TENANT: &str = "no-tenant";
    pub const NO_SLUG: &str = "no-slug";
}

// ---------------------------------------------------------------------------
// Per-request client context
// ---------------------------------------------------------------------------

/// Normalized client context, derived fresh on every request.
///
/// Never persisted on its own; only embedded into [`SecurityLogEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    /// First entry of `X-Forwarded-For` when present, else the peer address.
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub method: String,
    pub url: String,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub user_id: String,
    pub tenant_id: String,
    pub tenant_slug: String,
}

// ---------------------------------------------------------------------------
// Tenant / user snapshots
// ---------------------------------------------------------------------------

/// Snapshot of the resolved tenant context; all fields absent when the
/// request carried no tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barbershop_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
}

/// Snapshot of the authenticated user context; all fields absent for
/// anonymous requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barbershop_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// One append-only security log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityLogEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub severity: Severity,
    pub client_info: ClientInfo,
    #[serde(default)]
    pub tenant_info: TenantInfo,
    #[serde(default)]
    pub user_info: UserInfo,
    /// Event-specific payload.
    #[serde(default)]
    pub details: serde_json::Value,
}

impl SecurityLogEntry {
    /// Build an entry for `event_type`, deriving severity from the static
    /// classification tables.
    pub fn new(
        event_type: EventType,
        client_info: ClientInfo,
        tenant_info: TenantInfo,
        user_info: UserInfo,
        details: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            severity: event_type.severity(),
            client_info,
            tenant_info,
            user_info,
            details,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
