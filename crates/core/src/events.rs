//! Security event catalog and severity classification.
//!
//! Every decision point in the gateway logs exactly one [`EventType`]. The
//! severity tables are static: a fixed set of event types is HIGH, a second
//! fixed set is MEDIUM, and everything else defaults to LOW. Keeping the
//! mapping as an exhaustive `match` means adding a new event type forces an
//! explicit classification decision at compile time.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// Catalog of security events emitted by the gateway.
///
/// Serialized in SCREAMING_SNAKE_CASE to match the persisted log format
/// (e.g. `CROSS_TENANT_ACCESS_ATTEMPT`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// An authenticated user touched a tenant other than their own.
    CrossTenantAccessAttempt,
    /// A tenant-slug lookup failed *and* the slug matched a suspicious pattern.
    TenantNotFoundSuspicious,
    /// A non-admin user hit an admin-only operational endpoint.
    UnauthorizedAdminAccess,
    /// Reserved for bulk-exfiltration detection by downstream tooling.
    DataBreachAttempt,
    /// A tenant-slug lookup failed (no suspicious pattern involved).
    TenantNotFound,
    /// A resolved tenant context was present but unusable.
    InvalidTenantAccess,
    /// A plan-limited operation was attempted past its quota.
    PlanLimitExceeded,
    /// A tenant-scoped route was hit without any tenant context.
    QueryWithoutTenant,
    /// An actor crossed the cross-tenant violation threshold.
    IpBlockedCrossTenant,
    /// A finite plan limit was resolved for a guarded resource.
    PlanLimitCheck,
    /// A tenant-scoped request completed (audit trail).
    TenantQueryExecuted,
}

impl EventType {
    /// Every event type in the catalog, for reports and exhaustiveness tests.
    pub const ALL: &'static [EventType] = &[
        EventType::CrossTenantAccessAttempt,
        EventType::TenantNotFoundSuspicious,
        EventType::UnauthorizedAdminAccess,
        EventType::DataBreachAttempt,
        EventType::TenantNotFound,
        EventType::InvalidTenantAccess,
        EventType::PlanLimitExceeded,
        EventType::QueryWithoutTenant,
        EventType::IpBlockedCrossTenant,
        EventType::PlanLimitCheck,
        EventType::TenantQueryExecuted,
    ];

    /// Classify this event's severity.
    ///
    /// Total and deterministic: every catalog member maps to exactly one
    /// severity, and event types outside the two explicit sets are LOW.
    pub fn severity(self) -> Severity {
        match self {
            EventType::CrossTenantAccessAttempt
            | EventType::TenantNotFoundSuspicious
            | EventType::UnauthorizedAdminAccess
            | EventType::DataBreachAttempt => Severity::High,

            EventType::TenantNotFound
            | EventType::InvalidTenantAccess
            | EventType::PlanLimitExceeded => Severity::Medium,

            EventType::QueryWithoutTenant
            | EventType::IpBlockedCrossTenant
            | EventType::PlanLimitCheck
            | EventType::TenantQueryExecuted => Severity::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Coarse urgency classification attached to every logged event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
