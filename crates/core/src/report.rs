//! Security report aggregation.
//!
//! Offline rollup of persisted [`SecurityLogEntry`] records into per-tenant
//! statistics over a trailing 24-hour window. The report is computed on
//! demand and never persisted; reading and parsing the log store is the
//! caller's job (skipping malformed lines), this module only aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::SecurityLogEntry;
use crate::events::{EventType, Severity};

/// Width of the reporting window.
const WINDOW_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Report shape
// ---------------------------------------------------------------------------

/// Per-tenant rollup within the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStats {
    pub name: String,
    pub slug: String,
    pub events: u64,
    pub high_severity_events: u64,
}

/// One cross-tenant violation, in log order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTenantAttempt {
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_tenant: Option<String>,
}

/// Aggregated security statistics for the trailing 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub total_events: u64,
    pub high_severity_count: u64,
    pub tenant_stats: BTreeMap<String, TenantStats>,
    pub security_events: BTreeMap<EventType, u64>,
    pub cross_tenant_attempts: Vec<CrossTenantAttempt>,
    pub last_updated: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Roll up `entries` into a [`SecurityReport`].
///
/// Entries older than 24 hours before `now` are excluded. When
/// `tenant_id` is given, only entries whose tenant snapshot matches it
/// contribute. Insertion order of `cross_tenant_attempts` is log order.
pub fn aggregate(
    entries: impl IntoIterator<Item = SecurityLogEntry>,
    now: DateTime<Utc>,
    tenant_id: Option<&str>,
) -> SecurityReport {
    let cutoff = now - Duration::hours(WINDOW_HOURS);

    let mut report = SecurityReport {
        last_updated: now,
        ..SecurityReport::default()
    };

    for entry in entries {
        if entry.timestamp < cutoff {
            continue;
        }
        if let Some(filter) = tenant_id {
            if entry.tenant_info.barbershop_id.as_deref() != Some(filter) {
                continue;
            }
        }

        report.total_events += 1;
        let high = entry.severity == Severity::High;
        if high {
            report.high_severity_count += 1;
        }

        *report.security_events.entry(entry.event_type).or_default() += 1;

        if let Some(shop_id) = &entry.tenant_info.barbershop_id {
            let stats = report
                .tenant_stats
                .entry(shop_id.clone())
                .or_insert_with(|| TenantStats {
                    name: entry.tenant_info.name.clone().unwrap_or_default(),
                    slug: entry.tenant_info.slug.clone().unwrap_or_default(),
                    ..TenantStats::default()
                });
            stats.events += 1;
            if high {
                stats.high_severity_events += 1;
            }
        }

        if entry.event_type == EventType::CrossTenantAccessAttempt {
            report.cross_tenant_attempts.push(CrossTenantAttempt {
                timestamp: entry.timestamp,
                ip: entry.client_info.ip.clone(),
                user: entry.user_info.username.clone(),
                from_tenant: entry
                    .details
                    .get("userTenant")
                    .and_then(|v| v.as_str())
                    .map(str::to_owned),
                to_tenant: entry
                    .details
                    .get("requestedTenant")
                    .and_then(|v| v.as_str())
                    .map(str::to_owned),
            });
        }
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
