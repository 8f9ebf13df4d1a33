//! Security report generation over the persisted log.
//!
//! Reads the JSONL store, parses what it can, and aggregates the trailing
//! 24 hours via [`barberhub_core::report`]. A store-level read failure
//! degrades to a report-shaped "unavailable" payload instead of an error
//! response, so dashboards render a notice rather than breaking.

use barberhub_core::report::{self, SecurityReport};
use chrono::Utc;
use serde::Serialize;

use crate::security::log::SecurityLog;

/// Outcome of a report request.
///
/// Serializes untagged: either the full report object or `{ "error": ... }`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportOutcome {
    Report(SecurityReport),
    Unavailable { error: String },
}

/// Generate the security report, optionally filtered to one tenant.
pub async fn generate(log: &SecurityLog, tenant_id: Option<&str>) -> ReportOutcome {
    match log.read_entries().await {
        Ok(entries) => ReportOutcome::Report(report::aggregate(entries, Utc::now(), tenant_id)),
        Err(error) => {
            tracing::error!(%error, path = %log.path().display(), "security report generation failed");
            ReportOutcome::Unavailable {
                error: "Security report unavailable".to_string(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
