//! Durable security event log.
//!
//! Each event becomes one JSON line appended to the log file. Appends are
//! serialized behind an async mutex, so concurrent requests never interleave
//! or corrupt lines, and appends issued by one request land in decision
//! order (every guard awaits its append before handing off).
//!
//! A failed append is an infrastructure fault local to this module: it is
//! logged through tracing and swallowed. The guarding decision that
//! triggered the event has already been made and must not be altered by log
//! availability.

use std::io;
use std::path::{Path, PathBuf};

use barberhub_core::entry::{ClientInfo, SecurityLogEntry, TenantInfo, UserInfo};
use barberhub_core::events::{EventType, Severity};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::tenants::{TenantContext, UserContext};

/// Append-only JSONL security log store.
#[derive(Debug)]
pub struct SecurityLog {
    path: PathBuf,
    /// Serializes appends; one line per event, never interleaved.
    write_lock: Mutex<()>,
}

impl SecurityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a security event: emit an operational summary via tracing at a
    /// level matching the event's severity, then append the full structured
    /// entry to the durable store.
    ///
    /// Never fails the caller. Returns the entry that was (at least
    /// attempted to be) persisted.
    pub async fn log_event(
        &self,
        client: &ClientInfo,
        tenant: Option<&TenantContext>,
        user: Option<&UserContext>,
        event_type: EventType,
        details: serde_json::Value,
    ) -> SecurityLogEntry {
        let entry = SecurityLogEntry::new(
            event_type,
            client.clone(),
            tenant_snapshot(tenant),
            user_snapshot(user),
            details,
        );

        // Console-level summary survives even when the durable store is down.
        match entry.severity {
            Severity::High => tracing::error!(
                event = ?entry.event_type,
                ip = %entry.client_info.ip,
                tenant = %entry.client_info.tenant_id,
                url = %entry.client_info.url,
                "security event"
            ),
            Severity::Medium => tracing::warn!(
                event = ?entry.event_type,
                ip = %entry.client_info.ip,
                tenant = %entry.client_info.tenant_id,
                url = %entry.client_info.url,
                "security event"
            ),
            Severity::Low => tracing::info!(
                event = ?entry.event_type,
                ip = %entry.client_info.ip,
                tenant = %entry.client_info.tenant_id,
                url = %entry.client_info.url,
                "security event"
            ),
        }

        if let Err(error) = self.append(&entry).await {
            tracing::warn!(%error, path = %self.path.display(), "security log append failed");
        }

        entry
    }

    /// Append one entry as a single line. Holding the lock across
    /// serialize-open-write keeps lines atomic under concurrency.
    async fn append(&self, entry: &SecurityLogEntry) -> io::Result<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Read every parseable entry from the store.
    ///
    /// Malformed lines are skipped with a warning -- one corrupt line must
    /// not abort report generation. A missing file reads as empty (nothing
    /// has been logged yet).
    pub async fn read_entries(&self) -> io::Result<Vec<SecurityLogEntry>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut entries = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SecurityLogEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    tracing::warn!(%error, line = line_no + 1, "skipping malformed security log line");
                }
            }
        }
        Ok(entries)
    }
}

fn tenant_snapshot(tenant: Option<&TenantContext>) -> TenantInfo {
    match tenant {
        Some(t) => TenantInfo {
            barbershop_id: Some(t.barbershop_id.clone()),
            slug: Some(t.slug.clone()),
            name: Some(t.name.clone()),
            plan_type: Some(t.plan_type.clone()),
        },
        None => TenantInfo::default(),
    }
}

fn user_snapshot(user: Option<&UserContext>) -> UserInfo {
    match user {
        Some(u) => UserInfo {
            id: Some(u.id.clone()),
            username: u.username.clone(),
            role: u.role.clone(),
            barbershop_id: u.barbershop_id.clone(),
        },
        None => UserInfo::default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
