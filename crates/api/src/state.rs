use std::sync::Arc;

use crate::config::ServerConfig;
use crate::security::attempts::AccessAttempts;
use crate::security::log::SecurityLog;
use crate::tenants::TenantDirectory;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). All mutable
/// security state lives here, explicitly owned and injectable, so tests can
/// construct isolated instances instead of sharing module-level globals.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Append-only security event log.
    pub security_log: Arc<SecurityLog>,
    /// Cross-tenant violation counters, keyed by `"{ip}-{user_id}"`.
    pub access_attempts: Arc<AccessAttempts>,
    /// Tenant registry (stand-in for the external data backend).
    pub tenants: Arc<TenantDirectory>,
}
