use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path of the append-only security log (one JSON object per line).
    pub security_log_path: PathBuf,
    /// Cross-tenant violations tolerated per `(ip, user)` before 429 blocking.
    pub cross_tenant_block_threshold: u32,
    /// Interval between bulk resets of the access-attempt counters.
    pub attempts_reset_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `HOST`                         | `0.0.0.0`               |
    /// | `PORT`                         | `3000`                  |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                    |
    /// | `SECURITY_LOG_PATH`            | `security.log`          |
    /// | `CROSS_TENANT_BLOCK_THRESHOLD` | `3`                     |
    /// | `ATTEMPTS_RESET_INTERVAL_SECS` | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let security_log_path = PathBuf::from(
            std::env::var("SECURITY_LOG_PATH").unwrap_or_else(|_| "security.log".into()),
        );

        let cross_tenant_block_threshold: u32 =
            std::env::var("CROSS_TENANT_BLOCK_THRESHOLD")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .expect("CROSS_TENANT_BLOCK_THRESHOLD must be a valid u32");

        let attempts_reset_interval_secs: u64 =
            std::env::var("ATTEMPTS_RESET_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".into())
                .parse()
                .expect("ATTEMPTS_RESET_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            security_log_path,
            cross_tenant_block_threshold,
            attempts_reset_interval_secs,
        }
    }
}
