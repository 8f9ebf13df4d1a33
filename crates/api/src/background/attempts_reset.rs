//! Periodic reset of the cross-tenant attempt counters.
//!
//! The counters have no per-key expiry, so an actor blocked after repeated
//! violations stays blocked until a bulk reset. This job performs that
//! reset on a fixed interval using `tokio::time::interval`, giving blocks
//! an effective upper bound of one sweep period.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::security::attempts::AccessAttempts;

/// Run the counter reset loop.
///
/// Clears every tracked counter each `interval_secs`. Runs until `cancel`
/// is triggered.
pub async fn run(attempts: Arc<AccessAttempts>, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Attempt counter reset job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    // The first tick fires immediately; skip it so a restart does not wipe
    // counters that are still meaningful.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Attempt counter reset job stopping");
                break;
            }
            _ = interval.tick() => {
                let cleared = attempts.clear_all();
                if cleared > 0 {
                    tracing::info!(cleared, "Attempt counter reset: cleared tracked actors");
                } else {
                    tracing::debug!("Attempt counter reset: nothing tracked");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
