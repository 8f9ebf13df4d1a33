//! Cross-tenant access attempt counters.
//!
//! Shared across all concurrent requests; increments are atomic under the
//! lock so parallel violations from the same actor never lose updates.
//! Counters only grow until a bulk reset -- either the admin endpoint or the
//! periodic background job. There is no per-key expiry.

use std::collections::HashMap;
use std::sync::Mutex;

/// Violation counters keyed by `"{ip}-{user_id}"`.
#[derive(Debug, Default)]
pub struct AccessAttempts {
    counts: Mutex<HashMap<String, u32>>,
}

impl AccessAttempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter key for an actor.
    pub fn key(ip: &str, user_id: &str) -> String {
        format!("{ip}-{user_id}")
    }

    /// Record one violation and return the post-increment count for the key.
    pub fn record(&self, key: &str) -> u32 {
        let mut counts = self.counts.lock().expect("access attempts lock poisoned");
        let count = counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Current count for a key (0 when absent).
    pub fn count(&self, key: &str) -> u32 {
        self.counts
            .lock()
            .expect("access attempts lock poisoned")
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Number of tracked actors.
    pub fn len(&self) -> usize {
        self.counts
            .lock()
            .expect("access attempts lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bulk reset: drop every counter. Returns how many were cleared.
    pub fn clear_all(&self) -> usize {
        let mut counts = self.counts.lock().expect("access attempts lock poisoned");
        let cleared = counts.len();
        counts.clear();
        cleared
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Repeated violations from the same actor strictly increase the count.
    #[test]
    fn counts_are_monotonic_per_key() {
        let attempts = AccessAttempts::new();
        let key = AccessAttempts::key("203.0.113.9", "user-1");
        assert_eq!(attempts.record(&key), 1);
        assert_eq!(attempts.record(&key), 2);
        assert_eq!(attempts.record(&key), 3);
        assert_eq!(attempts.count(&key), 3);
    }

    #[test]
    fn distinct_actors_count_separately() {
        let attempts = AccessAttempts::new();
        let a = AccessAttempts::key("203.0.113.9", "user-1");
        let b = AccessAttempts::key("203.0.113.9", "user-2");
        attempts.record(&a);
        attempts.record(&a);
        attempts.record(&b);
        assert_eq!(attempts.count(&a), 2);
        assert_eq!(attempts.count(&b), 1);
    }

    /// After clearing, a key's counter resets to absent/zero.
    #[test]
    fn clear_all_resets_every_key() {
        let attempts = AccessAttempts::new();
        let key = AccessAttempts::key("203.0.113.9", "user-1");
        attempts.record(&key);
        attempts.record(&key);
        assert_eq!(attempts.clear_all(), 1);
        assert_eq!(attempts.count(&key), 0);
        assert!(attempts.is_empty());
    }

    #[test]
    fn concurrent_increments_lose_no_updates() {
        use std::sync::Arc;

        let attempts = Arc::new(AccessAttempts::new());
        let key = AccessAttempts::key("203.0.113.9", "user-1");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let attempts = Arc::clone(&attempts);
                let key = key.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        attempts.record(&key);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }

        assert_eq!(attempts.count(&key), 800);
    }
}
