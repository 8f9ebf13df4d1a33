//! Security subsystem: durable event log, cross-tenant violation counters,
//! and on-demand report generation.
//!
//! - [`log::SecurityLog`] -- append-only JSONL event store.
//! - [`attempts::AccessAttempts`] -- shared violation counters.
//! - [`report`] -- trailing-24h report generation over the persisted log.

pub mod attempts;
pub mod log;
pub mod report;
