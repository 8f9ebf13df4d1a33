//! BarberHub domain core.
//!
//! Pure domain logic for the tenant isolation & security gateway: the
//! security event catalog, log entry data model, suspicious identifier
//! patterns, plan tiers/limits, and security report aggregation.
//!
//! This crate has zero internal dependencies and performs no I/O, so the
//! API layer and tests can share it.

pub mod entry;
pub mod error;
pub mod events;
pub mod patterns;
pub mod plans;
pub mod report;
