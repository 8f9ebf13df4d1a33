//! BarberHub security gateway library.
//!
//! Exposes the core building blocks (config, state, error handling, the
//! security middleware chain, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod security;
pub mod state;
pub mod tenants;
