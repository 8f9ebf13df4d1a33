pub mod auth;
pub mod barbershops;
pub mod booking;
pub mod resources;
pub mod security;
