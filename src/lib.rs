//! Library crate for contoso-back, exposing modules for the binary and integration tests.

/// Startup configuration.
pub mod config;
/// Player persistence.
pub mod dao;
mod dto;
mod error;
/// HTTP surface.
pub mod routes;
/// Business operations behind the routes.
pub mod services;
/// Shared application state.
pub mod state;
/// Logging setup.
pub mod telemetry;
