//! Vitrina Server - admin diagnostics for the query cache.
//!
//! Exposes cache statistics, invalidation endpoints and Prometheus
//! metrics over HTTP.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod state;

pub use server::{create_router, create_router_with_metrics, run_server, shutdown_signal};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
