//! Metrics module for the Vitrina server.

pub mod http;
pub mod setup;

pub use setup::init_metrics;
