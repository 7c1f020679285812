//! Vitrina server binary.

use std::path::PathBuf;

use anyhow::Context;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vitrina_cache::TtlCache;
use vitrina_server::{
    AppState, config, create_router_with_metrics, metrics::init_metrics, run_server,
    shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_file = std::env::var_os("VITRINA_CONFIG_FILE").map(PathBuf::from);
    let settings = config::load(config_file.as_deref()).context("failed to load configuration")?;

    // RUST_LOG tiene prioridad sobre logging.level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vitrina server v{}", vitrina_server::version());
    tracing::info!(
        default_ttl_ms = settings.cache.default_ttl.as_millis() as u64,
        sweep_interval_ms = settings.cache.sweep_interval.as_millis() as u64,
        "Cache configured"
    );

    let prometheus_handle = init_metrics().context("failed to install metrics recorder")?;

    let cache: TtlCache<Value> = TtlCache::new(settings.cache.clone());
    let sweeper = cache.start_sweeper();

    let app = create_router_with_metrics(AppState::new(cache), prometheus_handle);
    run_server(settings.server.addr, app, shutdown_signal()).await?;

    sweeper.stop();
    tracing::info!("Server stopped");

    Ok(())
}
