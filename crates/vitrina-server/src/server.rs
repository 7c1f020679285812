use std::future::Future;
use std::net::SocketAddr;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    health::health_check,
    invalidate::{invalidate_all, invalidate_by_patterns, invalidate_key, invalidate_resource},
    metrics::metrics_handler,
    stats::cache_stats,
};
use crate::middleware::RequestIdLayer;
use crate::state::AppState;

/// Creates the application router without the `/metrics` endpoint.
pub fn create_router(state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health", get(health_check))
        .route("/cache", delete(invalidate_all))
        .route("/cache/stats", get(cache_stats))
        .route("/cache/keys/{key}", delete(invalidate_key))
        .route("/cache/resources/{resource}", delete(invalidate_resource))
        .route("/cache/invalidate", post(invalidate_by_patterns))
        .with_state(state)
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
        .layer(middleware_stack)
}

/// Creates the application router plus the Prometheus `/metrics` endpoint.
pub fn create_router_with_metrics(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Router for metrics endpoint (different state)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    create_router(state).merge(metrics_router)
}

/// Runs the server until `shutdown` resolves.
pub async fn run_server<F>(addr: SocketAddr, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
