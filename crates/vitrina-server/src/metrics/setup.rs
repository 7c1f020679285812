//! Metrics setup and initialization.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

use super::http::register_http_metrics;

/// Buckets para histogramas (en segundos); las operaciones de cache son sub-milisegundo.
const LATENCY_BUCKETS: &[f64] = &[
    0.000_01, // 10 microsegundos
    0.000_05, // 50 microsegundos
    0.0001,   // 100 microsegundos
    0.0005,   // 500 microsegundos
    0.001,    // 1 milisegundo
    0.005,    // 5 milisegundos
    0.01,     // 10 milisegundos
    0.05,     // 50 milisegundos
    0.1,      // 100 milisegundos
    0.5,      // 500 milisegundos
    1.0,      // 1 segundo
];

/// Instala el recorder global de Prometheus y retorna el handle para `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)?
        .install_recorder()?;

    vitrina_cache::register_cache_metrics();
    register_http_metrics();

    info!("Metrics system initialized");
    Ok(handle)
}
