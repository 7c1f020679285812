//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Motivo por el que una entry salio del cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// Detectada expirada al leerla.
    Expired,
    /// Eliminada por el sweeper.
    Swept,
    /// `delete` explicito.
    Manual,
    /// Invalidada por patron.
    Pattern,
    /// `clear`.
    Cleared,
}

impl EvictionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionReason::Expired => "expired",
            EvictionReason::Swept => "swept",
            EvictionReason::Manual => "manual",
            EvictionReason::Pattern => "pattern",
            EvictionReason::Cleared => "cleared",
        }
    }
}

/// Registra las descripciones de las metricas de cache.
/// Llamar una vez al inicio, despues de instalar el recorder.
pub fn register_cache_metrics() {
    metrics::describe_counter!("vitrina_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("vitrina_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "vitrina_cache_evictions_total",
        "Total number of entries removed from the cache"
    );
    metrics::describe_gauge!("vitrina_cache_entries", "Current number of entries in cache");
    metrics::describe_histogram!(
        "vitrina_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
/// Los contadores locales permiten calcular el hit rate sin consultar el exporter.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("vitrina_cache_hits_total").increment(1);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("vitrina_cache_misses_total").increment(1);
    }

    pub fn record_evictions(&self, reason: EvictionReason, count: usize) {
        if count == 0 {
            return;
        }
        self.evictions.fetch_add(count as u64, Ordering::Relaxed);
        counter!("vitrina_cache_evictions_total", "reason" => reason.as_str())
            .increment(count as u64);
    }

    pub fn update_entry_count(&self, count: usize) {
        gauge!("vitrina_cache_entries").set(count as f64);
    }

    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!("vitrina_cache_operation_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Entries removidas por cualquier motivo. Sobrescribir no cuenta.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }
}
