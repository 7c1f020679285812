//! Application state.

use serde_json::Value;
use vitrina_cache::TtlCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache de resultados de queries admin/catalogo (payloads JSON).
    cache: TtlCache<Value>,
}

impl AppState {
    pub fn new(cache: TtlCache<Value>) -> Self {
        Self { cache }
    }

    /// Returns the shared query cache.
    pub fn cache(&self) -> &TtlCache<Value> {
        &self.cache
    }
}
