//! Cache diagnostics endpoint.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Snapshot del cache para diagnostico.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Entries residentes, incluidas expiradas aun no barridas.
    pub size: usize,
    /// Keys ordenadas alfabeticamente.
    pub keys: Vec<String>,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// GET /cache/stats
#[instrument(skip_all)]
pub async fn cache_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache();
    let mut stats = cache.stats();
    stats.keys.sort();

    let metrics = cache.metrics();
    Json(StatsResponse {
        size: stats.size,
        keys: stats.keys,
        hits: metrics.hits(),
        misses: metrics.misses(),
        hit_rate: metrics.hit_rate(),
    })
}
