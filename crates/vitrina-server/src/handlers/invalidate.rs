//! Cache invalidation endpoint handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use vitrina_core::admin_resource_pattern;

use crate::error::AppError;
use crate::state::AppState;

/// Response para operaciones de invalidacion.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Numero de entries invalidadas.
    pub invalidated: usize,
    /// Mensaje descriptivo.
    pub message: String,
}

/// Request body para invalidacion por patrones regex.
#[derive(Debug, Deserialize)]
pub struct InvalidateByPatternsRequest {
    /// Lista de expresiones regulares a aplicar sobre las keys.
    pub patterns: Vec<String>,
}

/// DELETE /cache
/// Vacia todo el cache.
#[instrument(skip_all)]
pub async fn invalidate_all(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let count = state.cache().clear();

    tracing::info!(count = count, "All cache entries invalidated");

    Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated all {} cache entries", count),
    })
}

/// DELETE /cache/keys/{key}
/// Elimina una entry especifica.
#[instrument(skip_all, fields(key = %key))]
pub async fn invalidate_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>, AppError> {
    if !state.cache().delete(&key) {
        return Err(AppError::NotFound { key });
    }

    tracing::info!(key = %key, "Cache entry invalidated");

    Ok(Json(InvalidateResponse {
        invalidated: 1,
        message: format!("Invalidated cache entry '{}'", key),
    }))
}

/// DELETE /cache/resources/{resource}
/// Invalida todas las paginas cacheadas de un recurso admin.
#[instrument(skip_all, fields(resource = %resource))]
pub async fn invalidate_resource(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<InvalidateResponse>, AppError> {
    if resource.is_empty() {
        return Err(AppError::BadRequest(
            "resource name cannot be empty".to_string(),
        ));
    }

    let count = state
        .cache()
        .delete_pattern(&admin_resource_pattern(&resource))?;

    Ok(Json(InvalidateResponse {
        invalidated: count,
        message: format!(
            "Invalidated {} cache entries for resource '{}'",
            count, resource
        ),
    }))
}

/// POST /cache/invalidate
/// Invalida las entries cuyas keys coinciden con alguno de los patrones.
#[instrument(skip_all, fields(patterns = payload.patterns.len()))]
pub async fn invalidate_by_patterns(
    State(state): State<AppState>,
    Json(payload): Json<InvalidateByPatternsRequest>,
) -> Result<Json<InvalidateResponse>, AppError> {
    if payload.patterns.is_empty() {
        return Err(AppError::BadRequest(
            "at least one pattern is required".to_string(),
        ));
    }

    let result = state.cache().delete_patterns(payload.patterns.as_slice())?;

    Ok(Json(InvalidateResponse {
        invalidated: result.count,
        message: format!(
            "Invalidated {} cache entries matching {}",
            result.count,
            result.patterns.join(", ")
        ),
    }))
}
