use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use vitrina_core::VitrinaError;

#[derive(Debug)]
pub enum AppError {
    /// La key no existe en el cache
    NotFound { key: String },

    /// Parametros invalidos
    BadRequest(String),

    /// Error interno
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<VitrinaError> for AppError {
    fn from(error: VitrinaError) -> Self {
        match error {
            VitrinaError::InvalidPattern { .. } | VitrinaError::ValidationError { .. } => {
                AppError::BadRequest(error.to_string())
            },
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound { key } => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("Cache entry not found for key '{}'", key),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::Internal(msg) => {
                tracing::error!(message = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    msg,
                )
            },
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
