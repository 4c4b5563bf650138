use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Places search error: {0}")]
    PlacesSearch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidInput(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::Geocoding(ref e) => {
                tracing::error!("Geocoding error: {}", e);
                (StatusCode::BAD_GATEWAY, "Geocoding service error")
            }
            AppError::PlacesSearch(ref e) => {
                tracing::error!("Places search error: {}", e);
                (StatusCode::BAD_GATEWAY, "Places search service error")
            }
            AppError::NotFound(ref e) => {
                tracing::info!("Not found: {}", e);
                (StatusCode::NOT_FOUND, e.as_str())
            }
            AppError::Export(ref e) => {
                tracing::error!("Export failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to write GPX file")
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
