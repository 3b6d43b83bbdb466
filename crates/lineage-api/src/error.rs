//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lineage_themes::ThemeError;
use lineage_trees::TreeError;
use serde_json::json;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request cannot be served as sent
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Anything the client cannot fix
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Tree lookup failed
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Theme lookup or loading failed
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    /// A service was missing from the container
    #[error("Container error: {0}")]
    Container(#[from] lineage_di::DIError),

    /// Configuration could not be applied
    #[error("Configuration error: {0}")]
    Config(#[from] lineage_config::ConfigError),
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Tree(TreeError::NotFound(_)) => (StatusCode::NOT_FOUND, "tree_not_found"),
            ApiError::Tree(_) => (StatusCode::BAD_REQUEST, "tree_error"),
            ApiError::Theme(ThemeError::NotFound(_)) => (StatusCode::NOT_FOUND, "theme_not_found"),
            ApiError::Theme(_) => (StatusCode::INTERNAL_SERVER_ERROR, "theme_error"),
            ApiError::Container(_) => (StatusCode::INTERNAL_SERVER_ERROR, "container_error"),
            ApiError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
