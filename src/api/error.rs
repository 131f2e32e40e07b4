//! API error types with IntoResponse.
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Storage faults are logged and reported with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::handlers::ErrorResponse;
use crate::db::DbError;

/// Message returned to clients for any storage fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
/// Message returned when a todo does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Todo not found";

/// Handler-level error with automatic HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed validation (400)
    #[error("{0}")]
    Validation(String),

    /// Todo does not exist (404)
    #[error("Todo not found")]
    NotFound,

    /// Storage or other internal fault (500, logged)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients. Logs internal faults.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => ApiError::NotFound,
            DbError::InvalidId { id } => ApiError::Validation(format!("Invalid todo id: {}", id)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
