//! Custom error types for the persons service

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the persons service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unparsable path, query or body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested person does not exist
    #[error("{0}")]
    NotFound(String),

    /// Database unreachable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Database error
    #[error("{0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    pub fn person_not_found(id: i64) -> Self {
        ApiError::NotFound(format!("Person not found with id: {}", id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Unavailable(msg) => msg,
            ApiError::Database(e) => e.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
