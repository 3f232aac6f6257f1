//! # HTTP API Errors
//!
//! Error types for the request handler. Every request-level failure maps
//! to a 400 response with an `{"error": ...}` body; the service makes no
//! 404 distinction.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::SchemaError;
use crate::store::{KeyError, StoreError};

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Request handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path id could not be converted to a native primary key
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Path id for the lookup variant is not an integer singer id
    #[error("invalid singer id '{0}': expected an integer")]
    InvalidSingerId(String),

    /// Create payload failed schema validation (embedded variant reports
    /// the violation)
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// Create payload failed schema validation (lookup variant reports no
    /// detail)
    #[error("Invalid Input")]
    InvalidInput,

    /// Request body has the wrong shape
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Read path found nothing
    #[error("No documents in database")]
    NoDocuments,

    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        // All request failures respond 400, including the empty-result
        // read branch.
        StatusCode::BAD_REQUEST
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::from(&self);
        log_event_with_fields(Event::RequestRejected, &[("error", &body.error)]);
        (status, Json(body)).into_response()
    }
}
