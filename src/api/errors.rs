//! # API Errors
//!
//! Three kinds of failure reach clients:
//!
//! | kind                    | status | body                              |
//! |-------------------------|--------|-----------------------------------|
//! | malformed request body  | 422    | `{"detail": [<violation>, ...]}`  |
//! | malformed interview id  | 400    | `{"detail": "Invalid interview_id"}` |
//! | any store failure       | 500    | `{"detail": "<store message>"}`   |
//! | store task panicked     | 500    | `{"detail": "Database task failed: ..."}` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::{FieldViolation, ValidationErrors};
use crate::storage::StoreError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body did not match its declared shape
    #[error("{0}")]
    Validation(ValidationErrors),

    /// `interview_id` on an answer is not a well-formed identifier
    #[error("Invalid interview_id")]
    InvalidInterviewId,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure; the message is passed through unchanged
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Blocking store task panicked or was cancelled
    #[error("Database task failed: {0}")]
    TaskFailed(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInterviewId => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// `detail` is a message for single errors and a list for validation failures
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Violations(Vec<FieldViolation>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let detail = match err {
            ApiError::Validation(errors) => ErrorDetail::Violations(errors.into_violations()),
            other => ErrorDetail::Message(other.to_string()),
        };
        Self { detail }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
