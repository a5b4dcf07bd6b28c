//! # HTTP Errors
//!
//! Every handler failure ends the request here: the error becomes a
//! plain-text body with the matching status code.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::observability::Event;
use crate::store::StoreError;
use crate::student::InvalidStudentId;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path identifier is not a valid id
    #[error("{0}")]
    InvalidId(#[from] InvalidStudentId),

    /// Request body is not a student record
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// No document matched the identifier
    #[error("no document found")]
    NotFound,

    /// Delete matched nothing
    #[error("No document found to delete")]
    NothingToDelete,

    /// Single-document lookup failed; reported as not found with the cause
    #[error("{0}")]
    LookupFailed(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store call exceeded the per-request ceiling
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Store call failed
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Fold a failed single-document read into a not-found answer.
    ///
    /// Client errors pass through unchanged.
    pub fn into_lookup_failure(self) -> Self {
        match self {
            ApiError::Timeout(_) | ApiError::Store(_) => ApiError::LookupFailed(self.to_string()),
            other => other,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::NothingToDelete => StatusCode::NOT_FOUND,
            ApiError::LookupFailed(_) => StatusCode::NOT_FOUND,

            ApiError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(event = %Event::RequestFailed, status = status.as_u16(), error = %message);
        } else {
            debug!(event = %Event::RequestFailed, status = status.as_u16(), error = %message);
        }

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::StudentId;

    #[test]
    fn test_status_codes() {
        let bad_id = StudentId::parse("xyz").unwrap_err();
        assert_eq!(ApiError::from(bad_id).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidBody("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NothingToDelete.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(5)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_propagation() {
        let err = ApiError::from(StoreError::Operation("boom".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "store operation failed: boom");
    }

    #[test]
    fn test_lookup_failure_is_not_found() {
        let err = ApiError::from(StoreError::Operation("down".to_string())).into_lookup_failure();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "store operation failed: down");

        let err = ApiError::Timeout(Duration::from_secs(5)).into_lookup_failure();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("timed out"));

        let err = ApiError::InvalidBody("eof".to_string()).into_lookup_failure();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = ApiError::NothingToDelete.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }
}
