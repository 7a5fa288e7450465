//! API error handling.
//!
//! Every error leaves the API as `{"error": {"message": ..., "description": ...}}`
//! with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::RepositoryError;

// =============================================================================
// API Error
// =============================================================================

/// Error details carried in the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub message: String,
    /// Optional machine-readable details, e.g. body rejection reasons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
}

impl ApiError {
    /// Creates a new API error without a description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(self, description: impl Into<serde_json::Value>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }
}

/// JSON envelope around [`ApiError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// The error.
    pub error: ApiError,
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(message))
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("Internal server error"),
        )
    }

    /// Attaches a description to the error body.
    #[must_use]
    pub fn with_description(self, description: impl Into<serde_json::Value>) -> Self {
        Self {
            error: self.error.with_description(description),
            ..self
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ApiErrorBody { error: self.error })).into_response()
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Validation(message) => Self::bad_request(message),
            RepositoryError::NotFound(id) => {
                Self::not_found(format!("Todo with id '{id}' not found"))
            }
            RepositoryError::Store(store_error) => {
                // Storage details stay in the logs.
                tracing::error!(error = %store_error, "Record store failure");
                Self::internal_error()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
