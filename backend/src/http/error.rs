//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::RepositoryError;
use crate::error::PredictionError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Caller identity missing
    Unauthorized(String),
    /// Prediction pipeline error
    Prediction(PredictionError),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", msg))
            }
            AppError::Prediction(e) => match e {
                PredictionError::InvalidTimestamp(_) => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("INVALID_TIMESTAMP", e.to_string()),
                ),
                PredictionError::MissingRequiredField(_) => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("MISSING_FIELD", e.to_string()),
                ),
                PredictionError::ModelUnavailable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("MODEL_UNAVAILABLE", e.to_string()),
                ),
                // Details stay in the server log.
                PredictionError::ClassifierInvocation(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("PREDICTION_FAILED", "Prediction failed"),
                ),
            },
            AppError::Repository(e) => match e {
                RepositoryError::NotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    ApiError::new("NOT_FOUND", e.message()),
                ),
                RepositoryError::ValidationError { .. } => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("BAD_REQUEST", e.message()),
                ),
                _ => {
                    error!(error = %e, "repository failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", "Storage unavailable"),
                    )
                }
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        AppError::Prediction(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}
