//! Errors raised by the prediction pipeline.

use crate::inference::InferenceError;

/// Failure of a prediction request.
///
/// Geocoding problems never appear here: the location resolver absorbs them
/// and falls back to a fixed coordinate.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The request datetime could not be parsed.
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// A required request field is absent.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// No classifier artifact was loaded at start-up.
    #[error("Model is not loaded")]
    ModelUnavailable,

    /// The classifier or scaler failed on a well-formed vector.
    #[error("Classifier invocation failed: {0}")]
    ClassifierInvocation(#[from] InferenceError),
}

impl PredictionError {
    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestamp(_) | Self::MissingRequiredField(_)
        )
    }
}
