//! Inference and artifact loading errors.

use std::path::PathBuf;

/// Failure while running a loaded model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("feature length mismatch: got {got}, expected {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("feature {index} is not finite")]
    NonFiniteFeature { index: usize },

    #[error("model produced unknown class {0}")]
    UnknownClass(i64),

    #[error("model is empty")]
    EmptyModel,
}

/// Failure while reading a persisted model or scaler.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(String),
}

impl ArtifactError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
