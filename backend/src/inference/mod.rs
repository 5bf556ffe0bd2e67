//! Model inference.
//!
//! The classifier and optional scaler are opaque artifacts loaded once at
//! start-up into an [`InferenceContext`], which is then shared read-only by
//! every request handler.

pub mod context;
pub mod error;
pub mod forest;
pub mod scaler;

pub use context::InferenceContext;
pub use error::{ArtifactError, InferenceError};
pub use forest::RandomForestClassifier;
pub use scaler::StandardScaler;

/// A fitted classifier returning a class label for one feature row.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<usize, InferenceError>;

    /// Number of input columns the model was fitted on.
    fn n_features(&self) -> usize;

    /// Human-readable model family.
    fn model_type(&self) -> &str;
}

/// A fitted feature transform applied before the classifier.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}
