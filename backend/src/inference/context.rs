//! Immutable holder for the loaded model artifacts.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::error::{ArtifactError, InferenceError};
use super::forest::RandomForestClassifier;
use super::scaler::StandardScaler;
use super::{Classifier, Scaler};
use crate::models::{FeatureVector, TrafficLevel, FEATURE_COUNT};

/// Classifier plus optional scaler, built once and shared across requests.
pub struct InferenceContext {
    classifier: Box<dyn Classifier>,
    scaler: Option<Box<dyn Scaler>>,
}

impl InferenceContext {
    /// Wrap an already constructed classifier.
    pub fn new(classifier: Box<dyn Classifier>) -> Result<Self, ArtifactError> {
        if classifier.n_features() != FEATURE_COUNT {
            return Err(ArtifactError::invalid(format!(
                "model expects {} features, pipeline produces {}",
                classifier.n_features(),
                FEATURE_COUNT
            )));
        }
        Ok(Self {
            classifier,
            scaler: None,
        })
    }

    pub fn with_scaler(mut self, scaler: Box<dyn Scaler>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    /// Load the classifier and, if present, the scaler from disk.
    ///
    /// A missing or unreadable scaler is not fatal: predictions then run on the
    /// raw vector.
    pub fn load(model_path: &Path, scaler_path: Option<&Path>) -> Result<Self, ArtifactError> {
        let forest: RandomForestClassifier = read_json(model_path)?;
        forest.validate()?;
        info!(
            path = %model_path.display(),
            trees = forest.trees.len(),
            classes = ?forest.classes,
            "classifier loaded"
        );

        let mut context = Self::new(Box::new(forest))?;

        if let Some(path) = scaler_path {
            match read_json::<StandardScaler>(path).and_then(|s| {
                s.validate()?;
                if s.n_features() != FEATURE_COUNT {
                    return Err(ArtifactError::invalid(format!(
                        "scaler has {} columns, expected {}",
                        s.n_features(),
                        FEATURE_COUNT
                    )));
                }
                Ok(s)
            }) {
                Ok(scaler) => {
                    info!(path = %path.display(), "scaler loaded");
                    context = context.with_scaler(Box::new(scaler));
                }
                Err(e) => warn!(error = %e, "scaler not loaded; using unscaled features"),
            }
        }

        Ok(context)
    }

    pub fn model_type(&self) -> &str {
        self.classifier.model_type()
    }

    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    /// Classify one feature vector.
    pub fn predict(&self, vector: &FeatureVector) -> Result<TrafficLevel, InferenceError> {
        let raw = vector.as_slice();
        let class = match &self.scaler {
            Some(scaler) => self.classifier.predict(&scaler.transform(raw)?)?,
            None => self.classifier.predict(raw)?,
        };
        TrafficLevel::try_from(class).map_err(|c| InferenceError::UnknownClass(c as i64))
    }
}

impl std::fmt::Debug for InferenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceContext")
            .field("model_type", &self.model_type())
            .field("scaler", &self.has_scaler())
            .finish()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, LocationSource, ResolvedLocation, TimeFeatures, TrafficParameters};
    use std::io::Write;

    /// Hour <= 6.5 is low; otherwise more than 500 vehicles is high.
    const MODEL_JSON: &str = r#"{
        "model_type": "RandomForestClassifier",
        "n_features": 9,
        "classes": [0, 1, 2],
        "trees": [{"nodes": [
            {"feature": 0, "threshold": 6.5, "left": 1, "right": 2},
            {"value": [9.0, 1.0, 0.0]},
            {"feature": 6, "threshold": 500.0, "left": 3, "right": 4},
            {"value": [1.0, 8.0, 1.0]},
            {"value": [0.0, 1.0, 9.0]}
        ]}]
    }"#;

    fn vector(hour: u32, vehicles: u32) -> FeatureVector {
        FeatureVector::assemble(
            &TimeFeatures {
                hour,
                day_of_week: 0,
                is_weekend: false,
                month: 1,
            },
            &TrafficParameters::new(10, 20, vehicles),
            &ResolvedLocation::new(Coordinates::new(41.0, 29.0), LocationSource::Gazetteer),
        )
    }

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_predict_without_scaler() {
        let model = write_temp(MODEL_JSON);
        let ctx = InferenceContext::load(model.path(), None).unwrap();
        assert!(!ctx.has_scaler());
        assert_eq!(ctx.model_type(), "RandomForestClassifier");

        assert_eq!(ctx.predict(&vector(3, 100)).unwrap(), TrafficLevel::Low);
        assert_eq!(ctx.predict(&vector(12, 400)).unwrap(), TrafficLevel::Medium);
        assert_eq!(ctx.predict(&vector(8, 750)).unwrap(), TrafficLevel::High);
    }

    #[test]
    fn test_scaler_is_applied_before_classifier() {
        let model = write_temp(MODEL_JSON);
        // Shifts the hour column by -10, so hour 12 reads as 2.
        let scaler = write_temp(
            r#"{"mean": [10, 0, 0, 0, 0, 0, 0, 0, 0], "scale": [1, 1, 1, 1, 1, 1, 1, 1, 1]}"#,
        );
        let ctx = InferenceContext::load(model.path(), Some(scaler.path())).unwrap();
        assert!(ctx.has_scaler());
        assert_eq!(ctx.predict(&vector(12, 400)).unwrap(), TrafficLevel::Low);
    }

    #[test]
    fn test_bad_scaler_is_skipped() {
        let model = write_temp(MODEL_JSON);
        let scaler = write_temp(r#"{"mean": [0.0], "scale": [1.0]}"#);
        let ctx = InferenceContext::load(model.path(), Some(scaler.path())).unwrap();
        assert!(!ctx.has_scaler());

        let missing = Path::new("/nonexistent/scaler.json");
        let ctx = InferenceContext::load(model.path(), Some(missing)).unwrap();
        assert!(!ctx.has_scaler());
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let err = InferenceContext::load(Path::new("/nonexistent/model.json"), None).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));

        let garbage = write_temp("not json");
        let err = InferenceContext::load(garbage.path(), None).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_feature_count_must_match_pipeline() {
        let narrow = MODEL_JSON.replace("\"n_features\": 9", "\"n_features\": 7");
        let model = write_temp(&narrow);
        assert!(matches!(
            InferenceContext::load(model.path(), None),
            Err(ArtifactError::Invalid(_))
        ));
    }

    #[test]
    fn test_out_of_range_class_is_rejected() {
        let model = write_temp(&MODEL_JSON.replace("[0, 1, 2]", "[0, 1, 5]"));
        let ctx = InferenceContext::load(model.path(), None).unwrap();
        assert_eq!(
            ctx.predict(&vector(8, 750)),
            Err(InferenceError::UnknownClass(5))
        );
    }
}
