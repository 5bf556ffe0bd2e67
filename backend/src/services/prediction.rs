//! End-to-end prediction: features, inference, narration.

use std::sync::Arc;

use tracing::{error, info};

use super::feature_builder::FeatureVectorBuilder;
use super::narrator;
use crate::error::PredictionError;
use crate::inference::InferenceContext;
use crate::models::{PredictionRequest, PredictionResult};

/// Runs the full request → narrated prediction chain.
#[derive(Debug, Clone)]
pub struct PredictionService {
    builder: FeatureVectorBuilder,
    inference: Option<Arc<InferenceContext>>,
}

impl PredictionService {
    pub fn new(builder: FeatureVectorBuilder, inference: Option<Arc<InferenceContext>>) -> Self {
        Self { builder, inference }
    }

    pub fn inference(&self) -> Option<&InferenceContext> {
        self.inference.as_deref()
    }

    pub fn model_loaded(&self) -> bool {
        self.inference.is_some()
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        let inference = self
            .inference
            .as_ref()
            .ok_or(PredictionError::ModelUnavailable)?;

        let (vector, features) = self.builder.build(request).await?;

        let level = inference.predict(&vector).map_err(|e| {
            error!(error = %e, features = ?vector.as_slice(), "classifier invocation failed");
            PredictionError::from(e)
        })?;

        let narration = narrator::narrate(level, &features);
        info!(
            origin = %request.origin,
            datetime = %request.datetime,
            traffic_level = level.index(),
            "prediction served"
        );

        Ok(PredictionResult {
            traffic_level: level.index(),
            traffic_info: narration,
            input_features: features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{Classifier, InferenceError};
    use crate::services::location_resolver::LocationResolver;

    struct ConstantClassifier(usize);

    impl Classifier for ConstantClassifier {
        fn predict(&self, features: &[f64]) -> Result<usize, InferenceError> {
            assert_eq!(features.len(), 9);
            Ok(self.0)
        }

        fn n_features(&self) -> usize {
            9
        }

        fn model_type(&self) -> &str {
            "Constant"
        }
    }

    fn service(class: Option<usize>) -> PredictionService {
        let inference = class.map(|c| {
            Arc::new(InferenceContext::new(Box::new(ConstantClassifier(c))).unwrap())
        });
        PredictionService::new(FeatureVectorBuilder::new(LocationResolver::offline()), inference)
    }

    #[tokio::test]
    async fn test_predict_narrates_level() {
        let request = PredictionRequest::new("Beşiktaş", "2024-11-18T08:30:00");
        let result = service(Some(2)).predict(&request).await.unwrap();

        assert_eq!(result.traffic_level, 2);
        assert_eq!(result.traffic_info.level, "yogun");
        assert!(result.traffic_info.description.starts_with("Sabah"));
        assert_eq!(result.input_features.latitude, 41.0422);
    }

    #[tokio::test]
    async fn test_model_unavailable() {
        let request = PredictionRequest::new("Beşiktaş", "2024-11-18T08:30:00");
        let err = service(None).predict(&request).await.unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable));
    }

    #[tokio::test]
    async fn test_unknown_class_is_invocation_error() {
        let request = PredictionRequest::new("Fatih", "2024-11-18T14:00:00");
        let err = service(Some(7)).predict(&request).await.unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ClassifierInvocation(InferenceError::UnknownClass(7))
        ));
    }

    #[tokio::test]
    async fn test_bad_timestamp_with_model() {
        let request = PredictionRequest::new("Fatih", "31/12/2024");
        let err = service(Some(0)).predict(&request).await.unwrap_err();
        assert!(err.is_client_error());
    }
}
