//! Request → feature vector pipeline.

use tracing::debug;

use super::location_resolver::{LocationResolver, DEFAULT_ORIGIN};
use super::{time_features, traffic_parameters};
use crate::error::PredictionError;
use crate::models::{FeatureInfo, FeatureVector, PredictionRequest};

/// Derives the classifier input from a prediction request.
#[derive(Debug, Clone)]
pub struct FeatureVectorBuilder {
    resolver: LocationResolver,
}

impl FeatureVectorBuilder {
    pub fn new(resolver: LocationResolver) -> Self {
        Self { resolver }
    }

    /// Build the feature vector and its readable mirror.
    ///
    /// The timestamp is parsed first so malformed requests fail before any
    /// geocoding traffic is generated.
    pub async fn build(
        &self,
        request: &PredictionRequest,
    ) -> Result<(FeatureVector, FeatureInfo), PredictionError> {
        let time = time_features::extract(&request.datetime)?;
        let traffic = traffic_parameters::synthesize(time.hour, time.is_weekend);

        let origin = match request.origin.trim() {
            "" => DEFAULT_ORIGIN,
            origin => origin,
        };
        let location = self.resolver.resolve(origin).await;

        let vector = FeatureVector::assemble(&time, &traffic, &location);
        let info = FeatureInfo::new(&time, &traffic, &location);
        debug!(origin, features = ?vector.as_slice(), source = %location.source, "features built");

        Ok((vector, info))
    }
}
