//! Application state for the HTTP server.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::db::{FullRepository, LocalRepository};
use crate::inference::InferenceContext;
use crate::services::{
    FeatureVectorBuilder, Geocoder, HttpGeocoder, LocationResolver, PredictionService,
};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Feature pipeline plus the loaded model, if any
    pub prediction: Arc<PredictionService>,
    /// Search history and favorites storage
    pub repository: Arc<dyn FullRepository>,
}

impl AppState {
    pub fn new(prediction: PredictionService, repository: Arc<dyn FullRepository>) -> Self {
        Self {
            prediction: Arc::new(prediction),
            repository,
        }
    }

    /// Build the state from configuration with an in-memory repository.
    ///
    /// A model that fails to load is logged and left out: the server still
    /// answers every endpoint, and `/predict` reports the model as unavailable.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let inference = match InferenceContext::load(
            &config.model.model_path,
            config.model.scaler_path.as_deref(),
        ) {
            Ok(ctx) => Some(Arc::new(ctx)),
            Err(e) => {
                error!(error = %e, "model not loaded; predictions are disabled");
                None
            }
        };

        let geocoder: Option<Arc<dyn Geocoder>> = match &config.geocoding.api_key {
            Some(key) => match HttpGeocoder::new(
                config.geocoding.endpoint.clone(),
                key.clone(),
                config.geocoding.timeout(),
            ) {
                Ok(g) => {
                    info!(endpoint = %config.geocoding.endpoint, "network geocoding enabled");
                    Some(Arc::new(g))
                }
                Err(e) => {
                    warn!(error = %e, "geocoder unavailable; gazetteer only");
                    None
                }
            },
            None => {
                info!("no geocoding API key; gazetteer only");
                None
            }
        };

        let builder = FeatureVectorBuilder::new(LocationResolver::new(geocoder));
        Self::new(
            PredictionService::new(builder, inference),
            Arc::new(LocalRepository::new()),
        )
    }
}
