//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, compression, tracing).

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The browser client is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        .route("/model-info", get(handlers::model_info))
        .route("/predict", post(handlers::predict))
        .route(
            "/search-history",
            get(handlers::list_search_history)
                .post(handlers::create_search)
                .delete(handlers::clear_search_history),
        )
        .route(
            "/favorites",
            get(handlers::list_favorites).post(handlers::create_favorite),
        )
        .route("/favorites/{favorite_id}", delete(handlers::delete_favorite))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::db::{FullRepository, LocalRepository};
    use crate::services::{FeatureVectorBuilder, LocationResolver, PredictionService};

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let prediction =
            PredictionService::new(FeatureVectorBuilder::new(LocationResolver::offline()), None);
        let _router = create_router(AppState::new(prediction, repo));
    }
}
