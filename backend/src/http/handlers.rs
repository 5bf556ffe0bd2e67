//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};
use chrono::Utc;

use super::dto::{
    FavoriteCreatedResponse, FavoritesResponse, HealthResponse, HistoryClearedResponse,
    HomeResponse, MessageResponse, ModelInfoResponse, NewFavorite, NewSearch, PredictRequestBody,
    PredictResponse, SearchCreatedResponse, SearchHistoryResponse, TrafficLevelInfo,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{PredictionRequest, TrafficLevel, FEATURE_COUNT, FEATURE_NAMES};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Header carrying the caller's id, set by the upstream auth layer.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller, taken from [`USER_ID_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| UserId(v.to_string()))
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", USER_ID_HEADER)))
    }
}

// =============================================================================
// Service status
// =============================================================================

/// GET /
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let endpoints = [
        ("/predict", "POST - Trafik tahmini yap"),
        ("/health", "GET - API sağlık kontrolü"),
        ("/model-info", "GET - Model bilgileri"),
        ("/search-history", "GET/POST/DELETE - Arama geçmişi"),
        ("/favorites", "GET/POST - Favori rotalar"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Json(HomeResponse {
        status: "active".to_string(),
        message: "İstanbul Trafik Tahmin API'si".to_string(),
        model_loaded: state.prediction.model_loaded(),
        endpoints,
    })
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_available = state.prediction.model_loaded();
    let repository = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: if model_available {
            "healthy"
        } else {
            "model_not_loaded"
        }
        .to_string(),
        model_available,
        repository,
        timestamp: Utc::now(),
    })
}

/// GET /model-info
///
/// Feature names and the level legend; served even without a model.
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let inference = state.prediction.inference();
    let traffic_levels = TrafficLevel::ALL
        .iter()
        .map(|level| {
            (
                level.index(),
                TrafficLevelInfo {
                    name: level.display_name().to_string(),
                    color: level.color().to_string(),
                    description: level.summary().to_string(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    Json(ModelInfoResponse {
        model_loaded: inference.is_some(),
        model_type: inference.map(|i| i.model_type().to_string()),
        scaler_loaded: inference.is_some_and(|i| i.has_scaler()),
        feature_count: FEATURE_COUNT,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        required_fields: vec!["origin".to_string(), "datetime".to_string()],
        traffic_levels,
    })
}

// =============================================================================
// Prediction
// =============================================================================

/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequestBody>, JsonRejection>,
) -> HandlerResult<PredictResponse> {
    let Json(body) = body?;
    let request = PredictionRequest::from_parts(body.origin, body.datetime, body.destination)?;
    let result = state.prediction.predict(&request).await?;

    Ok(Json(PredictResponse {
        result,
        timestamp: Utc::now(),
    }))
}

// =============================================================================
// Search history
// =============================================================================

/// GET /search-history
pub async fn list_search_history(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> HandlerResult<SearchHistoryResponse> {
    let search_history = db_services::list_history(state.repository.as_ref(), &user_id).await?;
    let total = search_history.len();
    Ok(Json(SearchHistoryResponse {
        search_history,
        total,
    }))
}

/// POST /search-history
pub async fn create_search(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    body: Result<Json<NewSearch>, JsonRejection>,
) -> Result<(StatusCode, Json<SearchCreatedResponse>), AppError> {
    let Json(search) = body?;
    let search = db_services::record_search(state.repository.as_ref(), &user_id, search).await?;
    Ok((
        StatusCode::CREATED,
        Json(SearchCreatedResponse {
            message: "Arama geçmişe kaydedildi".to_string(),
            search,
        }),
    ))
}

/// DELETE /search-history
pub async fn clear_search_history(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> HandlerResult<HistoryClearedResponse> {
    let removed = db_services::clear_history(state.repository.as_ref(), &user_id).await?;
    Ok(Json(HistoryClearedResponse {
        message: "Arama geçmişi temizlendi".to_string(),
        removed,
    }))
}

// =============================================================================
// Favorites
// =============================================================================

/// GET /favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> HandlerResult<FavoritesResponse> {
    let favorites = db_services::list_favorites(state.repository.as_ref(), &user_id).await?;
    let total = favorites.len();
    Ok(Json(FavoritesResponse { favorites, total }))
}

/// POST /favorites
pub async fn create_favorite(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    body: Result<Json<NewFavorite>, JsonRejection>,
) -> Result<(StatusCode, Json<FavoriteCreatedResponse>), AppError> {
    let Json(favorite) = body?;
    let favorite =
        db_services::add_favorite(state.repository.as_ref(), &user_id, favorite).await?;
    Ok((
        StatusCode::CREATED,
        Json(FavoriteCreatedResponse {
            message: "Favorilere eklendi".to_string(),
            favorite,
        }),
    ))
}

/// DELETE /favorites/{favorite_id}
pub async fn delete_favorite(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(favorite_id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    db_services::remove_favorite(state.repository.as_ref(), &user_id, favorite_id).await?;
    Ok(Json(MessageResponse {
        message: "Favori silindi".to_string(),
    }))
}
