//! Data Transfer Objects for the HTTP API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::db::models::{Favorite, NewFavorite, NewSearch, SearchRecord};
pub use crate::models::{FeatureInfo, PredictionResult, TrafficNarration};

/// Body of `POST /predict`.
///
/// Fields are optional here so a missing one can be reported by name instead
/// of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequestBody {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

/// Successful prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub result: PredictionResult,
    pub timestamp: DateTime<Utc>,
}

/// Service banner returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub status: String,
    pub message: String,
    pub model_loaded: bool,
    pub endpoints: BTreeMap<String, String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `model_not_loaded`
    pub status: String,
    pub model_available: bool,
    /// Repository connection status
    pub repository: String,
    pub timestamp: DateTime<Utc>,
}

/// Legend entry for one traffic level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLevelInfo {
    pub name: String,
    pub color: String,
    pub description: String,
}

/// Response of `GET /model-info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model_loaded: bool,
    pub model_type: Option<String>,
    pub scaler_loaded: bool,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    pub required_fields: Vec<String>,
    pub traffic_levels: BTreeMap<u8, TrafficLevelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryResponse {
    pub search_history: Vec<SearchRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCreatedResponse {
    pub message: String,
    pub search: SearchRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryClearedResponse {
    pub message: String,
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteCreatedResponse {
    pub message: String,
    pub favorite: Favorite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
