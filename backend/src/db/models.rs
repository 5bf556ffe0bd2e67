//! Records stored for search history and favorites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of history entries returned per user.
pub const HISTORY_LIMIT: usize = 50;

/// A past prediction search made by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: i64,
    pub user_id: String,
    pub origin: String,
    pub destination: Option<String>,
    pub datetime: String,
    /// Prediction payload as returned to the client at search time.
    pub prediction_result: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSearch {
    pub origin: String,
    #[serde(default)]
    pub destination: Option<String>,
    pub datetime: String,
    #[serde(default)]
    pub prediction_result: Option<serde_json::Value>,
}

/// A saved route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub search_id: Option<i64>,
    pub route_name: String,
    pub origin: String,
    pub destination: Option<String>,
    pub search_datetime: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Client input for saving a favorite, either from a past search or directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFavorite {
    #[serde(default)]
    pub search_id: Option<i64>,
    #[serde(default)]
    pub route_name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

/// Fully resolved favorite handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteDraft {
    pub search_id: Option<i64>,
    pub route_name: String,
    pub origin: String,
    pub destination: Option<String>,
    pub search_datetime: Option<String>,
}
