//! High-level history and favorites operations.
//!
//! Input validation and cross-record lookups live here so every repository
//! implementation only has to store and fetch.

use tracing::info;

use super::models::{
    Favorite, FavoriteDraft, NewFavorite, NewSearch, SearchRecord, HISTORY_LIMIT,
};
use super::repository::{
    ErrorContext, FavoritesRepository, HistoryRepository, RepositoryError, RepositoryResult,
};
use crate::services::time_features;

/// Check that the repository is reachable.
pub async fn health_check<R: HistoryRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Record a search after validating its fields.
pub async fn record_search<R: HistoryRepository + ?Sized>(
    repo: &R,
    user_id: &str,
    mut search: NewSearch,
) -> RepositoryResult<SearchRecord> {
    let context = || ErrorContext::new("record_search").with_entity("search");

    search.origin = search.origin.trim().to_string();
    if search.origin.is_empty() {
        return Err(RepositoryError::validation_with_context(
            "origin must not be empty",
            context(),
        ));
    }
    if time_features::parse_timestamp(&search.datetime).is_err() {
        return Err(RepositoryError::validation_with_context(
            format!("invalid datetime '{}'", search.datetime),
            context(),
        ));
    }
    search.destination = search
        .destination
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let record = repo.add_search(user_id, search).await?;
    info!(user_id, search_id = record.id, "search recorded");
    Ok(record)
}

/// The user's most recent searches, newest first.
pub async fn list_history<R: HistoryRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<Vec<SearchRecord>> {
    repo.list_searches(user_id, HISTORY_LIMIT).await
}

pub async fn clear_history<R: HistoryRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<usize> {
    let removed = repo.clear_searches(user_id).await?;
    info!(user_id, removed, "search history cleared");
    Ok(removed)
}

/// Save a favorite route.
///
/// With a `search_id` the route is copied from that search; otherwise an
/// explicit `origin` is required. The name defaults to `"origin - destination"`.
pub async fn add_favorite<R>(
    repo: &R,
    user_id: &str,
    favorite: NewFavorite,
) -> RepositoryResult<Favorite>
where
    R: HistoryRepository + FavoritesRepository + ?Sized,
{
    let (origin, destination, search_datetime) = match favorite.search_id {
        Some(search_id) => {
            let search = repo
                .get_search(user_id, search_id)
                .await
                .map_err(|e| e.with_operation("add_favorite"))?;
            (search.origin, search.destination, Some(search.datetime))
        }
        None => {
            let origin = favorite
                .origin
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .ok_or_else(|| {
                    RepositoryError::validation_with_context(
                        "either search_id or origin is required",
                        ErrorContext::new("add_favorite").with_entity("favorite"),
                    )
                })?;
            let destination = favorite
                .destination
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            (origin, destination, None)
        }
    };

    let route_name = favorite
        .route_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| default_route_name(&origin, destination.as_deref()));

    let draft = FavoriteDraft {
        search_id: favorite.search_id,
        route_name,
        origin,
        destination,
        search_datetime,
    };
    let saved = repo.add_favorite(user_id, draft).await?;
    info!(user_id, favorite_id = saved.id, "favorite added");
    Ok(saved)
}

pub async fn list_favorites<R: FavoritesRepository + ?Sized>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<Vec<Favorite>> {
    repo.list_favorites(user_id).await
}

pub async fn remove_favorite<R: FavoritesRepository + ?Sized>(
    repo: &R,
    user_id: &str,
    favorite_id: i64,
) -> RepositoryResult<()> {
    repo.remove_favorite(user_id, favorite_id).await?;
    info!(user_id, favorite_id, "favorite removed");
    Ok(())
}

fn default_route_name(origin: &str, destination: Option<&str>) -> String {
    match destination {
        Some(destination) => format!("{} - {}", origin, destination),
        None => origin.to_string(),
    }
}
