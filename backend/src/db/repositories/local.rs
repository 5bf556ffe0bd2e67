//! In-memory local repository implementation.
//!
//! All data lives in process memory behind a single lock, so it is lost on
//! restart. Ids are assigned from per-table counters starting at 1. Each
//! user keeps at most [`HISTORY_LIMIT`] searches; older ones are dropped on insert.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::models::{Favorite, FavoriteDraft, NewSearch, SearchRecord, HISTORY_LIMIT};
use crate::db::repository::*;

#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    searches: Vec<SearchRecord>,
    favorites: Vec<Favorite>,
    next_search_id: i64,
    next_favorite_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            searches: Vec::new(),
            favorites: Vec::new(),
            next_search_id: 1,
            next_favorite_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Simulate losing the backing store.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn search_count(&self) -> usize {
        self.data.read().searches.len()
    }

    pub fn favorite_count(&self) -> usize {
        self.data.read().favorites.len()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection("local store unavailable").with_operation(operation))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn add_search(&self, user_id: &str, search: NewSearch) -> RepositoryResult<SearchRecord> {
        self.ensure_healthy("add_search")?;
        let mut data = self.data.write();
        let id = data.next_search_id;
        data.next_search_id += 1;

        let record = SearchRecord {
            id,
            user_id: user_id.to_string(),
            origin: search.origin,
            destination: search.destination,
            datetime: search.datetime,
            prediction_result: search.prediction_result,
            created_at: Utc::now(),
        };
        data.searches.push(record.clone());

        let owned = data.searches.iter().filter(|s| s.user_id == user_id).count();
        if owned > HISTORY_LIMIT {
            let mut excess = owned - HISTORY_LIMIT;
            data.searches.retain(|s| {
                if excess > 0 && s.user_id == user_id {
                    excess -= 1;
                    false
                } else {
                    true
                }
            });
        }
        Ok(record)
    }

    async fn list_searches(
        &self,
        user_id: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<SearchRecord>> {
        self.ensure_healthy("list_searches")?;
        // Insertion order is creation order; ids break same-instant ties.
        Ok(self
            .data
            .read()
            .searches
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_search(&self, user_id: &str, search_id: i64) -> RepositoryResult<SearchRecord> {
        self.ensure_healthy("get_search")?;
        self.data
            .read()
            .searches
            .iter()
            .find(|s| s.id == search_id && s.user_id == user_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Search {} not found", search_id),
                    ErrorContext::new("get_search")
                        .with_entity("search")
                        .with_entity_id(search_id),
                )
            })
    }

    async fn clear_searches(&self, user_id: &str) -> RepositoryResult<usize> {
        self.ensure_healthy("clear_searches")?;
        let mut data = self.data.write();
        let before = data.searches.len();
        data.searches.retain(|s| s.user_id != user_id);
        Ok(before - data.searches.len())
    }
}

#[async_trait]
impl FavoritesRepository for LocalRepository {
    async fn add_favorite(
        &self,
        user_id: &str,
        draft: FavoriteDraft,
    ) -> RepositoryResult<Favorite> {
        self.ensure_healthy("add_favorite")?;
        let mut data = self.data.write();
        let id = data.next_favorite_id;
        data.next_favorite_id += 1;

        let favorite = Favorite {
            id,
            user_id: user_id.to_string(),
            search_id: draft.search_id,
            route_name: draft.route_name,
            origin: draft.origin,
            destination: draft.destination,
            search_datetime: draft.search_datetime,
            created_at: Utc::now(),
        };
        data.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn list_favorites(&self, user_id: &str) -> RepositoryResult<Vec<Favorite>> {
        self.ensure_healthy("list_favorites")?;
        Ok(self
            .data
            .read()
            .favorites
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove_favorite(&self, user_id: &str, favorite_id: i64) -> RepositoryResult<()> {
        self.ensure_healthy("remove_favorite")?;
        let mut data = self.data.write();
        let position = data
            .favorites
            .iter()
            .position(|f| f.id == favorite_id && f.user_id == user_id)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Favorite {} not found", favorite_id),
                    ErrorContext::new("remove_favorite")
                        .with_entity("favorite")
                        .with_entity_id(favorite_id),
                )
            })?;
        data.favorites.remove(position);
        Ok(())
    }
}
