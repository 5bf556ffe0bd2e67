//! Repository trait definitions for per-user search history and favorites.
//!
//! - [`error`]: Error types for repository operations
//! - [`HistoryRepository`]: append/list/clear of past searches
//! - [`FavoritesRepository`]: saved routes
//!
//! Every operation is scoped by an opaque user id; a record owned by another
//! user is indistinguishable from a missing one.

use async_trait::async_trait;

use super::models::{Favorite, FavoriteDraft, NewSearch, SearchRecord};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Append a search to the user's history.
    async fn add_search(&self, user_id: &str, search: NewSearch) -> RepositoryResult<SearchRecord>;

    /// Newest first, at most `limit` entries.
    async fn list_searches(&self, user_id: &str, limit: usize)
        -> RepositoryResult<Vec<SearchRecord>>;

    async fn get_search(&self, user_id: &str, search_id: i64) -> RepositoryResult<SearchRecord>;

    /// Remove all of the user's searches, returning how many were removed.
    async fn clear_searches(&self, user_id: &str) -> RepositoryResult<usize>;
}

#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    async fn add_favorite(&self, user_id: &str, draft: FavoriteDraft)
        -> RepositoryResult<Favorite>;

    /// Newest first.
    async fn list_favorites(&self, user_id: &str) -> RepositoryResult<Vec<Favorite>>;

    async fn remove_favorite(&self, user_id: &str, favorite_id: i64) -> RepositoryResult<()>;
}

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: HistoryRepository + FavoritesRepository {}

impl<T> FullRepository for T where T: HistoryRepository + FavoritesRepository {}
