//! Storage for per-user search history and favorite routes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - validation, lookups       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - abstract interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod models;
pub mod repositories;
pub mod repository;
pub mod services;


pub use models::{Favorite, NewFavorite, NewSearch, SearchRecord, HISTORY_LIMIT};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, FavoritesRepository, FullRepository, HistoryRepository, RepositoryError,
    RepositoryResult,
};
