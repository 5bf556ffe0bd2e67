//! Repository implementations.
//!
//! - `local`: In-memory implementation for tests and single-process deployments
pub mod local;

pub use local::LocalRepository;
