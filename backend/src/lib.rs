//! # Traffic Forecast Backend
//!
//! Predicts the congestion level (low / medium / high) for a place and time
//! in Istanbul using a previously trained classifier, and exposes the
//! prediction over a REST API.
//!
//! ## Architecture
//!
//! - [`models`]: Request, feature and result types
//! - [`services`]: Feature pipeline (location resolution, time features,
//!   synthesized traffic parameters), prediction orchestration and narration
//! - [`inference`]: Model artifacts behind the `Classifier` / `Scaler` traits
//! - [`db`]: Search history and favorites behind repository traits
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Feature vector
//!
//! The classifier consumes nine columns in a fixed order:
//! `hour, day_of_week, is_weekend, month, MINIMUM_SPEED, MAXIMUM_SPEED,
//! NUMBER_OF_VEHICLES, LATITUDE, LONGITUDE`. Speed and vehicle values are
//! synthesized from the hour because no live sensor feed is available.

pub mod config;
pub mod db;
pub mod error;
pub mod inference;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::PredictionError;
