//! Service layer: the feature pipeline and prediction orchestration.
//!
//! Leaves first: [`time_features`], [`traffic_parameters`] and
//! [`location_resolver`] feed [`feature_builder`]; [`prediction`] runs the
//! built vector through the model and hands the result to [`narrator`].

pub mod feature_builder;
pub mod geocoding;
pub mod location_resolver;
pub mod narrator;
pub mod prediction;
pub mod time_features;
pub mod traffic_parameters;

pub use feature_builder::FeatureVectorBuilder;
pub use geocoding::{Geocoder, GeocodingError, HttpGeocoder};
pub use location_resolver::{LocationResolver, DEFAULT_ORIGIN, FALLBACK_COORDINATES};
pub use prediction::PredictionService;
