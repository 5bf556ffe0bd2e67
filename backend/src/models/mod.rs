//! Domain types shared by the feature pipeline, inference and HTTP layers.

pub mod features;
pub mod location;
pub mod request;
pub mod traffic;

pub use features::{
    FeatureInfo, FeatureVector, TimeFeatures, TrafficParameters, FEATURE_COUNT, FEATURE_NAMES,
};
pub use location::{Coordinates, LocationSource, ResolvedLocation};
pub use request::PredictionRequest;
pub use traffic::{PredictionResult, TrafficLevel, TrafficNarration};
