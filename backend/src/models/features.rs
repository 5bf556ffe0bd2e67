//! Feature types consumed by the congestion classifier.
//!
//! The column order of [`FeatureVector`] is a contract with the trained model:
//! changing it silently invalidates every prediction until the model is
//! retrained.

use serde::{Deserialize, Serialize};

use super::location::{LocationSource, ResolvedLocation};

/// Number of columns the classifier expects.
pub const FEATURE_COUNT: usize = 9;

/// Column names in the order the model was trained with.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "hour",
    "day_of_week",
    "is_weekend",
    "month",
    "MINIMUM_SPEED",
    "MAXIMUM_SPEED",
    "NUMBER_OF_VEHICLES",
    "LATITUDE",
    "LONGITUDE",
];

/// Calendar and time-of-day features of a request timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFeatures {
    /// 0..=23
    pub hour: u32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    pub is_weekend: bool,
    /// 1..=12
    pub month: u32,
}

/// Rule-based stand-in for live sensor readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficParameters {
    /// km/h
    pub min_speed: u32,
    /// km/h
    pub max_speed: u32,
    pub num_vehicles: u32,
}

impl TrafficParameters {
    pub const fn new(min_speed: u32, max_speed: u32, num_vehicles: u32) -> Self {
        Self {
            min_speed,
            max_speed,
            num_vehicles,
        }
    }

    /// Midpoint of the speed range.
    pub fn avg_speed(&self) -> f64 {
        (self.min_speed as f64 + self.max_speed as f64) / 2.0
    }
}

/// Fixed-order numeric input for the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Assemble the vector in model column order.
    pub fn assemble(
        time: &TimeFeatures,
        traffic: &TrafficParameters,
        location: &ResolvedLocation,
    ) -> Self {
        Self([
            time.hour as f64,
            time.day_of_week as f64,
            if time.is_weekend { 1.0 } else { 0.0 },
            time.month as f64,
            traffic.min_speed as f64,
            traffic.max_speed as f64,
            traffic.num_vehicles as f64,
            location.latitude,
            location.longitude,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

/// Human-readable mirror of a [`FeatureVector`] plus resolution metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub hour: u32,
    pub day_of_week: u32,
    pub is_weekend: bool,
    pub month: u32,
    pub min_speed: u32,
    pub max_speed: u32,
    pub num_vehicles: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Speed and vehicle values were synthesized rather than measured.
    pub auto_generated: bool,
    pub location_source: LocationSource,
}

impl FeatureInfo {
    pub fn new(
        time: &TimeFeatures,
        traffic: &TrafficParameters,
        location: &ResolvedLocation,
    ) -> Self {
        Self {
            hour: time.hour,
            day_of_week: time.day_of_week,
            is_weekend: time.is_weekend,
            month: time.month,
            min_speed: traffic.min_speed,
            max_speed: traffic.max_speed,
            num_vehicles: traffic.num_vehicles,
            latitude: location.latitude,
            longitude: location.longitude,
            auto_generated: true,
            location_source: location.source,
        }
    }

    pub fn traffic_parameters(&self) -> TrafficParameters {
        TrafficParameters::new(self.min_speed, self.max_speed, self.num_vehicles)
    }
}
