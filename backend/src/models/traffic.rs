//! Congestion levels and the payloads built around them.

use serde::{Deserialize, Serialize};

use super::features::FeatureInfo;

/// Ordinal congestion class produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    pub const ALL: [TrafficLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn index(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Machine label used in narrations.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "az",
            Self::Medium => "orta",
            Self::High => "yogun",
        }
    }

    /// Display name used in the legend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "Az",
            Self::Medium => "Orta",
            Self::High => "Yoğun",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "yellow",
            Self::High => "red",
        }
    }

    /// Short legend description.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Low => "Trafik akışı normal",
            Self::Medium => "Trafik yavaşlaması var",
            Self::High => "Trafik çok yoğun",
        }
    }
}

impl TryFrom<usize> for TrafficLevel {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(other),
        }
    }
}

/// Human-readable description of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficNarration {
    pub level: String,
    pub color: String,
    pub description: String,
    pub avg_speed: f64,
    pub vehicle_count: u32,
    pub speed_range: String,
}

/// Outcome of a single prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub traffic_level: u8,
    pub traffic_info: TrafficNarration,
    pub input_features: FeatureInfo,
}
