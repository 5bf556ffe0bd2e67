//! Geographic coordinates and their provenance.

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// Matched a district in the static gazetteer.
    Gazetteer,
    /// First result returned by the geocoding service.
    Geocoder,
    /// Fixed reference point used when nothing else worked.
    Fallback,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gazetteer => "gazetteer",
            Self::Geocoder => "geocoder",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving a free-text place description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub source: LocationSource,
}

impl ResolvedLocation {
    pub fn new(coordinates: Coordinates, source: LocationSource) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            source,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
