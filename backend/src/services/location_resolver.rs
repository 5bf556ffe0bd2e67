//! Free-text place resolution.
//!
//! Lookup order: the static gazetteer of Istanbul districts, then a single
//! geocoding request, then a fixed fallback point. Resolution never fails.

use std::sync::Arc;

use tracing::{debug, warn};

use super::geocoding::Geocoder;
use crate::models::{Coordinates, LocationSource, ResolvedLocation};

/// Reference point used when an address cannot be resolved (Kadıköy).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates::new(40.9917, 29.0270);

/// Origin assumed when a request leaves it blank.
pub const DEFAULT_ORIGIN: &str = "Kadıköy, İstanbul";

/// A known district name (lower-case) and its coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazetteerEntry {
    pub name: &'static str,
    pub coordinates: Coordinates,
}

const fn entry(name: &'static str, latitude: f64, longitude: f64) -> GazetteerEntry {
    GazetteerEntry {
        name,
        coordinates: Coordinates::new(latitude, longitude),
    }
}

/// Istanbul districts in match order. Names must already be lower-case.
///
/// The first name that is a substring of the address wins, so a name that
/// contains another must be listed before it.
pub static ISTANBUL_GAZETTEER: &[GazetteerEntry] = &[
    entry("kadıköy", 40.9917, 29.0270),
    entry("beşiktaş", 41.0422, 29.0061),
    entry("şişli", 41.0602, 28.9877),
    entry("üsküdar", 41.0226, 29.0150),
    entry("fatih", 41.0186, 28.9397),
    entry("beyoğlu", 41.0370, 28.9770),
    entry("taksim", 41.0369, 28.9850),
    entry("mecidiyeköy", 41.0670, 28.9950),
    entry("levent", 41.0820, 29.0100),
    entry("bakırköy", 40.9819, 28.8772),
    entry("zeytinburnu", 40.9940, 28.9040),
    entry("ataşehir", 40.9923, 29.1244),
    entry("maltepe", 40.9357, 29.1310),
    entry("kartal", 40.8880, 29.1856),
    entry("pendik", 40.8770, 29.2330),
    entry("sarıyer", 41.1664, 29.0500),
    entry("beykoz", 41.1340, 29.0920),
    entry("eyüpsultan", 41.0480, 28.9340),
    entry("eyüp", 41.0480, 28.9340),
    entry("kağıthane", 41.0790, 28.9720),
    entry("bağcılar", 41.0340, 28.8570),
    entry("bahçelievler", 41.0010, 28.8620),
    entry("küçükçekmece", 41.0000, 28.7800),
    entry("esenyurt", 41.0340, 28.6780),
];

/// Resolves addresses to coordinates.
#[derive(Clone)]
pub struct LocationResolver {
    gazetteer: &'static [GazetteerEntry],
    geocoder: Option<Arc<dyn Geocoder>>,
    fallback: Coordinates,
}

impl LocationResolver {
    /// Resolver over the Istanbul gazetteer with an optional network geocoder.
    pub fn new(geocoder: Option<Arc<dyn Geocoder>>) -> Self {
        Self {
            gazetteer: ISTANBUL_GAZETTEER,
            geocoder,
            fallback: FALLBACK_COORDINATES,
        }
    }

    /// Resolver that never leaves the process.
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// First gazetteer entry whose name occurs in the address.
    pub fn lookup_gazetteer(&self, address: &str) -> Option<&GazetteerEntry> {
        let lowered = address.to_lowercase();
        self.gazetteer.iter().find(|e| lowered.contains(e.name))
    }

    /// Resolve an address. Geocoding failures degrade to the fallback point.
    pub async fn resolve(&self, address: &str) -> ResolvedLocation {
        if let Some(entry) = self.lookup_gazetteer(address) {
            debug!(address, district = entry.name, "resolved from gazetteer");
            return ResolvedLocation::new(entry.coordinates, LocationSource::Gazetteer);
        }

        let Some(geocoder) = &self.geocoder else {
            warn!(address, "no geocoder configured; using fallback coordinate");
            return ResolvedLocation::new(self.fallback, LocationSource::Fallback);
        };

        match geocoder.geocode(address).await {
            Ok(coordinates) => {
                debug!(address, ?coordinates, "resolved by geocoder");
                ResolvedLocation::new(coordinates, LocationSource::Geocoder)
            }
            Err(e) => {
                warn!(address, error = %e, "geocoding unavailable; using fallback coordinate");
                ResolvedLocation::new(self.fallback, LocationSource::Fallback)
            }
        }
    }
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("gazetteer_entries", &self.gazetteer.len())
            .field("geocoder", &self.geocoder.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::geocoding::GeocodingError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGeocoder {
        calls: AtomicUsize,
        answer: Option<Coordinates>,
    }

    impl CountingGeocoder {
        fn new(answer: Option<Coordinates>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                answer,
            })
        }
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .ok_or_else(|| GeocodingError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_gazetteer_wins_without_network() {
        let geocoder = CountingGeocoder::new(Some(Coordinates::new(0.0, 0.0)));
        let resolver = LocationResolver::new(Some(geocoder.clone()));

        let loc = resolver.resolve("Kadıköy, İstanbul").await;
        assert_eq!(loc.coordinates(), Coordinates::new(40.9917, 29.0270));
        assert_eq!(loc.source, LocationSource::Gazetteer);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gazetteer_lowercases_input() {
        let resolver = LocationResolver::offline();
        let loc = resolver.resolve("BEŞİKTAŞ iskele").await;
        // 'İ' lower-cases to "i̇", so only the ASCII-cased spelling matches.
        assert_eq!(loc.source, LocationSource::Fallback);

        let loc = resolver.resolve("Beşiktaş Meydanı").await;
        assert_eq!(loc.coordinates(), Coordinates::new(41.0422, 29.0061));
        assert_eq!(loc.source, LocationSource::Gazetteer);
    }

    #[test]
    fn test_first_declared_match_wins() {
        let resolver = LocationResolver::offline();
        // Both "kadıköy" and "üsküdar" occur; kadıköy is declared first.
        let entry = resolver.lookup_gazetteer("Üsküdar'dan Kadıköy'e").unwrap();
        assert_eq!(entry.name, "kadıköy");

        let entry = resolver.lookup_gazetteer("Eyüpsultan Camii").unwrap();
        assert_eq!(entry.name, "eyüpsultan");
    }

    #[tokio::test]
    async fn test_geocoder_used_for_unknown_address() {
        let geocoder = CountingGeocoder::new(Some(Coordinates::new(41.2, 28.7)));
        let resolver = LocationResolver::new(Some(geocoder.clone()));

        let loc = resolver.resolve("İstanbul Havalimanı").await;
        assert_eq!(loc.coordinates(), Coordinates::new(41.2, 28.7));
        assert_eq!(loc.source, LocationSource::Geocoder);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_geocoder_failure_falls_back_once() {
        let geocoder = CountingGeocoder::new(None);
        let resolver = LocationResolver::new(Some(geocoder.clone()));

        let loc = resolver.resolve("Unknown Street 42").await;
        assert_eq!(loc.coordinates(), FALLBACK_COORDINATES);
        assert_eq!(loc.source, LocationSource::Fallback);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_gazetteer_names_are_lowercase() {
        for entry in ISTANBUL_GAZETTEER {
            assert_eq!(entry.name, entry.name.to_lowercase(), "{}", entry.name);
        }
    }
}
