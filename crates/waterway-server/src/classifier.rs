//! Water/land classification with caching and a throttled geocoder fallback.
//!
//! Resolution order: classification cache, then the marina/beach POI cache or a
//! fresh POI search, then (only when allowed) a rate-limited reverse geocode.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use waterway_core::{
    destination, placemark_on_water, poi_indicates_water, quantize, CacheKey, Coordinate,
    PoiCategory, SlidingWindow,
};

use crate::providers::{PlaceSearchService, ReverseGeocoder};

const RING_BEARINGS: usize = 12;
const RING_BEARING_STEP_DEG: f64 = 30.0;
const WATER_POI_CATEGORIES: [PoiCategory; 2] = [PoiCategory::Marina, PoiCategory::Beach];

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Quantization step for cache keys, in degrees.
    pub cache_precision_deg: f64,
    pub poi_radius_m: f64,
    pub geocode_max_per_window: usize,
    pub geocode_window: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            cache_precision_deg: 0.001,
            poi_radius_m: 400.0,
            geocode_max_per_window: 45,
            geocode_window: Duration::from_secs(60),
        }
    }
}

/// Counters of cache hits and external calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ClassifierStats {
    pub cache_hits: u64,
    pub poi_searches: u64,
    pub reverse_geocodes: u64,
}

pub struct WaterClassifier {
    places: Arc<dyn PlaceSearchService>,
    geocoder: Arc<dyn ReverseGeocoder>,
    config: ClassifierConfig,
    water_cache: DashMap<CacheKey, bool>,
    poi_cache: DashMap<CacheKey, bool>,
    geocode_window: Mutex<SlidingWindow>,
    cache_hits: AtomicU64,
    poi_searches: AtomicU64,
    reverse_geocodes: AtomicU64,
}

impl WaterClassifier {
    pub fn new(
        places: Arc<dyn PlaceSearchService>,
        geocoder: Arc<dyn ReverseGeocoder>,
        config: ClassifierConfig,
    ) -> Self {
        let window = SlidingWindow::new(config.geocode_max_per_window, config.geocode_window);
        Self {
            places,
            geocoder,
            config,
            water_cache: DashMap::new(),
            poi_cache: DashMap::new(),
            geocode_window: Mutex::new(window),
            cache_hits: AtomicU64::new(0),
            poi_searches: AtomicU64::new(0),
            reverse_geocodes: AtomicU64::new(0),
        }
    }

    pub fn cache_key(&self, coordinate: Coordinate) -> CacheKey {
        quantize(coordinate, self.config.cache_precision_deg)
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            poi_searches: self.poi_searches.load(Ordering::Relaxed),
            reverse_geocodes: self.reverse_geocodes.load(Ordering::Relaxed),
        }
    }

    /// Decide whether `coordinate` lies on water.
    ///
    /// A cached answer is trusted even when it is negative and `allow_geocode` is set.
    /// Provider failures classify as not-water.
    pub async fn is_water(&self, coordinate: Coordinate, allow_geocode: bool) -> bool {
        let key = self.cache_key(coordinate);

        if let Some(cached) = self.water_cache.get(&key).map(|entry| *entry) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return cached;
        }

        let near_water_poi = match self.poi_cache.get(&key).map(|entry| *entry) {
            Some(cached) => {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                cached
            }
            None => self.search_water_poi(coordinate, key).await,
        };

        if near_water_poi {
            self.water_cache.insert(key, true);
            return true;
        }
        if !allow_geocode {
            return false;
        }

        self.throttle_reverse_geocode().await;
        self.reverse_geocodes.fetch_add(1, Ordering::Relaxed);
        let on_water = match self.geocoder.reverse_geocode(coordinate).await {
            Ok(placemark) => placemark_on_water(&placemark),
            Err(err) => {
                tracing::warn!(
                    "Reverse geocode failed at {:.5},{:.5}: {}",
                    coordinate.lat,
                    coordinate.lon,
                    err
                );
                false
            }
        };

        self.water_cache.insert(key, on_water);
        on_water
    }

    /// Ring search for the closest water coordinate around `from`.
    ///
    /// Probes 12 bearings per ring, rings spaced `step_m` apart out to `max_distance_m`.
    /// The geocoder may only be used on the innermost ring.
    pub async fn nearest_water(
        &self,
        from: Coordinate,
        max_distance_m: f64,
        step_m: f64,
        allow_geocode: bool,
    ) -> Option<Coordinate> {
        if step_m <= 0.0 || !step_m.is_finite() || !max_distance_m.is_finite() {
            return None;
        }
        let rings = (max_distance_m / step_m + 1e-9).floor() as usize;

        for ring in 1..=rings {
            let radius = step_m * ring as f64;
            let allow_for_ring = allow_geocode && ring == 1;
            for index in 0..RING_BEARINGS {
                let bearing = index as f64 * RING_BEARING_STEP_DEG;
                let candidate = destination(from, radius, bearing);
                if self.is_water(candidate, allow_for_ring).await {
                    tracing::debug!(
                        "Snapped {:.5},{:.5} to water at {:.0}m bearing {:.0}",
                        from.lat,
                        from.lon,
                        radius,
                        bearing
                    );
                    return Some(candidate);
                }
            }
        }

        None
    }

    async fn search_water_poi(&self, coordinate: Coordinate, key: CacheKey) -> bool {
        self.poi_searches.fetch_add(1, Ordering::Relaxed);
        match self
            .places
            .search(coordinate, self.config.poi_radius_m, &WATER_POI_CATEGORIES)
            .await
        {
            Ok(placemarks) => {
                let found = placemarks.iter().any(poi_indicates_water);
                self.poi_cache.insert(key, found);
                found
            }
            Err(err) => {
                // Not cached, so the next lookup retries.
                tracing::warn!(
                    "POI search failed at {:.5},{:.5}: {}",
                    coordinate.lat,
                    coordinate.lon,
                    err
                );
                false
            }
        }
    }

    /// Block until another reverse geocode may start, then record it.
    ///
    /// The window lock is held while sleeping so concurrent callers queue
    /// behind each other instead of racing past the cap.
    async fn throttle_reverse_geocode(&self) {
        let mut window = self.geocode_window.lock().await;
        if let Some(wait) = window.wait_time(Instant::now().into_std()) {
            tracing::debug!(
                "Reverse geocode limit of {} per {:?} reached, waiting {:?}",
                window.max_calls(),
                window.window(),
                wait
            );
            tokio::time::sleep(wait).await;
            window.prune(Instant::now().into_std());
        }
        window.record(Instant::now().into_std());
    }
}
