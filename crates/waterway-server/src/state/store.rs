//! Service wiring shared by all request handlers.

use std::sync::Arc;
use waterway_core::PlannerConfig;

use crate::classifier::{ClassifierConfig, WaterClassifier};
use crate::config::Config;
use crate::providers::{
    self, DirectionsService, NominatimGeocoder, OsrmDirections, OverpassPlaceSearch,
    PlaceSearchService, ProviderError, ReverseGeocoder,
};
use crate::route_planner::WaterRoutePlanner;

/// Application state - one classifier (and its caches) shared by every planning call.
pub struct AppState {
    classifier: Arc<WaterClassifier>,
    planner: WaterRoutePlanner,
}

impl AppState {
    /// Wire the HTTP providers described by `config`.
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let client = providers::http_client(&config)?;
        let directions = Arc::new(OsrmDirections::new(client.clone(), config.directions_url.clone()));
        let places = Arc::new(OverpassPlaceSearch::new(
            client.clone(),
            config.overpass_url.clone(),
            config.request_timeout_s,
        ));
        let geocoder = Arc::new(NominatimGeocoder::new(client, config.geocoder_url.clone()));
        Ok(Self::with_services(&config, directions, places, geocoder))
    }

    pub fn with_services(
        config: &Config,
        directions: Arc<dyn DirectionsService>,
        places: Arc<dyn PlaceSearchService>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let classifier_config = ClassifierConfig {
            poi_radius_m: config.poi_radius_m,
            geocode_max_per_window: config.geocode_max_per_minute,
            ..ClassifierConfig::default()
        };
        let classifier = Arc::new(WaterClassifier::new(places, geocoder, classifier_config));
        let planner = WaterRoutePlanner::new(classifier.clone(), directions, PlannerConfig::default());
        Self {
            classifier,
            planner,
        }
    }

    pub fn classifier(&self) -> &WaterClassifier {
        &self.classifier
    }

    pub fn planner(&self) -> &WaterRoutePlanner {
        &self.planner
    }
}
