//! Server configuration from environment.

use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub directions_url: String,
    pub overpass_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub request_timeout_s: u64,
    /// Reverse-geocode calls allowed per rolling minute.
    pub geocode_max_per_minute: usize,
    pub poi_radius_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            directions_url: "https://router.project-osrm.org".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("waterway-server/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_s: 10,
            geocode_max_per_minute: 45,
            poi_radius_m: 400.0,
        }
    }
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn string_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed_or("WATERWAY_PORT", defaults.server_port),
            directions_url: string_or("WATERWAY_DIRECTIONS_URL", defaults.directions_url),
            overpass_url: string_or("WATERWAY_OVERPASS_URL", defaults.overpass_url),
            geocoder_url: string_or("WATERWAY_GEOCODER_URL", defaults.geocoder_url),
            user_agent: string_or("WATERWAY_USER_AGENT", defaults.user_agent),
            request_timeout_s: parsed_or("WATERWAY_REQUEST_TIMEOUT_S", defaults.request_timeout_s),
            geocode_max_per_minute: parsed_or(
                "WATERWAY_GEOCODE_MAX_PER_MINUTE",
                defaults.geocode_max_per_minute,
            )
            .max(1),
            poi_radius_m: parsed_or("WATERWAY_POI_RADIUS_M", defaults.poi_radius_m),
        }
    }
}
