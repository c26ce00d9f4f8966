//! Directions via an OSRM-compatible routing endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use waterway_core::Coordinate;

use super::{ensure_success, DirectionsRoute, DirectionsService, ProviderError, TravelMode};

pub struct OsrmDirections {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: [lon, lat]
    coordinates: Vec<[f64; 2]>,
}

impl OsrmDirections {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate, mode: TravelMode) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&alternatives=true",
            self.base_url,
            profile(mode),
            origin.lon,
            origin.lat,
            destination.lon,
            destination.lat
        )
    }
}

fn profile(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Walking => "foot",
        TravelMode::Cycling => "bike",
        TravelMode::Driving => "car",
    }
}

fn convert_routes(payload: OsrmResponse) -> Result<Vec<DirectionsRoute>, ProviderError> {
    if payload.code != "Ok" {
        let detail = payload.message.unwrap_or_default();
        return Err(ProviderError::Decode(format!(
            "routing code {} {}",
            payload.code, detail
        )));
    }

    let routes: Vec<DirectionsRoute> = payload
        .routes
        .into_iter()
        .map(|route| DirectionsRoute {
            polyline: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate { lat, lon })
                .collect(),
            expected_duration_s: route.duration,
        })
        .collect();

    if routes.is_empty() {
        return Err(ProviderError::NoResult);
    }
    Ok(routes)
}

#[async_trait]
impl DirectionsService for OsrmDirections {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        let url = self.route_url(origin, destination, mode);
        tracing::debug!("Requesting directions: {}", url);

        let response = self.client.get(url).send().await?;
        ensure_success(&response)?;
        let payload: OsrmResponse = response.json().await?;
        convert_routes(payload)
    }
}
