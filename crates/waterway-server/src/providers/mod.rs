//! Contracts for the external map services the planner depends on.
//!
//! The classifier and planner only see these traits; the HTTP implementations
//! below talk to OSRM, Overpass and Nominatim compatible endpoints.

pub mod nominatim;
pub mod osrm;
pub mod overpass;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use waterway_core::{Coordinate, Placemark, PoiCategory};

use crate::config::Config;

pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmDirections;
pub use overpass::OverpassPlaceSearch;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected provider response: {0}")]
    Decode(String),
    #[error("provider returned no result")]
    NoResult,
}

/// Transport profile requested from the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walking,
    Cycling,
    Driving,
}

/// One candidate route returned by a directions service.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    pub polyline: Vec<Coordinate>,
    pub expected_duration_s: f64,
}

#[async_trait]
pub trait DirectionsService: Send + Sync {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<DirectionsRoute>, ProviderError>;
}

#[async_trait]
pub trait PlaceSearchService: Send + Sync {
    async fn search(
        &self,
        center: Coordinate,
        radius_m: f64,
        categories: &[PoiCategory],
    ) -> Result<Vec<Placemark>, ProviderError>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Placemark, ProviderError>;
}

/// Shared HTTP client for all providers.
pub fn http_client(config: &Config) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_s.max(1)))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

pub(crate) fn ensure_success(response: &reqwest::Response) -> Result<(), ProviderError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ProviderError::Status(response.status()))
    }
}
