//! HTTP client for the waterway planning server.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use waterway_core::{Coordinate, Trip, VesselType};

/// Client for a running waterway server.
pub struct PlannerClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PointRequest {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct WaterCheck {
    pub lat: f64,
    pub lon: f64,
    pub on_water: bool,
}

#[derive(Debug, Serialize)]
struct RoutePlanRequest {
    start: Coordinate,
    end: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct PlannedRoute {
    pub route: Vec<Coordinate>,
    /// `directions`, `synthetic` or `direct`.
    pub source: String,
    pub points: usize,
    pub distance_m: f64,
}

#[derive(Debug, Serialize)]
struct TripRequest {
    start: Coordinate,
    end: Coordinate,
    vessel_type: VesselType,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<DateTime<Utc>>,
}

impl PlannerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the server whether a point is on water. May spend reverse-geocode budget.
    pub async fn check_water(&self, point: Coordinate) -> Result<WaterCheck> {
        let url = format!("{}/v1/water/check", self.base_url);
        let request = PointRequest {
            lat: point.lat,
            lon: point.lon,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    pub async fn plan_route(&self, start: Coordinate, end: Coordinate) -> Result<PlannedRoute> {
        let url = format!("{}/v1/routes/plan", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RoutePlanRequest { start, end })
            .send()
            .await?;
        Ok(checked(response).await?.json().await?)
    }

    /// Create a trip. Fails when either endpoint is not on water.
    pub async fn create_trip(
        &self,
        start: Coordinate,
        end: Coordinate,
        vessel_type: VesselType,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<Trip> {
        let url = format!("{}/v1/trips", self.base_url);
        let request = TripRequest {
            start,
            end,
            vessel_type,
            start_time,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        Ok(checked(response).await?.json().await?)
    }
}

/// Turn a non-success response into an error carrying the server's message.
async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{}: {}", status, error_message(&body))
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match (value["error"].as_str(), value["field"].as_str()) {
            (Some(error), Some(field)) => format!("{} ({})", error, field),
            (Some(error), None) => error.to_string(),
            _ => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

/// Parse a vessel name as accepted on the command line.
pub fn parse_vessel(value: &str) -> Result<VesselType> {
    match value.to_ascii_lowercase().replace('-', "_").as_str() {
        "motor" => Ok(VesselType::Motor),
        "kayak" => Ok(VesselType::Kayak),
        "sup" | "stand_up_paddle" => Ok(VesselType::StandUpPaddle),
        other => anyhow::bail!("unknown vessel type: {}", other),
    }
}
