//! REST API routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use waterway_core::{route_distance_m, Coordinate, Trip, VesselType};

use crate::classifier::ClassifierStats;
use crate::route_planner::RouteSource;
use crate::state::AppState;

/// Error message shown when a selected point fails the interactive water check.
pub const NOT_ON_WATER: &str = "selected point is not on water";

type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PointRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterCheckResponse {
    pub lat: f64,
    pub lon: f64,
    pub on_water: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutePlanRequest {
    pub start: Coordinate,
    pub end: Coordinate,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutePlanResponse {
    pub route: Vec<Coordinate>,
    pub source: RouteSource,
    pub points: usize,
    pub distance_m: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    #[serde(default)]
    pub vessel_type: VesselType,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/water/check", post(check_water))
        .route("/v1/water/stats", get(classifier_stats))
        .route("/v1/routes/plan", post(plan_route_handler))
        .route("/v1/trips", post(create_trip))
}

fn validate(field: &str, coordinate: Coordinate) -> Result<Coordinate, ApiError> {
    coordinate.validate().map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Invalid coordinate",
                "field": field,
                "details": err.to_string()
            })),
        )
    })?;
    Ok(coordinate)
}

async fn check_water(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> Result<Json<WaterCheckResponse>, ApiError> {
    let point = validate("point", Coordinate::new(req.lat, req.lon))?;
    let on_water = state.classifier().is_water(point, true).await;
    Ok(Json(WaterCheckResponse {
        lat: point.lat,
        lon: point.lon,
        on_water,
    }))
}

async fn classifier_stats(State(state): State<Arc<AppState>>) -> Json<ClassifierStats> {
    Json(state.classifier().stats())
}

async fn plan_route_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RoutePlanRequest>,
) -> Result<Json<RoutePlanResponse>, ApiError> {
    let start = validate("start", req.start)?;
    let end = validate("end", req.end)?;

    let planned = state.planner().plan_route_detailed(start, end).await;
    Ok(Json(RoutePlanResponse {
        points: planned.coordinates.len(),
        distance_m: route_distance_m(&planned.coordinates),
        source: planned.source,
        route: planned.coordinates,
    }))
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TripRequest>,
) -> Result<Json<Trip>, ApiError> {
    let start = validate("start", req.start)?;
    let end = validate("end", req.end)?;

    for (field, point) in [("start", start), ("end", end)] {
        if !state.classifier().is_water(point, true).await {
            tracing::info!("Rejected trip: {} {:.5},{:.5} is not on water", field, point.lat, point.lon);
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": NOT_ON_WATER,
                    "field": field,
                    "lat": point.lat,
                    "lon": point.lon
                })),
            ));
        }
    }

    let route = state.planner().plan_route(start, end).await;
    let trip = Trip::new(
        start,
        end,
        req.start_time.unwrap_or_else(Utc::now),
        req.vessel_type,
        Some(route),
    );
    Ok(Json(trip))
}
