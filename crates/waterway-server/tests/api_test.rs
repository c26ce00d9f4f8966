//! HTTP surface tests driven through the router without a socket.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{world_harness, Harness, World, SPREE_END, SPREE_START};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use tower::ServiceExt;
use waterway_server::api::{self, NOT_ON_WATER};

fn app(h: &Harness) -> Router {
    api::routes().with_state(h.state.clone())
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let h = world_harness(World::Ocean, None);
    let (status, body) = call(app(&h), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn water_check_reports_water() {
    let h = world_harness(World::Ocean, None);
    let (status, body) = call(
        app(&h),
        "POST",
        "/v1/water/check",
        Some(json!({ "lat": 52.5200, "lon": 13.3988 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["on_water"], json!(true));
    assert_eq!(body["lat"], json!(52.52));
}

#[tokio::test]
async fn water_check_rejects_out_of_range_latitude() {
    let h = world_harness(World::Ocean, None);
    let (status, body) = call(
        app(&h),
        "POST",
        "/v1/water/check",
        Some(json!({ "lat": 95.0, "lon": 13.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid coordinate"));
    assert_eq!(body["field"], json!("point"));
    assert_eq!(h.places.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn plan_route_returns_endpoints_and_source() {
    let h = world_harness(World::Ocean, None);
    let (status, body) = call(
        app(&h),
        "POST",
        "/v1/routes/plan",
        Some(json!({ "start": SPREE_START, "end": SPREE_END })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], json!("synthetic"));
    let route = body["route"].as_array().unwrap();
    assert_eq!(body["points"], json!(route.len()));
    assert_eq!(route.first(), Some(&json!(SPREE_START)));
    assert_eq!(route.last(), Some(&json!(SPREE_END)));
    assert!(body["distance_m"].as_f64().unwrap() > 5_000.0);
}

#[tokio::test]
async fn trip_on_land_is_rejected() {
    let h = world_harness(World::Desert, None);
    let (status, body) = call(
        app(&h),
        "POST",
        "/v1/trips",
        Some(json!({
            "start": { "lat": 52.5163, "lon": 13.3777 },
            "end": SPREE_END,
            "vessel_type": "kayak"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!(NOT_ON_WATER));
    assert_eq!(body["field"], json!("start"));
    // Nothing was planned.
    assert_eq!(h.directions.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn trip_on_water_is_planned() {
    let h = world_harness(World::Ocean, None);
    let (status, body) = call(
        app(&h),
        "POST",
        "/v1/trips",
        Some(json!({
            "start": SPREE_START,
            "end": SPREE_END,
            "vessel_type": "stand_up_paddle",
            "start_time": "2026-06-01T09:00:00Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vessel_type"], json!("stand_up_paddle"));
    assert_eq!(body["start_point"], json!(SPREE_START));
    assert_eq!(body["start_time"], json!("2026-06-01T09:00:00Z"));
    let route = body["route"].as_array().unwrap();
    assert!(route.len() >= 2);
    assert_eq!(route.last(), Some(&json!(SPREE_END)));
    assert!(body["id"].is_string());
}
