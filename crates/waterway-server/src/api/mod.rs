//! API routes for the waterway server.

mod routes;

use axum::Router;

pub use routes::{
    PointRequest, RoutePlanRequest, RoutePlanResponse, TripRequest, WaterCheckResponse,
    NOT_ON_WATER,
};

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
