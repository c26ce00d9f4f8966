//! Waterway core - geometry, models and route shaping for water-only trip planning.
//!
//! Everything here is synchronous and free of I/O; the async classifier and
//! planner live in `waterway-server`.

pub mod models;
pub mod rate_limit;
pub mod routing;
pub mod spatial;
pub mod water;

pub use models::{
    sample_trips, CacheKey, Coordinate, CoordinateError, Placemark, PoiCategory, Trip, VesselType,
};
pub use rate_limit::SlidingWindow;
pub use routing::{
    append_or_merge, generate_synthetic_route, merge_endpoints, route_distance_m, sample_polyline,
    PlannerConfig, DEFAULT_SYNTHETIC_STEPS,
};
pub use spatial::{destination, distance, haversine_distance, interpolate, quantize};
pub use water::{contains_water_keyword, placemark_on_water, poi_indicates_water};
