//! In-memory map services for planner and API tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use waterway_core::spatial::{distance, EARTH_RADIUS_M};
use waterway_core::{Coordinate, Placemark, PoiCategory};
use waterway_server::config::Config;
use waterway_server::providers::{
    DirectionsRoute, DirectionsService, PlaceSearchService, ProviderError, ReverseGeocoder,
    TravelMode,
};
use waterway_server::state::AppState;

pub const SPREE_START: Coordinate = Coordinate::new(52.5200, 13.3988);
pub const SPREE_END: Coordinate = Coordinate::new(52.4914, 13.4648);

/// Describes where the water is.
#[derive(Clone)]
pub enum World {
    /// Everything is water.
    Ocean,
    /// Everything is land.
    Desert,
    /// Water within `half_width_m` of the segment `a`-`b`.
    River {
        a: Coordinate,
        b: Coordinate,
        half_width_m: f64,
    },
    /// Water north of `lat`.
    NorthOf { lat: f64 },
}

impl World {
    pub fn is_water(&self, point: Coordinate) -> bool {
        match self {
            World::Ocean => true,
            World::Desert => false,
            World::River { a, b, half_width_m } => {
                distance_to_segment_m(point, *a, *b) <= *half_width_m
            }
            World::NorthOf { lat } => point.lat > *lat,
        }
    }
}

/// Distance from `point` to segment `a`-`b` on a local equirectangular plane.
pub fn distance_to_segment_m(point: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    let ref_lat = a.lat.to_radians();
    let to_xy = |c: Coordinate| {
        (
            (c.lon - a.lon).to_radians() * ref_lat.cos() * EARTH_RADIUS_M,
            (c.lat - a.lat).to_radians() * EARTH_RADIUS_M,
        )
    };
    let (px, py) = to_xy(point);
    let (sx, sy) = to_xy(b);
    let len_sq = sx * sx + sy * sy;
    if len_sq < 1e-6 {
        return distance(point, a);
    }
    let t = ((px * sx + py * sy) / len_sq).clamp(0.0, 1.0);
    let dx = px - t * sx;
    let dy = py - t * sy;
    (dx * dx + dy * dy).sqrt()
}

pub struct FakeDirections {
    routes: Option<Vec<DirectionsRoute>>,
    pub calls: AtomicUsize,
}

impl FakeDirections {
    pub fn with_routes(routes: Vec<DirectionsRoute>) -> Arc<Self> {
        Arc::new(Self {
            routes: Some(routes),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            routes: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl DirectionsService for FakeDirections {
    async fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        assert_eq!(mode, TravelMode::Walking);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.routes.clone().ok_or(ProviderError::NoResult)
    }
}

pub struct FakePlaces {
    world: World,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakePlaces {
    pub fn new(world: World) -> Arc<Self> {
        Arc::new(Self {
            world,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            world: World::Desert,
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PlaceSearchService for FakePlaces {
    async fn search(
        &self,
        center: Coordinate,
        radius_m: f64,
        categories: &[PoiCategory],
    ) -> Result<Vec<Placemark>, ProviderError> {
        assert_eq!(radius_m, 400.0);
        assert!(categories.contains(&PoiCategory::Marina));
        assert!(categories.contains(&PoiCategory::Beach));
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProviderError::NoResult);
        }
        if self.world.is_water(center) {
            Ok(vec![Placemark {
                name: Some("Bootshaus".to_string()),
                thoroughfare: Some("Uferweg".to_string()),
                category: Some(PoiCategory::Marina),
                ..Placemark::default()
            }])
        } else {
            Ok(Vec::new())
        }
    }
}

pub struct FakeGeocoder {
    world: World,
    fail: bool,
    pub call_times: Mutex<Vec<Instant>>,
}

impl FakeGeocoder {
    pub fn new(world: World) -> Arc<Self> {
        Arc::new(Self {
            world,
            fail: false,
            call_times: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            world: World::Desert,
            fail: true,
            call_times: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.call_times.lock().unwrap().len()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Placemark, ProviderError> {
        self.call_times.lock().unwrap().push(Instant::now());
        if self.fail {
            return Err(ProviderError::Decode("Unable to geocode".to_string()));
        }
        if self.world.is_water(coordinate) {
            Ok(Placemark {
                inland_water: Some("Spree".to_string()),
                ..Placemark::default()
            })
        } else {
            Ok(Placemark {
                name: Some("Rathaus".to_string()),
                thoroughfare: Some("Rathausstraße".to_string()),
                sub_thoroughfare: Some("15".to_string()),
                ..Placemark::default()
            })
        }
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub directions: Arc<FakeDirections>,
    pub places: Arc<FakePlaces>,
    pub geocoder: Arc<FakeGeocoder>,
}

pub fn harness(
    directions: Arc<FakeDirections>,
    places: Arc<FakePlaces>,
    geocoder: Arc<FakeGeocoder>,
) -> Harness {
    let state = Arc::new(AppState::with_services(
        &Config::default(),
        directions.clone(),
        places.clone(),
        geocoder.clone(),
    ));
    Harness {
        state,
        directions,
        places,
        geocoder,
    }
}

/// Harness where `world` drives every service and directions follow `polyline`.
pub fn world_harness(world: World, polyline: Option<Vec<Coordinate>>) -> Harness {
    let directions = match polyline {
        Some(polyline) => FakeDirections::with_routes(vec![DirectionsRoute {
            polyline,
            expected_duration_s: 1_800.0,
        }]),
        None => FakeDirections::failing(),
    };
    harness(
        directions,
        FakePlaces::new(world.clone()),
        FakeGeocoder::new(world),
    )
}
