//! Core data models for the waterway planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::routing::{generate_synthetic_route, DEFAULT_SYNTHETIC_STEPS};

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate must be finite (lat={lat}, lon={lon})")]
    NotFinite { lat: f64, lon: f64 },
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate, rejecting values no provider could resolve.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        let coordinate = Self { lat, lon };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(CoordinateError::NotFinite {
                lat: self.lat,
                lon: self.lon,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoordinateError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(CoordinateError::LongitudeOutOfRange(self.lon));
        }
        Ok(())
    }
}

/// Quantized (lat, lon) bin used as the identity for classification caches.
///
/// Two coordinates within half the quantization precision of each other share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub lat_bin: i64,
    pub lon_bin: i64,
}

/// Point-of-interest categories that indicate nearby navigable water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Marina,
    Beach,
}

/// Result of a place search or reverse-geocode lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub thoroughfare: Option<String>,
    #[serde(default)]
    pub sub_thoroughfare: Option<String>,
    #[serde(default)]
    pub inland_water: Option<String>,
    #[serde(default)]
    pub ocean: Option<String>,
    #[serde(default)]
    pub areas_of_interest: Vec<String>,
    /// Set when the placemark came from a categorized POI search.
    #[serde(default)]
    pub category: Option<PoiCategory>,
}

/// Watercraft category chosen for a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselType {
    Motor,
    #[default]
    Kayak,
    StandUpPaddle,
}

impl VesselType {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Motor => "Motor Boat",
            Self::Kayak => "Kayak",
            Self::StandUpPaddle => "Stand-Up Paddle",
        }
    }

    /// Colour token used by map and list renderers.
    pub fn color(self) -> &'static str {
        match self {
            Self::Motor => "motorBlue",
            Self::Kayak => "kayakGreen",
            Self::StandUpPaddle => "supOrange",
        }
    }
}

/// A planned trip. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    id: Uuid,
    start_point: Coordinate,
    end_point: Coordinate,
    start_time: DateTime<Utc>,
    vessel_type: VesselType,
    route: Vec<Coordinate>,
}

impl Trip {
    /// Create a trip. Without a planned route the synthetic waterway curve is used.
    pub fn new(
        start_point: Coordinate,
        end_point: Coordinate,
        start_time: DateTime<Utc>,
        vessel_type: VesselType,
        route: Option<Vec<Coordinate>>,
    ) -> Self {
        let route = route.filter(|route| route.len() >= 2).unwrap_or_else(|| {
            generate_synthetic_route(start_point, end_point, DEFAULT_SYNTHETIC_STEPS)
        });
        Self {
            id: Uuid::new_v4(),
            start_point,
            end_point,
            start_time,
            vessel_type,
            route,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start_point(&self) -> Coordinate {
        self.start_point
    }

    pub fn end_point(&self) -> Coordinate {
        self.end_point
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn vessel_type(&self) -> VesselType {
        self.vessel_type
    }

    pub fn route(&self) -> &[Coordinate] {
        &self.route
    }
}

/// Built-in demo trips on Berlin waterways.
pub fn sample_trips(now: DateTime<Utc>) -> Vec<Trip> {
    vec![
        // Spree: Museum Island to Treptower Park
        Trip::new(
            Coordinate::new(52.5200, 13.3988),
            Coordinate::new(52.4914, 13.4648),
            now - chrono::Duration::hours(1),
            VesselType::Kayak,
            None,
        ),
        // Havel: Wannsee area
        Trip::new(
            Coordinate::new(52.4333, 13.1667),
            Coordinate::new(52.4500, 13.2000),
            now - chrono::Duration::hours(2),
            VesselType::StandUpPaddle,
            None,
        ),
    ]
}
