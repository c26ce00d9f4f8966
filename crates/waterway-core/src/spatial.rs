//! Spherical geometry for route sampling and ring searches.

use crate::models::{CacheKey, Coordinate};

/// Mean earth radius used by every spherical formula in this crate.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle surface distance between two coordinates, in meters.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.lat, a.lon, b.lat, b.lon)
}

/// Linear interpolation in lat/lon space. Good enough below a kilometer.
pub fn interpolate(a: Coordinate, b: Coordinate, fraction: f64) -> Coordinate {
    Coordinate {
        lat: a.lat + (b.lat - a.lat) * fraction,
        lon: a.lon + (b.lon - a.lon) * fraction,
    }
}

/// Offset a position by distance and bearing on a spherical earth.
///
/// # Arguments
/// * `origin` - Starting position
/// * `distance_m` - Distance in meters
/// * `bearing_deg` - Bearing in degrees (0 = north, 90 = east)
pub fn destination(origin: Coordinate, distance_m: f64, bearing_deg: f64) -> Coordinate {
    if distance_m.abs() <= f64::EPSILON {
        return origin;
    }

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let lon2 = lon1 + y.atan2(x);

    Coordinate {
        lat: lat2.to_degrees(),
        lon: lon2.to_degrees(),
    }
}

/// Scale and round both components into a cache bin.
pub fn quantize(coordinate: Coordinate, precision: f64) -> CacheKey {
    let scale = 1.0 / precision;
    CacheKey {
        lat_bin: (coordinate.lat * scale).round() as i64,
        lon_bin: (coordinate.lon * scale).round() as i64,
    }
}
