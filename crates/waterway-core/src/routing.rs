//! Route sampling, merging and the synthetic waterway generator.

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;
use crate::spatial::{distance, interpolate};

pub const DEFAULT_SYNTHETIC_STEPS: usize = 50;

/// Tuning for the route planning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum gap between consecutive polyline samples.
    pub sampling_distance_m: f64,
    /// Points closer than this are treated as the same point.
    pub merge_threshold_m: f64,
    /// Minimum spacing between candidates sent to the classifier.
    pub validation_spacing_m: f64,
    pub synthetic_steps: usize,
    pub snap_max_distance_m: f64,
    pub snap_step_m: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            sampling_distance_m: 120.0,
            merge_threshold_m: 25.0,
            validation_spacing_m: 120.0,
            synthetic_steps: DEFAULT_SYNTHETIC_STEPS,
            snap_max_distance_m: 600.0,
            snap_step_m: 60.0,
        }
    }
}

/// Generate a gently meandering curve from `start` to `end` with `steps + 1` points.
///
/// Quadratic Bézier through a control point offset perpendicular to the chord,
/// plus a small two-period sine wobble on latitude. Deterministic.
pub fn generate_synthetic_route(start: Coordinate, end: Coordinate, steps: usize) -> Vec<Coordinate> {
    let steps = steps.max(1);

    let mid_lat = (start.lat + end.lat) / 2.0;
    let mid_lon = (start.lon + end.lon) / 2.0;

    let delta_lat = end.lat - start.lat;
    let delta_lon = end.lon - start.lon;
    let chord = (delta_lat * delta_lat + delta_lon * delta_lon).sqrt();

    // Delta rotated 90 degrees, scaled to 30% of the chord.
    let control_lat = mid_lat - delta_lon * 0.3;
    let control_lon = mid_lon + delta_lat * 0.3;

    let amplitude = 0.0005 * chord;

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;

            let lat = u * u * start.lat + 2.0 * u * t * control_lat + t * t * end.lat;
            let lon = u * u * start.lon + 2.0 * u * t * control_lon + t * t * end.lon;
            let wobble = (t * std::f64::consts::PI * 4.0).sin() * amplitude;

            Coordinate {
                lat: lat + wobble,
                lon,
            }
        })
        .collect()
}

/// Resample a polyline so no gap exceeds `sampling_distance_m`.
///
/// The result always starts with `start` and ends with `end`; a final sample
/// within `merge_threshold_m` of `end` is replaced by it.
pub fn sample_polyline(
    polyline: &[Coordinate],
    start: Coordinate,
    end: Coordinate,
    sampling_distance_m: f64,
    merge_threshold_m: f64,
) -> Vec<Coordinate> {
    if polyline.len() < 2 {
        return vec![start, end];
    }

    let sampling = sampling_distance_m.max(1.0);
    let mut samples = vec![start];
    let mut previous = start;

    for &vertex in polyline {
        let gap = distance(previous, vertex);
        if gap > sampling {
            let segments = (gap / sampling).ceil() as usize;
            for step in 1..=segments {
                let fraction = step as f64 / segments as f64;
                samples.push(interpolate(previous, vertex, fraction));
            }
        } else {
            samples.push(vertex);
        }
        previous = vertex;
    }

    match samples.last_mut() {
        Some(last) if distance(*last, end) <= merge_threshold_m => *last = end,
        _ => samples.push(end),
    }

    samples
}

/// Append `coordinate`, or replace the last point when the two are within `threshold_m`.
pub fn append_or_merge(route: &mut Vec<Coordinate>, coordinate: Coordinate, threshold_m: f64) {
    match route.last_mut() {
        Some(last) if distance(*last, coordinate) < threshold_m => *last = coordinate,
        _ => route.push(coordinate),
    }
}

/// Pin the exact requested endpoints onto a validated route.
pub fn merge_endpoints(
    coordinates: Vec<Coordinate>,
    start: Coordinate,
    end: Coordinate,
    merge_threshold_m: f64,
) -> Vec<Coordinate> {
    let mut route = coordinates;

    match route.first_mut() {
        Some(first) if distance(*first, start) <= merge_threshold_m => *first = start,
        _ => route.insert(0, start),
    }

    // A single point merged with `start` must not be overwritten by `end`.
    if route.len() == 1 {
        route.push(end);
        return route;
    }

    match route.last_mut() {
        Some(last) if distance(*last, end) <= merge_threshold_m => *last = end,
        _ => route.push(end),
    }

    route
}

/// Total path length in meters.
pub fn route_distance_m(route: &[Coordinate]) -> f64 {
    route
        .windows(2)
        .map(|pair| distance(pair[0], pair[1]))
        .sum()
}
