//! Water-only route planning over directions data, with synthetic fallback.

use serde::Serialize;
use std::sync::Arc;
use waterway_core::{
    append_or_merge, distance, generate_synthetic_route, merge_endpoints, sample_polyline,
    Coordinate, PlannerConfig,
};

use crate::classifier::WaterClassifier;
use crate::providers::{DirectionsService, TravelMode};

/// Which fallback tier produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Directions,
    Synthetic,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRoute {
    pub coordinates: Vec<Coordinate>,
    pub source: RouteSource,
}

pub struct WaterRoutePlanner {
    classifier: Arc<WaterClassifier>,
    directions: Arc<dyn DirectionsService>,
    config: PlannerConfig,
}

impl WaterRoutePlanner {
    pub fn new(
        classifier: Arc<WaterClassifier>,
        directions: Arc<dyn DirectionsService>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            classifier,
            directions,
            config,
        }
    }

    /// Plan a route from `start` to `end`. Never fails; the worst case is `[start, end]`.
    pub async fn plan_route(&self, start: Coordinate, end: Coordinate) -> Vec<Coordinate> {
        self.plan_route_detailed(start, end).await.coordinates
    }

    pub async fn plan_route_detailed(&self, start: Coordinate, end: Coordinate) -> PlannedRoute {
        if let Some(coordinates) = self.directions_water_route(start, end).await {
            tracing::info!("Planned route from directions ({} points)", coordinates.len());
            return PlannedRoute {
                coordinates,
                source: RouteSource::Directions,
            };
        }

        let synthetic = generate_synthetic_route(start, end, self.config.synthetic_steps);
        let water_only = self.ensure_water_points(&synthetic).await;

        if water_only.len() >= 2 {
            let coordinates = self.merged(water_only, start, end);
            tracing::info!("Planned synthetic route ({} points)", coordinates.len());
            PlannedRoute {
                coordinates,
                source: RouteSource::Synthetic,
            }
        } else {
            tracing::info!(
                "No water route between {:.5},{:.5} and {:.5},{:.5}; using direct line",
                start.lat,
                start.lon,
                end.lat,
                end.lon
            );
            PlannedRoute {
                coordinates: vec![start, end],
                source: RouteSource::Direct,
            }
        }
    }

    async fn directions_water_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Option<Vec<Coordinate>> {
        // Walking paths follow shorelines and bridges closely enough to seed a water route.
        let routes = match self.directions.route(start, end, TravelMode::Walking).await {
            Ok(routes) => routes,
            Err(err) => {
                tracing::warn!("Directions unavailable, falling back to synthetic route: {}", err);
                return None;
            }
        };

        let fastest = routes
            .into_iter()
            .filter(|route| route.expected_duration_s.is_finite())
            .min_by(|a, b| a.expected_duration_s.total_cmp(&b.expected_duration_s))?;

        let sampled = sample_polyline(
            &fastest.polyline,
            start,
            end,
            self.config.sampling_distance_m,
            self.config.merge_threshold_m,
        );
        let water_only = self.ensure_water_points(&sampled).await;
        tracing::debug!(
            "Directions route: {} samples, {} water points",
            sampled.len(),
            water_only.len()
        );

        if water_only.len() < 2 {
            return None;
        }
        Some(self.merged(water_only, start, end))
    }

    /// Keep water candidates and snap the rest to nearby water, in input order.
    ///
    /// Candidates within the validation spacing of the last checked candidate are
    /// skipped; candidates with no water nearby are dropped. The geocoder is never used.
    pub async fn ensure_water_points(&self, candidates: &[Coordinate]) -> Vec<Coordinate> {
        let mut water_points: Vec<Coordinate> = Vec::new();
        let mut last_checked: Option<Coordinate> = None;

        for &candidate in candidates {
            if let Some(last) = last_checked {
                if distance(last, candidate) < self.config.validation_spacing_m {
                    continue;
                }
            }
            last_checked = Some(candidate);

            if self.classifier.is_water(candidate, false).await {
                append_or_merge(&mut water_points, candidate, self.config.merge_threshold_m);
                continue;
            }

            if let Some(snapped) = self
                .classifier
                .nearest_water(
                    candidate,
                    self.config.snap_max_distance_m,
                    self.config.snap_step_m,
                    false,
                )
                .await
            {
                append_or_merge(&mut water_points, snapped, self.config.merge_threshold_m);
            }
        }

        water_points
    }

    fn merged(&self, water_points: Vec<Coordinate>, start: Coordinate, end: Coordinate) -> Vec<Coordinate> {
        merge_endpoints(water_points, start, end, self.config.merge_threshold_m)
    }
}
