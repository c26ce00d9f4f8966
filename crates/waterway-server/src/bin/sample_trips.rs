//! Plan the built-in Berlin sample trips against the configured providers.

use anyhow::Result;
use chrono::Utc;
use waterway_core::{route_distance_m, sample_trips, Trip};
use waterway_server::config::Config;
use waterway_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let state = AppState::new(config)?;

    for sample in sample_trips(Utc::now()) {
        println!(
            "\n=== {} ({:.4},{:.4} -> {:.4},{:.4}) ===",
            sample.vessel_type().display_name(),
            sample.start_point().lat,
            sample.start_point().lon,
            sample.end_point().lat,
            sample.end_point().lon
        );

        let planned = state
            .planner()
            .plan_route_detailed(sample.start_point(), sample.end_point())
            .await;
        let trip = Trip::new(
            sample.start_point(),
            sample.end_point(),
            sample.start_time(),
            sample.vessel_type(),
            Some(planned.coordinates),
        );

        println!(
            "Result: {:?} | points={} distance={:.0}m",
            planned.source,
            trip.route().len(),
            route_distance_m(trip.route())
        );
        for point in trip.route() {
            println!("  {:.6}, {:.6}", point.lat, point.lon);
        }
    }

    let stats = state.classifier().stats();
    println!(
        "\nClassifier: cache_hits={} poi_searches={} reverse_geocodes={}",
        stats.cache_hits, stats.poi_searches, stats.reverse_geocodes
    );
    Ok(())
}
