//! Waterway Server - water-validated trip planning over HTTP

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waterway_server::api;
use waterway_server::config::Config;
use waterway_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("waterway_server=debug".parse()?))
        .init();

    tracing::info!("Starting Waterway Server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        "Providers: directions={} poi={} geocoder={}",
        config.directions_url,
        config.overpass_url,
        config.geocoder_url
    );
    let state = Arc::new(AppState::new(config)?);

    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
