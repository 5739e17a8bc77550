use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use trip_server::directions::{DirectionsClient, DirectionsConfig};
use trip_server::planner::PlannerConfig;
use trip_server::store::GtfsStore;
use trip_server::web::{AppState, create_router};

/// Feed directory used when `GTFS_DIR` is not set.
const DEFAULT_GTFS_DIR: &str = "./gtfs";

/// Listen address used when `BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let gtfs_dir = std::env::var("GTFS_DIR").unwrap_or_else(|_| DEFAULT_GTFS_DIR.to_string());
    let api_key = std::env::var("DIRECTIONS_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("DIRECTIONS_API_KEY not set. Walking directions will be omitted.");
        String::new()
    });
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    // Load the feed once; every request reads it
    tracing::info!(dir = %gtfs_dir, "Loading GTFS feed");
    let store = GtfsStore::load(&gtfs_dir)?;

    let directions = DirectionsClient::new(DirectionsConfig::new(api_key))?;

    let state = AppState::new(store, directions, PlannerConfig::default());
    let app = create_router(state);

    tracing::info!(%addr, "Trip planner listening");
    tracing::info!("  GET /            - Liveness");
    tracing::info!("  GET /health      - Health check");
    tracing::info!("  GET /api/route   - Plan routes (?from=&to=&userLat=&userLon=)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
