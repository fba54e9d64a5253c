//! MapQuery HTTP service.
//!
//! # Configuration
//!
//! - `MAPQUERY_DATA_PATH` - Path to the OSM PBF extract (default: /data/map.osm.pbf)
//! - `MAPQUERY_ROOT_BBOX`, `MAPQUERY_MAX_DEPTH`, `MAPQUERY_TILE_SIZE` - Tiling overrides
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{error, info};

use mapquery_lib::MapConfig;
use mapquery_service::app;
use mapquery_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging_config = LoggingConfig::from_env().with_service("mapquery");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional.
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let data_path =
        env::var("MAPQUERY_DATA_PATH").unwrap_or_else(|_| "/data/map.osm.pbf".to_string());
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let map_config = MapConfig::from_env().context("invalid MAPQUERY_* configuration")?;

    info!(data_path = %data_path, port, "starting mapquery service");

    let state = AppState::load(&data_path, &map_config)
        .inspect_err(|e| error!(error = %e, path = %data_path, "failed to load application state"))
        .with_context(|| format!("failed to load map data from {data_path}"))?;

    info!(
        vertices = state.map().graph().vertex_count(),
        names = state.map().names().len(),
        "application state loaded"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
