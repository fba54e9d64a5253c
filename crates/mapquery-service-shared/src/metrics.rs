//! Prometheus metrics for the MapQuery service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Helpers for the route, raster and search business metrics
//!
//! # Example
//!
//! ```no_run
//! use mapquery_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition text.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// - `METRICS_ENABLED`: anything but "false" enables metrics (default: true)
    /// - `METRICS_PATH`: endpoint path (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|value| !value.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder. Only the first call can succeed.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Render the Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => write!(f, "failed to install metrics recorder: {e}"),
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Count a successful route (`mapquery_routes_calculated_total`).
pub fn record_route_calculated(algorithm: &str) {
    metrics::counter!(
        "mapquery_routes_calculated_total",
        "algorithm" => algorithm.to_string()
    )
    .increment(1);
}

/// Count a failed route (`mapquery_routes_failed_total`), labelled with a
/// short reason such as `no_route` or `validation_error`.
pub fn record_route_failed(reason: &str) {
    metrics::counter!(
        "mapquery_routes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

pub fn record_route_hops(hops: usize, algorithm: &str) {
    metrics::histogram!(
        "mapquery_route_hops",
        "algorithm" => algorithm.to_string()
    )
    .record(hops as f64);
}

/// Record the depth and tile count of a raster plan.
pub fn record_tiles_resolved(depth: u8, tiles: usize) {
    metrics::histogram!("mapquery_raster_depth").record(f64::from(depth));
    metrics::histogram!("mapquery_raster_tiles").record(tiles as f64);
}

/// Count a search and record how many results it produced. `kind` is
/// `prefix` or `exact`.
pub fn record_search(kind: &'static str, results: usize) {
    metrics::counter!("mapquery_searches_total", "kind" => kind).increment(1);
    metrics::histogram!("mapquery_search_results", "kind" => kind).record(results as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_metrics() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn disabled_config_is_rejected() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn handler_renders_text_without_recorder() {
        let rt = tokio::runtime::Runtime::new().expect("runtime");
        let output = rt.block_on(metrics_handler());
        assert!(output.starts_with('#') || output.is_empty() || output.contains("mapquery_"));
    }

    #[test]
    fn helpers_do_not_panic_without_recorder() {
        record_route_calculated("a-star");
        record_route_failed("no_route");
        record_route_hops(4, "a-star");
        record_tiles_resolved(7, 9);
        record_search("prefix", 3);
    }
}
