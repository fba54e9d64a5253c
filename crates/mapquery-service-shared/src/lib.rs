//! Shared infrastructure for the MapQuery HTTP service.
//!
//! This crate provides the HTTP glue around `mapquery-lib`:
//!
//! - [`AppState`]: The loaded [`MapIndex`](mapquery_lib::MapIndex), shared by every handler
//! - [`health`]: Liveness and readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Query types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; routing, tile selection and search live in
//! `mapquery-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string                                       │
//! │  - Validate parameters                                      │
//! │  - Call MapIndex                                            │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module builds a small in-memory map for handler tests.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_calculated, record_route_failed,
    record_route_hops, record_search, record_tiles_resolved, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_VERTEX_NOT_FOUND,
};
pub use request::{RasterQuery, RouteQuery, SearchQuery, Validate, MAX_SEARCH_LIMIT};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
