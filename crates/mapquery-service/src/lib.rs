//! MapQuery HTTP API.
//!
//! # Endpoints
//!
//! - `GET /api/v1/route` - Shortest road route between two points
//! - `GET /api/v1/raster` - Tiles to composite for a viewport
//! - `GET /api/v1/search` - Place name autocomplete and exact lookup
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use mapquery_lib::{Coordinate, Error as LibError, SearchResults, VertexId};
use mapquery_service_shared::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, metrics_handler,
    record_route_calculated, record_route_failed, record_route_hops, record_search,
    record_tiles_resolved, AppState, MetricsLayer, ProblemDetails, RasterQuery, RouteQuery,
    SearchQuery, ServiceResponse, Validate,
};

/// Extension of the pre-rendered tile images.
pub const TILE_EXTENSION: &str = "png";

/// Body of a successful `/api/v1/route` call.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub hops: usize,
    /// Path length in degrees.
    pub distance: f64,
    pub algorithm: String,
    /// Vertex ids along the path, start first.
    pub route: Vec<VertexId>,
    pub coordinates: Vec<Coordinate>,
}

/// Body of a successful `/api/v1/raster` call.
#[derive(Debug, Serialize)]
pub struct RasterResponse {
    /// Tile image names, row-major from the north-west corner.
    pub render_grid: Vec<Vec<String>>,
    pub raster_ul_lon: f64,
    pub raster_ul_lat: f64,
    pub raster_lr_lon: f64,
    pub raster_lr_lat: f64,
    pub raster_width: u32,
    pub raster_height: u32,
    pub depth: u8,
    pub query_success: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub count: usize,
    pub results: SearchResults,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", get(route_handler))
        .route("/api/v1/raster", get(raster_handler))
        .route("/api/v1/search", get(search_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> ApiResponse<RouteResponse> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    info!(
        request_id = %request_id,
        start_lat = query.start_lat,
        start_lon = query.start_lon,
        end_lat = query.end_lat,
        end_lon = query.end_lon,
        algorithm = %query.algorithm,
        "handling route request"
    );

    if let Err(problem) = query.validate(&request_id) {
        record_route_failed("validation_error");
        return ApiResponse::Error(*problem);
    }

    let plan = match state.map().route_with(&query.to_request()) {
        Ok(plan) => plan,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "route planning failed");
            let reason = match &e {
                LibError::NoRouteFound { .. } => "no_route",
                LibError::EmptyGraph => "empty_graph",
                _ => "internal_error",
            };
            record_route_failed(reason);
            return ApiResponse::Error(from_lib_error(&e, &request_id));
        }
    };

    let algorithm = plan.algorithm.to_string();
    let hops = plan.hop_count();
    record_route_calculated(&algorithm);
    record_route_hops(hops, &algorithm);

    info!(
        request_id = %request_id,
        hops,
        distance = plan.distance,
        "route computed successfully"
    );

    let response = RouteResponse {
        hops,
        distance: plan.distance,
        algorithm,
        route: plan.steps,
        coordinates: plan.coordinates,
    };
    ApiResponse::Success(ServiceResponse::new(response).with_request_id(request_id))
}

async fn raster_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RasterQuery>,
) -> ApiResponse<RasterResponse> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    if let Err(problem) = query.validate(&request_id) {
        return ApiResponse::Error(*problem);
    }

    let plan = state.map().raster(&query.to_request());
    let grid = &plan.grid;
    record_tiles_resolved(grid.depth, grid.rows() * grid.cols());

    info!(
        request_id = %request_id,
        depth = grid.depth,
        rows = grid.rows(),
        cols = grid.cols(),
        clamped = grid.clamped,
        query_success = plan.query_success,
        "raster resolved"
    );

    let response = RasterResponse {
        render_grid: grid.file_names(TILE_EXTENSION),
        raster_ul_lon: grid.bounds.ul_lon,
        raster_ul_lat: grid.bounds.ul_lat,
        raster_lr_lon: grid.bounds.lr_lon,
        raster_lr_lat: grid.bounds.lr_lat,
        raster_width: plan.raster_width,
        raster_height: plan.raster_height,
        depth: grid.depth,
        query_success: plan.query_success,
    };
    ApiResponse::Success(ServiceResponse::new(response).with_request_id(request_id))
}

async fn search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> ApiResponse<SearchResponse> {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    if let Err(problem) = query.validate(&request_id) {
        return ApiResponse::Error(*problem);
    }

    let results = state
        .map()
        .search_limited(&query.term, query.full, query.limit);

    let kind = if query.full { "exact" } else { "prefix" };
    record_search(kind, results.len());

    info!(
        request_id = %request_id,
        kind,
        results = results.len(),
        "search completed"
    );

    let response = SearchResponse {
        term: query.term,
        count: results.len(),
        results,
    };
    ApiResponse::Success(ServiceResponse::new(response).with_request_id(request_id))
}
