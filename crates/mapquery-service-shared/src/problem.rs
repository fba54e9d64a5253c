//! RFC 9457 Problem Details for HTTP APIs.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use mapquery_lib::Error as LibError;

/// Problem type URI for coordinates that do not match a graph vertex.
pub const PROBLEM_VERTEX_NOT_FOUND: &str = "/problems/vertex-not-found";

/// Problem type URI for routes that cannot be found.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for a service without usable map data.
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use mapquery_service_shared::{ProblemDetails, PROBLEM_ROUTE_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_ROUTE_NOT_FOUND,
///     "Route Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("No route exists from vertex 1 to vertex 9")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    pub title: String,

    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of the failing call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    pub content_type: String,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: PROBLEM_CONTENT_TYPE.to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 Bad Request for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 Not Found for a coordinate that is not a graph vertex.
    pub fn vertex_not_found(lat: f64, lon: f64, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_VERTEX_NOT_FOUND,
            "Vertex Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No road vertex at ({lat}, {lon})"))
        .with_request_id(request_id)
    }

    /// 404 Not Found when the two endpoints are not connected.
    pub fn route_not_found(start: i64, goal: i64, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No route exists from vertex {start} to vertex {goal}"))
        .with_request_id(request_id)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 503 Service Unavailable.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        *response.status_mut() = status;
        response
    }
}

/// Map a library error onto a problem response.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::VertexNotFound { lat, lon } => {
            ProblemDetails::vertex_not_found(*lat, *lon, request_id)
        }
        LibError::NoRouteFound { start, goal } => {
            ProblemDetails::route_not_found(*start, *goal, request_id)
        }
        LibError::EmptyGraph => {
            ProblemDetails::service_unavailable("The road graph is empty", request_id)
        }
        LibError::DatasetNotFound { path } => ProblemDetails::service_unavailable(
            format!("Map data not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}
