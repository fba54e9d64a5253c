//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body of `/health/live` and `/health/ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` or `"not_ready: <reason>"`.
    pub status: String,
    pub service: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_indexed: Option<usize>,

    /// RFC 3339 time the map finished loading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            vertices_loaded: None,
            names_indexed: None,
            loaded_at: None,
        }
    }

    pub fn ready(service: &str, version: &str, state: &AppState) -> Self {
        Self {
            vertices_loaded: Some(state.map().graph().vertex_count()),
            names_indexed: Some(state.map().names().len()),
            loaded_at: Some(state.loaded_at().to_rfc3339()),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {reason}"),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe: the process is up.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"mapquery-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe: 503 until the road graph has vertices to route over.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if state.map().graph().is_empty() {
        let status = HealthStatus::not_ready(service, version, "road graph is empty");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, &state);
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_state;

    #[test]
    fn alive_omits_map_fields() {
        let status = HealthStatus::alive("mapquery", "1.0.0");
        let json = serde_json::to_string(&status).expect("serializes");
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("vertices_loaded"));
        assert!(!json.contains("loaded_at"));
    }

    #[test]
    fn ready_reports_map_size() {
        let state = test_state();
        let status = HealthStatus::ready("mapquery", "1.0.0", &state);
        assert_eq!(status.status, "ok");
        assert_eq!(
            status.vertices_loaded,
            Some(state.map().graph().vertex_count())
        );
        assert!(status.loaded_at.is_some());
    }

    #[test]
    fn not_ready_carries_reason() {
        let status = HealthStatus::not_ready("mapquery", "1.0.0", "no data");
        assert_eq!(status.status, "not_ready: no data");
    }
}
