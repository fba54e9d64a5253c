//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful payload plus the metadata `ProblemDetails` carries for errors.
///
/// The payload's fields are flattened into the top-level JSON object.
///
/// ```
/// use mapquery_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Suggestions {
///     names: Vec<String>,
/// }
///
/// let response = ServiceResponse::new(Suggestions { names: vec![] })
///     .with_request_id("req-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Hops {
        hops: usize,
    }

    #[test]
    fn payload_is_flattened() {
        let response = ServiceResponse::new(Hops { hops: 3 });
        let json = serde_json::to_string(&response).expect("serializes");

        assert!(json.contains("\"hops\":3"));
        assert!(json.contains("\"content_type\":\"application/json\""));
        assert!(!json.contains("\"data\""));
        assert!(!json.contains("request_id"));
    }

    #[test]
    fn request_id_is_reported_when_set() {
        let response: ServiceResponse<Hops> = Hops { hops: 1 }.into();
        let json = serde_json::to_value(response.with_request_id("req-9")).expect("serializes");
        assert_eq!(json["request_id"], "req-9");
    }

    #[test]
    fn round_trips_through_json() {
        let json = r#"{"hops":2,"content_type":"application/json"}"#;
        let response: ServiceResponse<Hops> = serde_json::from_str(json).expect("parses");
        assert_eq!(response.data, Hops { hops: 2 });
        assert!(response.request_id.is_none());
    }
}
