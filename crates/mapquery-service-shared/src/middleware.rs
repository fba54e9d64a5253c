//! Request tracking middleware.
//!
//! [`MetricsLayer`] wraps every request in a `request` span carrying its
//! correlation ID, records HTTP metrics when the response is ready and echoes
//! the ID back in the `X-Request-ID` response header. A caller-supplied
//! `X-Request-ID` is kept; otherwise a UUID v7 is generated and written into
//! the request headers so handlers see the same ID.
//!
//! Recorded metrics:
//! - `http_requests_total`: counter by method, path, status bucket
//! - `http_request_duration_seconds`: histogram by method, path

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header used to propagate request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation ID of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Fresh time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The request's `X-Request-ID`, or a new UUID v7 when it is missing, empty
/// or not valid UTF-8.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Path without its query string, so metric labels stay bounded.
pub fn normalize_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Tower layer installing [`MetricsMiddleware`].
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = normalize_path(req.uri().path()).to_string();

        let request_id = extract_or_generate_request_id(req.headers());
        let header = HeaderValue::from_str(request_id.as_str()).ok();
        if let Some(value) = &header {
            req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
        }

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );
        span.in_scope(|| tracing::debug!("handling request"));

        MetricsFuture {
            inner: self.inner.call(req),
            start,
            method,
            path,
            header,
            span,
        }
    }
}

pin_project! {
    /// Records metrics and tags the response once the inner future resolves.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        header: Option<HeaderValue>,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let elapsed = this.start.elapsed().as_secs_f64();
        let status = match &mut result {
            Ok(response) => {
                if let Some(value) = this.header.take() {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                status_bucket(response.status().as_u16())
            }
            Err(_) => "5xx",
        };

        metrics::counter!(
            "http_requests_total",
            "method" => this.method.clone(),
            "path" => this.path.clone(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "path" => this.path.clone()
        )
        .record(elapsed);

        tracing::info!(
            status,
            latency_ms = elapsed * 1000.0,
            "request completed"
        );

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_uuids() {
        let first = RequestId::generate();
        let second = RequestId::generate();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
    }

    #[test]
    fn header_id_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("abc-123"));
        assert_eq!(extract_or_generate_request_id(&headers).as_str(), "abc-123");
    }

    #[test]
    fn empty_header_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(""));
        assert_eq!(extract_or_generate_request_id(&headers).as_str().len(), 36);
    }

    #[test]
    fn query_strings_are_stripped() {
        assert_eq!(normalize_path("/api/v1/search?term=soda"), "/api/v1/search");
        assert_eq!(normalize_path("/health/live"), "/health/live");
    }

    #[test]
    fn status_buckets() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(404), "4xx");
        assert_eq!(status_bucket(503), "5xx");
        assert_eq!(status_bucket(101), "other");
    }
}
