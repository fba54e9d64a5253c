//! Query-string types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use mapquery_lib::{BoundingBox, Coordinate, RasterRequest, RouteAlgorithm, RouteRequest};

use crate::ProblemDetails;

/// Upper bound for the `limit` parameter of `/api/v1/search`.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    /// Validate the request; `request_id` populates the problem's `instance`.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require_finite(
    fields: &[(&str, f64)],
    request_id: &str,
) -> Result<(), Box<ProblemDetails>> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(Box::new(ProblemDetails::bad_request(
            format!("The '{name}' parameter must be a finite number"),
            request_id,
        ))),
        None => Ok(()),
    }
}

/// `GET /api/v1/route` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuery {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    #[serde(default)]
    pub algorithm: RouteAlgorithm,
}

impl RouteQuery {
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::a_star(
            Coordinate::new(self.start_lat, self.start_lon),
            Coordinate::new(self.end_lat, self.end_lon),
        )
        .with_algorithm(self.algorithm)
    }
}

impl Validate for RouteQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_finite(
            &[
                ("start_lat", self.start_lat),
                ("start_lon", self.start_lon),
                ("end_lat", self.end_lat),
                ("end_lon", self.end_lon),
            ],
            request_id,
        )
    }
}

/// `GET /api/v1/raster` parameters: the viewport corners and its pixel size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterQuery {
    pub ullat: f64,
    pub ullon: f64,
    pub lrlat: f64,
    pub lrlon: f64,
    pub w: f64,
    pub h: f64,
}

impl RasterQuery {
    pub fn to_request(&self) -> RasterRequest {
        RasterRequest::new(
            BoundingBox::new(self.ullat, self.ullon, self.lrlat, self.lrlon),
            self.w,
            self.h,
        )
    }
}

impl Validate for RasterQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_finite(
            &[
                ("ullat", self.ullat),
                ("ullon", self.ullon),
                ("lrlat", self.lrlat),
                ("lrlon", self.lrlon),
                ("w", self.w),
                ("h", self.h),
            ],
            request_id,
        )?;

        if self.w <= 0.0 || self.h <= 0.0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'w' and 'h' parameters must be positive",
                request_id,
            )));
        }

        Ok(())
    }
}

/// `GET /api/v1/search` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Raw search term; an empty term yields an empty result.
    #[serde(default)]
    pub term: String,

    /// Return full location records for an exact match instead of prefix
    /// suggestions.
    #[serde(default)]
    pub full: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Validate for SearchQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        match self.limit {
            Some(0) => Err(Box::new(ProblemDetails::bad_request(
                "The 'limit' parameter must be at least 1",
                request_id,
            ))),
            Some(limit) if limit > MAX_SEARCH_LIMIT => {
                Err(Box::new(ProblemDetails::bad_request(
                    format!("The 'limit' parameter cannot exceed {MAX_SEARCH_LIMIT}"),
                    request_id,
                )))
            }
            _ => Ok(()),
        }
    }
}
