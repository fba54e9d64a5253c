//! Planar geometry over latitude/longitude pairs.
//!
//! Distances are Euclidean in degree space. That is the metric used for edge
//! weights and for the A* heuristic, so the heuristic stays admissible and
//! consistent with respect to the graph it guides.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A geographic point. Longitude is the x-axis and latitude the y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Calculate the Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Axis-aligned box described by its upper-left and lower-right corners.
///
/// A well-formed box has `ul_lat >= lr_lat` and `ul_lon <= lr_lon`. Containment
/// is closed on all four sides, so a point on a shared edge belongs to every box
/// touching that edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub ul_lat: f64,
    pub ul_lon: f64,
    pub lr_lat: f64,
    pub lr_lon: f64,
}

impl BoundingBox {
    pub fn new(ul_lat: f64, ul_lon: f64, lr_lat: f64, lr_lon: f64) -> Self {
        Self {
            ul_lat,
            ul_lon,
            lr_lat,
            lr_lon,
        }
    }

    pub fn from_corners(upper_left: Coordinate, lower_right: Coordinate) -> Self {
        Self::new(
            upper_left.lat,
            upper_left.lon,
            lower_right.lat,
            lower_right.lon,
        )
    }

    pub fn upper_left(&self) -> Coordinate {
        Coordinate::new(self.ul_lat, self.ul_lon)
    }

    pub fn lower_right(&self) -> Coordinate {
        Coordinate::new(self.lr_lat, self.lr_lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.ul_lat + self.lr_lat) / 2.0,
            (self.ul_lon + self.lr_lon) / 2.0,
        )
    }

    /// Longitudinal span in degrees.
    pub fn width(&self) -> f64 {
        self.lr_lon - self.ul_lon
    }

    /// Latitudinal span in degrees.
    pub fn height(&self) -> f64 {
        self.ul_lat - self.lr_lat
    }

    pub fn is_finite(&self) -> bool {
        self.upper_left().is_finite() && self.lower_right().is_finite()
    }

    /// True when the box has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width().abs() <= f64::EPSILON || self.height().abs() <= f64::EPSILON
    }

    /// Closed containment test.
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.lon >= self.ul_lon
            && point.lon <= self.lr_lon
            && point.lat >= self.lr_lat
            && point.lat <= self.ul_lat
    }

    /// True when the two boxes share at least one point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.ul_lon <= other.lr_lon
            && other.ul_lon <= self.lr_lon
            && self.lr_lat <= other.ul_lat
            && other.lr_lat <= self.ul_lat
    }

    /// Reorder the corners so the upper-left corner is the north-west one.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.ul_lat.max(self.lr_lat),
            self.ul_lon.min(self.lr_lon),
            self.ul_lat.min(self.lr_lat),
            self.ul_lon.max(self.lr_lon),
        )
    }

    /// Move a point onto the nearest position inside this box.
    pub fn clamp(&self, point: Coordinate) -> Coordinate {
        Coordinate::new(
            point.lat.clamp(self.lr_lat, self.ul_lat),
            point.lon.clamp(self.ul_lon, self.lr_lon),
        )
    }

    /// Split into four equal-area quadrants ordered upper-left, upper-right,
    /// lower-left, lower-right.
    pub fn split(&self) -> [BoundingBox; 4] {
        let mid = self.center();
        [
            Self::new(self.ul_lat, self.ul_lon, mid.lat, mid.lon),
            Self::new(self.ul_lat, mid.lon, mid.lat, self.lr_lon),
            Self::new(mid.lat, self.ul_lon, self.lr_lat, mid.lon),
            Self::new(mid.lat, mid.lon, self.lr_lat, self.lr_lon),
        ]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.upper_left(), self.lower_right())
    }
}
