use std::path::PathBuf;

use thiserror::Error;

use crate::graph::VertexId;

/// Convenient result alias for the MapQuery library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Map extract could not be located at the resolved path.
    #[error("map data not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when a coordinate was never registered as a graph vertex.
    #[error("no vertex registered at ({lat}, {lon})")]
    VertexNotFound { lat: f64, lon: f64 },

    /// Raised when a vertex slot is outside the graph arena.
    #[error("vertex slot {slot} is not part of the graph")]
    UnknownVertexSlot { slot: usize },

    /// Raised when an edge weight is negative or not a number.
    #[error("edge weight must be a non-negative number, got {weight}")]
    InvalidEdgeWeight { weight: f64 },

    /// Raised when the search frontier empties before reaching the goal.
    #[error("no route found between vertex {start} and vertex {goal}")]
    NoRouteFound { start: VertexId, goal: VertexId },

    /// Raised when routing against a graph without any vertices.
    #[error("the road graph has no vertices")]
    EmptyGraph,

    /// Raised when a quadtree root box cannot be subdivided.
    #[error("invalid bounding box: {reason}")]
    InvalidBoundingBox { reason: String },

    /// Raised when a quadtree is built deeper than the supported ceiling.
    #[error("quadtree depth {depth} exceeds the supported maximum of {max}")]
    UnsupportedDepth { depth: u8, max: u8 },

    /// Raised when configuration values cannot be parsed.
    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    /// Wrapper for OpenStreetMap PBF decoding errors.
    #[error(transparent)]
    Osm(#[from] osmpbf::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
