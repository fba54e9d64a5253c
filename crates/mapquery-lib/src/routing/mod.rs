//! Route planning between arbitrary coordinates.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - Start/goal coordinates plus the algorithm to use
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! Both endpoints are snapped to the nearest graph vertex before searching.
//! Snapping is a linear scan over every vertex; on equal distances the vertex
//! registered first wins.
//!
//! # Example
//!
//! ```ignore
//! use mapquery_lib::{plan_route, Coordinate, RouteRequest};
//!
//! let request = RouteRequest::a_star(
//!     Coordinate::new(37.8719, -122.2585),
//!     Coordinate::new(37.8757, -122.2588),
//! );
//! let plan = plan_route(&graph, &request)?;
//! println!("Route: {} hops", plan.hop_count());
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::Coordinate;
use crate::graph::{SpatialGraph, VertexId, VertexSlot};
use crate::path::route_distance;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (uniform cost).
    Dijkstra,
    /// A* search guided by straight-line distance.
    #[default]
    #[serde(alias = "astar")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown routing algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub goal: Coordinate,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Convenience constructor for A* routes.
    pub fn a_star(start: Coordinate, goal: Coordinate) -> Self {
        Self {
            start,
            goal,
            algorithm: RouteAlgorithm::AStar,
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: VertexId,
    pub goal: VertexId,
    /// Vertex identifiers from start to goal inclusive.
    pub steps: Vec<VertexId>,
    /// Positions matching `steps`, for drawing the route.
    pub coordinates: Vec<Coordinate>,
    /// Sum of edge weights along the route.
    pub distance: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route between the vertices nearest to the request's endpoints.
pub fn plan_route(graph: &SpatialGraph, request: &RouteRequest) -> Result<RoutePlan> {
    let start = graph
        .nearest_vertex(&request.start)
        .ok_or(Error::EmptyGraph)?;
    let goal = graph
        .nearest_vertex(&request.goal)
        .ok_or(Error::EmptyGraph)?;

    let planner = select_planner(request.algorithm);
    let not_found = || Error::NoRouteFound {
        start: vertex_id(graph, start),
        goal: vertex_id(graph, goal),
    };

    let slots = planner.find_path(graph, start, goal).ok_or_else(not_found)?;
    let distance = route_distance(graph, &slots).ok_or_else(not_found)?;

    let (steps, coordinates) = slots
        .iter()
        .filter_map(|&slot| graph.vertex(slot))
        .map(|vertex| (vertex.id, vertex.position))
        .unzip();

    let plan = RoutePlan {
        algorithm: planner.algorithm(),
        start: vertex_id(graph, start),
        goal: vertex_id(graph, goal),
        steps,
        coordinates,
        distance,
    };

    debug!(
        algorithm = %plan.algorithm,
        hops = plan.hop_count(),
        distance = plan.distance,
        "route planned"
    );

    Ok(plan)
}

fn vertex_id(graph: &SpatialGraph, slot: VertexSlot) -> VertexId {
    graph.vertex(slot).map(|vertex| vertex.id).unwrap_or_default()
}
