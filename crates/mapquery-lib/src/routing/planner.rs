//! Route planning strategies.
//!
//! Each algorithm sits behind the [`RoutePlanner`] trait so `plan_route` can
//! pick one at runtime without knowing how it searches.

use crate::graph::{SpatialGraph, VertexSlot};
use crate::path::{find_route_a_star, find_route_dijkstra};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search the graph, returning the slots from `start` to `goal` inclusive.
    fn find_path(
        &self,
        graph: &SpatialGraph,
        start: VertexSlot,
        goal: VertexSlot,
    ) -> Option<Vec<VertexSlot>>;
}

/// Uniform-cost search. Used as the correctness baseline for A*.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &SpatialGraph,
        start: VertexSlot,
        goal: VertexSlot,
    ) -> Option<Vec<VertexSlot>> {
        find_route_dijkstra(graph, start, goal)
    }
}

/// A* guided by straight-line distance to the goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &SpatialGraph,
        start: VertexSlot,
        goal: VertexSlot,
    ) -> Option<Vec<VertexSlot>> {
        find_route_a_star(graph, start, goal)
    }
}

/// Pick the planner implementing `algorithm`.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
