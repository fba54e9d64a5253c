use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::geometry::Coordinate;
use crate::graph::{SpatialGraph, VertexSlot};

/// Find the least-cost route between two slots with A* search guided by the
/// straight-line distance to the goal.
pub fn find_route_a_star(
    graph: &SpatialGraph,
    start: VertexSlot,
    goal: VertexSlot,
) -> Option<Vec<VertexSlot>> {
    SearchState::new(graph, goal, Heuristic::StraightLine)?.run(start)
}

/// Run Dijkstra's algorithm: the same search with a zero heuristic.
pub fn find_route_dijkstra(
    graph: &SpatialGraph,
    start: VertexSlot,
    goal: VertexSlot,
) -> Option<Vec<VertexSlot>> {
    SearchState::new(graph, goal, Heuristic::Zero)?.run(start)
}

/// Total weight of a slot sequence, taking the cheapest edge between each
/// consecutive pair. `None` when two consecutive slots are not adjacent.
pub fn route_distance(graph: &SpatialGraph, steps: &[VertexSlot]) -> Option<f64> {
    steps.windows(2).try_fold(0.0, |total, pair| {
        graph
            .edges(pair[0])
            .iter()
            .filter(|edge| edge.target == pair[1])
            .map(|edge| edge.weight)
            .min_by(f64::total_cmp)
            .map(|weight| total + weight)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heuristic {
    StraightLine,
    Zero,
}

/// Search state owned by a single route query. Nothing here outlives the call,
/// so concurrent queries never share a frontier or cost table.
struct SearchState<'g> {
    graph: &'g SpatialGraph,
    goal: VertexSlot,
    goal_position: Coordinate,
    heuristic: Heuristic,
    frontier: BinaryHeap<FrontierEntry>,
    cost_so_far: HashMap<VertexSlot, f64>,
    parents: HashMap<VertexSlot, VertexSlot>,
    visited: HashSet<VertexSlot>,
}

impl<'g> SearchState<'g> {
    fn new(graph: &'g SpatialGraph, goal: VertexSlot, heuristic: Heuristic) -> Option<Self> {
        let goal_position = graph.vertex(goal)?.position;
        Some(Self {
            graph,
            goal,
            goal_position,
            heuristic,
            frontier: BinaryHeap::new(),
            cost_so_far: HashMap::new(),
            parents: HashMap::new(),
            visited: HashSet::new(),
        })
    }

    fn estimate(&self, slot: VertexSlot) -> f64 {
        match self.heuristic {
            Heuristic::Zero => 0.0,
            Heuristic::StraightLine => self
                .graph
                .vertex(slot)
                .map(|vertex| vertex.position.distance_to(&self.goal_position))
                .unwrap_or(0.0),
        }
    }

    fn run(mut self, start: VertexSlot) -> Option<Vec<VertexSlot>> {
        self.graph.vertex(start)?;
        if start == self.goal {
            return Some(vec![start]);
        }

        self.cost_so_far.insert(start, 0.0);
        self.frontier
            .push(FrontierEntry::new(start, 0.0, self.estimate(start)));

        while let Some(entry) = self.frontier.pop() {
            // Stale duplicates of an already expanded slot.
            if !self.visited.insert(entry.slot) {
                continue;
            }
            if entry.slot == self.goal {
                return Some(self.reconstruct(start));
            }

            let current_cost = entry.cost.0;
            for edge in self.graph.edges(entry.slot) {
                let next = edge.target;
                if self.visited.contains(&next) {
                    continue;
                }
                let candidate = current_cost + edge.weight;
                let known = self.cost_so_far.get(&next).copied().unwrap_or(f64::INFINITY);
                if candidate < known {
                    self.cost_so_far.insert(next, candidate);
                    self.parents.insert(next, entry.slot);
                    let heuristic = self.estimate(next);
                    self.frontier
                        .push(FrontierEntry::new(next, candidate, heuristic));
                }
            }
        }

        None
    }

    fn reconstruct(&self, start: VertexSlot) -> Vec<VertexSlot> {
        let mut path = vec![self.goal];
        let mut current = self.goal;
        while current != start {
            match self.parents.get(&current) {
                Some(&parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Priority(f64);

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier item carrying its own priority, so ordering never consults
/// tables outside the entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    slot: VertexSlot,
    cost: Priority,
    estimate: Priority,
}

impl FrontierEntry {
    fn new(slot: VertexSlot, cost: f64, heuristic: f64) -> Self {
        Self {
            slot,
            cost: Priority(cost),
            estimate: Priority(cost + heuristic),
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest estimate first.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
