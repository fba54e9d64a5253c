//! Immutable road graph over geographic vertices.
//!
//! Vertices live in an arena and are addressed by a dense [`VertexSlot`]; a
//! coordinate lookup maps each distinct position to its slot. Construction goes
//! through [`GraphBuilder`], which is consumed into a read-only [`SpatialGraph`]
//! that is cheap to clone and safe to share between threads.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::Coordinate;

/// Identifier assigned to a vertex by the loader (the OSM node id).
pub type VertexId = i64;

/// Dense index of a vertex inside the graph arena.
pub type VertexSlot = usize;

/// A graph vertex: a stable identifier and its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Coordinate,
}

impl Vertex {
    pub fn new(id: VertexId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            position: Coordinate::new(lat, lon),
        }
    }
}

/// Directed half of a logical connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: VertexSlot,
    pub weight: f64,
}

/// Hashable identity of a coordinate. Vertices are deduplicated by position,
/// not by identifier, because several ways may visit the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordinateKey(u64, u64);

impl From<&Coordinate> for CoordinateKey {
    fn from(value: &Coordinate) -> Self {
        // Adding zero folds -0.0 into 0.0 so both hash identically.
        Self((value.lat + 0.0).to_bits(), (value.lon + 0.0).to_bits())
    }
}

/// Mutable construction phase of a [`SpatialGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    slots: HashMap<CoordinateKey, VertexSlot>,
    adjacency: Vec<Vec<Edge>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex and return its slot.
    ///
    /// A vertex at an already registered coordinate is not added again; the
    /// existing slot (and the identifier seen first) is returned instead.
    pub fn register(&mut self, vertex: Vertex) -> VertexSlot {
        let key = CoordinateKey::from(&vertex.position);
        if let Some(&slot) = self.slots.get(&key) {
            return slot;
        }
        let slot = self.vertices.len();
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        self.slots.insert(key, slot);
        slot
    }

    /// Slot previously assigned to `position`, if any.
    pub fn slot_of(&self, position: &Coordinate) -> Option<VertexSlot> {
        self.slots.get(&CoordinateKey::from(position)).copied()
    }

    /// Connect two registered coordinates in both directions.
    ///
    /// Parallel edges are not deduplicated: calling this twice for the same
    /// pair stores two connections.
    pub fn add_edge(&mut self, from: Coordinate, to: Coordinate, weight: f64) -> Result<()> {
        let from_slot = self.slot_of(&from).ok_or(Error::VertexNotFound {
            lat: from.lat,
            lon: from.lon,
        })?;
        let to_slot = self.slot_of(&to).ok_or(Error::VertexNotFound {
            lat: to.lat,
            lon: to.lon,
        })?;
        self.connect(from_slot, to_slot, weight)
    }

    /// Connect two slots in both directions.
    pub fn connect(&mut self, from: VertexSlot, to: VertexSlot, weight: f64) -> Result<()> {
        if weight.is_nan() || weight < 0.0 {
            return Err(Error::InvalidEdgeWeight { weight });
        }
        for slot in [from, to] {
            if slot >= self.vertices.len() {
                return Err(Error::UnknownVertexSlot { slot });
            }
        }
        self.adjacency[from].push(Edge { target: to, weight });
        self.adjacency[to].push(Edge {
            target: from,
            weight,
        });
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Freeze the builder into a read-only graph.
    pub fn build(self) -> SpatialGraph {
        let graph = SpatialGraph {
            vertices: Arc::new(self.vertices),
            slots: Arc::new(self.slots),
            adjacency: Arc::new(self.adjacency),
        };
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "spatial graph built"
        );
        graph
    }
}

/// Graph structure used by the routing algorithms.
#[derive(Debug, Clone, Default)]
pub struct SpatialGraph {
    vertices: Arc<Vec<Vertex>>,
    slots: Arc<HashMap<CoordinateKey, VertexSlot>>,
    adjacency: Arc<Vec<Vec<Edge>>>,
}

impl SpatialGraph {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of logical (undirected) connections.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, slot: VertexSlot) -> Option<&Vertex> {
        self.vertices.get(slot)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn slot_of(&self, position: &Coordinate) -> Option<VertexSlot> {
        self.slots.get(&CoordinateKey::from(position)).copied()
    }

    /// Outgoing edges of a slot; empty for unknown slots.
    pub fn edges(&self, slot: VertexSlot) -> &[Edge] {
        self.adjacency
            .get(slot)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Vertices one edge away from `position`, in insertion order.
    pub fn neighbors(&self, position: &Coordinate) -> Result<Vec<Vertex>> {
        let slot = self.slot_of(position).ok_or(Error::VertexNotFound {
            lat: position.lat,
            lon: position.lon,
        })?;
        Ok(self
            .edges(slot)
            .iter()
            .filter_map(|edge| self.vertices.get(edge.target).copied())
            .collect())
    }

    /// Weight of the first `from -> to` edge, if one exists.
    pub fn edge_weight(&self, from: &Coordinate, to: &Coordinate) -> Option<f64> {
        let from = self.slot_of(from)?;
        let to = self.slot_of(to)?;
        self.edge_weight_between(from, to)
    }

    /// Slot-addressed variant of [`SpatialGraph::edge_weight`].
    pub fn edge_weight_between(&self, from: VertexSlot, to: VertexSlot) -> Option<f64> {
        self.edges(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.weight)
    }

    /// Slot of the vertex closest to `point`.
    ///
    /// Linear scan in arena order; on equal distances the vertex seen first wins.
    pub fn nearest_vertex(&self, point: &Coordinate) -> Option<VertexSlot> {
        let mut best: Option<(VertexSlot, f64)> = None;
        for (slot, vertex) in self.vertices.iter().enumerate() {
            let distance = vertex.position.distance_to(point);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((slot, distance)),
            }
        }
        best.map(|(slot, _)| slot)
    }
}
