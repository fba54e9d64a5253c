//! MapQuery library entry points.
//!
//! This crate owns the three query engines behind the map service: a spatial
//! road graph with an A* router, a quadtree that selects pre-rendered tiles for
//! a viewport, and a prefix index over place names. It also ships the loader
//! that builds all three from an OpenStreetMap extract. Higher-level consumers
//! (CLI, HTTP service) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod map;
pub mod osm;
pub mod path;
pub mod quadtree;
pub mod routing;
pub mod search;

pub use config::MapConfig;
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Coordinate};
pub use graph::{Edge, GraphBuilder, SpatialGraph, Vertex, VertexId, VertexSlot};
pub use map::{MapIndex, RasterPlan, RasterRequest, SearchResults};
pub use osm::{load_osm, MapLoader};
pub use path::{find_route_a_star, find_route_dijkstra, route_distance};
pub use quadtree::{Quadrant, QuadTree, TileGrid, TileNode, ROOT_TILE};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};
pub use search::{normalize, Autocomplete, Location, PrefixIndex};
