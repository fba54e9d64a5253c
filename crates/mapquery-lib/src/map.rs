//! The loaded map and the queries it answers.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::MapConfig;
use crate::error::Result;
use crate::geometry::{BoundingBox, Coordinate};
use crate::graph::SpatialGraph;
use crate::quadtree::{QuadTree, TileGrid};
use crate::routing::{plan_route, RoutePlan, RouteRequest};
use crate::search::{Location, PrefixIndex};

/// Viewport to rasterize: a query box and the output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterRequest {
    pub bbox: BoundingBox,
    pub width: f64,
    pub height: f64,
}

impl RasterRequest {
    pub fn new(bbox: BoundingBox, width: f64, height: f64) -> Self {
        Self {
            bbox,
            width,
            height,
        }
    }

    /// Degrees of longitude covered by one output pixel.
    pub fn lon_dpp(&self) -> f64 {
        self.bbox.normalized().width() / self.width
    }
}

/// Tiles a renderer must composite for a [`RasterRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterPlan {
    pub grid: TileGrid,
    /// Size of the composited image in pixels.
    pub raster_width: u32,
    pub raster_height: u32,
    /// False when the request was malformed or fell outside the map.
    pub query_success: bool,
}

/// Answer to a name query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    /// Suggested names for a prefix.
    Names(Vec<String>),
    /// Every record stored under an exact name.
    Locations(Vec<Location>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Names(names) => names.len(),
            SearchResults::Locations(locations) => locations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Road graph, name index and tile tree for one map extract.
///
/// Immutable once built and safe to share between threads.
#[derive(Debug, Clone)]
pub struct MapIndex {
    graph: SpatialGraph,
    names: PrefixIndex,
    tiles: QuadTree,
    config: MapConfig,
}

impl MapIndex {
    pub fn new(graph: SpatialGraph, names: PrefixIndex, config: MapConfig) -> Result<Self> {
        let tiles = QuadTree::from_config(&config)?;
        info!(
            vertices = graph.vertex_count(),
            names = names.len(),
            max_depth = config.max_depth,
            "map index ready"
        );
        Ok(Self {
            graph,
            names,
            tiles,
            config,
        })
    }

    pub fn graph(&self) -> &SpatialGraph {
        &self.graph
    }

    pub fn names(&self) -> &PrefixIndex {
        &self.names
    }

    pub fn tiles(&self) -> &QuadTree {
        &self.tiles
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// A* route between the vertices nearest to the two points.
    pub fn route(
        &self,
        start_lat: f64,
        start_lon: f64,
        end_lat: f64,
        end_lon: f64,
    ) -> Result<RoutePlan> {
        let request = RouteRequest::a_star(
            Coordinate::new(start_lat, start_lon),
            Coordinate::new(end_lat, end_lon),
        );
        self.route_with(&request)
    }

    pub fn route_with(&self, request: &RouteRequest) -> Result<RoutePlan> {
        plan_route(&self.graph, request)
    }

    /// Tiles covering `query` at `lon_dpp` degrees of longitude per pixel.
    pub fn resolve_tiles(&self, query: &BoundingBox, lon_dpp: f64) -> TileGrid {
        self.tiles.resolve_tiles(query, lon_dpp)
    }

    pub fn raster(&self, request: &RasterRequest) -> RasterPlan {
        let query = request.bbox.normalized();
        let well_formed = query.is_finite()
            && request.width.is_finite()
            && request.width > 0.0
            && request.height.is_finite()
            && request.height > 0.0;
        let query_success = well_formed && query.intersects(&self.config.root);

        let grid = self.tiles.resolve_tiles(&query, request.lon_dpp());
        let tile_size = self.tiles.tile_size();
        let raster_width = pixels(grid.cols(), tile_size);
        let raster_height = pixels(grid.rows(), tile_size);

        RasterPlan {
            grid,
            raster_width,
            raster_height,
            query_success,
        }
    }

    /// Prefix suggestions, or every record under the exact name when `exact`.
    pub fn search(&self, raw: &str, exact: bool) -> SearchResults {
        self.search_limited(raw, exact, None)
    }

    /// Like [`MapIndex::search`], keeping at most `limit` names or records.
    pub fn search_limited(&self, raw: &str, exact: bool, limit: Option<usize>) -> SearchResults {
        let limit = limit.unwrap_or(usize::MAX);
        if exact {
            let locations = self
                .names
                .lookup_exact(raw)
                .map(|records| records.iter().take(limit).cloned().collect())
                .unwrap_or_default();
            SearchResults::Locations(locations)
        } else {
            SearchResults::Names(
                self.names
                    .autocomplete(raw)
                    .take(limit)
                    .map(str::to_owned)
                    .collect(),
            )
        }
    }
}

fn pixels(tiles: usize, tile_size: u32) -> u32 {
    u32::try_from(tiles)
        .unwrap_or(u32::MAX)
        .saturating_mul(tile_size)
}
