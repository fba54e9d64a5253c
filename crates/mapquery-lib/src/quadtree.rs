//! Quadtree over the map extent used to pick pre-rendered tiles.
//!
//! The tree is fully materialized at construction: every node above the
//! maximum depth has exactly four children that partition its box into equal
//! quadrants. Tile names encode the path from the root, one digit per level
//! (`1` upper-left, `2` upper-right, `3` lower-left, `4` lower-right), so the
//! depth-2 tile in the north-east corner of the north-west quadrant is `"12"`.

use serde::Serialize;
use tracing::debug;

use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Coordinate};

/// Name of the depth-0 tile.
pub const ROOT_TILE: &str = "root";

/// Deepest tree that may be built. Node count grows as 4^depth.
pub const MAX_SUPPORTED_DEPTH: u8 = 10;

/// One of the four children of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// Evaluation order used when a point lies on a shared edge.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Digit appended to the parent's tile name.
    pub fn digit(self) -> char {
        match self {
            Quadrant::UpperLeft => '1',
            Quadrant::UpperRight => '2',
            Quadrant::LowerLeft => '3',
            Quadrant::LowerRight => '4',
        }
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Quadrant::UpperLeft),
            '2' => Some(Quadrant::UpperRight),
            '3' => Some(Quadrant::LowerLeft),
            '4' => Some(Quadrant::LowerRight),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Quadrant::UpperLeft => 0,
            Quadrant::UpperRight => 1,
            Quadrant::LowerLeft => 2,
            Quadrant::LowerRight => 3,
        }
    }

    /// Quadrant of `bounds` facing `point`, used when no child contains it.
    fn toward(bounds: &BoundingBox, point: &Coordinate) -> Self {
        let mid = bounds.center();
        let north = point.lat >= mid.lat || point.lat.is_nan();
        let west = point.lon <= mid.lon || point.lon.is_nan();
        match (north, west) {
            (true, true) => Quadrant::UpperLeft,
            (true, false) => Quadrant::UpperRight,
            (false, true) => Quadrant::LowerLeft,
            (false, false) => Quadrant::LowerRight,
        }
    }
}

/// A tile in the quadtree.
#[derive(Debug, Clone)]
pub struct TileNode {
    name: String,
    bounds: BoundingBox,
    depth: u8,
    children: Option<Box<[TileNode; 4]>>,
}

impl TileNode {
    fn build(name: String, bounds: BoundingBox, depth: u8, max_depth: u8) -> Self {
        let children = (depth < max_depth).then(|| {
            let quadrants = bounds.split();
            Box::new(Quadrant::ALL.map(|quadrant| {
                TileNode::build(
                    child_name(&name, quadrant),
                    quadrants[quadrant.index()],
                    depth + 1,
                    max_depth,
                )
            }))
        });

        Self {
            name,
            bounds,
            depth,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<&[TileNode; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&TileNode> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// The child containing `point`, first match in [`Quadrant::ALL`] order.
    fn descend(&self, point: &Coordinate) -> Option<&TileNode> {
        let children = self.children()?;
        children
            .iter()
            .find(|child| child.bounds.contains(point))
            .or_else(|| Some(&children[Quadrant::toward(&self.bounds, point).index()]))
    }
}

fn child_name(parent: &str, quadrant: Quadrant) -> String {
    if parent == ROOT_TILE {
        quadrant.digit().to_string()
    } else {
        let mut name = String::with_capacity(parent.len() + 1);
        name.push_str(parent);
        name.push(quadrant.digit());
        name
    }
}

/// Tiles covering a query box, in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileGrid {
    pub tiles: Vec<Vec<String>>,
    /// Bounds of the whole grid, snapped to tile edges.
    pub bounds: BoundingBox,
    pub depth: u8,
    /// The requested resolution needed a deeper tree than was built.
    pub clamped: bool,
    /// The query box had zero width or height.
    pub degenerate: bool,
}

impl TileGrid {
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    /// Tile file names with the given extension, e.g. `"12.png"`.
    pub fn file_names(&self, extension: &str) -> Vec<Vec<String>> {
        self.tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| format!("{tile}.{extension}"))
                    .collect()
            })
            .collect()
    }
}

/// Fixed-depth quadtree over the map's root bounding box.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: TileNode,
    max_depth: u8,
    tile_size: u32,
}

impl QuadTree {
    /// Build the full tree down to `max_depth`.
    pub fn new(root: BoundingBox, max_depth: u8, tile_size: u32) -> Result<Self> {
        validate_root(&root)?;
        if max_depth > MAX_SUPPORTED_DEPTH {
            return Err(Error::UnsupportedDepth {
                depth: max_depth,
                max: MAX_SUPPORTED_DEPTH,
            });
        }
        if tile_size == 0 {
            return Err(Error::InvalidConfig {
                key: "tile_size".to_string(),
                value: tile_size.to_string(),
            });
        }

        let root = TileNode::build(ROOT_TILE.to_string(), root, 0, max_depth);
        debug!(max_depth, tile_size, root = %root.bounds, "quadtree built");

        Ok(Self {
            root,
            max_depth,
            tile_size,
        })
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::new(config.root, config.max_depth, config.tile_size)
    }

    pub fn root(&self) -> &TileNode {
        &self.root
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Edge length of a tile image in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Look a tile up by name.
    pub fn tile(&self, name: &str) -> Option<&TileNode> {
        if name == ROOT_TILE {
            return Some(&self.root);
        }
        if name.is_empty() {
            return None;
        }
        name.chars().try_fold(&self.root, |node, digit| {
            Quadrant::from_digit(digit).and_then(|quadrant| node.child(quadrant))
        })
    }

    /// Shallowest depth whose tiles resolve at least `lon_dpp` degrees of
    /// longitude per pixel, capped at the tree's depth.
    pub fn depth_for(&self, lon_dpp: f64) -> u8 {
        self.choose_depth(lon_dpp).0
    }

    fn choose_depth(&self, lon_dpp: f64) -> (u8, bool) {
        let mut depth = 0;
        let mut tile_dpp = self.root.bounds.width() / f64::from(self.tile_size);
        while depth < self.max_depth && tile_dpp > lon_dpp {
            depth += 1;
            tile_dpp /= 2.0;
        }
        (depth, tile_dpp > lon_dpp)
    }

    /// Resolve the tiles covering `query` at the resolution `lon_dpp`.
    pub fn resolve_tiles(&self, query: &BoundingBox, lon_dpp: f64) -> TileGrid {
        let (depth, clamped) = self.choose_depth(lon_dpp);
        let mut grid = self.resolve_at_depth(query, depth);
        grid.clamped |= clamped;
        grid
    }

    /// Resolve the tiles covering `query` at a fixed depth. Depths beyond the
    /// tree are clamped.
    pub fn resolve_at_depth(&self, query: &BoundingBox, depth: u8) -> TileGrid {
        let clamped = depth > self.max_depth;
        let depth = depth.min(self.max_depth);
        let query = query.normalized();
        let degenerate = query.is_degenerate();

        if depth == 0 {
            return TileGrid {
                tiles: vec![vec![ROOT_TILE.to_string()]],
                bounds: self.root.bounds,
                depth,
                clamped,
                degenerate,
            };
        }

        let root = &self.root.bounds;
        let upper_left = self.locate(&root.clamp(query.upper_left()), depth);
        let lower_right = self.locate(&root.clamp(query.lower_right()), depth);

        let scale = f64::from(1u32 << depth);
        let tile_width = root.width() / scale;
        let tile_height = root.height() / scale;

        let cols = span(lower_right.bounds.lr_lon - upper_left.bounds.ul_lon, tile_width);
        let rows = span(upper_left.bounds.ul_lat - lower_right.bounds.lr_lat, tile_height);

        let origin = upper_left.bounds.upper_left();
        let tiles = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let sample = Coordinate::new(
                            origin.lat - (row as f64 + 0.5) * tile_height,
                            origin.lon + (col as f64 + 0.5) * tile_width,
                        );
                        self.locate(&sample, depth).name.clone()
                    })
                    .collect()
            })
            .collect();

        let bounds = BoundingBox::new(
            origin.lat,
            origin.lon,
            origin.lat - rows as f64 * tile_height,
            origin.lon + cols as f64 * tile_width,
        );

        debug!(depth, rows, cols, clamped, degenerate, "tiles resolved");

        TileGrid {
            tiles,
            bounds,
            depth,
            clamped,
            degenerate,
        }
    }

    /// Descend from the root to the tile at `depth` containing `point`.
    fn locate(&self, point: &Coordinate, depth: u8) -> &TileNode {
        let mut node = &self.root;
        while node.depth < depth {
            match node.descend(point) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }
}

/// Whole tiles spanned by `extent`, never fewer than one.
fn span(extent: f64, tile: f64) -> usize {
    let count = (extent / tile).round();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

fn validate_root(root: &BoundingBox) -> Result<()> {
    let reason = if !root.is_finite() {
        "corners must be finite"
    } else if root.ul_lat <= root.lr_lat {
        "upper-left latitude must be north of lower-right latitude"
    } else if root.ul_lon >= root.lr_lon {
        "upper-left longitude must be west of lower-right longitude"
    } else {
        return Ok(());
    };
    Err(Error::InvalidBoundingBox {
        reason: reason.to_string(),
    })
}
