//! Map extent and tiling configuration.
//!
//! # Environment Variables
//!
//! - `MAPQUERY_ROOT_BBOX`: root box as `ullat,ullon,lrlat,lrlon`
//! - `MAPQUERY_MAX_DEPTH`: deepest quadtree level (default: 7)
//! - `MAPQUERY_TILE_SIZE`: tile edge length in pixels (default: 256)

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

pub const ROOT_BBOX_ENV: &str = "MAPQUERY_ROOT_BBOX";
pub const MAX_DEPTH_ENV: &str = "MAPQUERY_MAX_DEPTH";
pub const TILE_SIZE_ENV: &str = "MAPQUERY_TILE_SIZE";

/// Extent of the bundled Berkeley tile set.
pub const DEFAULT_ROOT: BoundingBox = BoundingBox {
    ul_lat: 37.892195547244356,
    ul_lon: -122.2998046875,
    lr_lat: 37.82280243352756,
    lr_lon: -122.2119140625,
};

pub const DEFAULT_MAX_DEPTH: u8 = 7;
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Configuration shared by the loader, the quadtree and the raster planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Box covered by the root tile.
    pub root: BoundingBox,
    pub max_depth: u8,
    /// Tile edge length in pixels.
    pub tile_size: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT,
            max_depth: DEFAULT_MAX_DEPTH,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl MapConfig {
    /// Defaults overridden by any `MAPQUERY_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MapConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ROOT_BBOX_ENV) {
            config.root = parse_bbox(ROOT_BBOX_ENV, &value)?;
        }
        if let Some(value) = lookup(MAX_DEPTH_ENV) {
            config.max_depth = parse_value(MAX_DEPTH_ENV, &value)?;
        }
        if let Some(value) = lookup(TILE_SIZE_ENV) {
            config.tile_size = parse_value(TILE_SIZE_ENV, &value)?;
        }

        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_root(mut self, root: BoundingBox) -> Self {
        self.root = root;
        self
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_bbox(key: &str, value: &str) -> Result<BoundingBox> {
    let parts = value
        .split(',')
        .map(|part| parse_value::<f64>(key, part))
        .collect::<Result<Vec<_>>>()?;
    match parts.as_slice() {
        [ul_lat, ul_lon, lr_lat, lr_lon] => {
            Ok(BoundingBox::new(*ul_lat, *ul_lon, *lr_lat, *lr_lon))
        }
        _ => Err(invalid(key, value)),
    }
}
