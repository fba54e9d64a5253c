//! OpenStreetMap ingestion.
//!
//! [`MapLoader`] is a small state machine fed one element at a time. It keeps
//! every node position, indexes named nodes for search and queues the node
//! lists of drivable ways. [`MapLoader::finish`] turns the queued ways into
//! graph edges once every node is known, so element order in the input does
//! not matter. [`load_osm`] drives the loader from a PBF file.

use std::collections::HashMap;
use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::{debug, info};

use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::geometry::Coordinate;
use crate::graph::{GraphBuilder, Vertex, VertexId};
use crate::map::MapIndex;
use crate::search::{Location, PrefixIndex};

/// `highway` tag values that produce routable edges.
pub const ALLOWED_HIGHWAYS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "living_street",
    "motorway_link",
    "trunk_link",
    "primary_link",
    "secondary_link",
    "tertiary_link",
];

pub fn is_routable(highway: &str) -> bool {
    ALLOWED_HIGHWAYS.contains(&highway)
}

/// Counters reported once loading finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub nodes: usize,
    pub ways: usize,
    pub routable_ways: usize,
    pub names: usize,
    /// Way references to nodes that were never seen.
    pub missing_refs: usize,
}

/// Streaming builder for a [`MapIndex`].
#[derive(Debug)]
pub struct MapLoader {
    config: MapConfig,
    positions: HashMap<VertexId, Coordinate>,
    ways: Vec<Vec<VertexId>>,
    names: PrefixIndex,
    stats: LoadStats,
}

impl MapLoader {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            positions: HashMap::new(),
            ways: Vec::new(),
            names: PrefixIndex::new(),
            stats: LoadStats::default(),
        }
    }

    /// Record a node. Nodes carrying a name become search records.
    pub fn on_node(&mut self, id: VertexId, lat: f64, lon: f64, name: Option<&str>) {
        self.stats.nodes += 1;
        self.positions.insert(id, Coordinate::new(lat, lon));

        if let Some(name) = name {
            if self.names.insert(Location::new(id, name, lat, lon)) {
                self.stats.names += 1;
            }
        }
    }

    /// Record a way. Returns `true` when its highway type is routable and the
    /// way was queued for the graph.
    pub fn on_way<I>(&mut self, refs: I, highway: Option<&str>) -> bool
    where
        I: IntoIterator<Item = VertexId>,
    {
        self.stats.ways += 1;
        match highway {
            Some(kind) if is_routable(kind) => {
                self.ways.push(refs.into_iter().collect());
                self.stats.routable_ways += 1;
                true
            }
            _ => false,
        }
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Build the graph from the queued ways and assemble the index.
    pub fn finish(mut self) -> Result<MapIndex> {
        let mut builder = GraphBuilder::new();

        for refs in &self.ways {
            let mut previous = None;
            for &id in refs {
                let Some(&position) = self.positions.get(&id) else {
                    // Unknown node: the way is split here.
                    self.stats.missing_refs += 1;
                    previous = None;
                    continue;
                };

                let slot = builder.register(Vertex { id, position });
                if let Some((prev_slot, prev_position)) = previous {
                    if prev_slot != slot {
                        builder.connect(prev_slot, slot, position.distance_to(&prev_position))?;
                    }
                }
                previous = Some((slot, position));
            }
        }

        if self.stats.missing_refs > 0 {
            debug!(
                missing = self.stats.missing_refs,
                "ways referenced unknown nodes"
            );
        }

        let graph = builder.build();
        info!(
            nodes = self.stats.nodes,
            ways = self.stats.ways,
            routable_ways = self.stats.routable_ways,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            names = self.stats.names,
            "map data loaded"
        );

        MapIndex::new(graph, self.names, self.config)
    }
}

/// Load a PBF extract into a [`MapIndex`].
pub fn load_osm(path: &Path, config: &MapConfig) -> Result<MapIndex> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "loading map data");
    let reader = ElementReader::from_path(path)?;
    let mut loader = MapLoader::new(*config);

    reader.for_each(|element| match element {
        Element::Node(node) => {
            let name = find_tag(node.tags(), "name");
            loader.on_node(node.id(), node.lat(), node.lon(), name);
        }
        Element::DenseNode(node) => {
            let name = find_tag(node.tags(), "name");
            loader.on_node(node.id(), node.lat(), node.lon(), name);
        }
        Element::Way(way) => {
            let highway = find_tag(way.tags(), "highway");
            loader.on_way(way.refs(), highway);
        }
        _ => {}
    })?;

    loader.finish()
}

fn find_tag<'a, I>(mut tags: I, key: &str) -> Option<&'a str>
where
    I: Iterator<Item = (&'a str, &'a str)>,
{
    tags.find(|(k, _)| *k == key).map(|(_, value)| value)
}
