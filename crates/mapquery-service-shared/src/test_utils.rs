//! Test utilities for handler testing.
//!
//! Builds a small in-memory map around the Berkeley campus: a four-vertex
//! street chain, a separate two-vertex street nobody can reach, and a handful
//! of named places.

use std::sync::OnceLock;

use mapquery_lib::{GraphBuilder, Location, MapConfig, PrefixIndex, SpatialGraph, Vertex};

use crate::state::AppState;

/// Known places in the fixture map.
pub mod fixture_places {
    /// Corner of the connected street chain: `(lat, lon)`.
    pub const SODA_HALL: (f64, f64) = (37.8756, -122.2587);
    /// Opposite end of the connected street chain.
    pub const TOP_DOG: (f64, f64) = (37.8740, -122.2587);
    /// On the street that is not connected to the chain.
    pub const ISLAND: (f64, f64) = (37.8600, -122.2300);
}

/// Vertex ids of the connected chain, in route order from Soda Hall.
pub const CHAIN_IDS: [i64; 4] = [101, 102, 103, 104];

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

fn fixture_graph() -> SpatialGraph {
    let chain = [
        Vertex::new(101, 37.8756, -122.2587),
        Vertex::new(102, 37.8756, -122.2570),
        Vertex::new(103, 37.8740, -122.2570),
        Vertex::new(104, 37.8740, -122.2587),
    ];
    let island = [
        Vertex::new(201, 37.8600, -122.2300),
        Vertex::new(202, 37.8602, -122.2298),
    ];

    let mut builder = GraphBuilder::new();
    for street in [&chain[..], &island[..]] {
        let slots: Vec<_> = street.iter().map(|v| builder.register(*v)).collect();
        for (pair, verts) in slots.windows(2).zip(street.windows(2)) {
            let weight = verts[0].position.distance_to(&verts[1].position);
            builder
                .connect(pair[0], pair[1], weight)
                .unwrap_or_else(|e| panic!("fixture edge rejected: {e}"));
        }
    }
    builder.build()
}

fn fixture_names() -> PrefixIndex {
    let mut names = PrefixIndex::new();
    for location in [
        Location::new(101, "Soda Hall", 37.8756, -122.2587),
        Location::new(301, "Sather Gate", 37.8703, -122.2595),
        Location::new(302, "Sather Tower", 37.8721, -122.2578),
        Location::new(303, "Peet's Coffee & Tea", 37.8794, -122.2691),
        Location::new(304, "Peet's Coffee & Tea", 37.8686, -122.2593),
        Location::new(104, "Top Dog", 37.8740, -122.2587),
    ] {
        names.insert(location);
    }
    names
}

/// Shared fixture state, built once per test binary.
///
/// # Panics
///
/// Panics if the fixture map is rejected, which means the fixture itself is
/// broken.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            AppState::from_components(fixture_graph(), fixture_names(), MapConfig::default())
                .unwrap_or_else(|e| panic!("failed to build fixture map: {e}"))
        })
        .clone()
}

/// Unique request ID for tests.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
