#![allow(dead_code)]

use mapquery_lib::{
    BoundingBox, GraphBuilder, Location, MapConfig, MapIndex, PrefixIndex, SpatialGraph, Vertex,
};

/// Root box used by the quadtree scenarios.
pub fn scenario_root() -> BoundingBox {
    BoundingBox::new(37.89, -122.30, 37.82, -122.21)
}

/// A(0,0) - B(1,0) - C(2,0), unit weights.
pub fn line_graph() -> SpatialGraph {
    let mut builder = GraphBuilder::new();
    let a = builder.register(Vertex::new(1, 0.0, 0.0));
    let b = builder.register(Vertex::new(2, 1.0, 0.0));
    let c = builder.register(Vertex::new(3, 2.0, 0.0));
    builder.connect(a, b, 1.0).expect("a-b");
    builder.connect(b, c, 1.0).expect("b-c");
    builder.build()
}

/// `size` x `size` lattice with spacing 0.01 and weights at least the
/// straight-line distance. A few horizontal links are missing so routes bend.
pub fn grid_graph(size: usize) -> SpatialGraph {
    let mut builder = GraphBuilder::new();
    let mut slots = vec![vec![0; size]; size];
    for (row, slot_row) in slots.iter_mut().enumerate() {
        for (col, slot) in slot_row.iter_mut().enumerate() {
            let id = (row * size + col) as i64;
            *slot = builder.register(Vertex::new(id, row as f64 * 0.01, col as f64 * 0.01));
        }
    }

    for row in 0..size {
        for col in 0..size {
            let factor = 1.0 + ((row * 31 + col * 17) % 7) as f64 / 3.0;
            if col + 1 < size && (row * col) % 5 != 3 {
                builder
                    .connect(slots[row][col], slots[row][col + 1], 0.01 * factor)
                    .expect("horizontal link");
            }
            if row + 1 < size {
                builder
                    .connect(slots[row][col], slots[row + 1][col], 0.01 * (factor + 0.5))
                    .expect("vertical link");
            }
        }
    }
    builder.build()
}

/// Two components: {1, 2} and {3, 4}.
pub fn disconnected_graph() -> SpatialGraph {
    let mut builder = GraphBuilder::new();
    let a = builder.register(Vertex::new(1, 0.0, 0.0));
    let b = builder.register(Vertex::new(2, 0.0, 1.0));
    let c = builder.register(Vertex::new(3, 5.0, 5.0));
    let d = builder.register(Vertex::new(4, 5.0, 6.0));
    builder.connect(a, b, 1.0).expect("a-b");
    builder.connect(c, d, 1.0).expect("c-d");
    builder.build()
}

pub fn campus_names() -> PrefixIndex {
    let mut index = PrefixIndex::new();
    let places = [
        (10, "Soda Hall", 37.8756, -122.2588),
        (11, "Sather Gate", 37.8703, -122.2595),
        (12, "Sather Tower", 37.8721, -122.2578),
        (13, "Peet's Coffee & Tea", 37.8794, -122.2690),
        (14, "Peet's Coffee & Tea", 37.8710, -122.2683),
        (15, "Top Dog", 37.8676, -122.2580),
    ];
    for (id, name, lat, lon) in places {
        index.insert(Location::new(id, name, lat, lon));
    }
    index
}

pub fn berkeley_index(graph: SpatialGraph) -> MapIndex {
    MapIndex::new(graph, campus_names(), MapConfig::default()).expect("default config is valid")
}

/// Floyd–Warshall over the adjacency lists: `costs[a][b]` is the cheapest
/// total weight from slot `a` to slot `b`, infinite when unreachable.
pub fn all_pairs_costs(graph: &SpatialGraph) -> Vec<Vec<f64>> {
    let n = graph.vertex_count();
    let mut costs = vec![vec![f64::INFINITY; n]; n];
    for (from, row) in costs.iter_mut().enumerate() {
        row[from] = 0.0;
        for edge in graph.edges(from) {
            row[edge.target] = row[edge.target].min(edge.weight);
        }
    }
    for via in 0..n {
        for from in 0..n {
            for to in 0..n {
                let through = costs[from][via] + costs[via][to];
                if through < costs[from][to] {
                    costs[from][to] = through;
                }
            }
        }
    }
    costs
}
