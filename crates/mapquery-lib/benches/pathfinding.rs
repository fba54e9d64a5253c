use criterion::{criterion_group, criterion_main, Criterion};
use mapquery_lib::{
    plan_route, BoundingBox, Coordinate, GraphBuilder, Location, MapConfig, PrefixIndex, QuadTree,
    RouteAlgorithm, RouteRequest, SpatialGraph, Vertex,
};
use once_cell::sync::Lazy;
use std::hint::black_box;

const GRID: usize = 60;
const SPACING: f64 = 0.001;

static GRAPH: Lazy<SpatialGraph> = Lazy::new(|| {
    let mut builder = GraphBuilder::new();
    for row in 0..GRID {
        for col in 0..GRID {
            let id = (row * GRID + col) as i64;
            builder.register(Vertex::new(id, row as f64 * SPACING, col as f64 * SPACING));
        }
    }
    for row in 0..GRID {
        for col in 0..GRID {
            let slot = row * GRID + col;
            if col + 1 < GRID {
                builder.connect(slot, slot + 1, SPACING).expect("horizontal link");
            }
            if row + 1 < GRID {
                builder.connect(slot, slot + GRID, SPACING).expect("vertical link");
            }
        }
    }
    builder.build()
});

static FAR_CORNER: Lazy<Coordinate> =
    Lazy::new(|| Coordinate::new((GRID - 1) as f64 * SPACING, (GRID - 1) as f64 * SPACING));

static TREE: Lazy<QuadTree> =
    Lazy::new(|| QuadTree::from_config(&MapConfig::default()).expect("default config is valid"));

static NAMES: Lazy<PrefixIndex> = Lazy::new(|| {
    let mut index = PrefixIndex::new();
    for street in 0..2_000 {
        index.insert(Location::new(
            street,
            format!("Street {} {}", street % 26, street),
            0.0,
            0.0,
        ));
    }
    index
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;
    let origin = Coordinate::new(0.0, 0.0);

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        let request =
            RouteRequest::a_star(origin, *FAR_CORNER).with_algorithm(RouteAlgorithm::Dijkstra);
        b.iter(|| {
            let plan = plan_route(graph, &request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("astar_grid_corner_to_corner", |b| {
        let request = RouteRequest::a_star(origin, *FAR_CORNER);
        b.iter(|| {
            let plan = plan_route(graph, &request).expect("route exists");
            black_box(plan.distance)
        });
    });
}

fn benchmark_tiles(c: &mut Criterion) {
    let tree = &*TREE;
    let viewport = BoundingBox::new(37.87655, -122.241632, 37.87548, -122.24053);

    c.bench_function("resolve_tiles_depth_seven", |b| {
        b.iter(|| black_box(tree.resolve_tiles(&viewport, 1.2e-6).tiles.len()))
    });
}

fn benchmark_search(c: &mut Criterion) {
    let names = &*NAMES;

    c.bench_function("autocomplete_take_ten", |b| {
        b.iter(|| black_box(names.autocomplete_limit("street", 10)))
    });
}

criterion_group!(benches, benchmark_pathfinding, benchmark_tiles, benchmark_search);
criterion_main!(benches);
