use mapquery_lib::{Coordinate, Error, MapConfig, MapLoader};

fn campus_loader() -> MapLoader {
    let mut loader = MapLoader::new(MapConfig::default());
    loader.on_node(1, 37.870, -122.260, None);
    loader.on_node(2, 37.871, -122.260, Some("Sather Gate"));
    loader.on_node(3, 37.872, -122.260, None);
    loader.on_node(4, 37.872, -122.259, Some("Soda Hall"));
    loader
}

#[test]
fn routable_ways_become_edges() {
    let mut loader = campus_loader();
    loader.on_way([1, 2, 3], Some("residential"));
    loader.on_way([3, 4], Some("footway"));

    let map = loader.finish().expect("map builds");
    assert_eq!(map.graph().vertex_count(), 3, "footway nodes are not vertices");
    assert_eq!(map.graph().edge_count(), 2);

    let plan = map
        .route(37.870, -122.260, 37.872, -122.260)
        .expect("route along the residential way");
    assert_eq!(plan.steps, vec![1, 2, 3]);
}

#[test]
fn unknown_references_split_the_way() {
    let mut loader = campus_loader();
    loader.on_way([1, 2, 3, 99, 4], Some("primary"));

    let map = loader.finish().expect("map builds");
    assert_eq!(map.graph().vertex_count(), 4);
    assert_eq!(map.graph().edge_count(), 2);

    let err = map
        .route(37.870, -122.260, 37.872, -122.259)
        .expect_err("node 4 is cut off");
    assert!(matches!(err, Error::NoRouteFound { start: 1, goal: 4 }));
}

#[test]
fn repeated_coordinates_add_no_edge() {
    let mut loader = campus_loader();
    loader.on_node(5, 37.871, -122.260, None);
    loader.on_way([1, 1, 2, 5, 3], Some("tertiary"));

    let map = loader.finish().expect("map builds");
    let graph = map.graph();
    assert_eq!(graph.vertex_count(), 3, "node 5 shares node 2's position");
    assert_eq!(graph.edge_count(), 2);
    let middle = Coordinate::new(37.871, -122.260);
    assert_eq!(graph.neighbors(&middle).expect("registered").len(), 2);
}

#[test]
fn ways_may_arrive_before_their_nodes() {
    let mut loader = MapLoader::new(MapConfig::default());
    loader.on_way([10, 11], Some("living_street"));
    loader.on_node(10, 37.86, -122.25, None);
    loader.on_node(11, 37.86, -122.24, None);

    let map = loader.finish().expect("map builds");
    assert_eq!(map.graph().edge_count(), 1);
}

#[test]
fn named_nodes_are_searchable() {
    let loader = campus_loader();
    let stats = loader.stats();
    assert_eq!(stats.nodes, 4);
    assert_eq!(stats.names, 2);

    let map = loader.finish().expect("map builds");
    let records = map.names().lookup_exact("soda hall").expect("indexed");
    assert_eq!(records[0].id, 4);
    assert!(map.graph().is_empty());
}
