mod common;

use mapquery_lib::{
    find_route_a_star, find_route_dijkstra, plan_route, route_distance, Coordinate, Error,
    RouteAlgorithm, RouteRequest, SpatialGraph, VertexSlot,
};

use common::{all_pairs_costs, disconnected_graph, grid_graph, line_graph};

#[test]
fn line_route_visits_every_vertex() {
    let graph = line_graph();
    let request = RouteRequest::a_star(Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 0.0));

    let plan = plan_route(&graph, &request).expect("route exists");
    assert_eq!(plan.steps, vec![1, 2, 3]);
    assert_eq!(plan.hop_count(), 2);
    assert!((plan.distance - 2.0).abs() < 1e-12);
    assert_eq!(plan.algorithm, RouteAlgorithm::AStar);
    assert_eq!(plan.coordinates.len(), plan.steps.len());
}

#[test]
fn endpoints_snap_to_nearest_vertices() {
    let graph = line_graph();
    let request = RouteRequest::a_star(Coordinate::new(-0.2, 0.1), Coordinate::new(1.1, -0.1));

    let plan = plan_route(&graph, &request).expect("route exists");
    assert_eq!(plan.start, 1);
    assert_eq!(plan.goal, 2);
    assert_eq!(plan.steps, vec![1, 2]);
}

#[test]
fn same_vertex_route_has_one_step() {
    let graph = line_graph();
    let point = Coordinate::new(1.0, 0.0);
    let plan = plan_route(&graph, &RouteRequest::a_star(point, point)).expect("trivial route");

    assert_eq!(plan.steps, vec![2]);
    assert_eq!(plan.hop_count(), 0);
    assert_eq!(plan.distance, 0.0);
}

#[test]
fn disconnected_pairs_report_no_route() {
    let graph = disconnected_graph();
    for algorithm in [RouteAlgorithm::AStar, RouteAlgorithm::Dijkstra] {
        let request = RouteRequest::a_star(Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 6.0))
            .with_algorithm(algorithm);
        let err = plan_route(&graph, &request).expect_err("components are disjoint");
        assert!(
            matches!(err, Error::NoRouteFound { start: 1, goal: 4 }),
            "unexpected error for {algorithm}: {err}"
        );
    }
}

#[test]
fn searches_match_floyd_warshall_on_every_pair() {
    type Finder = fn(&SpatialGraph, VertexSlot, VertexSlot) -> Option<Vec<VertexSlot>>;
    let finders: [(&str, Finder); 2] = [
        ("a-star", find_route_a_star),
        ("dijkstra", find_route_dijkstra),
    ];

    for graph in [grid_graph(5), disconnected_graph()] {
        let best = all_pairs_costs(&graph);
        let slots = 0..graph.vertex_count();

        for start in slots.clone() {
            for goal in slots.clone() {
                for (name, finder) in finders {
                    let expected = best[start][goal];
                    match finder(&graph, start, goal) {
                        Some(path) => {
                            assert_eq!(path.first(), Some(&start));
                            assert_eq!(path.last(), Some(&goal));
                            for pair in path.windows(2) {
                                assert!(
                                    graph.edges(pair[0]).iter().any(|e| e.target == pair[1]),
                                    "{name}: {} -> {} is not an edge",
                                    pair[0],
                                    pair[1]
                                );
                            }
                            let found =
                                route_distance(&graph, &path).expect("steps are adjacent");
                            assert!(
                                (found - expected).abs() < 1e-9,
                                "{name} cost {found} is not the minimum {expected} for {start}->{goal}"
                            );
                        }
                        None => assert!(
                            expected.is_infinite(),
                            "{name} found no route for reachable {start}->{goal}"
                        ),
                    }
                }
            }
        }
    }
}

#[test]
fn dijkstra_planner_reports_its_algorithm() {
    let graph = grid_graph(4);
    let request = RouteRequest::a_star(Coordinate::new(0.0, 0.0), Coordinate::new(0.03, 0.03))
        .with_algorithm(RouteAlgorithm::Dijkstra);

    let plan = plan_route(&graph, &request).expect("grid is connected");
    assert_eq!(plan.algorithm, RouteAlgorithm::Dijkstra);
    assert_eq!(plan.steps.first(), Some(&0));
    assert_eq!(plan.steps.last(), Some(&15));
}

#[test]
fn route_plan_serializes_algorithm_in_kebab_case() {
    let graph = line_graph();
    let request = RouteRequest::a_star(Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 0.0));
    let plan = plan_route(&graph, &request).expect("route exists");

    let json = serde_json::to_value(&plan).expect("plan serializes");
    assert_eq!(json["algorithm"], "a-star");
    assert_eq!(json["steps"], serde_json::json!([1, 2, 3]));
}
