mod common;

use mapquery_lib::{BoundingBox, QuadTree, ROOT_TILE};

use common::scenario_root;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|name| name.to_string()).collect())
        .collect()
}

#[test]
fn depth_zero_returns_root_tile() {
    let tree = QuadTree::new(scenario_root(), 2, 256).expect("valid root");
    let query = BoundingBox::new(37.88, -122.28, 37.85, -122.25);

    let tiles = tree.resolve_tiles(&query, 1.0);
    assert_eq!(tiles.depth, 0);
    assert_eq!(tiles.tiles, vec![vec![ROOT_TILE.to_string()]]);
    assert_eq!(tiles.bounds, scenario_root());
}

#[test]
fn full_box_at_depth_one_returns_four_quadrants() {
    let root = scenario_root();
    let tree = QuadTree::new(root, 2, 256).expect("valid root");

    // 0.09 degrees over 256 pixels needs one halving to reach 2e-4.
    let tiles = tree.resolve_tiles(&root, 2.0e-4);
    assert_eq!(tiles.depth, 1);
    assert!(!tiles.clamped);
    assert_eq!(tiles.tiles, grid(&[&["1", "2"], &["3", "4"]]));
}

#[test]
fn full_box_at_depth_two_returns_sixteen_leaves() {
    let root = scenario_root();
    let tree = QuadTree::new(root, 2, 256).expect("valid root");

    let tiles = tree.resolve_tiles(&root, 1.0e-9);
    assert_eq!(tiles.depth, 2);
    assert!(tiles.clamped, "resolution asked for more than two levels");
    assert_eq!(
        tiles.tiles,
        grid(&[
            &["11", "12", "21", "22"],
            &["13", "14", "23", "24"],
            &["31", "32", "41", "42"],
            &["33", "34", "43", "44"],
        ])
    );
    assert_close(tiles.bounds.ul_lat, root.ul_lat);
    assert_close(tiles.bounds.ul_lon, root.ul_lon);
    assert_close(tiles.bounds.lr_lat, root.lr_lat);
    assert_close(tiles.bounds.lr_lon, root.lr_lon);
}

#[test]
fn finer_resolution_never_lowers_depth() {
    let tree = QuadTree::new(scenario_root(), 7, 256).expect("valid root");

    let mut previous = 0;
    let mut lon_dpp = 1.0e-2;
    while lon_dpp > 1.0e-8 {
        let depth = tree.depth_for(lon_dpp);
        assert!(depth >= previous, "depth dropped at {lon_dpp}");
        assert!(depth <= tree.max_depth());
        previous = depth;
        lon_dpp /= 1.7;
    }
    assert_eq!(previous, 7);
}

#[test]
fn zero_area_query_resolves_to_one_tile() {
    let tree = QuadTree::new(scenario_root(), 3, 256).expect("valid root");
    let point = BoundingBox::new(37.86, -122.26, 37.86, -122.26);

    let tiles = tree.resolve_at_depth(&point, 3);
    assert!(tiles.degenerate);
    assert_eq!(tiles.rows(), 1);
    assert_eq!(tiles.cols(), 1);
    let tile = tree.tile(&tiles.tiles[0][0]).expect("named tile exists");
    assert!(tile.bounds().contains(&point.upper_left()));
}

#[test]
fn query_outside_root_is_clamped_to_the_edge() {
    let tree = QuadTree::new(scenario_root(), 2, 256).expect("valid root");
    let east = BoundingBox::new(37.88, -122.10, 37.83, -122.05);

    let tiles = tree.resolve_at_depth(&east, 2);
    assert_eq!(tiles.cols(), 1);
    assert!(tiles.tiles.iter().all(|row| row[0].ends_with(&['2', '4'][..])));
}

#[test]
fn inverted_query_corners_are_normalized() {
    let tree = QuadTree::new(scenario_root(), 2, 256).expect("valid root");
    let root = scenario_root();
    let flipped = BoundingBox::new(root.lr_lat, root.lr_lon, root.ul_lat, root.ul_lon);

    let tiles = tree.resolve_at_depth(&flipped, 1);
    assert_eq!(tiles.tiles, grid(&[&["1", "2"], &["3", "4"]]));
}

#[test]
fn requested_depth_beyond_tree_is_clamped() {
    let tree = QuadTree::new(scenario_root(), 1, 256).expect("valid root");
    let tiles = tree.resolve_at_depth(&scenario_root(), 5);
    assert_eq!(tiles.depth, 1);
    assert!(tiles.clamped);
}

#[test]
fn file_names_append_extension() {
    let tree = QuadTree::new(scenario_root(), 1, 256).expect("valid root");
    let tiles = tree.resolve_at_depth(&scenario_root(), 1);
    assert_eq!(
        tiles.file_names("png"),
        grid(&[&["1.png", "2.png"], &["3.png", "4.png"]])
    );
}
