mod common;

use common::{edge_between, EdgeSpec, GraphBuilder, E0, N0};
use tempfile::TempDir;
use velo_common::Error;
use velo_geometry::PointCh;
use velo_io::AttributeSet;
use velo_routing::Graph;

#[test]
fn loading_an_empty_directory_fails_with_io() {
    let dir = TempDir::new().unwrap();
    let err = Graph::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.is_load_failure());
}

#[test]
fn node_and_edge_accessors() {
    let mut b = GraphBuilder::new();
    let a = b.node(0.0, 0.0);
    let c = b.node(30.0, 40.0);
    let paved = b.attribute_set(0b1010);
    b.edge(EdgeSpec::new(a, c, 50.0).gain(2.5).attributes(paved));
    b.edge(EdgeSpec::new(c, a, 50.0).inverted());
    let (_dir, graph) = b.load();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.node_point(c).unwrap(), PointCh::new(E0 + 30.0, N0 + 40.0).unwrap());
    assert_eq!(graph.node_out_degree(a).unwrap(), 1);

    let up = edge_between(&graph, a, c);
    assert_eq!(graph.edge_length(up).unwrap(), 50.0);
    assert_eq!(graph.edge_elevation_gain(up).unwrap(), 2.5);
    assert_eq!(graph.edge_attributes(up).unwrap(), AttributeSet::of(&[1, 3]).unwrap());
    assert!(!graph.edge_is_inverted(up).unwrap());

    let down = edge_between(&graph, c, a);
    assert!(graph.edge_is_inverted(down).unwrap());
    assert_eq!(graph.edge_target_node_id(down).unwrap(), a);
    assert_eq!(graph.edge_attributes(down).unwrap(), AttributeSet::EMPTY);
}

#[test]
fn accessors_reject_unknown_ids() {
    let mut b = GraphBuilder::new();
    b.node(0.0, 0.0);
    let (_dir, graph) = b.load();

    assert!(matches!(graph.node_point(1), Err(Error::OutOfRange { .. })));
    assert!(matches!(graph.node_out_edge_id(0, 0), Err(Error::OutOfRange { .. })));
    assert!(matches!(graph.edge_length(0), Err(Error::OutOfRange { .. })));
    assert!(matches!(graph.edge_profile(3), Err(Error::OutOfRange { .. })));
}

#[test]
fn closest_node_within_distance() {
    let mut b = GraphBuilder::new();
    b.node(0.0, 0.0);
    b.node(100.0, 0.0);
    let (_dir, graph) = b.load();

    let near_second = PointCh::new(E0 + 90.0, N0 + 5.0).unwrap();
    assert_eq!(graph.node_closest_to(&near_second, 50.0).unwrap(), Some(1));

    let far = PointCh::new(E0 + 400.0, N0 + 400.0).unwrap();
    assert_eq!(graph.node_closest_to(&far, 100.0).unwrap(), None);
}

#[test]
fn closest_node_ties_go_to_the_later_node() {
    let mut b = GraphBuilder::new();
    b.node(0.0, -5.0);
    b.node(0.0, 5.0);
    let (_dir, graph) = b.load();

    let middle = PointCh::new(E0, N0).unwrap();
    assert_eq!(graph.node_closest_to(&middle, 10.0).unwrap(), Some(1));
    // Exactly at the search distance still counts.
    assert_eq!(graph.node_closest_to(&middle, 5.0).unwrap(), Some(1));
}

#[test]
fn closest_node_ties_across_sectors_go_to_the_later_sector() {
    // Column boundary between sectors 42 and 43 of row 72.
    let boundary = 2_602_242.1875;
    let mut b = GraphBuilder::new();
    b.node_at(boundary - 8.0, N0);
    b.node_at(boundary + 8.0, N0);
    let (_dir, graph) = b.load();

    let p = PointCh::new(boundary, N0).unwrap();
    assert_eq!(graph.node_closest_to(&p, 20.0).unwrap(), Some(1));
}

#[test]
fn edge_without_samples_has_an_unknown_profile() {
    let mut b = GraphBuilder::new();
    let a = b.node(0.0, 0.0);
    let c = b.node(10.0, 0.0);
    b.edge(EdgeSpec::new(a, c, 10.0));
    let (_dir, graph) = b.load();

    let profile = graph.edge_profile(edge_between(&graph, a, c)).unwrap();
    for x in [-100.0, 0.0, 5.0, 10.0, 1e6] {
        assert!(profile.at(x).is_nan(), "elevation at {x} should be unknown");
    }
}

#[test]
fn edge_profiles_interpolate_and_follow_direction() {
    let mut b = GraphBuilder::new();
    let a = b.node(0.0, 0.0);
    let c = b.node(4.0, 0.0);
    b.edge(EdgeSpec::new(a, c, 4.0).samples(vec![600.0, 601.0, 603.0]));
    b.edge(EdgeSpec::new(c, a, 4.0).inverted().samples(vec![600.0, 601.0, 603.0]));
    let (_dir, graph) = b.load();

    let forward = graph.edge_profile(edge_between(&graph, a, c)).unwrap();
    assert_eq!(forward.at(-1.0), 600.0);
    assert_eq!(forward.at(1.0), 600.5);
    assert_eq!(forward.at(3.0), 602.0);
    assert_eq!(forward.at(9.0), 603.0);

    let backward = graph.edge_profile(edge_between(&graph, c, a)).unwrap();
    assert_eq!(backward.at(0.0), 603.0);
    assert_eq!(backward.at(4.0), 600.0);
}

#[test]
fn negative_search_distance_finds_nothing() {
    let mut b = GraphBuilder::new();
    b.node(0.0, 0.0);
    let (_dir, graph) = b.load();

    let p = PointCh::new(E0, N0).unwrap();
    assert_eq!(graph.node_closest_to(&p, -10.0).unwrap(), None);
}
