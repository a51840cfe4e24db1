use crate::algorithm::GeoPointLocator;
use crate::overlay::graph::OverlayGraph;
use crate::overlay::line_builder::{is_result_of_op, propagate_z, LineBuilder, OverlayOpCode};
use crate::relate::{Dimension, Location};
use geo_types::{polygon, Coord, Geometry, LineString, Point, Polygon};

use Location::{Boundary, Exterior, Interior};
use OverlayOpCode::{Difference, Intersection, SymmetricDifference, Union};

fn c(x: f64, y: f64) -> Coord<f64> {
    Coord { x, y }
}

fn dummy_inputs() -> [Geometry<f64>; 2] {
    [
        Geometry::Point(Point::new(-100.0, -100.0)),
        Geometry::Point(Point::new(-200.0, -200.0)),
    ]
}

#[test]
fn test_is_result_of_op() {
    assert!(is_result_of_op(Interior, Interior, Intersection));
    // Boundary collapses to Interior.
    assert!(is_result_of_op(Boundary, Boundary, Intersection));
    assert!(!is_result_of_op(Interior, Exterior, Intersection));

    assert!(is_result_of_op(Interior, Exterior, Union));
    assert!(is_result_of_op(Exterior, Interior, Union));
    assert!(!is_result_of_op(Exterior, Exterior, Union));

    assert!(is_result_of_op(Interior, Exterior, Difference));
    assert!(!is_result_of_op(Interior, Boundary, Difference));

    assert!(is_result_of_op(Interior, Exterior, SymmetricDifference));
    assert!(is_result_of_op(Exterior, Interior, SymmetricDifference));
    assert!(!is_result_of_op(Interior, Interior, SymmetricDifference));
}

#[test]
fn test_shared_boundary_edge_emitted_once() {
    // Two rectangles sharing exactly one boundary edge; intersection
    // must emit the shared edge once and nothing else.
    let mut graph = OverlayGraph::new();

    // Shared edge (10,0)-(10,10): on both boundaries.
    graph.add_edge(
        vec![c(10.0, 0.0), c(10.0, 10.0)],
        [Some(Boundary), Some(Boundary)],
        Dimension::Area,
    );
    // Remaining boundary of A: exterior of B.
    graph.add_edge(
        vec![c(10.0, 10.0), c(0.0, 10.0), c(0.0, 0.0), c(10.0, 0.0)],
        [Some(Boundary), Some(Exterior)],
        Dimension::Area,
    );
    // Remaining boundary of B: exterior of A.
    graph.add_edge(
        vec![c(10.0, 0.0), c(20.0, 0.0), c(20.0, 10.0), c(10.0, 10.0)],
        [Some(Exterior), Some(Boundary)],
        Dimension::Area,
    );

    let inputs = dummy_inputs();
    let locator = GeoPointLocator;
    let result_areas: Vec<Polygon<f64>> = Vec::new();
    let builder = LineBuilder::new(
        &mut graph,
        &result_areas,
        [&inputs[0], &inputs[1]],
        &locator,
    );
    let lines = builder.build(Intersection);

    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0],
        LineString::new(vec![c(10.0, 0.0), c(10.0, 10.0)])
    );
    assert!(graph.edges[0].consumed);
    assert!(!graph.edges[1].consumed);
    assert!(!graph.edges[2].consumed);
}

#[test]
fn test_covered_line_edge_by_depth() {
    let mut graph = OverlayGraph::new();

    // An area-boundary edge already emitted with the result area.
    let area_edge = graph.add_edge(
        vec![c(0.0, 0.0), c(10.0, 0.0)],
        [Some(Boundary), Some(Interior)],
        Dimension::Area,
    );
    graph.edges[area_edge].in_result_area = true;

    // A line edge starting at the same node, inside the result area.
    let inside = graph.add_edge(
        vec![c(0.0, 0.0), c(5.0, 5.0)],
        [Some(Interior), Some(Interior)],
        Dimension::Line,
    );
    graph.edges[inside].depth = [1, 1];

    // A line edge starting at the same node but outside.
    let outside = graph.add_edge(
        vec![c(0.0, 0.0), c(5.0, -5.0)],
        [Some(Interior), Some(Interior)],
        Dimension::Line,
    );

    let inputs = dummy_inputs();
    let locator = GeoPointLocator;
    let result_areas: Vec<Polygon<f64>> = Vec::new();
    let builder = LineBuilder::new(
        &mut graph,
        &result_areas,
        [&inputs[0], &inputs[1]],
        &locator,
    );
    let lines = builder.build(Intersection);

    // Only the depth-0 edge survives; the covered one is implied by
    // the area boundary.
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], LineString::new(vec![c(0.0, 0.0), c(5.0, -5.0)]));
    assert_eq!(graph.edges[inside].covered, Some(true));
    assert_eq!(graph.edges[outside].covered, Some(false));
}

#[test]
fn test_covered_line_edge_by_point_in_polygon() {
    // No area edges in the graph at all: coverage falls back to a
    // point-in-polygon test against the built result areas.
    let mut graph = OverlayGraph::new();
    let covered = graph.add_edge(
        vec![c(2.0, 5.0), c(8.0, 5.0)],
        [Some(Interior), Some(Interior)],
        Dimension::Line,
    );
    let free = graph.add_edge(
        vec![c(20.0, 5.0), c(30.0, 5.0)],
        [Some(Interior), Some(Interior)],
        Dimension::Line,
    );

    let result_areas = vec![polygon![
        (x: 0.0, y: 0.0), (x: 10.0, y: 0.0),
        (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)
    ]];
    let inputs = dummy_inputs();
    let locator = GeoPointLocator;
    let builder = LineBuilder::new(
        &mut graph,
        &result_areas,
        [&inputs[0], &inputs[1]],
        &locator,
    );
    let lines = builder.build(Intersection);

    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0],
        LineString::new(vec![c(20.0, 5.0), c(30.0, 5.0)])
    );
    assert_eq!(graph.edges[covered].covered, Some(true));
    assert_eq!(graph.edges[free].covered, Some(false));
}

#[test]
fn test_isolated_edge_labelling() {
    // A line from input 0 which touched nothing of input 1: its
    // membership is decided by locating it against input 1.
    let poly: Geometry<f64> = polygon![
        (x: 0.0, y: 0.0), (x: 10.0, y: 0.0),
        (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)
    ]
    .into();
    let line_geom: Geometry<f64> =
        LineString::new(vec![c(2.0, 2.0), c(4.0, 2.0)]).into();
    let locator = GeoPointLocator;
    let result_areas: Vec<Polygon<f64>> = Vec::new();

    // Inside the polygon: kept by intersection, dropped by difference.
    for (op, expected) in [(Intersection, 1), (Difference, 0)] {
        let mut graph = OverlayGraph::new();
        graph.add_edge(
            vec![c(2.0, 2.0), c(4.0, 2.0)],
            [Some(Interior), None],
            Dimension::Line,
        );
        let builder =
            LineBuilder::new(&mut graph, &result_areas, [&line_geom, &poly], &locator);
        let lines = builder.build(op);
        assert_eq!(lines.len(), expected, "op {op:?}");
        assert_eq!(graph.edges[0].label[1], Some(Interior));
    }

    // Outside the polygon: dropped by intersection, kept by difference.
    for (op, expected) in [(Intersection, 0), (Difference, 1)] {
        let mut graph = OverlayGraph::new();
        graph.add_edge(
            vec![c(20.0, 2.0), c(40.0, 2.0)],
            [Some(Interior), None],
            Dimension::Line,
        );
        let builder =
            LineBuilder::new(&mut graph, &result_areas, [&line_geom, &poly], &locator);
        let lines = builder.build(op);
        assert_eq!(lines.len(), expected, "op {op:?}");
        assert_eq!(graph.edges[0].label[1], Some(Exterior));
    }
}

#[test]
fn test_propagate_z_interpolates_interior_gap() {
    let coords = [c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)];
    let mut z = [0.0, f64::NAN, 10.0];
    propagate_z(&coords, &mut z);
    assert_eq!(z, [0.0, 5.0, 10.0]);
}

#[test]
fn test_propagate_z_copies_at_ends() {
    let coords = [c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)];
    let mut z = [f64::NAN, 7.0, f64::NAN, f64::NAN];
    propagate_z(&coords, &mut z);
    assert_eq!(z, [7.0, 7.0, 7.0, 7.0]);
}

#[test]
fn test_propagate_z_all_missing_left_alone() {
    let coords = [c(0.0, 0.0), c(1.0, 0.0)];
    let mut z = [f64::NAN, f64::NAN];
    propagate_z(&coords, &mut z);
    assert!(z.iter().all(|v| v.is_nan()));
}

#[test]
fn test_node_dedup_in_graph() {
    let mut graph = OverlayGraph::new();
    graph.add_edge(
        vec![c(0.0, 0.0), c(10.0, 0.0)],
        [Some(Interior), Some(Exterior)],
        Dimension::Line,
    );
    graph.add_edge(
        vec![c(10.0, 0.0), c(10.0, 10.0)],
        [Some(Interior), Some(Exterior)],
        Dimension::Line,
    );
    // (10,0) is shared.
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.nodes[1].edges.len(), 2);
}
