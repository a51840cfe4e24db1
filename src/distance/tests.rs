use super::*;
use approx::assert_relative_eq;
use geo_types::{polygon, MultiLineString, MultiPoint, Point};

fn c(x: f64, y: f64) -> Coord<f64> {
    Coord { x, y }
}

fn square() -> Geometry<f64> {
    polygon![
        (x: 0.0, y: 0.0), (x: 10.0, y: 0.0),
        (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)
    ]
    .into()
}

#[test]
fn test_point_inside_polygon_is_containment_distance_zero() {
    let poly = square();
    let pt: Geometry<f64> = Point::new(5.0, 5.0).into();

    let mut op = DistanceOp::new(&poly, &pt).unwrap();
    assert_eq!(op.distance(), 0.0);

    let locs = op.closest_locations();
    // Input order preserved: the polygon side carries the inside-area
    // marker, the point side a plain location.
    assert!(locs[0].is_inside_area());
    assert!(!locs[1].is_inside_area());
    assert_eq!(locs[0].coord, c(5.0, 5.0));
    assert_eq!(locs[1].coord, c(5.0, 5.0));
}

#[test]
fn test_point_in_polygon_hole_falls_through() {
    // The hole contains the point: no containment, distance is to the
    // hole ring.
    let poly: Geometry<f64> = polygon!(
        exterior: [
            (x: 0.0, y: 0.0), (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)
        ],
        interiors: [[
            (x: 4.0, y: 4.0), (x: 6.0, y: 4.0),
            (x: 6.0, y: 6.0), (x: 4.0, y: 6.0), (x: 4.0, y: 4.0)
        ]],
    )
    .into();
    let pt: Geometry<f64> = Point::new(5.0, 5.0).into();

    let mut op = DistanceOp::new(&poly, &pt).unwrap();
    assert_relative_eq!(op.distance(), 1.0);
}

#[test]
fn test_line_point_distance_and_closest_points() {
    let line: Geometry<f64> =
        LineString::new(vec![c(0.0, 0.0), c(10.0, 0.0)]).into();
    let pt: Geometry<f64> = Point::new(5.0, 5.0).into();

    let mut op = DistanceOp::new(&line, &pt).unwrap();
    assert_relative_eq!(op.distance(), 5.0);
    assert_eq!(op.closest_points(), [c(5.0, 0.0), c(5.0, 5.0)]);

    // Flipped inputs keep the answer and mirror the point order.
    let mut op = DistanceOp::new(&pt, &line).unwrap();
    assert_relative_eq!(op.distance(), 5.0);
    assert_eq!(op.closest_points(), [c(5.0, 5.0), c(5.0, 0.0)]);
}

#[test]
fn test_crossing_lines_distance_zero() {
    let l0: Geometry<f64> =
        LineString::new(vec![c(0.0, 0.0), c(10.0, 10.0)]).into();
    let l1: Geometry<f64> =
        LineString::new(vec![c(0.0, 10.0), c(10.0, 0.0)]).into();
    let mut op = DistanceOp::new(&l0, &l1).unwrap();
    assert_eq!(op.distance(), 0.0);
    assert_eq!(op.closest_points(), [c(5.0, 5.0), c(5.0, 5.0)]);
}

#[test]
fn test_parallel_segments() {
    let l0: Geometry<f64> =
        LineString::new(vec![c(0.0, 0.0), c(10.0, 0.0)]).into();
    let l1: Geometry<f64> =
        LineString::new(vec![c(2.0, 3.0), c(8.0, 3.0)]).into();
    let mut op = DistanceOp::new(&l0, &l1).unwrap();
    assert_relative_eq!(op.distance(), 3.0);
}

#[test]
fn test_point_point_distance() {
    let p0: Geometry<f64> = Point::new(0.0, 0.0).into();
    let p1: Geometry<f64> = Point::new(3.0, 4.0).into();
    assert_relative_eq!(DistanceOp::distance_between(&p0, &p1).unwrap(), 5.0);

    let mp: Geometry<f64> =
        MultiPoint::new(vec![Point::new(100.0, 0.0), Point::new(3.0, 4.0)]).into();
    assert_relative_eq!(DistanceOp::distance_between(&p0, &mp).unwrap(), 5.0);
}

#[test]
fn test_polygon_polygon_distance_uses_rings() {
    let a = square();
    let b: Geometry<f64> = polygon![
        (x: 20.0, y: 0.0), (x: 30.0, y: 0.0),
        (x: 30.0, y: 10.0), (x: 20.0, y: 10.0), (x: 20.0, y: 0.0)
    ]
    .into();
    let mut op = DistanceOp::new(&a, &b).unwrap();
    assert_relative_eq!(op.distance(), 10.0);
    let [p0, p1] = op.closest_points();
    assert_eq!(p0.x, 10.0);
    assert_eq!(p1.x, 20.0);
}

#[test]
fn test_empty_geometry_rejected() {
    let empty: Geometry<f64> = LineString::new(vec![]).into();
    let pt: Geometry<f64> = Point::new(0.0, 0.0).into();
    assert!(DistanceOp::new(&empty, &pt).is_err());
    assert!(DistanceOp::new(&pt, &empty).is_err());
}

#[test]
fn test_single_coordinate_linestring_rejected() {
    // One coordinate yields no segment and no point: without the guard
    // the search would find nothing and the accessors would have no
    // locations to return.
    let degenerate: Geometry<f64> = LineString::new(vec![c(1.0, 1.0)]).into();
    let pt: Geometry<f64> = Point::new(0.0, 0.0).into();
    assert!(DistanceOp::new(&degenerate, &pt).is_err());
    assert!(DistanceOp::new(&pt, &degenerate).is_err());
}

#[test]
fn test_degenerate_component_next_to_valid_one_accepted() {
    let mls: Geometry<f64> = MultiLineString::new(vec![
        LineString::new(vec![c(1.0, 1.0)]),
        LineString::new(vec![c(0.0, 3.0), c(10.0, 3.0)]),
    ])
    .into();
    let pt: Geometry<f64> = Point::new(5.0, 0.0).into();
    let mut op = DistanceOp::new(&mls, &pt).unwrap();
    assert_relative_eq!(op.distance(), 3.0);
    assert_eq!(op.closest_points(), [c(5.0, 3.0), c(5.0, 0.0)]);
}

#[test]
fn test_lazy_computation_is_stable() {
    let line: Geometry<f64> =
        LineString::new(vec![c(0.0, 0.0), c(10.0, 0.0)]).into();
    let pt: Geometry<f64> = Point::new(5.0, 5.0).into();
    let mut op = DistanceOp::new(&line, &pt).unwrap();
    let d0 = op.distance();
    let d1 = op.distance();
    assert_eq!(d0, d1);
    assert_eq!(op.closest_points(), [c(5.0, 0.0), c(5.0, 5.0)]);
}

#[test]
fn test_closest_point_on_segment() {
    let seg = Line::new(c(0.0, 0.0), c(10.0, 0.0));
    assert_eq!(closest_point_on_segment(seg, c(5.0, 5.0)), c(5.0, 0.0));
    assert_eq!(closest_point_on_segment(seg, c(-5.0, 5.0)), c(0.0, 0.0));
    assert_eq!(closest_point_on_segment(seg, c(15.0, 5.0)), c(10.0, 0.0));
}

#[test]
fn test_closest_points_segment_segment() {
    // Disjoint, closest at an endpoint projection.
    let (p0, p1, d) = closest_points_segment_segment(
        Line::new(c(0.0, 0.0), c(10.0, 0.0)),
        Line::new(c(4.0, 2.0), c(4.0, 8.0)),
    );
    assert_eq!(p0, c(4.0, 0.0));
    assert_eq!(p1, c(4.0, 2.0));
    assert_relative_eq!(d, 2.0);

    // Crossing: zero.
    let (p0, p1, d) = closest_points_segment_segment(
        Line::new(c(0.0, 0.0), c(10.0, 10.0)),
        Line::new(c(0.0, 10.0), c(10.0, 0.0)),
    );
    assert_eq!(d, 0.0);
    assert_eq!(p0, p1);
}

#[test]
fn test_component_extraction() {
    let gc: Geometry<f64> = Geometry::GeometryCollection(
        vec![
            square(),
            LineString::new(vec![c(0.0, 20.0), c(5.0, 20.0)]).into(),
            Point::new(7.0, 7.0).into(),
        ]
        .into(),
    );
    // Polygon ring + line string.
    assert_eq!(extract_lines(&gc).len(), 2);
    assert_eq!(extract_points(&gc).len(), 1);
    assert_eq!(extract_polygons(&gc).len(), 1);
    assert_eq!(connected_component_locations(&gc).len(), 3);
}
