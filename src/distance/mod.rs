use crate::algorithm::{GeoPointLocator, PointLocator};
use crate::error::{Result, TopologyError};
use crate::relate::Location;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo_types::{Coord, Geometry, Line, LineString, Point, Polygon};

#[cfg(test)]
mod tests;

/// The location of a point on a geometry: the component it was found
/// on, the segment index when it lies on a segment, and the point
/// itself. A `None` segment index marks a point inside an area
/// geometry.
#[derive(Clone, Debug)]
pub struct GeometryLocation {
    pub component: Geometry<f64>,
    pub segment_index: Option<usize>,
    pub coord: Coord<f64>,
}

impl GeometryLocation {
    pub fn on_segment(
        component: Geometry<f64>,
        segment_index: usize,
        coord: Coord<f64>,
    ) -> Self {
        GeometryLocation {
            component,
            segment_index: Some(segment_index),
            coord,
        }
    }

    pub fn inside_area(component: Geometry<f64>, coord: Coord<f64>) -> Self {
        GeometryLocation {
            component,
            segment_index: None,
            coord,
        }
    }

    pub fn is_inside_area(&self) -> bool {
        self.segment_index.is_none()
    }
}

/// Computes the minimum distance and the closest pair of points
/// between two geometries.
///
/// The search is a straightforward O(n*m) comparison over all segment
/// and point components, preceded by a containment short-circuit for
/// areal inputs. The closest points may lie in segment interiors, not
/// only on vertices.
pub struct DistanceOp<'a> {
    geom: [&'a Geometry<f64>; 2],
    locator: GeoPointLocator,
    min_distance: f64,
    min_location: Option<[GeometryLocation; 2]>,
    computed: bool,
}

impl<'a> DistanceOp<'a> {
    /// Inputs contributing nothing the search can compare — no segment
    /// and no point components, which covers empty geometries and
    /// degenerate single-coordinate line strings — have no defined
    /// distance and are rejected up front, which keeps the accessors
    /// below infallible.
    pub fn new(g0: &'a Geometry<f64>, g1: &'a Geometry<f64>) -> Result<Self> {
        for (i, g) in [g0, g1].into_iter().enumerate() {
            if !has_distance_candidates(g) {
                return Err(TopologyError::InvalidGeometry(format!(
                    "DistanceOp: input geometry {i} has no segments or points"
                )));
            }
        }
        Ok(DistanceOp {
            geom: [g0, g1],
            locator: GeoPointLocator,
            min_distance: f64::INFINITY,
            min_location: None,
            computed: false,
        })
    }

    /// Distance between the closest points of `g0` and `g1`.
    pub fn distance_between(g0: &Geometry<f64>, g1: &Geometry<f64>) -> Result<f64> {
        let mut op = DistanceOp::new(g0, g1)?;
        Ok(op.distance())
    }

    /// The closest point pair, in input order.
    pub fn closest_points_between(
        g0: &Geometry<f64>,
        g1: &Geometry<f64>,
    ) -> Result<[Coord<f64>; 2]> {
        let mut op = DistanceOp::new(g0, g1)?;
        Ok(op.closest_points())
    }

    pub fn distance(&mut self) -> f64 {
        self.compute();
        self.min_distance
    }

    pub fn closest_points(&mut self) -> [Coord<f64>; 2] {
        self.compute();
        let locs = self.min_location.as_ref().expect("computed");
        [locs[0].coord, locs[1].coord]
    }

    /// The closest point pair with their component and segment
    /// information, in input order.
    pub fn closest_locations(&mut self) -> [GeometryLocation; 2] {
        self.compute();
        self.min_location.clone().expect("computed")
    }

    fn compute(&mut self) {
        if self.computed {
            return;
        }
        self.computed = true;
        self.compute_containment_distance();
        if self.min_distance == 0.0 {
            return;
        }
        self.compute_line_distance();
        if self.min_distance == 0.0 {
            return;
        }
        self.compute_point_distance();
    }

    fn update_min_distance(&mut self, dist: f64, locs: [GeometryLocation; 2], flip: bool) {
        // Strict improvement only.
        if dist >= self.min_distance {
            return;
        }
        self.min_distance = dist;
        let [a, b] = locs;
        self.min_location = Some(if flip { [b, a] } else { [a, b] });
    }

    /// Any point of a geometry lying inside an areal component of the
    /// other is at distance zero: test one representative location per
    /// connected component. A representative point falling in a hole
    /// simply fails the test and the exact search below decides.
    fn compute_containment_distance(&mut self) {
        // flip restores (g0, g1) order when the polygons came from g0.
        for (poly_side, flip) in [(0usize, true), (1, false)] {
            let polys = extract_polygons(self.geom[poly_side]);
            if polys.is_empty() {
                continue;
            }
            let locs = connected_component_locations(self.geom[1 - poly_side]);
            for loc in &locs {
                for poly in &polys {
                    let geom = Geometry::Polygon(poly.clone());
                    if self.locator.locate(loc.coord, &geom) == Location::Interior {
                        let poly_loc = GeometryLocation::inside_area(geom, loc.coord);
                        // (other geometry, containing area) order,
                        // restored by flip.
                        self.update_min_distance(0.0, [loc.clone(), poly_loc], flip);
                        return;
                    }
                }
            }
        }
    }

    fn compute_line_distance(&mut self) {
        let lines0 = extract_lines(self.geom[0]);
        let lines1 = extract_lines(self.geom[1]);
        let points0 = extract_points(self.geom[0]);
        let points1 = extract_points(self.geom[1]);

        self.compute_min_distance_lines(&lines0, &lines1);
        if self.min_distance == 0.0 {
            return;
        }
        self.compute_min_distance_lines_points(&lines0, &points1, false);
        if self.min_distance == 0.0 {
            return;
        }
        self.compute_min_distance_lines_points(&lines1, &points0, true);
    }

    fn compute_min_distance_lines(&mut self, lines0: &[LineString<f64>], lines1: &[LineString<f64>]) {
        for line0 in lines0 {
            for line1 in lines1 {
                self.compute_min_distance_line_line(line0, line1);
                if self.min_distance == 0.0 {
                    return;
                }
            }
        }
    }

    fn compute_min_distance_line_line(&mut self, line0: &LineString<f64>, line1: &LineString<f64>) {
        for (i, seg0) in line0.lines().enumerate() {
            for (j, seg1) in line1.lines().enumerate() {
                let (p0, p1, dist) = closest_points_segment_segment(seg0, seg1);
                if dist < self.min_distance {
                    let locs = [
                        GeometryLocation::on_segment(line0.clone().into(), i, p0),
                        GeometryLocation::on_segment(line1.clone().into(), j, p1),
                    ];
                    self.update_min_distance(dist, locs, false);
                }
                if self.min_distance == 0.0 {
                    return;
                }
            }
        }
    }

    fn compute_min_distance_lines_points(
        &mut self,
        lines: &[LineString<f64>],
        points: &[Point<f64>],
        flip: bool,
    ) {
        for line in lines {
            for pt in points {
                self.compute_min_distance_line_point(line, pt, flip);
                if self.min_distance == 0.0 {
                    return;
                }
            }
        }
    }

    fn compute_min_distance_line_point(
        &mut self,
        line: &LineString<f64>,
        pt: &Point<f64>,
        flip: bool,
    ) {
        for (i, seg) in line.lines().enumerate() {
            let closest = closest_point_on_segment(seg, pt.0);
            let dist = coord_distance(closest, pt.0);
            if dist < self.min_distance {
                let locs = [
                    GeometryLocation::on_segment(line.clone().into(), i, closest),
                    GeometryLocation::on_segment(Geometry::Point(*pt), 0, pt.0),
                ];
                self.update_min_distance(dist, locs, flip);
            }
        }
    }

    fn compute_point_distance(&mut self) {
        let points0 = extract_points(self.geom[0]);
        let points1 = extract_points(self.geom[1]);
        for p0 in &points0 {
            for p1 in &points1 {
                let dist = coord_distance(p0.0, p1.0);
                if dist < self.min_distance {
                    let locs = [
                        GeometryLocation::on_segment(Geometry::Point(*p0), 0, p0.0),
                        GeometryLocation::on_segment(Geometry::Point(*p1), 0, p1.0),
                    ];
                    self.update_min_distance(dist, locs, false);
                }
            }
        }
    }
}

/// Line-type components of a geometry, polygon rings included.
pub fn extract_lines(geom: &Geometry<f64>) -> Vec<LineString<f64>> {
    let mut out = Vec::new();
    collect_lines(geom, &mut out);
    out
}

fn collect_lines(geom: &Geometry<f64>, out: &mut Vec<LineString<f64>>) {
    match geom {
        Geometry::Line(l) => out.push(LineString::new(vec![l.start, l.end])),
        Geometry::LineString(ls) => out.push(ls.clone()),
        Geometry::MultiLineString(mls) => out.extend(mls.0.iter().cloned()),
        Geometry::Polygon(poly) => collect_rings(poly, out),
        Geometry::MultiPolygon(mpoly) => {
            for poly in mpoly {
                collect_rings(poly, out);
            }
        }
        Geometry::Rect(r) => collect_rings(&r.to_polygon(), out),
        Geometry::Triangle(t) => collect_rings(&t.to_polygon(), out),
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                collect_lines(g, out);
            }
        }
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
    }
}

fn collect_rings(poly: &Polygon<f64>, out: &mut Vec<LineString<f64>>) {
    out.push(poly.exterior().clone());
    out.extend(poly.interiors().iter().cloned());
}

/// Point components of a geometry.
pub fn extract_points(geom: &Geometry<f64>) -> Vec<Point<f64>> {
    let mut out = Vec::new();
    collect_points(geom, &mut out);
    out
}

fn collect_points(geom: &Geometry<f64>, out: &mut Vec<Point<f64>>) {
    match geom {
        Geometry::Point(p) => out.push(*p),
        Geometry::MultiPoint(mp) => out.extend(mp.0.iter().copied()),
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                collect_points(g, out);
            }
        }
        _ => {}
    }
}

/// Areal components of a geometry.
pub fn extract_polygons(geom: &Geometry<f64>) -> Vec<Polygon<f64>> {
    let mut out = Vec::new();
    collect_polygons(geom, &mut out);
    out
}

fn collect_polygons(geom: &Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geom {
        Geometry::Polygon(poly) => out.push(poly.clone()),
        Geometry::MultiPolygon(mpoly) => out.extend(mpoly.0.iter().cloned()),
        Geometry::Rect(r) => out.push(r.to_polygon()),
        Geometry::Triangle(t) => out.push(t.to_polygon()),
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                collect_polygons(g, out);
            }
        }
        _ => {}
    }
}

/// One location per connected component (point, line string, polygon),
/// holding the component's first coordinate.
pub fn connected_component_locations(geom: &Geometry<f64>) -> Vec<GeometryLocation> {
    let mut out = Vec::new();
    collect_component_locations(geom, &mut out);
    out
}

fn collect_component_locations(geom: &Geometry<f64>, out: &mut Vec<GeometryLocation>) {
    match geom {
        Geometry::Point(p) => {
            out.push(GeometryLocation::on_segment(Geometry::Point(*p), 0, p.0));
        }
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                out.push(GeometryLocation::on_segment(Geometry::Point(*p), 0, p.0));
            }
        }
        Geometry::Line(l) => {
            out.push(GeometryLocation::on_segment((*l).into(), 0, l.start));
        }
        Geometry::LineString(ls) => {
            if let Some(&c) = ls.0.first() {
                out.push(GeometryLocation::on_segment(ls.clone().into(), 0, c));
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                if let Some(&c) = ls.0.first() {
                    out.push(GeometryLocation::on_segment(ls.clone().into(), 0, c));
                }
            }
        }
        Geometry::Polygon(poly) => {
            if let Some(&c) = poly.exterior().0.first() {
                out.push(GeometryLocation::on_segment(poly.clone().into(), 0, c));
            }
        }
        Geometry::MultiPolygon(mpoly) => {
            for poly in &mpoly.0 {
                if let Some(&c) = poly.exterior().0.first() {
                    out.push(GeometryLocation::on_segment(poly.clone().into(), 0, c));
                }
            }
        }
        Geometry::Rect(r) => {
            let poly = r.to_polygon();
            let c = poly.exterior().0[0];
            out.push(GeometryLocation::on_segment(poly.into(), 0, c));
        }
        Geometry::Triangle(t) => {
            let poly = t.to_polygon();
            let c = poly.exterior().0[0];
            out.push(GeometryLocation::on_segment(poly.into(), 0, c));
        }
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                collect_component_locations(g, out);
            }
        }
    }
}

/// Whether a geometry yields at least one segment or one point for the
/// distance search. A line component with a single coordinate yields
/// neither.
fn has_distance_candidates(geom: &Geometry<f64>) -> bool {
    extract_lines(geom).iter().any(|ls| ls.0.len() >= 2) || !extract_points(geom).is_empty()
}

fn coord_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// The point of `seg` closest to `pt`: the projection onto the
/// segment, clamped to its endpoints.
pub fn closest_point_on_segment(seg: Line<f64>, pt: Coord<f64>) -> Coord<f64> {
    let dx = seg.end.x - seg.start.x;
    let dy = seg.end.y - seg.start.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return seg.start;
    }
    let t = ((pt.x - seg.start.x) * dx + (pt.y - seg.start.y) * dy) / len2;
    if t <= 0.0 {
        seg.start
    } else if t >= 1.0 {
        seg.end
    } else {
        Coord {
            x: seg.start.x + t * dx,
            y: seg.start.y + t * dy,
        }
    }
}

/// The closest pair of points between two segments and their
/// distance. Crossing segments meet at distance zero; otherwise the
/// minimum is attained at an endpoint of one of the segments.
pub fn closest_points_segment_segment(
    seg0: Line<f64>,
    seg1: Line<f64>,
) -> (Coord<f64>, Coord<f64>, f64) {
    match line_intersection(seg0, seg1) {
        Some(LineIntersection::SinglePoint { intersection, .. }) => {
            return (intersection, intersection, 0.0);
        }
        Some(LineIntersection::Collinear { intersection }) => {
            return (intersection.start, intersection.start, 0.0);
        }
        None => {}
    }

    let mut best = (seg0.start, seg1.start, f64::INFINITY);
    let candidates = [
        (closest_point_on_segment(seg1, seg0.start), seg0.start, true),
        (closest_point_on_segment(seg1, seg0.end), seg0.end, true),
        (closest_point_on_segment(seg0, seg1.start), seg1.start, false),
        (closest_point_on_segment(seg0, seg1.end), seg1.end, false),
    ];
    for (proj, endpoint, endpoint_on_seg0) in candidates {
        let dist = coord_distance(proj, endpoint);
        if dist < best.2 {
            best = if endpoint_on_seg0 {
                (endpoint, proj, dist)
            } else {
                (proj, endpoint, dist)
            };
        }
    }
    best
}
