use crate::algorithm::PointLocator;
use crate::overlay::graph::{EdgeId, OverlayGraph};
use crate::relate::Location;
use geo_types::{Coord, Geometry, LineString, Polygon};
use log::debug;

/// Boolean overlay operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayOpCode {
    Intersection,
    Union,
    Difference,
    SymmetricDifference,
}

/// Decides result membership from the two on-locations of an edge.
/// A point on a boundary belongs to the geometry, so `Boundary`
/// collapses to `Interior` before the per-op test.
pub fn is_result_of_op(loc0: Location, loc1: Location, op: OverlayOpCode) -> bool {
    let in0 = loc0 != Location::Exterior;
    let in1 = loc1 != Location::Exterior;
    match op {
        OverlayOpCode::Intersection => in0 && in1,
        OverlayOpCode::Union => in0 || in1,
        OverlayOpCode::Difference => in0 && !in1,
        OverlayOpCode::SymmetricDifference => in0 != in1,
    }
}

/// Forms the line-component output of a Boolean overlay from a
/// finished topology graph.
///
/// The graph's result areas must already be assembled (edges consumed
/// by them carry `in_result_area`); this builder only decides which of
/// the remaining edges survive as lines. Re-invoking `build` on the
/// same graph is undefined.
pub struct LineBuilder<'a, L: PointLocator> {
    graph: &'a mut OverlayGraph,
    /// The polygons already emitted by the (external) area assembly.
    result_areas: &'a [Polygon<f64>],
    /// The two overlay input geometries, for isolated-edge labelling.
    inputs: [&'a Geometry<f64>; 2],
    locator: &'a L,
    line_edges: Vec<EdgeId>,
}

impl<'a, L: PointLocator> LineBuilder<'a, L> {
    pub fn new(
        graph: &'a mut OverlayGraph,
        result_areas: &'a [Polygon<f64>],
        inputs: [&'a Geometry<f64>; 2],
        locator: &'a L,
    ) -> Self {
        LineBuilder {
            graph,
            result_areas,
            inputs,
            locator,
            line_edges: Vec::new(),
        }
    }

    /// Returns the line strings belonging to the result of `op`.
    pub fn build(mut self, op: OverlayOpCode) -> Vec<LineString<f64>> {
        self.find_covered_line_edges();
        self.label_isolated_lines();
        self.collect_lines(op);
        self.build_lines()
    }

    /// Marks L edges which are covered by the result area. Edges at a
    /// node which also has a result area edge are decided by their
    /// depth at that node; edges whose nodes carry no area edge need a
    /// point-in-polygon test against the built result areas. Covered
    /// edges are implied by the emitted area boundary and must not be
    /// duplicated as lines.
    fn find_covered_line_edges(&mut self) {
        for id in 0..self.graph.edges.len() {
            let edge = &self.graph.edges[id];
            if !edge.is_line_edge() || edge.covered.is_some() {
                continue;
            }
            let endpoints = [(edge.src, 0), (edge.dst, 1)];
            let mut covered = None;
            for (node, end) in endpoints {
                if self.graph.node_has_result_area_edge(node) {
                    covered = Some(self.graph.edges[id].depth[end] > 0);
                    break;
                }
            }
            let covered = covered.unwrap_or_else(|| {
                self.is_covered_by_area(self.graph.edges[id].representative_point())
            });
            if covered {
                debug!("line edge {id} covered by result area, discarded");
            }
            self.graph.edges[id].covered = Some(covered);
        }
    }

    fn is_covered_by_area(&self, pt: Coord<f64>) -> bool {
        self.result_areas.iter().any(|poly| {
            let geom = Geometry::Polygon(poly.clone());
            self.locator.locate(pt, &geom) != Location::Exterior
        })
    }

    /// Completes the label of edges which touched no edge of the other
    /// input: their location is found by classifying a representative
    /// point against that input.
    fn label_isolated_lines(&mut self) {
        for id in 0..self.graph.edges.len() {
            let edge = &self.graph.edges[id];
            if !edge.is_line_edge() || !edge.is_isolated() {
                continue;
            }
            let pt = edge.representative_point();
            for target in 0..2 {
                if self.graph.edges[id].label[target].is_none() {
                    let loc = self.locator.locate(pt, self.inputs[target]);
                    self.graph.edges[id].label[target] = Some(loc);
                }
            }
        }
    }

    fn collect_lines(&mut self, op: OverlayOpCode) {
        for id in 0..self.graph.edges.len() {
            if self.graph.edges[id].is_line_edge() {
                self.collect_line_edge(id, op);
            } else {
                self.collect_boundary_touch_edge(id, op);
            }
        }
    }

    /// A line edge survives when its label puts it in the result and
    /// it is not covered by the result area.
    fn collect_line_edge(&mut self, id: EdgeId, op: OverlayOpCode) {
        let edge = &self.graph.edges[id];
        if edge.consumed || edge.covered == Some(true) {
            return;
        }
        let (Some(loc0), Some(loc1)) = (edge.label[0], edge.label[1]) else {
            return;
        };
        if is_result_of_op(loc0, loc1, op) {
            self.graph.edges[id].consumed = true;
            self.line_edges.push(id);
        }
    }

    /// Collects edges from area inputs which should be in the result
    /// but were not included in a result area. This happens only
    /// during an intersection, when two area boundaries touch along a
    /// line segment or a dimensional collapse occurs.
    fn collect_boundary_touch_edge(&mut self, id: EdgeId, op: OverlayOpCode) {
        if op != OverlayOpCode::Intersection {
            return;
        }
        let edge = &self.graph.edges[id];
        if edge.consumed || edge.in_result_area || edge.covered == Some(true) {
            return;
        }
        let (Some(loc0), Some(loc1)) = (edge.label[0], edge.label[1]) else {
            return;
        };
        if is_result_of_op(loc0, loc1, op) {
            self.graph.edges[id].consumed = true;
            self.line_edges.push(id);
        }
    }

    fn build_lines(&mut self) -> Vec<LineString<f64>> {
        let mut result = Vec::with_capacity(self.line_edges.len());
        for &id in &self.line_edges {
            let edge = &mut self.graph.edges[id];
            propagate_z(&edge.coords, &mut edge.z);
            result.push(LineString::new(edge.coords.clone()));
        }
        result
    }
}

/// Fills missing (NaN) Z values of a mixed 2d/3d vertex chain.
/// Interior gaps are linearly interpolated between the nearest
/// bracketing 3d vertices by distance along the chain; gaps at either
/// end copy the nearest known Z. A chain with no known Z is left
/// untouched.
pub fn propagate_z(coords: &[Coord<f64>], z: &mut [f64]) {
    debug_assert_eq!(coords.len(), z.len());
    if !z.iter().any(|v| v.is_nan()) || z.iter().all(|v| v.is_nan()) {
        return;
    }

    // Cumulative distance along the chain, for interpolation weights.
    let mut chainage = vec![0.0; coords.len()];
    for i in 1..coords.len() {
        let dx = coords[i].x - coords[i - 1].x;
        let dy = coords[i].y - coords[i - 1].y;
        chainage[i] = chainage[i - 1] + (dx * dx + dy * dy).sqrt();
    }

    let known: Vec<usize> = z
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, _)| i)
        .collect();

    for i in 0..z.len() {
        if !z[i].is_nan() {
            continue;
        }
        let prev = known.iter().rev().find(|&&k| k < i);
        let next = known.iter().find(|&&k| k > i);
        z[i] = match (prev, next) {
            (Some(&p), Some(&n)) => {
                let span = chainage[n] - chainage[p];
                if span > 0.0 {
                    let frac = (chainage[i] - chainage[p]) / span;
                    z[p] + frac * (z[n] - z[p])
                } else {
                    z[p]
                }
            }
            (Some(&p), None) => z[p],
            (None, Some(&n)) => z[n],
            (None, None) => unreachable!("at least one known Z checked above"),
        };
    }
}
