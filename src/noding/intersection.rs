use crate::noding::segment_string::SegmentString;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo_types::{Coord, Line};
use log::debug;
use rstar::{RTree, RTreeObject, AABB};
use smallvec::SmallVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a pairwise segment intersection test: 0, 1 (proper or
/// endpoint) or 2 (collinear overlap) intersection points.
#[derive(Clone, Debug)]
pub struct SegmentIntersection {
    pub points: SmallVec<[Coord<f64>; 2]>,
    /// True when the single intersection point is interior to both
    /// segments.
    pub proper: bool,
}

impl SegmentIntersection {
    pub fn compute(l0: Line<f64>, l1: Line<f64>) -> Self {
        let mut points: SmallVec<[Coord<f64>; 2]> = SmallVec::new();
        let mut proper = false;
        match line_intersection(l0, l1) {
            Some(LineIntersection::SinglePoint {
                intersection,
                is_proper,
            }) => {
                points.push(intersection);
                proper = is_proper;
            }
            Some(LineIntersection::Collinear { intersection }) => {
                points.push(intersection.start);
                points.push(intersection.end);
            }
            None => {}
        }
        SegmentIntersection { points, proper }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
struct IndexedSegment {
    line: Line<f64>,
    /// Index of the owning string in the batch.
    string: usize,
    /// Segment index within the owning string.
    seg: usize,
    /// Position in the flattened segment list, for unique-pair tests.
    flat: usize,
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        let p1 = self.line.start;
        let p2 = self.line.end;
        AABB::from_corners(
            [p1.x.min(p2.x), p1.y.min(p2.y)],
            [p1.x.max(p2.x), p1.y.max(p2.y)],
        )
    }
}

/// Runs the pairwise robust-intersection pass over a batch of strings,
/// populating every string's node list. This is the precondition of
/// [`SegmentString::noded_substrings`].
///
/// A single O(n^2)-candidate pass over an R-tree of segments; no
/// fixed-point iteration over intersections introduced by splitting,
/// so near-coincident floating-point intersections can slip through.
pub fn compute_intersections<D: Clone + Sync>(strings: &mut [SegmentString<D>]) {
    let mut segments = Vec::new();
    for (si, ss) in strings.iter().enumerate() {
        for (i, w) in ss.coords().windows(2).enumerate() {
            segments.push(IndexedSegment {
                line: Line::new(w[0], w[1]),
                string: si,
                seg: i,
                flat: segments.len(),
            });
        }
    }

    let tree = RTree::bulk_load(segments);

    let process = |acc: &mut Vec<(usize, usize, Coord<f64>)>,
                   a: &IndexedSegment,
                   b: &IndexedSegment| {
        // Unique pairs only.
        if a.flat >= b.flat {
            return;
        }
        let si = SegmentIntersection::compute(a.line, b.line);
        if si.is_empty() {
            return;
        }
        if is_trivial(strings, a, b, &si) {
            return;
        }
        for &pt in &si.points {
            acc.push((a.string, a.seg, pt));
            acc.push((b.string, b.seg, pt));
        }
    };

    #[cfg(feature = "parallel")]
    let events: Vec<(usize, usize, Coord<f64>)> = tree
        .intersection_candidates_with_other_tree(&tree)
        .par_bridge()
        .fold(Vec::new, |mut acc, (a, b)| {
            process(&mut acc, a, b);
            acc
        })
        .reduce(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            a
        });

    #[cfg(not(feature = "parallel"))]
    let events: Vec<(usize, usize, Coord<f64>)> = tree
        .intersection_candidates_with_other_tree(&tree)
        .fold(Vec::new(), |mut acc, (a, b)| {
            process(&mut acc, a, b);
            acc
        });

    debug!("noding pass recorded {} intersection events", events.len());

    for (string, seg, pt) in events {
        strings[string].add_intersection(pt, seg);
    }
}

/// An intersection is trivial when it is the shared vertex of two
/// adjacent segments of the same string (including the wrap-around
/// pair of a closed string). Those never produce a node.
fn is_trivial<D: Clone>(
    strings: &[SegmentString<D>],
    a: &IndexedSegment,
    b: &IndexedSegment,
    si: &SegmentIntersection,
) -> bool {
    if a.string != b.string || si.points.len() != 1 || si.proper {
        return false;
    }
    let ss = &strings[a.string];
    if a.seg.abs_diff(b.seg) == 1 {
        return true;
    }
    if ss.is_closed() {
        let max_seg = ss.len() - 2;
        if (a.seg == 0 && b.seg == max_seg) || (b.seg == 0 && a.seg == max_seg) {
            return true;
        }
    }
    false
}
