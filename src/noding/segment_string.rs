use crate::error::{Result, TopologyError};
use crate::noding::intersection::SegmentIntersection;
use geo_types::Coord;
use log::debug;
use std::cmp::Ordering;

/// A discovered intersection point on a segment string, keyed by
/// `(segment_index, dist)` where `dist` grows monotonically along the
/// segment.
#[derive(Clone, Copy, Debug)]
pub struct SegmentNode {
    pub segment_index: usize,
    pub dist: f64,
    pub coord: Coord<f64>,
}

impl SegmentNode {
    fn key_cmp(&self, other: &SegmentNode) -> Ordering {
        self.segment_index.cmp(&other.segment_index).then(
            self.dist
                .partial_cmp(&other.dist)
                .unwrap_or(Ordering::Equal),
        )
    }
}

/// The sorted, duplicate-free list of intersection nodes on one
/// segment string.
#[derive(Clone, Debug, Default)]
pub struct SegmentNodeList {
    nodes: Vec<SegmentNode>,
}

impl SegmentNodeList {
    pub fn new() -> Self {
        SegmentNodeList { nodes: Vec::new() }
    }

    /// Inserts a node, keeping the list sorted by `(segment_index,
    /// dist)` and merging duplicates of the same key.
    pub fn add(&mut self, node: SegmentNode) {
        match self
            .nodes
            .binary_search_by(|probe| probe.key_cmp(&node))
        {
            Ok(_) => {} // already recorded
            Err(pos) => self.nodes.insert(pos, node),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SegmentNode> {
        self.nodes.iter()
    }
}

/// Classifies a direction vector into one of 8 compass octants,
/// counted CCW from the positive x axis. Used downstream to order
/// edges consistently around a shared node.
pub fn octant(dx: f64, dy: f64) -> u8 {
    if dx == 0.0 && dy == 0.0 {
        debug!("octant of zero-length vector, defaulting to 0");
        return 0;
    }
    let adx = dx.abs();
    let ady = dy.abs();
    if dx >= 0.0 {
        if dy >= 0.0 {
            if adx >= ady {
                0
            } else {
                1
            }
        } else if adx >= ady {
            7
        } else {
            6
        }
    } else if dy >= 0.0 {
        if adx >= ady {
            3
        } else {
            2
        }
    } else if adx >= ady {
        4
    } else {
        5
    }
}

/// An ordered chain of contiguous line segments carrying the list of
/// intersection nodes discovered on it.
///
/// The context tag is opaque to the noding code and is copied
/// unchanged to every derived substring, so callers can track
/// provenance (typically "which input geometry").
#[derive(Clone, Debug)]
pub struct SegmentString<D: Clone> {
    pts: Vec<Coord<f64>>,
    context: D,
    isolated: bool,
    nodes: SegmentNodeList,
}

impl<D: Clone> SegmentString<D> {
    /// Wraps a coordinate chain. Fewer than two coordinates cannot
    /// form a segment and are rejected.
    pub fn new(pts: Vec<Coord<f64>>, context: D) -> Result<Self> {
        if pts.len() < 2 {
            return Err(TopologyError::InvalidGeometry(format!(
                "SegmentString requires at least 2 coordinates, got {}",
                pts.len()
            )));
        }
        Ok(SegmentString {
            pts,
            context,
            isolated: false,
            nodes: SegmentNodeList::new(),
        })
    }

    pub fn context(&self) -> &D {
        &self.context
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        // Always false in practice: construction requires 2 coords.
        self.pts.is_empty()
    }

    pub fn coord(&self, i: usize) -> Coord<f64> {
        self.pts[i]
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.pts
    }

    pub fn nodes(&self) -> &SegmentNodeList {
        &self.nodes
    }

    pub fn is_closed(&self) -> bool {
        self.pts[0] == self.pts[self.pts.len() - 1]
    }

    /// Octant of the segment leaving vertex `index`.
    ///
    /// The last vertex has no outgoing segment; calling this with it
    /// is a caller error.
    pub fn segment_octant(&self, index: usize) -> u8 {
        assert!(
            index < self.pts.len() - 1,
            "segment_octant called on the last vertex ({index})"
        );
        let p0 = self.pts[index];
        let p1 = self.pts[index + 1];
        octant(p1.x - p0.x, p1.y - p0.y)
    }

    /// Registers a single intersection point found on segment
    /// `segment_index`.
    ///
    /// A point that lands exactly on the segment's end vertex is
    /// normalized to the higher adjacent segment index, which
    /// guarantees every later split is non-degenerate.
    pub fn add_intersection(&mut self, int_pt: Coord<f64>, segment_index: usize) {
        let mut normalized_index = segment_index;
        let mut dist = dist_along(self.pts[segment_index], int_pt);
        let next = segment_index + 1;
        if next < self.pts.len() && int_pt == self.pts[next] {
            normalized_index = next;
            dist = 0.0;
        }
        self.nodes.add(SegmentNode {
            segment_index: normalized_index,
            dist,
            coord: int_pt,
        });
    }

    /// Registers intersection `int_index` of a pairwise segment test.
    pub fn add_intersection_from(
        &mut self,
        si: &SegmentIntersection,
        segment_index: usize,
        int_index: usize,
    ) {
        self.add_intersection(si.points[int_index], segment_index);
    }

    /// Registers all (0, 1 or 2) points of a pairwise segment test.
    pub fn add_intersections(&mut self, si: &SegmentIntersection, segment_index: usize) {
        for i in 0..si.points.len() {
            self.add_intersection_from(si, segment_index, i);
        }
    }

    /// Splits every input string at its recorded nodes, appending the
    /// resulting substrings to `out`.
    ///
    /// Precondition: the node lists already hold a topologically
    /// closed set of intersections (see
    /// [`compute_intersections`](crate::noding::compute_intersections)).
    /// Each substring copies the parent context and starts with an
    /// empty node list. Linear in the total node count.
    pub fn add_noded_substrings(strings: &[SegmentString<D>], out: &mut Vec<SegmentString<D>>) {
        for ss in strings {
            ss.split_at_nodes(out);
        }
    }

    /// Allocate-and-return form of [`Self::add_noded_substrings`].
    pub fn noded_substrings(strings: &[SegmentString<D>]) -> Vec<SegmentString<D>> {
        let mut out = Vec::new();
        Self::add_noded_substrings(strings, &mut out);
        out
    }

    fn split_at_nodes(&self, out: &mut Vec<SegmentString<D>>) {
        // Complete the node list with the two string endpoints, then
        // cut between consecutive nodes.
        let mut nodes = self.nodes.clone();
        nodes.add(SegmentNode {
            segment_index: 0,
            dist: 0.0,
            coord: self.pts[0],
        });
        nodes.add(SegmentNode {
            segment_index: self.pts.len() - 1,
            dist: 0.0,
            coord: self.pts[self.pts.len() - 1],
        });

        for pair in nodes.nodes.windows(2) {
            if let Some(sub) = self.split_edge(&pair[0], &pair[1]) {
                out.push(sub);
            }
        }
    }

    fn split_edge(&self, n0: &SegmentNode, n1: &SegmentNode) -> Option<SegmentString<D>> {
        let mut coords =
            Vec::with_capacity(n1.segment_index - n0.segment_index + 2);
        coords.push(n0.coord);
        for i in (n0.segment_index + 1)..=n1.segment_index {
            coords.push(self.pts[i]);
        }
        // The end node duplicates the last vertex when it sits exactly
        // on it with dist 0.
        let last_seg_start = self.pts[n1.segment_index];
        if n1.dist > 0.0 || n1.coord != last_seg_start {
            coords.push(n1.coord);
        }
        coords.dedup();
        if coords.len() < 2 {
            debug!(
                "degenerate split between segments {} and {}, skipped",
                n0.segment_index, n1.segment_index
            );
            return None;
        }
        Some(SegmentString {
            pts: coords,
            context: self.context.clone(),
            isolated: false,
            nodes: SegmentNodeList::new(),
        })
    }
}

fn dist_along(seg_start: Coord<f64>, pt: Coord<f64>) -> f64 {
    let dx = pt.x - seg_start.x;
    let dy = pt.y - seg_start.y;
    dx * dx + dy * dy
}
