use crate::relate::{Dimension, Location};
use geo_types::Coord;
use std::collections::HashMap;

// Type aliases for indices to ensure we don't mix them up
pub type NodeId = usize;
pub type EdgeId = usize;

/// A node of the overlay topology graph.
#[derive(Clone, Debug)]
pub struct OverlayNode {
    pub coordinate: Coord<f64>,
    /// Ids of incident edges.
    pub edges: Vec<EdgeId>,
}

/// An edge of the overlay topology graph, carrying the labelling and
/// depth annotations the line builder consumes.
#[derive(Clone, Debug)]
pub struct OverlayEdge {
    pub src: NodeId,
    pub dst: NodeId,
    /// The edge geometry as a coordinate chain.
    pub coords: Vec<Coord<f64>>,
    /// Per-vertex elevation; NaN marks a vertex with no Z.
    pub z: Vec<f64>,
    /// On-location of the edge relative to each input geometry.
    /// `None` until labelled; isolated edges start with only their own
    /// input's side known.
    pub label: [Option<Location>; 2],
    /// Depth of the already-built result area at each endpoint;
    /// > 0 means the endpoint lies inside it.
    pub depth: [i32; 2],
    /// `Line` for edges from line inputs, `Area` for area-boundary
    /// edges.
    pub dimension: Dimension,
    /// Consumed by a result area during area assembly.
    pub in_result_area: bool,
    /// Coverage by the result area, once determined.
    pub covered: Option<bool>,
    /// Emitted into the line result.
    pub consumed: bool,
}

impl OverlayEdge {
    pub fn is_line_edge(&self) -> bool {
        self.dimension == Dimension::Line
    }

    /// An edge is isolated when one input's location is still unknown:
    /// it touched no edge of that input during noding.
    pub fn is_isolated(&self) -> bool {
        self.label[0].is_none() || self.label[1].is_none()
    }

    /// A point on the edge away from its endpoints, for
    /// point-in-polygon tests.
    pub fn representative_point(&self) -> Coord<f64> {
        let p0 = self.coords[0];
        let p1 = self.coords[1];
        Coord {
            x: (p0.x + p1.x) / 2.0,
            y: (p0.y + p1.y) / 2.0,
        }
    }
}

// Wrapper for Coord to be Hashable (since f64 is not Hash)
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct NodeKey(i64, i64);

impl From<Coord<f64>> for NodeKey {
    fn from(c: Coord<f64>) -> Self {
        NodeKey(c.x.to_bits() as i64, c.y.to_bits() as i64)
    }
}

/// Arena-style topology graph: nodes and edges live in flat vectors
/// and refer to each other by index, never by pointer.
#[derive(Default)]
pub struct OverlayGraph {
    pub nodes: Vec<OverlayNode>,
    pub edges: Vec<OverlayEdge>,
    node_map: HashMap<NodeKey, NodeId>,
}

impl OverlayGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        let key = NodeKey::from(coord);
        if let Some(&id) = self.node_map.get(&key) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(OverlayNode {
            coordinate: coord,
            edges: Vec::new(),
        });
        self.node_map.insert(key, id);
        id
    }

    /// Adds an edge with all-missing Z values.
    pub fn add_edge(
        &mut self,
        coords: Vec<Coord<f64>>,
        label: [Option<Location>; 2],
        dimension: Dimension,
    ) -> EdgeId {
        let z = vec![f64::NAN; coords.len()];
        self.add_edge_with_z(coords, z, label, dimension)
    }

    pub fn add_edge_with_z(
        &mut self,
        coords: Vec<Coord<f64>>,
        z: Vec<f64>,
        label: [Option<Location>; 2],
        dimension: Dimension,
    ) -> EdgeId {
        debug_assert!(coords.len() >= 2);
        debug_assert_eq!(coords.len(), z.len());
        let src = self.add_node(coords[0]);
        let dst = self.add_node(coords[coords.len() - 1]);
        let id = self.edges.len();
        self.edges.push(OverlayEdge {
            src,
            dst,
            coords,
            z,
            label,
            depth: [0, 0],
            dimension,
            in_result_area: false,
            covered: None,
            consumed: false,
        });
        self.nodes[src].edges.push(id);
        self.nodes[dst].edges.push(id);
        id
    }

    /// Whether any edge incident to `node` was emitted as part of the
    /// result area boundary.
    pub fn node_has_result_area_edge(&self, node: NodeId) -> bool {
        self.nodes[node]
            .edges
            .iter()
            .any(|&e| self.edges[e].in_result_area)
    }
}
