pub mod intersection;
pub mod segment_string;


pub use intersection::{compute_intersections, SegmentIntersection};
pub use segment_string::{SegmentNode, SegmentNodeList, SegmentString};
