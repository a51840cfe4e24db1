pub mod algorithm;
pub mod distance;
pub mod error;
pub mod noding;
pub mod overlay;
pub mod relate;

pub use algorithm::{GeoPointLocator, PointLocator};
pub use distance::{DistanceOp, GeometryLocation};
pub use error::{Result, TopologyError};
pub use noding::SegmentString;
pub use overlay::{LineBuilder, OverlayOpCode};
pub use relate::{Dimension, IntersectionMatrix, Location};
