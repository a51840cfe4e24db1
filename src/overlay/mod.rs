pub mod graph;
pub mod line_builder;

#[cfg(test)]
mod tests;

pub use graph::{EdgeId, NodeId, OverlayEdge, OverlayGraph, OverlayNode};
pub use line_builder::{is_result_of_op, LineBuilder, OverlayOpCode};
