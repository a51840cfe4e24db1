pub mod dimension;
pub mod matrix;


pub use dimension::{dimension_of, Dimension, Location, PatternSymbol};
pub use matrix::IntersectionMatrix;
