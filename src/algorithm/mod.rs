pub mod point_locator;

pub use point_locator::{GeoPointLocator, PointLocator};
