use crate::relate::Location;
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo_types::{Coord, Geometry};

/// Classifies a coordinate as interior, boundary or exterior of a
/// geometry. The seam lets callers substitute an indexed or cached
/// locator without touching the overlay/distance code.
pub trait PointLocator {
    fn locate(&self, pt: Coord<f64>, geom: &Geometry<f64>) -> Location;
}

/// Default locator backed by geo's coordinate-position test.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoPointLocator;

impl PointLocator for GeoPointLocator {
    fn locate(&self, pt: Coord<f64>, geom: &Geometry<f64>) -> Location {
        match geom.coordinate_position(&pt) {
            CoordPos::Inside => Location::Interior,
            CoordPos::OnBoundary => Location::Boundary,
            CoordPos::Outside => Location::Exterior,
        }
    }
}
