use crate::error::{Result, TopologyError};
use geo_types::Geometry;

/// Dimension value of a geometry or of a DE-9IM matrix cell.
///
/// `False` means the intersection is empty. The ordering
/// `False < Point < Line < Area` is what `set_at_least` and matrix
/// addition rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    False,
    Point,
    Line,
    Area,
}

impl Dimension {
    /// The conventional numeric value: -1, 0, 1 or 2.
    pub fn value(self) -> i8 {
        match self {
            Dimension::False => -1,
            Dimension::Point => 0,
            Dimension::Line => 1,
            Dimension::Area => 2,
        }
    }

    pub fn to_symbol(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::Point => '0',
            Dimension::Line => '1',
            Dimension::Area => '2',
        }
    }

    pub fn from_symbol(c: char) -> Result<Dimension> {
        match c {
            'F' | 'f' => Ok(Dimension::False),
            '0' => Ok(Dimension::Point),
            '1' => Ok(Dimension::Line),
            '2' => Ok(Dimension::Area),
            other => Err(TopologyError::InvalidSymbol(other)),
        }
    }
}

/// Symbol space used when matching a DE-9IM pattern.
///
/// Distinct from [`Dimension`]: `Any` and `True` can appear in a pattern
/// but can never be stored in a matrix cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternSymbol {
    Any,
    True,
    False,
    Point,
    Line,
    Area,
}

impl PatternSymbol {
    pub fn from_symbol(c: char) -> Result<PatternSymbol> {
        match c {
            '*' => Ok(PatternSymbol::Any),
            'T' | 't' => Ok(PatternSymbol::True),
            'F' | 'f' => Ok(PatternSymbol::False),
            '0' => Ok(PatternSymbol::Point),
            '1' => Ok(PatternSymbol::Line),
            '2' => Ok(PatternSymbol::Area),
            other => Err(TopologyError::InvalidSymbol(other)),
        }
    }

    /// Does a stored dimension value satisfy this pattern symbol?
    pub fn matches(self, dim: Dimension) -> bool {
        match self {
            PatternSymbol::Any => true,
            PatternSymbol::True => dim != Dimension::False,
            PatternSymbol::False => dim == Dimension::False,
            PatternSymbol::Point => dim == Dimension::Point,
            PatternSymbol::Line => dim == Dimension::Line,
            PatternSymbol::Area => dim == Dimension::Area,
        }
    }
}

/// Topological location of a point relative to a geometry.
///
/// Doubles as the row/column index of an [`IntersectionMatrix`]:
/// Interior = 0, Boundary = 1, Exterior = 2.
///
/// [`IntersectionMatrix`]: crate::relate::IntersectionMatrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    pub fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}

/// Topological dimension of a geometry: the max over its components.
///
/// Empty collections report `False`.
pub fn dimension_of(geom: &Geometry<f64>) -> Dimension {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
        Geometry::Line(_)
        | Geometry::LineString(_)
        | Geometry::MultiLineString(_) => Dimension::Line,
        Geometry::Polygon(_)
        | Geometry::MultiPolygon(_)
        | Geometry::Rect(_)
        | Geometry::Triangle(_) => Dimension::Area,
        Geometry::GeometryCollection(gc) => gc
            .iter()
            .map(dimension_of)
            .max()
            .unwrap_or(Dimension::False),
    }
}
