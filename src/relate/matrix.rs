use crate::error::{Result, TopologyError};
use crate::relate::dimension::{Dimension, Location, PatternSymbol};
use std::fmt;

use Location::{Boundary, Exterior, Interior};

/// The DE-9IM relationship matrix: a 3x3 grid of [`Dimension`] values
/// indexed by ([`Location`], [`Location`]), row = first geometry.
///
/// All cells start at `False`. `set_at_least` only ever raises a cell,
/// and `add` is the pointwise max merge used to combine contributions
/// from disjoint topology components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntersectionMatrix {
    matrix: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// An all-`False` matrix.
    pub fn new() -> Self {
        IntersectionMatrix {
            matrix: [[Dimension::False; 3]; 3],
        }
    }

    /// Builds a matrix from a 9-character dimension-symbol string,
    /// row-major.
    pub fn from_symbols(symbols: &str) -> Result<Self> {
        let mut im = IntersectionMatrix::new();
        im.set_symbols(symbols)?;
        Ok(im)
    }

    pub fn get(&self, row: Location, col: Location) -> Dimension {
        self.matrix[row.index()][col.index()]
    }

    pub fn set(&mut self, row: Location, col: Location, dim: Dimension) {
        self.matrix[row.index()][col.index()] = dim;
    }

    /// Fills cells row-major from a dimension-symbol string. Like the
    /// GEOS original this fills exactly the cells the string covers;
    /// only `matches` enforces a length of 9.
    pub fn set_symbols(&mut self, symbols: &str) -> Result<()> {
        for (i, c) in symbols.chars().take(9).enumerate() {
            self.matrix[i / 3][i % 3] = Dimension::from_symbol(c)?;
        }
        Ok(())
    }

    /// Raises the cell to `min` if it is currently lower.
    pub fn set_at_least(&mut self, row: Location, col: Location, min: Dimension) {
        let cell = &mut self.matrix[row.index()][col.index()];
        if *cell < min {
            *cell = min;
        }
    }

    /// `set_at_least`, skipped when either location is undefined
    /// (e.g. a point geometry has no boundary).
    pub fn set_at_least_if_valid(
        &mut self,
        row: Option<Location>,
        col: Option<Location>,
        min: Dimension,
    ) {
        if let (Some(row), Some(col)) = (row, col) {
            self.set_at_least(row, col, min);
        }
    }

    /// Position-wise `set_at_least` over a dimension-symbol string.
    pub fn set_at_least_symbols(&mut self, symbols: &str) -> Result<()> {
        for (i, c) in symbols.chars().take(9).enumerate() {
            let min = Dimension::from_symbol(c)?;
            if self.matrix[i / 3][i % 3] < min {
                self.matrix[i / 3][i % 3] = min;
            }
        }
        Ok(())
    }

    pub fn set_all(&mut self, dim: Dimension) {
        self.matrix = [[dim; 3]; 3];
    }

    /// Adds one matrix to another by taking the maximum dimension value
    /// at each position. Commutative and associative, with the
    /// all-`False` matrix as identity.
    pub fn add(&mut self, other: &IntersectionMatrix) {
        for row in [Interior, Boundary, Exterior] {
            for col in [Interior, Boundary, Exterior] {
                self.set_at_least(row, col, other.get(row, col));
            }
        }
    }

    /// Swaps the six off-diagonal cells in place, turning the matrix
    /// for (A,B) into the matrix for (B,A). Applying twice is identity.
    pub fn transpose_in_place(&mut self) {
        let m = &mut self.matrix;
        for (a, b) in [((1, 0), (0, 1)), ((2, 0), (0, 2)), ((2, 1), (1, 2))] {
            let tmp = m[a.0][a.1];
            m[a.0][a.1] = m[b.0][b.1];
            m[b.0][b.1] = tmp;
        }
    }

    /// A transposed copy, leaving `self` untouched.
    pub fn transposed(&self) -> IntersectionMatrix {
        let mut im = self.clone();
        im.transpose_in_place();
        im
    }

    /// Single-cell match of a stored dimension against a pattern symbol.
    pub fn matches_symbol(dim: Dimension, symbol: char) -> Result<bool> {
        Ok(PatternSymbol::from_symbol(symbol)?.matches(dim))
    }

    /// Matches all 9 cells row-major against a DE-9IM pattern.
    ///
    /// Unlike `set_symbols` the pattern length is checked: anything but
    /// 9 characters is an error carrying the offending pattern.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        if pattern.chars().count() != 9 {
            return Err(TopologyError::InvalidPattern(pattern.to_string()));
        }
        for (i, c) in pattern.chars().enumerate() {
            let sym = PatternSymbol::from_symbol(c)?;
            if !sym.matches(self.matrix[i / 3][i % 3]) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Builds a matrix from `actual` and pattern-matches it against
    /// `required`.
    pub fn matches_patterns(actual: &str, required: &str) -> Result<bool> {
        IntersectionMatrix::from_symbols(actual)?.matches(required)
    }

    pub fn is_disjoint(&self) -> bool {
        self.get(Interior, Interior) == Dimension::False
            && self.get(Interior, Boundary) == Dimension::False
            && self.get(Boundary, Interior) == Dimension::False
            && self.get(Boundary, Boundary) == Dimension::False
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// Touches is only defined for area/area, line/line, line/area,
    /// point/area and point/line pairs; every other combination is
    /// false. Symmetric in its arguments, so the higher-dimension-first
    /// case recurses with them swapped.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        if dim_a > dim_b {
            // No transpose needed: the pattern block is symmetric.
            return self.is_touches(dim_b, dim_a);
        }
        let applicable = matches!(
            (dim_a, dim_b),
            (Dimension::Area, Dimension::Area)
                | (Dimension::Line, Dimension::Line)
                | (Dimension::Line, Dimension::Area)
                | (Dimension::Point, Dimension::Area)
                | (Dimension::Point, Dimension::Line)
        );
        if !applicable {
            return false;
        }
        self.get(Interior, Interior) == Dimension::False
            && (PatternSymbol::True.matches(self.get(Interior, Boundary))
                || PatternSymbol::True.matches(self.get(Boundary, Interior))
                || PatternSymbol::True.matches(self.get(Boundary, Boundary)))
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Line)
            | (Dimension::Point, Dimension::Area)
            | (Dimension::Line, Dimension::Area) => {
                PatternSymbol::True.matches(self.get(Interior, Interior))
                    && PatternSymbol::True.matches(self.get(Interior, Exterior))
            }
            (Dimension::Line, Dimension::Point)
            | (Dimension::Area, Dimension::Point)
            | (Dimension::Area, Dimension::Line) => {
                PatternSymbol::True.matches(self.get(Interior, Interior))
                    && PatternSymbol::True.matches(self.get(Exterior, Interior))
            }
            (Dimension::Line, Dimension::Line) => {
                self.get(Interior, Interior) == Dimension::Point
            }
            _ => false,
        }
    }

    pub fn is_within(&self) -> bool {
        PatternSymbol::True.matches(self.get(Interior, Interior))
            && self.get(Interior, Exterior) == Dimension::False
            && self.get(Boundary, Exterior) == Dimension::False
    }

    pub fn is_contains(&self) -> bool {
        PatternSymbol::True.matches(self.get(Interior, Interior))
            && self.get(Exterior, Interior) == Dimension::False
            && self.get(Exterior, Boundary) == Dimension::False
    }

    /// Contains, relaxed to also accept geometries lying entirely in
    /// the boundary.
    pub fn is_covers(&self) -> bool {
        let has_pointwise = PatternSymbol::True.matches(self.get(Interior, Interior))
            || PatternSymbol::True.matches(self.get(Interior, Boundary))
            || PatternSymbol::True.matches(self.get(Boundary, Interior))
            || PatternSymbol::True.matches(self.get(Boundary, Boundary));
        has_pointwise
            && self.get(Exterior, Interior) == Dimension::False
            && self.get(Exterior, Boundary) == Dimension::False
    }

    pub fn is_covered_by(&self) -> bool {
        let has_pointwise = PatternSymbol::True.matches(self.get(Interior, Interior))
            || PatternSymbol::True.matches(self.get(Interior, Boundary))
            || PatternSymbol::True.matches(self.get(Boundary, Interior))
            || PatternSymbol::True.matches(self.get(Boundary, Boundary));
        has_pointwise
            && self.get(Interior, Exterior) == Dimension::False
            && self.get(Boundary, Exterior) == Dimension::False
    }

    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        if dim_a != dim_b {
            return false;
        }
        PatternSymbol::True.matches(self.get(Interior, Interior))
            && self.get(Exterior, Interior) == Dimension::False
            && self.get(Interior, Exterior) == Dimension::False
            && self.get(Exterior, Boundary) == Dimension::False
            && self.get(Boundary, Exterior) == Dimension::False
    }

    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point)
            | (Dimension::Area, Dimension::Area) => {
                PatternSymbol::True.matches(self.get(Interior, Interior))
                    && PatternSymbol::True.matches(self.get(Interior, Exterior))
                    && PatternSymbol::True.matches(self.get(Exterior, Interior))
            }
            (Dimension::Line, Dimension::Line) => {
                self.get(Interior, Interior) == Dimension::Line
                    && PatternSymbol::True.matches(self.get(Interior, Exterior))
                    && PatternSymbol::True.matches(self.get(Exterior, Interior))
            }
            _ => false,
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.matrix {
            for dim in row {
                write!(f, "{}", dim.to_symbol())?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for IntersectionMatrix {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self> {
        IntersectionMatrix::from_symbols(s)
    }
}
