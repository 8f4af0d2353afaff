//! Shared value types.

use std::fmt;
use std::str::FromStr;

use crate::error::MatrixError;

/// Element type stored in every matrix.
pub type Scalar = f32;

/// One stored nonzero cell of a sparse matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Cell value, never zero
    pub value: Scalar,
}

impl Entry {
    /// Create an entry.
    pub const fn new(row: usize, col: usize, value: Scalar) -> Self {
        Self { row, col, value }
    }
}

/// Storage representation of a [`SquareMatrix`](crate::SquareMatrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// Plain `size`x`size` grid.
    Dense,
    /// Toroidal linked lists holding only nonzero cells.
    #[default]
    Sparse,
}

impl Representation {
    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" | "array" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            _ => Err(MatrixError::invalid_configuration("representation", s)),
        }
    }
}
