//! The common matrix interface and the representation-tagged matrix type.
//!
//! [`SquareMatrix`] closes the set of representations, so binary operations
//! dispatch on an exhaustive `(receiver, argument)` match:
//!
//! | receiver | argument | `add`  | `premul` / `postmul` |
//! |----------|----------|--------|----------------------|
//! | Sparse   | Sparse   | Sparse | Sparse               |
//! | Sparse   | Dense    | Sparse | Dense                |
//! | Dense    | Sparse   | Sparse | Dense                |
//! | Dense    | Dense    | Dense  | Dense                |
//!
//! `a.premul(b)` computes `b * a`; `a.postmul(b)` computes `a * b`.

use approx::{AbsDiffEq, RelativeEq};

use crate::config::{default_config, MatrixConfig};
use crate::dense::DenseMatrix;
use crate::error::Result;
use crate::sparse::SparseMatrix;
use crate::types::{Representation, Scalar};

/// Operations shared by every square matrix representation.
///
/// All binary operations require both operands to have the same size and fail
/// with [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
/// otherwise. Operands are never modified.
pub trait Matrix {
    /// Number of rows (equal to the number of columns).
    fn size(&self) -> usize;

    /// Storage representation of this matrix.
    fn representation(&self) -> Representation;

    /// Value at `(row, col)`; unstored cells read as zero.
    fn get(&self, row: usize, col: usize) -> Result<Scalar>;

    /// Overwrite the value at `(row, col)`.
    ///
    /// For sparse matrices, writing zero removes the stored entry.
    fn set(&mut self, row: usize, col: usize, value: Scalar) -> Result<()>;

    /// Replace every cell with the identity matrix of the same size.
    fn set_identity(&mut self);

    /// Number of nonzero cells.
    fn nnz(&self) -> usize;

    /// Fraction of cells that are nonzero.
    fn density(&self) -> f64 {
        let size = self.size();
        if size == 0 {
            0.0
        } else {
            self.nnz() as f64 / (size as f64 * size as f64)
        }
    }

    /// Copy into row-major nested vectors.
    fn to_rows(&self) -> Vec<Vec<Scalar>>;

    /// Elementwise `self + other`.
    fn add(&self, other: &SquareMatrix) -> Result<SquareMatrix>;

    /// Product `other * self`.
    fn premul(&self, other: &SquareMatrix) -> Result<SquareMatrix>;

    /// Product `self * other`.
    fn postmul(&self, other: &SquareMatrix) -> Result<SquareMatrix>;
}

/// A square matrix in either representation.
#[derive(Debug, Clone)]
pub enum SquareMatrix {
    /// Every cell stored.
    Dense(DenseMatrix),
    /// Only nonzero cells stored.
    Sparse(SparseMatrix),
}

macro_rules! delegate {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            SquareMatrix::Dense($m) => $body,
            SquareMatrix::Sparse($m) => $body,
        }
    };
}

impl SquareMatrix {
    /// Create an all-zero matrix in the representation chosen by the
    /// process-wide default configuration.
    ///
    /// # Example
    /// ```
    /// use sqmatrix_core::prelude::*;
    ///
    /// let config = MatrixConfigBuilder::new()
    ///     .representation(Representation::Dense)
    ///     .build();
    /// let mut m = SquareMatrix::with_config(2, &config)?;
    /// m.set_identity();
    /// let doubled = m.add(&m)?;
    /// assert_eq!(doubled.representation(), Representation::Dense);
    /// assert_eq!(doubled.get(1, 1)?, 2.0);
    /// # Ok::<(), MatrixError>(())
    /// ```
    pub fn new(size: usize) -> Result<Self> {
        Self::with_config(size, default_config())
    }

    /// Create an all-zero matrix using an explicit configuration.
    pub fn with_config(size: usize, config: &MatrixConfig) -> Result<Self> {
        Ok(match config.representation {
            Representation::Dense => Self::Dense(DenseMatrix::new(size)?),
            Representation::Sparse => {
                Self::Sparse(SparseMatrix::with_scan_policy(size, config.scan)?)
            }
        })
    }

    /// Build a matrix in the given representation from row-major data.
    pub fn from_rows<R: AsRef<[Scalar]>>(
        representation: Representation,
        rows: &[R],
    ) -> Result<Self> {
        Ok(match representation {
            Representation::Dense => Self::Dense(DenseMatrix::from_rows(rows)?),
            Representation::Sparse => Self::Sparse(SparseMatrix::from_rows(rows)?),
        })
    }

    /// Identity matrix of the given size and representation.
    pub fn identity(representation: Representation, size: usize) -> Result<Self> {
        let config = MatrixConfig {
            representation,
            ..*default_config()
        };
        let mut matrix = Self::with_config(size, &config)?;
        matrix.set_identity();
        Ok(matrix)
    }

    /// Borrow the dense variant, if that is the representation.
    pub const fn as_dense(&self) -> Option<&DenseMatrix> {
        match self {
            Self::Dense(m) => Some(m),
            Self::Sparse(_) => None,
        }
    }

    /// Borrow the sparse variant, if that is the representation.
    pub const fn as_sparse(&self) -> Option<&SparseMatrix> {
        match self {
            Self::Sparse(m) => Some(m),
            Self::Dense(_) => None,
        }
    }

    /// Convert to the sparse representation, consuming `self`.
    pub fn into_sparse(self) -> Result<SparseMatrix> {
        match self {
            Self::Sparse(m) => Ok(m),
            Self::Dense(m) => m.to_sparse(),
        }
    }

    /// Convert to the dense representation, consuming `self`.
    pub fn into_dense(self) -> Result<DenseMatrix> {
        match self {
            Self::Dense(m) => Ok(m),
            Self::Sparse(m) => m.to_dense(),
        }
    }

    pub(crate) fn at(&self, row: usize, col: usize) -> Scalar {
        delegate!(self, m => m.at(row, col))
    }
}

impl Matrix for SquareMatrix {
    fn size(&self) -> usize {
        delegate!(self, m => m.size())
    }

    fn representation(&self) -> Representation {
        delegate!(self, m => m.representation())
    }

    fn get(&self, row: usize, col: usize) -> Result<Scalar> {
        delegate!(self, m => m.get(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: Scalar) -> Result<()> {
        delegate!(self, m => m.set(row, col, value))
    }

    fn set_identity(&mut self) {
        delegate!(self, m => m.set_identity());
    }

    fn nnz(&self) -> usize {
        delegate!(self, m => m.nnz())
    }

    fn to_rows(&self) -> Vec<Vec<Scalar>> {
        delegate!(self, m => m.to_rows())
    }

    fn add(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        delegate!(self, m => m.add(other))
    }

    fn premul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        delegate!(self, m => m.premul(other))
    }

    fn postmul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        delegate!(self, m => m.postmul(other))
    }
}

impl From<DenseMatrix> for SquareMatrix {
    fn from(matrix: DenseMatrix) -> Self {
        Self::Dense(matrix)
    }
}

impl From<SparseMatrix> for SquareMatrix {
    fn from(matrix: SparseMatrix) -> Self {
        Self::Sparse(matrix)
    }
}

/// Cell-wise equality; the representation tag is not compared.
impl PartialEq for SquareMatrix {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Dense(a), Self::Dense(b)) => a == b,
            (Self::Sparse(a), Self::Sparse(b)) => a == b,
            _ => cells_match(
                (self.size(), |r, c| self.at(r, c)),
                (other.size(), |r, c| other.at(r, c)),
                |a, b| a == b,
            ),
        }
    }
}

impl AbsDiffEq for SquareMatrix {
    type Epsilon = Scalar;

    fn default_epsilon() -> Scalar {
        Scalar::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Scalar) -> bool {
        cells_match(
            (self.size(), |r, c| self.at(r, c)),
            (other.size(), |r, c| other.at(r, c)),
            |a, b| a.abs_diff_eq(&b, epsilon),
        )
    }
}

impl RelativeEq for SquareMatrix {
    fn default_max_relative() -> Scalar {
        Scalar::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Scalar, max_relative: Scalar) -> bool {
        cells_match(
            (self.size(), |r, c| self.at(r, c)),
            (other.size(), |r, c| other.at(r, c)),
            |a, b| a.relative_eq(&b, epsilon, max_relative),
        )
    }
}

/// Compare two matrices cell by cell through in-range accessors.
pub(crate) fn cells_match<L, R, P>(lhs: (usize, L), rhs: (usize, R), eq: P) -> bool
where
    L: Fn(usize, usize) -> Scalar,
    R: Fn(usize, usize) -> Scalar,
    P: Fn(Scalar, Scalar) -> bool,
{
    let (size, lhs) = lhs;
    let (other_size, rhs) = rhs;
    size == other_size
        && (0..size).all(|row| (0..size).all(|col| eq(lhs(row, col), rhs(row, col))))
}

pub(crate) fn log_dispatch(
    op: &'static str,
    lhs: Representation,
    rhs: Representation,
    size: usize,
) {
    tracing::debug!(op, %lhs, %rhs, size, "dispatching matrix operation");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    const ROWS: [[Scalar; 3]; 3] = [[1.0, 0.0, 2.0], [0.0, 3.0, 0.0], [4.0, 0.0, 0.0]];

    fn both() -> [SquareMatrix; 2] {
        [
            SquareMatrix::from_rows(Representation::Sparse, &ROWS).unwrap(),
            SquareMatrix::from_rows(Representation::Dense, &ROWS).unwrap(),
        ]
    }

    #[test]
    fn test_dispatch_table_tags() {
        use Representation::{Dense, Sparse};
        let expected = [
            ((Sparse, Sparse), Sparse, Sparse),
            ((Sparse, Dense), Sparse, Dense),
            ((Dense, Sparse), Sparse, Dense),
            ((Dense, Dense), Dense, Dense),
        ];
        for ((lhs, rhs), add_tag, mul_tag) in expected {
            let a = SquareMatrix::from_rows(lhs, &ROWS).unwrap();
            let b = SquareMatrix::from_rows(rhs, &ROWS).unwrap();
            assert_eq!(a.add(&b).unwrap().representation(), add_tag);
            assert_eq!(a.premul(&b).unwrap().representation(), mul_tag);
            assert_eq!(a.postmul(&b).unwrap().representation(), mul_tag);
        }
    }

    #[test]
    fn test_results_agree_across_pairings() {
        let reference = SquareMatrix::from_rows(Representation::Dense, &ROWS).unwrap();
        let squared = reference.postmul(&reference).unwrap();
        let doubled = reference.add(&reference).unwrap();
        for a in both() {
            for b in both() {
                assert_eq!(a.postmul(&b).unwrap(), squared);
                assert_eq!(a.premul(&b).unwrap(), squared);
                assert_eq!(a.add(&b).unwrap(), doubled);
            }
        }
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let small = SquareMatrix::identity(Representation::Sparse, 2).unwrap();
        for big in both() {
            let err = big.add(&small).unwrap_err();
            assert_eq!(err, MatrixError::dimension_mismatch("3x3", "2x2"));
            assert!(matches!(small.premul(&big), Err(MatrixError::DimensionMismatch { .. })));
            assert!(matches!(big.postmul(&small), Err(MatrixError::DimensionMismatch { .. })));
        }
    }

    #[test]
    fn test_cross_representation_equality() {
        let [sparse, dense] = both();
        assert_eq!(sparse, dense);
        let mut changed = dense.clone();
        changed.set(1, 1, 3.5).unwrap();
        assert_ne!(sparse, changed);
        assert_relative_eq!(sparse, changed, epsilon = 1.0);
    }

    #[test]
    fn test_conversions_preserve_cells() {
        let [sparse, dense] = both();
        let to_dense = sparse.clone().into_dense().unwrap();
        assert_eq!(SquareMatrix::from(to_dense), dense);
        let to_sparse = dense.into_sparse().unwrap();
        assert_eq!(SquareMatrix::from(to_sparse), sparse);
    }

    #[test]
    fn test_density() {
        let [sparse, dense] = both();
        assert_relative_eq!(sparse.density(), 4.0 / 9.0);
        assert_relative_eq!(dense.density(), 4.0 / 9.0);
        assert_eq!(SquareMatrix::new(0).unwrap().density(), 0.0);
    }

    #[test]
    fn test_identity_in_both_representations() {
        for repr in [Representation::Sparse, Representation::Dense] {
            let id = SquareMatrix::identity(repr, 3).unwrap();
            assert_eq!(id.representation(), repr);
            assert_eq!(id.nnz(), 3);
            let [a, _] = both();
            assert_eq!(a.postmul(&id).unwrap(), a);
        }
    }
}
