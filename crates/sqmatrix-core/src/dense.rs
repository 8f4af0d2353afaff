//! Dense square matrices backed by `nalgebra`.

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::DMatrix;

use crate::error::{
    check_index, check_same_size, check_signed_size, try_reserve, MatrixError, Result,
};
use crate::matrix::{log_dispatch, Matrix, SquareMatrix};
use crate::sparse::SparseMatrix;
use crate::types::{Representation, Scalar};

/// A square matrix storing every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    grid: DMatrix<Scalar>,
}

impl DenseMatrix {
    /// Create an all-zero matrix.
    ///
    /// Fails with `InvalidSize` when the grid cannot be allocated.
    pub fn new(size: usize) -> Result<Self> {
        let cells = check_dense_size(size)?;
        let mut buffer = try_reserve(cells, size)?;
        buffer.resize(cells, 0.0);
        Ok(Self::from_grid(DMatrix::from_vec(size, size, buffer)))
    }

    /// Create an all-zero matrix from a signed size, rejecting negatives.
    pub fn try_from_signed(size: i64) -> Result<Self> {
        Self::new(check_signed_size(size)?)
    }

    /// Build a matrix from row-major data.
    ///
    /// # Example
    /// ```
    /// use sqmatrix_core::prelude::*;
    ///
    /// let m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    /// assert_eq!(m.get(1, 0)?, 3.0);
    /// assert!(DenseMatrix::from_rows(&[vec![1.0, 2.0]]).is_err());
    /// # Ok::<(), MatrixError>(())
    /// ```
    pub fn from_rows<R: AsRef<[Scalar]>>(rows: &[R]) -> Result<Self> {
        let mut matrix = Self::new(check_square_rows(rows)?)?;
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.as_ref().iter().enumerate() {
                matrix.put(row, col, value);
            }
        }
        Ok(matrix)
    }

    /// Wrap an existing `nalgebra` matrix, which must be square.
    pub fn from_nalgebra(grid: DMatrix<Scalar>) -> Result<Self> {
        if grid.is_square() {
            Ok(Self::from_grid(grid))
        } else {
            Err(MatrixError::dimension_mismatch(
                "square matrix",
                format!("{}x{}", grid.nrows(), grid.ncols()),
            ))
        }
    }

    /// Borrow the backing `nalgebra` matrix.
    pub const fn as_nalgebra(&self) -> &DMatrix<Scalar> {
        &self.grid
    }

    /// Take the backing `nalgebra` matrix.
    pub fn into_nalgebra(self) -> DMatrix<Scalar> {
        self.grid
    }

    /// Copy the nonzero cells into the sparse representation.
    pub fn to_sparse(&self) -> Result<SparseMatrix> {
        let size = self.size();
        let mut sparse = SparseMatrix::new(size)?;
        for row in 0..size {
            for col in 0..size {
                sparse.append(row, col, self.at(row, col));
            }
        }
        Ok(sparse)
    }

    pub(crate) const fn from_grid(grid: DMatrix<Scalar>) -> Self {
        Self { grid }
    }

    /// Value at an index already known to be in range.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> Scalar {
        self.grid[(row, col)]
    }

    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, value: Scalar) {
        self.grid[(row, col)] = value;
    }

    pub(crate) fn add_dense(&self, other: &Self) -> Result<Self> {
        let mut sum = Self::new(self.size())?;
        self.grid.add_to(&other.grid, &mut sum.grid);
        Ok(sum)
    }

    /// Matrix product `lhs * rhs`.
    pub(crate) fn product(lhs: &Self, rhs: &Self) -> Result<Self> {
        let mut product = Self::new(lhs.size())?;
        lhs.grid.mul_to(&rhs.grid, &mut product.grid);
        Ok(product)
    }
}

impl Matrix for DenseMatrix {
    fn size(&self) -> usize {
        self.grid.nrows()
    }

    fn representation(&self) -> Representation {
        Representation::Dense
    }

    fn get(&self, row: usize, col: usize) -> Result<Scalar> {
        check_index(row, col, self.size())?;
        Ok(self.at(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: Scalar) -> Result<()> {
        check_index(row, col, self.size())?;
        self.put(row, col, value);
        Ok(())
    }

    fn set_identity(&mut self) {
        self.grid.fill_with_identity();
    }

    fn nnz(&self) -> usize {
        self.grid.iter().filter(|value| **value != 0.0).count()
    }

    fn to_rows(&self) -> Vec<Vec<Scalar>> {
        self.grid
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    fn add(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        check_same_size(self.size(), other.size())?;
        log_dispatch("add", self.representation(), other.representation(), self.size());
        Ok(match other {
            SquareMatrix::Dense(rhs) => SquareMatrix::Dense(self.add_dense(rhs)?),
            SquareMatrix::Sparse(rhs) => SquareMatrix::Sparse(rhs.add_dense(self)?),
        })
    }

    fn premul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        check_same_size(self.size(), other.size())?;
        log_dispatch("premul", self.representation(), other.representation(), self.size());
        Ok(SquareMatrix::Dense(match other {
            SquareMatrix::Dense(lhs) => Self::product(lhs, self)?,
            SquareMatrix::Sparse(lhs) => lhs.postmul_dense(self)?,
        }))
    }

    fn postmul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        check_same_size(self.size(), other.size())?;
        log_dispatch("postmul", self.representation(), other.representation(), self.size());
        Ok(SquareMatrix::Dense(match other {
            SquareMatrix::Dense(rhs) => Self::product(self, rhs)?,
            SquareMatrix::Sparse(rhs) => rhs.premul_dense(self)?,
        }))
    }
}

impl AbsDiffEq for DenseMatrix {
    type Epsilon = Scalar;

    fn default_epsilon() -> Scalar {
        Scalar::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Scalar) -> bool {
        self.grid.shape() == other.grid.shape() && self.grid.abs_diff_eq(&other.grid, epsilon)
    }
}

impl RelativeEq for DenseMatrix {
    fn default_max_relative() -> Scalar {
        Scalar::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Scalar, max_relative: Scalar) -> bool {
        self.grid.shape() == other.grid.shape()
            && self.grid.relative_eq(&other.grid, epsilon, max_relative)
    }
}

/// Number of cells in a grid of dimension `size`, rejecting dimensions whose
/// byte count overflows the address space.
fn check_dense_size(size: usize) -> Result<usize> {
    size
        .checked_mul(size)
        .filter(|cells| {
            cells
                .checked_mul(std::mem::size_of::<Scalar>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            MatrixError::invalid_size(
                size as i128,
                "dense grid would exceed the addressable memory",
            )
        })
}

/// Check that row-major input is square and return its dimension.
pub(crate) fn check_square_rows<R: AsRef<[Scalar]>>(rows: &[R]) -> Result<usize> {
    let size = rows.len();
    match rows.iter().position(|row| row.as_ref().len() != size) {
        None => Ok(size),
        Some(index) => Err(MatrixError::dimension_mismatch(
            format!("{size} columns in every row"),
            format!("{} columns in row {index}", rows[index].as_ref().len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_is_zero() {
        let m = DenseMatrix::new(3).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.nnz(), 0);
        assert_eq!(m.to_rows(), vec![vec![0.0; 3]; 3]);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = DenseMatrix::new(2).unwrap();
        m.set(1, 0, 4.0).unwrap();
        assert_eq!(m.get(1, 0), Ok(4.0));
        assert_eq!(m.get(2, 0), Err(MatrixError::invalid_index(2, 0, 2)));
        assert_eq!(m.set(0, 2, 1.0), Err(MatrixError::invalid_index(0, 2, 2)));
    }

    #[test]
    fn test_identity_overwrites() {
        let mut m = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        m.set_identity();
        assert_eq!(m.to_rows(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(matches!(
            DenseMatrix::try_from_signed(-4),
            Err(MatrixError::InvalidSize { size: -4, .. })
        ));
        assert!(matches!(
            DenseMatrix::new(usize::MAX),
            Err(MatrixError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_unallocatable_grid_is_an_error() {
        // 2^60 cells fit the address arithmetic but no allocator can serve them.
        assert!(matches!(
            DenseMatrix::new(1 << 30),
            Err(MatrixError::InvalidSize { size, .. }) if size == 1 << 30
        ));
    }

    #[test]
    fn test_non_square_nalgebra_rejected() {
        let grid = DMatrix::<Scalar>::zeros(2, 3);
        assert!(matches!(
            DenseMatrix::from_nalgebra(grid),
            Err(MatrixError::DimensionMismatch { .. })
        ));
        let square = DenseMatrix::from_nalgebra(DMatrix::identity(2, 2)).unwrap();
        assert_eq!(square.as_nalgebra(), &DMatrix::<Scalar>::identity(2, 2));
    }

    #[test]
    fn test_product_and_sum() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let product = DenseMatrix::product(&a, &b).unwrap();
        assert_eq!(product.to_rows(), vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
        let sum = a.add_dense(&b).unwrap();
        assert_eq!(sum.to_rows(), vec![vec![1.0, 3.0], vec![4.0, 4.0]]);
    }

    #[test]
    fn test_to_sparse_keeps_nonzeros() {
        let m = DenseMatrix::from_rows(&[[0.0, 1.5], [0.0, 0.0]]).unwrap();
        let sparse = m.to_sparse().unwrap();
        assert_eq!(sparse.nnz(), 1);
        assert_eq!(sparse.to_rows(), m.to_rows());
    }

    #[test]
    fn test_approximate_equality() {
        let a = DenseMatrix::from_rows(&[[0.1 + 0.2, 1.0], [0.0, 1.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[0.3, 1.0], [0.0, 1.0]]).unwrap();
        assert_relative_eq!(a, b);
        assert!(!a.abs_diff_eq(&DenseMatrix::new(3).unwrap(), 1.0));
    }
}
