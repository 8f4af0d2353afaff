//! Sparse square matrices stored as a toroidal linked structure.
//!
//! Each row and each column owns a circular doubly-linked list anchored at a
//! permanent sentinel. A nonzero cell is a single node shared by its row list
//! and its column list; zero cells are never stored.
//!
//! # Complexity
//!
//! - `get`/`set`: bounded by the number of entries in the touched row and column.
//! - `set_identity`: O(size).
//! - sparse + sparse: O(total entries of both operands).
//! - sparse x sparse: visits every `(i, j)` pair with a nonempty row `i` and
//!   nonempty column `j`, so it stays quadratic in `size` even for very
//!   sparse operands.

mod arith;
mod mixed;

use std::fmt;

use approx::{AbsDiffEq, RelativeEq};

use crate::config::{default_config, ScanPolicy};
use crate::dense::{check_square_rows, DenseMatrix};
use crate::error::{check_index, check_same_size, MatrixError, Result};
use crate::matrix::{cells_match, log_dispatch, Matrix, SquareMatrix};
use crate::storage::{Axis, Toroid, MAX_DIMENSION};
use crate::types::{Entry, Representation, Scalar};

/// A square matrix storing only its nonzero cells.
#[derive(Clone)]
pub struct SparseMatrix {
    storage: Toroid,
    scan: ScanPolicy,
}

impl SparseMatrix {
    /// Create an all-zero matrix using the default scan policy.
    ///
    /// # Example
    /// ```
    /// use sqmatrix_core::prelude::*;
    ///
    /// let mut m = SparseMatrix::new(3)?;
    /// m.set(0, 2, 4.5)?;
    /// assert_eq!(m.get(0, 2)?, 4.5);
    /// assert_eq!(m.get(2, 0)?, 0.0);
    /// assert_eq!(m.nnz(), 1);
    /// # Ok::<(), MatrixError>(())
    /// ```
    pub fn new(size: usize) -> Result<Self> {
        Self::with_scan_policy(size, default_config().scan)
    }

    /// Create an all-zero matrix with an explicit lookup scan policy.
    pub fn with_scan_policy(size: usize, scan: ScanPolicy) -> Result<Self> {
        if size > MAX_DIMENSION {
            return Err(MatrixError::invalid_size(
                size as i128,
                format!("sparse matrices support at most {MAX_DIMENSION} rows"),
            ));
        }
        Self::empty(size, scan)
    }

    /// Create an all-zero matrix from a signed size, rejecting negatives.
    pub fn try_from_signed(size: i64) -> Result<Self> {
        Self::new(crate::error::check_signed_size(size)?)
    }

    /// Build a matrix from row-major data. Zero cells are not stored.
    pub fn from_rows<R: AsRef<[Scalar]>>(rows: &[R]) -> Result<Self> {
        let size = check_square_rows(rows)?;
        let mut matrix = Self::new(size)?;
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.as_ref().iter().enumerate() {
                matrix.storage.append(row, col, value);
            }
        }
        Ok(matrix)
    }

    /// Build a matrix from individual entries. Later entries overwrite earlier
    /// ones at the same cell.
    pub fn from_entries<I>(size: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut matrix = Self::new(size)?;
        for Entry { row, col, value } in entries {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    pub(crate) fn empty(size: usize, scan: ScanPolicy) -> Result<Self> {
        Ok(Self {
            storage: Toroid::new(size)?,
            scan,
        })
    }

    /// Lookup scan policy used by [`Matrix::get`].
    pub const fn scan_policy(&self) -> ScanPolicy {
        self.scan
    }

    /// All stored entries in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        (0..self.storage.size()).flat_map(move |row| self.line(Axis::Row, row))
    }

    /// Stored entries of one row, by increasing column.
    pub fn row(&self, row: usize) -> Result<impl DoubleEndedIterator<Item = Entry> + '_> {
        check_index(row, 0, self.storage.size())?;
        Ok(self.line(Axis::Row, row))
    }

    /// Stored entries of one column, by increasing row.
    pub fn column(&self, col: usize) -> Result<impl DoubleEndedIterator<Item = Entry> + '_> {
        check_index(0, col, self.storage.size())?;
        Ok(self.line(Axis::Column, col))
    }

    fn line(&self, axis: Axis, index: usize) -> impl DoubleEndedIterator<Item = Entry> + '_ {
        self.storage
            .iter(axis, index)
            .map(|(_, node)| Entry::new(node.row, node.col, node.value))
    }

    /// Copy into the dense representation.
    ///
    /// Fails with `InvalidSize` when a dense grid of this dimension cannot be
    /// allocated, without touching `self`.
    pub fn to_dense(&self) -> Result<DenseMatrix> {
        let mut dense = DenseMatrix::new(self.storage.size())?;
        for entry in self.entries() {
            dense.put(entry.row, entry.col, entry.value);
        }
        Ok(dense)
    }

    /// Append past the current tail of `row` and `col`. Callers must write in
    /// row-major order; zeros are skipped.
    pub(crate) fn append(&mut self, row: usize, col: usize, value: Scalar) {
        self.storage.append(row, col, value);
    }

    /// Value at an index already known to be in range.
    pub(crate) fn at(&self, row: usize, col: usize) -> Scalar {
        self.storage
            .find(row, col, self.scan)
            .map_or(0.0, |id| self.storage.node(id).value)
    }
}

impl Matrix for SparseMatrix {
    fn size(&self) -> usize {
        self.storage.size()
    }

    fn representation(&self) -> Representation {
        Representation::Sparse
    }

    fn get(&self, row: usize, col: usize) -> Result<Scalar> {
        check_index(row, col, self.size())?;
        Ok(self.at(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: Scalar) -> Result<()> {
        check_index(row, col, self.size())?;
        self.storage.set(row, col, value);
        Ok(())
    }

    fn set_identity(&mut self) {
        tracing::trace!(size = self.size(), "resetting sparse matrix to identity");
        self.storage.clear();
        for index in 0..self.size() {
            self.storage.set(index, index, 1.0);
        }
    }

    fn nnz(&self) -> usize {
        self.storage.len()
    }

    fn to_rows(&self) -> Vec<Vec<Scalar>> {
        let size = self.size();
        let mut rows = vec![vec![0.0; size]; size];
        for entry in self.entries() {
            rows[entry.row][entry.col] = entry.value;
        }
        rows
    }

    fn add(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        check_same_size(self.size(), other.size())?;
        log_dispatch("add", self.representation(), other.representation(), self.size());
        Ok(match other {
            SquareMatrix::Sparse(rhs) => SquareMatrix::Sparse(self.add_sparse(rhs)?),
            SquareMatrix::Dense(rhs) => SquareMatrix::Sparse(self.add_dense(rhs)?),
        })
    }

    fn premul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        check_same_size(self.size(), other.size())?;
        log_dispatch("premul", self.representation(), other.representation(), self.size());
        Ok(match other {
            SquareMatrix::Sparse(lhs) => SquareMatrix::Sparse(Self::product(lhs, self)?),
            SquareMatrix::Dense(lhs) => SquareMatrix::Dense(self.premul_dense(lhs)?),
        })
    }

    fn postmul(&self, other: &SquareMatrix) -> Result<SquareMatrix> {
        check_same_size(self.size(), other.size())?;
        log_dispatch("postmul", self.representation(), other.representation(), self.size());
        Ok(match other {
            SquareMatrix::Sparse(rhs) => SquareMatrix::Sparse(Self::product(self, rhs)?),
            SquareMatrix::Dense(rhs) => SquareMatrix::Dense(self.postmul_dense(rhs)?),
        })
    }
}

impl fmt::Debug for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseMatrix")
            .field("size", &self.size())
            .field("scan", &self.scan)
            .field("entries", &self.entries().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for SparseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.entries().eq(other.entries())
    }
}

impl AbsDiffEq for SparseMatrix {
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

impl RelativeEq for SparseMatrix {
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
