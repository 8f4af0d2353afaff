//! Sparse-with-sparse arithmetic performed directly on the linked lists.

use std::cmp::Ordering;

use super::SparseMatrix;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::storage::{Axis, AxisIter};
use crate::types::Scalar;

impl SparseMatrix {
    /// Elementwise sum, merging the two row lists of every row like the merge
    /// step of merge sort.
    ///
    /// Results are appended in row-major order, so each write is O(1). A sum of
    /// exactly zero is dropped rather than stored.
    pub(crate) fn add_sparse(&self, other: &Self) -> Result<Self> {
        let size = self.size();
        let mut result = Self::empty(size, self.scan)?;

        for row in 0..size {
            let mut lhs = keyed(self.storage.iter(Axis::Row, row)).peekable();
            let mut rhs = keyed(other.storage.iter(Axis::Row, row)).peekable();

            loop {
                let (col, value) = match (lhs.peek().copied(), rhs.peek().copied()) {
                    (Some((a_col, a)), Some((b_col, b))) => match a_col.cmp(&b_col) {
                        Ordering::Equal => {
                            lhs.next();
                            rhs.next();
                            (a_col, a + b)
                        }
                        Ordering::Less => {
                            lhs.next();
                            (a_col, a)
                        }
                        Ordering::Greater => {
                            rhs.next();
                            (b_col, b)
                        }
                    },
                    (Some(entry), None) => {
                        lhs.next();
                        entry
                    }
                    (None, Some(entry)) => {
                        rhs.next();
                        entry
                    }
                    (None, None) => break,
                };
                result.storage.append(row, col, value);
            }
        }

        Ok(result)
    }

    /// Matrix product `lhs * rhs`.
    ///
    /// Cell `(i, j)` is the two-pointer merge of row `i` of `lhs` against
    /// column `j` of `rhs`. `postmul` calls this as `(self, other)` and
    /// `premul` as `(other, self)`.
    pub(crate) fn product(lhs: &Self, rhs: &Self) -> Result<Self> {
        let size = lhs.size();
        let mut result = Self::empty(size, lhs.scan)?;

        for row in 0..size {
            if lhs.storage.is_axis_empty(Axis::Row, row) {
                continue;
            }
            for col in 0..size {
                if rhs.storage.is_axis_empty(Axis::Column, col) {
                    continue;
                }
                let sum = merge_dot(
                    lhs.storage.iter(Axis::Row, row),
                    rhs.storage.iter(Axis::Column, col),
                );
                result.storage.append(row, col, sum);
            }
        }

        Ok(result)
    }
}

/// `(key, value)` pairs of one list, keyed by the list's sort index.
fn keyed(iter: AxisIter<'_>) -> impl Iterator<Item = (usize, Scalar)> + '_ {
    let axis = iter.axis();
    iter.map(move |(_, node)| (axis.key(node), node.value))
}

/// Dot product of a row list and a column list, advancing whichever side has
/// the smaller index.
fn merge_dot(row: AxisIter<'_>, column: AxisIter<'_>) -> Scalar {
    let mut row = keyed(row).peekable();
    let mut column = keyed(column).peekable();
    let mut sum = 0.0;

    while let (Some((k_row, a)), Some((k_col, b))) = (row.peek().copied(), column.peek().copied()) {
        match k_row.cmp(&k_col) {
            Ordering::Equal => {
                sum += a * b;
                row.next();
                column.next();
            }
            Ordering::Less => {
                row.next();
            }
            Ordering::Greater => {
                column.next();
            }
        }
    }

    sum
}
