//! Sparse-with-dense arithmetic.
//!
//! The sparse operand walks its own entries; the dense operand is read
//! through plain indexing since it has no sparsity to exploit.

use super::SparseMatrix;
use crate::dense::DenseMatrix;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::storage::Axis;

impl SparseMatrix {
    /// `self + dense`, kept in the sparse representation.
    ///
    /// Every cell of the dense operand contributes, so the result is usually
    /// full even though it is stored sparsely.
    pub(crate) fn add_dense(&self, dense: &DenseMatrix) -> Result<Self> {
        let size = self.size();
        let mut result = Self::empty(size, self.scan)?;

        for row in 0..size {
            let mut stored = self
                .storage
                .iter(Axis::Row, row)
                .map(|(_, node)| (node.col, node.value))
                .peekable();
            for col in 0..size {
                let mut value = dense.at(row, col);
                if let Some((_, sparse_value)) = stored.next_if(|&(c, _)| c == col) {
                    value += sparse_value;
                }
                result.storage.append(row, col, value);
            }
        }

        Ok(result)
    }

    /// `self * dense`: each row entry `(i, k)` scales row `k` of the dense
    /// operand into row `i` of the product.
    pub(crate) fn postmul_dense(&self, dense: &DenseMatrix) -> Result<DenseMatrix> {
        let size = self.size();
        let mut product = DenseMatrix::new(size)?;

        for row in 0..size {
            for (_, node) in self.storage.iter(Axis::Row, row) {
                for col in 0..size {
                    let sum = product.at(row, col) + node.value * dense.at(node.col, col);
                    product.put(row, col, sum);
                }
            }
        }

        Ok(product)
    }

    /// `dense * self`: each column entry `(k, j)` scales column `k` of the
    /// dense operand into column `j` of the product.
    pub(crate) fn premul_dense(&self, dense: &DenseMatrix) -> Result<DenseMatrix> {
        let size = self.size();
        let mut product = DenseMatrix::new(size)?;

        for col in 0..size {
            for (_, node) in self.storage.iter(Axis::Column, col) {
                for row in 0..size {
                    let sum = product.at(row, col) + dense.at(row, node.row) * node.value;
                    product.put(row, col, sum);
                }
            }
        }

        Ok(product)
    }
}
