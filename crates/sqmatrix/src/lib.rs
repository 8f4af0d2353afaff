//! Dense and sparse square matrices.
//!
//! Re-exports [`sqmatrix_core`] together with the `nalgebra` version backing
//! the dense representation.
//!
//! # Example
//! ```
//! use sqmatrix::prelude::*;
//!
//! let a = SquareMatrix::from_rows(Representation::Sparse, &[[1.0, 2.0], [0.0, 1.0]])?;
//! let b = SquareMatrix::from_rows(Representation::Dense, &[[0.0, 1.0], [1.0, 0.0]])?;
//!
//! let ab = a.postmul(&b)?;
//! assert_eq!(ab.representation(), Representation::Dense);
//! assert_eq!(ab.to_rows(), vec![vec![2.0, 1.0], vec![1.0, 0.0]]);
//!
//! let sum = a.add(&b)?;
//! assert_eq!(sum.representation(), Representation::Sparse);
//! # Ok::<(), MatrixError>(())
//! ```

pub use nalgebra;
pub use sqmatrix_core::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sqmatrix_core::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reexports_reach_core() {
        let m = SquareMatrix::identity(Representation::Dense, 2).unwrap();
        let grid = m.into_dense().unwrap().into_nalgebra();
        assert_eq!(grid, crate::nalgebra::DMatrix::<Scalar>::identity(2, 2));
    }
}
