//! Square matrices in dense and sparse representations.
//!
//! This crate provides two interchangeable storage layouts for `size`x`size`
//! matrices of `f32` behind a single [`Matrix`] interface, and lets the two be
//! mixed freely in arithmetic.
//!
//! # Key Concepts
//!
//! - **Dense**: every cell stored in an `nalgebra` grid
//! - **Sparse**: only nonzero cells stored, each linked into a circular row
//!   list and a circular column list (a toroidal mesh)
//! - **Dispatch**: [`SquareMatrix`] tags a matrix with its representation and
//!   picks the right algorithm for each operand pairing
//!
//! # Modules
//!
//! - [`config`]: Default representation and lookup scan policy
//! - [`dense`]: Dense representation
//! - [`error`]: Error types
//! - [`matrix`]: The [`Matrix`] trait and [`SquareMatrix`]
//! - [`sparse`]: Sparse representation
//! - [`types`]: Scalar, entry and representation types

#![allow(clippy::float_cmp)]

pub mod config;
pub mod dense;
pub mod error;
pub mod matrix;
pub mod sparse;
pub mod types;

mod storage;

pub use config::{MatrixConfig, MatrixConfigBuilder, ScanPolicy};
pub use dense::DenseMatrix;
pub use error::{MatrixError, Result};
pub use matrix::{Matrix, SquareMatrix};
pub use sparse::SparseMatrix;
pub use types::{Entry, Representation, Scalar};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use sqmatrix_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{MatrixConfig, MatrixConfigBuilder, ScanPolicy};
    pub use crate::dense::DenseMatrix;
    pub use crate::error::{MatrixError, Result};
    pub use crate::matrix::{Matrix, SquareMatrix};
    pub use crate::sparse::SparseMatrix;
    pub use crate::types::{Entry, Representation, Scalar};
}
