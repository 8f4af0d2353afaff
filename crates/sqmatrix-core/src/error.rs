//! Error types for square matrix operations.
//!
//! Every error denotes a violated calling contract. Operations validate their
//! arguments before touching any storage, so a returned error always means the
//! receiving matrix is unchanged.

use thiserror::Error;

/// Errors that can occur during matrix construction, access or arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The requested dimension cannot be represented.
    ///
    /// Raised for negative sizes coming from signed inputs and for sizes the
    /// backing storage cannot address.
    #[error("Invalid matrix size {size}: {reason}")]
    InvalidSize {
        /// The rejected size, as given by the caller
        size: i128,
        /// Description of why the size is invalid
        reason: String,
    },

    /// A row or column index lies outside `[0, size)`.
    #[error("Index ({row}, {col}) is out of bounds for a {size}x{size} matrix")]
    InvalidIndex {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Dimension of the matrix
        size: usize,
    },

    /// Operands (or constructor input) have incompatible dimensions.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfiguration {
        /// Name of the configuration key
        key: String,
        /// Rejected value
        value: String,
    },
}

impl MatrixError {
    /// Create an InvalidSize error with a custom reason.
    pub fn invalid_size<S: Into<String>>(size: i128, reason: S) -> Self {
        Self::InvalidSize {
            size,
            reason: reason.into(),
        }
    }

    /// Create an InvalidIndex error.
    pub const fn invalid_index(row: usize, col: usize, size: usize) -> Self {
        Self::InvalidIndex { row, col, size }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2>(key: S1, value: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::InvalidConfiguration {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Validate that `(row, col)` addresses a cell of a `size`x`size` matrix.
#[inline]
pub(crate) const fn check_index(row: usize, col: usize, size: usize) -> Result<()> {
    if row < size && col < size {
        Ok(())
    } else {
        Err(MatrixError::invalid_index(row, col, size))
    }
}

/// Convert a signed dimension, rejecting negative values.
pub(crate) fn check_signed_size(size: i64) -> Result<usize> {
    usize::try_from(size)
        .map_err(|_| MatrixError::invalid_size(i128::from(size), "size cannot be negative"))
}

/// Allocate room for `capacity` items backing a matrix of dimension `size`,
/// reporting allocator refusal as `InvalidSize` instead of aborting.
pub(crate) fn try_reserve<T>(capacity: usize, size: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(capacity).map_err(|err| {
        MatrixError::invalid_size(size as i128, format!("cannot allocate storage: {err}"))
    })?;
    Ok(buffer)
}

/// Validate that two operands share the same dimension.
#[inline]
pub(crate) fn check_same_size(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(MatrixError::dimension_mismatch(
            format!("{expected}x{expected}"),
            format!("{actual}x{actual}"),
        ))
    }
}
