//! Runtime configuration for matrix construction.
//!
//! A process-wide default is read once from the environment and can be
//! overridden per matrix through [`MatrixConfigBuilder`].
//!
//! | Variable                  | Values                 | Default     |
//! |---------------------------|------------------------|-------------|
//! | `SQMATRIX_REPRESENTATION` | `dense`, `sparse`      | `sparse`    |
//! | `SQMATRIX_SCAN`           | `heuristic`, `forward` | `heuristic` |

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

use crate::error::MatrixError;
use crate::types::Representation;

/// Environment variable selecting the default representation.
pub const REPRESENTATION_ENV: &str = "SQMATRIX_REPRESENTATION";

/// Environment variable selecting the sparse lookup scan policy.
pub const SCAN_ENV: &str = "SQMATRIX_SCAN";

/// Traversal policy for point lookups in a sparse row list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanPolicy {
    /// Scan rightward when the column lies in the left half of the matrix,
    /// leftward otherwise.
    #[default]
    Heuristic,
    /// Always scan rightward from the row sentinel.
    Forward,
}

impl ScanPolicy {
    /// Whether a lookup of column `col` in a matrix of `size` starts from the
    /// tail of the row list.
    #[inline]
    pub const fn scans_backward(self, col: usize, size: usize) -> bool {
        match self {
            Self::Heuristic => col > size / 2,
            Self::Forward => false,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Forward => "forward",
        }
    }
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanPolicy {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(Self::Heuristic),
            "forward" => Ok(Self::Forward),
            _ => Err(MatrixError::invalid_configuration("scan", s)),
        }
    }
}

/// Configuration applied when constructing matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixConfig {
    /// Representation used by [`SquareMatrix::new`](crate::SquareMatrix::new).
    pub representation: Representation,
    /// Lookup policy for sparse matrices.
    pub scan: ScanPolicy,
}

impl MatrixConfig {
    /// Read the configuration from the process environment.
    ///
    /// Unset variables keep their defaults. Unparseable values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(REPRESENTATION_ENV) {
            match raw.parse() {
                Ok(representation) => config.representation = representation,
                Err(err) => {
                    tracing::warn!(%err, key = REPRESENTATION_ENV, "ignoring configuration value");
                }
            }
        }

        if let Some(raw) = lookup(SCAN_ENV) {
            match raw.parse() {
                Ok(scan) => config.scan = scan,
                Err(err) => {
                    tracing::warn!(%err, key = SCAN_ENV, "ignoring configuration value");
                }
            }
        }

        config
    }
}

/// Global configuration, read from the environment on first use.
pub static DEFAULT_CONFIG: Lazy<MatrixConfig> = Lazy::new(MatrixConfig::from_env);

/// Get the process-wide default configuration.
pub fn default_config() -> &'static MatrixConfig {
    &DEFAULT_CONFIG
}

/// Builder for creating a custom matrix configuration.
pub struct MatrixConfigBuilder {
    config: MatrixConfig,
}

impl MatrixConfigBuilder {
    /// Create a new builder starting from the process-wide default.
    pub fn new() -> Self {
        Self {
            config: *default_config(),
        }
    }

    /// Set the representation used for new matrices.
    pub const fn representation(mut self, representation: Representation) -> Self {
        self.config.representation = representation;
        self
    }

    /// Set the sparse lookup scan policy.
    pub const fn scan(mut self, scan: ScanPolicy) -> Self {
        self.config.scan = scan;
        self
    }

    /// Build the configuration.
    pub const fn build(self) -> MatrixConfig {
        self.config
    }
}

impl Default for MatrixConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
