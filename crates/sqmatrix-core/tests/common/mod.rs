//! Shared helpers for the integration tests.

#![allow(dead_code)]

use rand::prelude::*;
use sqmatrix_core::prelude::*;

/// Row-major grid used as the brute-force reference.
pub type Grid = Vec<Vec<Scalar>>;

/// Random grid where each cell is nonzero with probability `density`.
///
/// Nonzero values are small integers, so sums and products stay exact in `f32`.
pub fn random_grid(rng: &mut impl Rng, size: usize, density: f64) -> Grid {
    (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    if rng.gen_bool(density) {
                        let magnitude = rng.gen_range(1..=9) as Scalar;
                        if rng.gen_bool(0.5) {
                            magnitude
                        } else {
                            -magnitude
                        }
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Elementwise sum, computed cell by cell.
pub fn reference_add(a: &Grid, b: &Grid) -> Grid {
    a.iter()
        .zip(b)
        .map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| x + y).collect())
        .collect()
}

/// Textbook triple-loop product `a * b`.
pub fn reference_mul(a: &Grid, b: &Grid) -> Grid {
    let size = a.len();
    let mut out = vec![vec![0.0; size]; size];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..size).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Build a matrix in the given representation from a grid.
pub fn build(repr: Representation, grid: &Grid) -> SquareMatrix {
    SquareMatrix::from_rows(repr, grid).expect("grid is square")
}

/// All four `(receiver, argument)` representation pairings.
pub const PAIRINGS: [(Representation, Representation); 4] = [
    (Representation::Sparse, Representation::Sparse),
    (Representation::Sparse, Representation::Dense),
    (Representation::Dense, Representation::Sparse),
    (Representation::Dense, Representation::Dense),
];
