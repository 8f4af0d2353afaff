//! End-to-end arithmetic over every representation pairing.

mod common;

use common::{build, PAIRINGS};
use pretty_assertions::assert_eq;
use sqmatrix_core::prelude::*;

fn grid(rows: [[Scalar; 4]; 4]) -> Vec<Vec<Scalar>> {
    rows.iter().map(|row| row.to_vec()).collect()
}

#[test]
fn test_literal_sum_in_every_pairing() {
    let a = grid([
        [1.0, 2.0, 3.0, 4.0],
        [1.0, 5.0, 2.0, 1.0],
        [0.0, 1.0, -1.0, 2.0],
        [0.0, 0.0, 1.0, 0.0],
    ]);
    let b = grid([
        [2.0, 1.0, 3.0, 1.0],
        [2.0, 1.0, 5.0, 4.0],
        [-1.0, 2.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 1.0],
    ]);
    let expected = grid([
        [3.0, 3.0, 6.0, 5.0],
        [3.0, 6.0, 7.0, 5.0],
        [-1.0, 3.0, 0.0, 3.0],
        [1.0, 1.0, 2.0, 1.0],
    ]);

    for (lhs, rhs) in PAIRINGS {
        let sum = build(lhs, &a).add(&build(rhs, &b)).unwrap();
        for (row, values) in expected.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                assert_eq!(sum.get(row, col).unwrap(), value, "{lhs}+{rhs} at ({row}, {col})");
            }
        }
        assert_eq!(sum.to_rows(), expected);
    }
}

#[test]
fn test_identity_doubles_on_diagonal() {
    for (lhs, rhs) in PAIRINGS {
        let a = SquareMatrix::identity(lhs, 5).unwrap();
        let b = SquareMatrix::identity(rhs, 5).unwrap();
        let sum = a.add(&b).unwrap();
        for row in 0..5 {
            for col in 0..5 {
                let expected = if row == col { 2.0 } else { 0.0 };
                assert_eq!(sum.get(row, col).unwrap(), expected);
            }
        }
        assert_eq!(sum.nnz(), 5);
    }
}

#[test]
fn test_mixed_products_are_not_sums() {
    let a = [[1.0, 2.0], [3.0, 4.0]];
    let b = [[5.0, 6.0], [7.0, 8.0]];
    let ab = vec![vec![19.0, 22.0], vec![43.0, 50.0]];
    let ba = vec![vec![23.0, 34.0], vec![31.0, 46.0]];

    for (lhs, rhs) in PAIRINGS {
        let ma = SquareMatrix::from_rows(lhs, &a).unwrap();
        let mb = SquareMatrix::from_rows(rhs, &b).unwrap();
        assert_eq!(ma.postmul(&mb).unwrap().to_rows(), ab, "{lhs}*{rhs}");
        assert_eq!(ma.premul(&mb).unwrap().to_rows(), ba, "{rhs}*{lhs}");
    }
}

#[test]
fn test_premul_mirrors_postmul() {
    let a = [[0.0, 2.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 3.0]];
    let b = [[1.0, 1.0, 0.0], [0.0, 0.0, 4.0], [2.0, 0.0, 0.0]];

    for (lhs, rhs) in PAIRINGS {
        let ma = SquareMatrix::from_rows(lhs, &a).unwrap();
        let mb = SquareMatrix::from_rows(rhs, &b).unwrap();
        assert_eq!(ma.premul(&mb).unwrap(), mb.postmul(&ma).unwrap());
        assert_eq!(ma.add(&mb).unwrap(), mb.add(&ma).unwrap());
    }
}

#[test]
fn test_operands_are_left_unchanged() {
    let a = [[1.0, 0.0], [0.0, 2.0]];
    for (lhs, rhs) in PAIRINGS {
        let ma = SquareMatrix::from_rows(lhs, &a).unwrap();
        let mb = SquareMatrix::from_rows(rhs, &a).unwrap();
        let before = (ma.clone(), mb.clone());
        ma.add(&mb).unwrap();
        ma.premul(&mb).unwrap();
        ma.postmul(&mb).unwrap();
        assert_eq!((ma, mb), before);
    }
}

#[test]
fn test_size_mismatch_in_every_pairing() {
    for (lhs, rhs) in PAIRINGS {
        let a = SquareMatrix::identity(lhs, 3).unwrap();
        let b = SquareMatrix::identity(rhs, 4).unwrap();
        for result in [a.add(&b), a.premul(&b), a.postmul(&b)] {
            assert_eq!(result.unwrap_err(), MatrixError::dimension_mismatch("3x3", "4x4"));
        }
    }
}

#[test]
fn test_empty_matrices() {
    for (lhs, rhs) in PAIRINGS {
        let a = SquareMatrix::identity(lhs, 0).unwrap();
        let b = SquareMatrix::identity(rhs, 0).unwrap();
        assert_eq!(a.add(&b).unwrap().size(), 0);
        assert_eq!(a.postmul(&b).unwrap().nnz(), 0);
        assert!(matches!(a.get(0, 0), Err(MatrixError::InvalidIndex { .. })));
    }
}
