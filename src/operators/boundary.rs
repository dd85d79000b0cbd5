// src/operators/boundary.rs

use std::collections::HashMap;

use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;

use crate::utils::{sparse_from_triplets, LinearSystem};

/// Imposes Dirichlet values by row replacement.
///
/// Each listed row is cleared, gets a unit coefficient on the diagonal, and
/// its right-hand side entry is set to the boundary value. Rows listed twice
/// take the last value.
///
/// # Arguments
///
/// * `matrix` - Square operator.
/// * `rhs` - Right-hand side matching the operator.
/// * `rows` - `(row, value)` pairs.
///
/// # Panics
///
/// If `rhs` does not match the operator or a row index is out of range.
pub fn apply_dirichlet(
    matrix: &CsrMatrix<f64>,
    mut rhs: DVector<f64>,
    rows: &[(usize, f64)],
) -> LinearSystem {
    assert_eq!(matrix.nrows(), rhs.len(), "operator and rhs must agree");
    for &(row, _) in rows {
        assert!(
            row < matrix.nrows(),
            "dirichlet row {} is outside a system of {} rows",
            row,
            matrix.nrows()
        );
    }

    let fixed: HashMap<usize, f64> = rows.iter().cloned().collect();
    for (&row, &value) in &fixed {
        rhs[row] = value;
    }

    let kept = matrix
        .triplet_iter()
        .filter(|(i, _, _)| !fixed.contains_key(i))
        .map(|(i, j, &v)| (i, j, v));
    let diagonal = fixed.keys().map(|&row| (row, row, 1.0));
    let matrix = sparse_from_triplets(matrix.nrows(), matrix.ncols(), kept.chain(diagonal));

    LinearSystem { matrix, rhs }
}
