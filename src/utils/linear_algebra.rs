// src/utils/linear_algebra.rs

use nalgebra::{Complex, DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::errors::{FdError, Result};

/// A sparse operator together with the right-hand side it is solved against.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub matrix: CsrMatrix<f64>,
    pub rhs: DVector<f64>,
}

/// Builds a CSR matrix from `(row, column, value)` triplets.
///
/// Duplicate entries are summed.
pub fn sparse_from_triplets<I>(nrows: usize, ncols: usize, triplets: I) -> CsrMatrix<f64>
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    let mut coo = CooMatrix::new(nrows, ncols);
    for (i, j, v) in triplets {
        coo.push(i, j, v);
    }
    CsrMatrix::from(&coo)
}

/// Builds a sparse diagonal matrix where each diagonal element is a specified parameter.
///
/// # Arguments
///
/// * `parameters` - A vector of parameters to place on the diagonal.
///
/// # Returns
///
/// * A matrix of size \(N \times N\) with the given parameters on the diagonal,
///   where \(N\) is the number of parameters.
pub fn sparse_diagonal(parameters: &DVector<f64>) -> CsrMatrix<f64> {
    let n = parameters.len();
    sparse_from_triplets(n, n, parameters.iter().enumerate().map(|(i, &p)| (i, i, p)))
}

/// Kronecker product `a ⊗ b` of two sparse matrices.
pub fn kron(a: &CsrMatrix<f64>, b: &CsrMatrix<f64>) -> CsrMatrix<f64> {
    let (rb, cb) = (b.nrows(), b.ncols());
    let mut coo = CooMatrix::new(a.nrows() * rb, a.ncols() * cb);
    for (ia, ja, va) in a.triplet_iter() {
        for (ib, jb, vb) in b.triplet_iter() {
            coo.push(ia * rb + ib, ja * cb + jb, va * vb);
        }
    }
    CsrMatrix::from(&coo)
}

/// Solves `matrix * u = rhs` with a dense LU factorization.
pub fn solve(system: &LinearSystem) -> Result<DVector<f64>> {
    let n = system.matrix.nrows();
    if system.matrix.ncols() != n || system.rhs.len() != n {
        return Err(FdError::LinAlg(format!(
            "cannot solve a {}x{} system with a right-hand side of length {}",
            n,
            system.matrix.ncols(),
            system.rhs.len()
        )));
    }
    DMatrix::from(&system.matrix)
        .lu()
        .solve(&system.rhs)
        .ok_or_else(|| FdError::LinAlg("matrix is singular".into()))
}

/// Complex eigenvalues of a square sparse operator.
pub fn eigenvalues(matrix: &CsrMatrix<f64>) -> Result<Vec<Complex<f64>>> {
    if matrix.nrows() != matrix.ncols() {
        return Err(FdError::LinAlg("eigenvalues need a square matrix".into()));
    }
    Ok(DMatrix::from(matrix).complex_eigenvalues().iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_diagonal_scales_componentwise() {
        let parameters = DVector::from_vec(vec![0.5, -2.0, 3.0, 1e-3]);
        let diagonal = sparse_diagonal(&parameters);
        assert_eq!((diagonal.nrows(), diagonal.ncols()), (4, 4));
        assert!(diagonal.triplet_iter().all(|(i, j, _)| i == j));

        let v = DVector::from_vec(vec![2.0, 1.0, -1.0, 1000.0]);
        let scaled = &diagonal * &v;
        assert_eq!(scaled, parameters.component_mul(&v));
    }

    #[test]
    fn test_sparse_diagonal_empty() {
        let diagonal = sparse_diagonal(&DVector::zeros(0));
        assert_eq!((diagonal.nrows(), diagonal.ncols()), (0, 0));
        assert_eq!(diagonal.nnz(), 0);
    }

    #[test]
    fn test_triplets_sum_duplicates() {
        let m = sparse_from_triplets(2, 2, vec![(0, 1, 1.0), (0, 1, 2.5), (1, 0, -1.0)]);
        let expected = DMatrix::from_row_slice(2, 2, &[
            0.0, 3.5,
            -1.0, 0.0,
        ]);
        assert_eq!(DMatrix::from(&m), expected);
    }

    #[test]
    fn test_kron() {
        let a = sparse_from_triplets(2, 2, vec![(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0)]);
        let b = sparse_from_triplets(2, 2, vec![(0, 0, 1.0), (1, 0, 1.0), (1, 1, -1.0)]);
        let expected = DMatrix::from_row_slice(4, 4, &[
            1.0, 0.0, 2.0, 0.0,
            1.0, -1.0, 2.0, -2.0,
            0.0, 0.0, 3.0, 0.0,
            0.0, 0.0, 3.0, -3.0,
        ]);
        assert_eq!(DMatrix::from(&kron(&a, &b)), expected);
    }

    #[test]
    fn test_kronecker_sum_of_identities() {
        let i2 = sparse_diagonal(&DVector::from_element(2, 1.0));
        let i3 = sparse_diagonal(&DVector::from_element(3, 1.0));
        let sum = &kron(&i2, &i3) + &kron(&i3, &i2);
        assert_eq!(DMatrix::from(&sum), DMatrix::identity(6, 6) * 2.0);
    }

    #[test]
    fn test_solve() {
        let matrix = sparse_from_triplets(
            3,
            3,
            vec![
                (0, 0, 2.0), (0, 1, -1.0),
                (1, 0, -1.0), (1, 1, 2.0), (1, 2, -1.0),
                (2, 1, -1.0), (2, 2, 2.0),
            ],
        );
        let system = LinearSystem {
            matrix,
            rhs: DVector::from_vec(vec![1.0, 0.0, 1.0]),
        };
        let u = solve(&system).unwrap();
        for i in 0..3 {
            assert!((u[i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_solve_singular() {
        let system = LinearSystem {
            matrix: sparse_from_triplets(2, 2, vec![(0, 0, 1.0), (1, 0, 1.0)]),
            rhs: DVector::from_vec(vec![1.0, 1.0]),
        };
        assert!(matches!(solve(&system), Err(FdError::LinAlg(_))));
    }

    #[test]
    fn test_eigenvalues_of_rotation_generator() {
        let m = sparse_from_triplets(2, 2, vec![(0, 1, -2.0), (1, 0, 2.0)]);
        let mut eig = eigenvalues(&m).unwrap();
        eig.sort_by(|a, b| a.im.partial_cmp(&b.im).unwrap());
        assert!(eig[0].re.abs() < 1e-12 && (eig[0].im + 2.0).abs() < 1e-12);
        assert!(eig[1].re.abs() < 1e-12 && (eig[1].im - 2.0).abs() < 1e-12);
    }
}
