// src/operators/poisson.rs

use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;

use crate::errors::Result;
use crate::operators::{apply_dirichlet, deriv_matrix};
use crate::stencil::Grid2D;
use crate::utils::{kron, sparse_diagonal, LinearSystem};

/// Builds the 2-D Laplacian `kron(I_ny, Dxx) + kron(Dyy, I_nx)`.
///
/// `Dxx` and `Dyy` are the 1-D second-derivative operators of half-width
/// `width`; `width = 1` gives the classic 5-point stencil. Rows follow the
/// row-major numbering `k = i * nx + j` of [`Grid2D::linear_index`].
pub fn laplacian_2d(grid: &Grid2D, width: usize) -> Result<CsrMatrix<f64>> {
    let dxx = deriv_matrix(2, &grid.x, width)?;
    let dyy = deriv_matrix(2, &grid.y, width)?;
    let ix = sparse_diagonal(&DVector::from_element(grid.nx(), 1.0));
    let iy = sparse_diagonal(&DVector::from_element(grid.ny(), 1.0));
    Ok(&kron(&iy, &dxx) + &kron(&dyy, &ix))
}

/// Assembles the Dirichlet problem `Δu = f` in the interior, `u = g` on the
/// boundary.
///
/// # Arguments
///
/// * `grid` - Tensor-product grid.
/// * `width` - Stencil half-width along each axis.
/// * `source` - `f(x, y)`.
/// * `boundary` - `g(x, y)`, evaluated at boundary points only.
///
/// # Returns
///
/// * The sparse system with every boundary row replaced by an identity row.
pub fn poisson_2d<F, G>(grid: &Grid2D, width: usize, source: F, boundary: G) -> Result<LinearSystem>
where
    F: Fn(f64, f64) -> f64,
    G: Fn(f64, f64) -> f64,
{
    let laplacian = laplacian_2d(grid, width)?;

    let mut rhs = DVector::zeros(grid.len());
    let mut fixed = Vec::new();
    for k in 0..grid.len() {
        let (i, j) = grid.indices(k);
        let (x, y) = grid.coords(k);
        if grid.is_boundary(i, j) {
            fixed.push((k, boundary(x, y)));
        } else {
            rhs[k] = source(x, y);
        }
    }

    tracing::debug!(
        nx = grid.nx(),
        ny = grid.ny(),
        width,
        boundary_rows = fixed.len(),
        "assembled poisson system"
    );
    Ok(apply_dirichlet(&laplacian, rhs, &fixed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;
    use nalgebra::DMatrix;

    fn max_error(grid: &Grid2D, width: usize) -> f64 {
        let exact = |x: f64, y: f64| (x + y).exp();
        let system = poisson_2d(grid, width, |x, y| 2.0 * exact(x, y), exact).unwrap();
        let u = solve(&system).unwrap();
        (0..grid.len())
            .map(|k| {
                let (x, y) = grid.coords(k);
                (u[k] - exact(x, y)).abs()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_five_point_stencil() {
        let grid = Grid2D::uniform(0.0, 1.0, 5, 0.0, 1.0, 5).unwrap();
        let d = DMatrix::from(&laplacian_2d(&grid, 1).unwrap());
        let h2 = 0.25 * 0.25;
        let k = grid.linear_index(2, 2);
        assert_approx_eq!(d[(k, k)], -4.0 / h2, 1e-9);
        assert_approx_eq!(d[(k, k - 1)], 1.0 / h2, 1e-9);
        assert_approx_eq!(d[(k, k + 1)], 1.0 / h2, 1e-9);
        assert_approx_eq!(d[(k, k - 5)], 1.0 / h2, 1e-9);
        assert_approx_eq!(d[(k, k + 5)], 1.0 / h2, 1e-9);
        assert_approx_eq!(d.row(k).sum(), 0.0, 1e-9);
    }

    #[test]
    fn test_laplacian_of_quadratic() {
        let grid = Grid2D::uniform(0.0, 1.0, 6, -1.0, 1.0, 7).unwrap();
        let op = laplacian_2d(&grid, 1).unwrap();
        let u = DVector::from_iterator(
            grid.len(),
            (0..grid.len()).map(|k| {
                let (x, y) = grid.coords(k);
                x * x + 3.0 * y * y
            }),
        );
        let lu = &op * &u;
        for k in 0..grid.len() {
            assert_approx_eq!(lu[k], 8.0, 1e-8);
        }
    }

    #[test]
    fn test_boundary_rows_are_identity() {
        let grid = Grid2D::uniform(0.0, 1.0, 4, 0.0, 1.0, 4).unwrap();
        let system = poisson_2d(&grid, 1, |_, _| 1.0, |x, y| x + 10.0 * y).unwrap();
        let d = DMatrix::from(&system.matrix);
        for k in 0..grid.len() {
            let (i, j) = grid.indices(k);
            let (x, y) = grid.coords(k);
            if grid.is_boundary(i, j) {
                assert_eq!(d.row(k).sum(), 1.0);
                assert_eq!(d[(k, k)], 1.0);
                assert_approx_eq!(system.rhs[k], x + 10.0 * y, 1e-12);
            } else {
                assert_eq!(system.rhs[k], 1.0);
            }
        }
    }

    #[test]
    fn test_harmonic_solution_is_exact() {
        // x^2 - y^2 is harmonic and reproduced exactly by the 5-point stencil
        let grid = Grid2D::uniform(0.0, 1.0, 7, 0.0, 2.0, 9).unwrap();
        let system = poisson_2d(&grid, 1, |_, _| 0.0, |x, y| x * x - y * y).unwrap();
        let u = solve(&system).unwrap();
        for k in 0..grid.len() {
            let (x, y) = grid.coords(k);
            assert_approx_eq!(u[k], x * x - y * y, 1e-9);
        }
    }

    #[test]
    fn test_second_order_convergence() {
        let coarse = max_error(&Grid2D::uniform(0.0, 1.0, 9, 0.0, 1.0, 9).unwrap(), 1);
        let fine = max_error(&Grid2D::uniform(0.0, 1.0, 17, 0.0, 1.0, 17).unwrap(), 1);
        assert!(coarse > 0.0);
        let ratio = coarse / fine;
        assert!(ratio > 3.5 && ratio < 4.5, "ratio = {}", ratio);
    }

    #[test]
    fn test_wider_stencil_is_more_accurate() {
        let grid = Grid2D::uniform(0.0, 1.0, 9, 0.0, 1.0, 9).unwrap();
        assert!(max_error(&grid, 2) < max_error(&grid, 1));
    }
}
