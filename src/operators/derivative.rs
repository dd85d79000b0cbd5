// src/operators/derivative.rs

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::errors::{FdError, Result};
use crate::stencil::{fd_coeff, Grid1D};

/// Builds the sparse operator approximating the derivative of order `order`
/// on a 1-D grid.
///
/// Every row uses `2 * width + 1` nodes. Interior rows (and every row of a
/// periodic grid) use the centered stencil; rows within `width` of an edge of
/// a bounded grid use the one-sided block of the first or last
/// `2 * width + 1` nodes, weighted at their true positions.
///
/// # Arguments
///
/// * `order` - Derivative order.
/// * `grid` - Bounded or periodic grid.
/// * `width` - Stencil half-width `w`.
///
/// # Returns
///
/// * An \(N \times N\) CSR matrix, where \(N\) is the number of grid points.
pub fn deriv_matrix(order: usize, grid: &Grid1D, width: usize) -> Result<CsrMatrix<f64>> {
    let n = grid.len();
    let size = 2 * width + 1;
    if size < order + 1 {
        return Err(FdError::InvalidWidth { width, order });
    }
    if n < size {
        return Err(FdError::grid(format!(
            "half-width {} needs at least {} points, grid has {}",
            width, size, n
        )));
    }

    let mut coo = CooMatrix::new(n, n);
    for (i, &x0) in grid.nodes().iter().enumerate() {
        let window = grid.stencil_window(i, width)?;
        let positions: Vec<f64> = window.iter().map(|&k| grid.position(k)).collect();
        let weights = fd_coeff(order, x0, &positions)?;
        for (&k, &c) in window.iter().zip(weights.iter()) {
            coo.push(i, grid.wrap(k), c);
        }
    }

    tracing::debug!(
        order,
        width,
        points = n,
        periodic = grid.is_periodic(),
        "assembled derivative operator"
    );
    Ok(CsrMatrix::from(&coo))
}

/// First-derivative operator on the nodes `x`.
///
/// A periodic grid is assumed to omit the endpoint that duplicates `x[0]`,
/// so the period is `x[n-1] - x[0] + (x[1] - x[0])`.
pub fn first_deriv_matrix(x: &[f64], width: usize, periodic: bool) -> Result<CsrMatrix<f64>> {
    deriv_matrix(1, &grid_from_nodes(x, periodic)?, width)
}

/// Second-derivative operator on the nodes `x`, with the same conventions as
/// [`first_deriv_matrix`].
pub fn second_deriv_matrix(x: &[f64], width: usize, periodic: bool) -> Result<CsrMatrix<f64>> {
    deriv_matrix(2, &grid_from_nodes(x, periodic)?, width)
}

fn grid_from_nodes(x: &[f64], periodic: bool) -> Result<Grid1D> {
    if !periodic {
        return Grid1D::new(x.to_vec());
    }
    if x.len() < 2 {
        return Err(FdError::grid(format!(
            "need at least 2 points, got {}",
            x.len()
        )));
    }
    let period = x[x.len() - 1] - x[0] + (x[1] - x[0]);
    Grid1D::periodic(x.to_vec(), period)
}
