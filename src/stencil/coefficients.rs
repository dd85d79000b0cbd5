// src/stencil/coefficients.rs

use nalgebra::{DMatrix, DVector};

use crate::errors::{FdError, Result};

/// Computes the weights approximating the derivative of order `order` at `x0`
/// from function values at `nodes`.
///
/// Uses Fornberg's recursion (B. Fornberg, "Calculation of weights in finite
/// difference formulas", SIAM Review 40, 1998). Nodes may be non-uniformly
/// spaced and in any order, but must be distinct.
///
/// # Arguments
///
/// * `order` - Derivative order (0 yields interpolation weights).
/// * `x0` - Location of the approximation.
/// * `nodes` - Sample locations.
///
/// # Returns
///
/// * One weight per node, in the order the nodes were given.
pub fn fd_coeff(order: usize, x0: f64, nodes: &[f64]) -> Result<DVector<f64>> {
    let table = fd_weights(order, x0, nodes)?;
    Ok(table.column(order).into_owned())
}

/// Full Fornberg weight table.
///
/// Column `m` of the returned `nodes.len() x (max_order + 1)` matrix holds
/// the weights of the derivative of order `m`, for every `m <= max_order`.
pub fn fd_weights(max_order: usize, x0: f64, nodes: &[f64]) -> Result<DMatrix<f64>> {
    check_nodes(max_order, nodes)?;

    let n = nodes.len();
    let m = max_order;
    let mut c = DMatrix::<f64>::zeros(n, m + 1);

    let mut c1 = 1.0;
    let mut c4 = nodes[0] - x0;
    c[(0, 0)] = 1.0;
    for i in 1..n {
        let mn = i.min(m);
        let mut c2 = 1.0;
        let c5 = c4;
        c4 = nodes[i] - x0;
        for j in 0..i {
            let c3 = nodes[i] - nodes[j];
            c2 *= c3;
            if j == i - 1 {
                for k in (1..=mn).rev() {
                    c[(i, k)] = c1 * (k as f64 * c[(i - 1, k - 1)] - c5 * c[(i - 1, k)]) / c2;
                }
                c[(i, 0)] = -c1 * c5 * c[(i - 1, 0)] / c2;
            }
            for k in (1..=mn).rev() {
                c[(j, k)] = (c4 * c[(j, k)] - k as f64 * c[(j, k - 1)]) / c3;
            }
            c[(j, 0)] = c4 * c[(j, 0)] / c3;
        }
        c1 = c2;
    }

    Ok(c)
}

/// Same weights as [`fd_coeff`], obtained by solving the Taylor system
/// `sum_i c_i (x_i - x0)^k / k! = delta(k, order)` for `k = 0..n` directly.
///
/// Poorly conditioned for wide stencils; mostly useful as a cross-check.
pub fn fd_coeff_vandermonde(order: usize, x0: f64, nodes: &[f64]) -> Result<DVector<f64>> {
    check_nodes(order, nodes)?;

    let n = nodes.len();
    let mut system = DMatrix::<f64>::zeros(n, n);
    for (col, &x) in nodes.iter().enumerate() {
        let h = x - x0;
        let mut term = 1.0;
        for row in 0..n {
            system[(row, col)] = term;
            term *= h / (row + 1) as f64;
        }
    }

    let mut rhs = DVector::<f64>::zeros(n);
    rhs[order] = 1.0;

    system
        .lu()
        .solve(&rhs)
        .ok_or_else(|| FdError::LinAlg("singular Vandermonde system".into()))
}

fn check_nodes(order: usize, nodes: &[f64]) -> Result<()> {
    if nodes.len() < order + 1 {
        return Err(FdError::InsufficientNodes {
            order,
            nodes: nodes.len(),
        });
    }
    for (first, &a) in nodes.iter().enumerate() {
        if !a.is_finite() {
            return Err(FdError::CoincidentNodes {
                first,
                second: first,
                location: a,
            });
        }
        for (offset, &b) in nodes[first + 1..].iter().enumerate() {
            if a == b {
                return Err(FdError::CoincidentNodes {
                    first,
                    second: first + 1 + offset,
                    location: a,
                });
            }
        }
    }
    Ok(())
}
