// src/advection/schemes.rs

use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;

use crate::errors::{FdError, Result};
use crate::stability::AdvectionScheme;
use crate::utils::sparse_from_triplets;

/// Builds the periodic update matrix of a fully discrete advection scheme.
///
/// Row `j` holds the scheme's stencil coefficients at columns `j + k`,
/// wrapped modulo the number of cells, so that one time step is
/// `u <- M u`.
///
/// # Arguments
///
/// * `scheme` - The fully discrete scheme.
/// * `courant` - Courant number `a dt / dx`.
/// * `n` - Number of cells.
///
/// # Returns
///
/// * An \(N \times N\) update matrix.
pub fn scheme_matrix(scheme: AdvectionScheme, courant: f64, n: usize) -> Result<CsrMatrix<f64>> {
    let stencil = scheme.stencil(courant);
    let reach = stencil.iter().map(|(k, _)| k.unsigned_abs()).max().unwrap_or(0);
    if n < 2 * reach + 1 {
        return Err(FdError::grid(format!(
            "{:?} needs at least {} cells, got {}",
            scheme,
            2 * reach + 1,
            n
        )));
    }
    let triplets = (0..n).flat_map(|j| {
        stencil.iter().map(move |&(k, c)| {
            let col = (j as isize + k).rem_euclid(n as isize) as usize;
            (j, col, c)
        })
    });
    Ok(sparse_from_triplets(n, n, triplets))
}

/// Applies `steps` updates of `scheme` to `u`.
pub fn advance(
    scheme: AdvectionScheme,
    courant: f64,
    u: &DVector<f64>,
    steps: usize,
) -> Result<DVector<f64>> {
    if !scheme.is_stable(courant) {
        tracing::warn!(?scheme, courant, "scheme is von Neumann unstable at this Courant number");
    }
    let update = scheme_matrix(scheme, courant, u.len())?;
    let mut u = u.clone();
    for _ in 0..steps {
        u = &update * &u;
    }
    Ok(u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advection::{exact_solution, InitialCondition};
    use crate::stencil::Grid1D;
    use nalgebra::DMatrix;

    fn sine(n: usize) -> (Grid1D, DVector<f64>) {
        let grid = Grid1D::periodic_uniform(0.0, 1.0, n).unwrap();
        let u0 = exact_solution(&InitialCondition::Sine { wavenumber: 1.0 }, &grid, 1.0, 0.0).unwrap();
        (grid, u0)
    }

    fn max_abs(v: &DVector<f64>) -> f64 {
        v.iter().fold(0.0, |m, x| m.max(x.abs()))
    }

    #[test]
    fn test_upwind_matrix() {
        let m = DMatrix::from(&scheme_matrix(AdvectionScheme::Upwind, 0.5, 3).unwrap());

        let expected = DMatrix::from_row_slice(3, 3, &[
            0.5, 0.0, 0.5,
            0.5, 0.5, 0.0,
            0.0, 0.5, 0.5,
        ]);

        assert_eq!(m, expected);
    }

    #[test]
    fn test_upwind_at_unit_courant_is_exact_shift() {
        let (_, u0) = sine(16);
        let u = advance(AdvectionScheme::Upwind, 1.0, &u0, 3).unwrap();
        for j in 0..16 {
            assert_eq!(u[(j + 3) % 16], u0[j]);
        }
    }

    #[test]
    fn test_lax_wendroff_beats_upwind() {
        let n = 100;
        let (grid, u0) = sine(n);
        let courant = 0.5;
        let steps = 200; // one period at dt = courant * dx
        let exact = exact_solution(&InitialCondition::Sine { wavenumber: 1.0 }, &grid, 1.0, 1.0).unwrap();

        let lw = advance(AdvectionScheme::LaxWendroff, courant, &u0, steps).unwrap();
        let up = advance(AdvectionScheme::Upwind, courant, &u0, steps).unwrap();
        let lw_err = max_abs(&(&lw - &exact));
        let up_err = max_abs(&(&up - &exact));
        assert!(lw_err < 1e-2, "lax-wendroff error {}", lw_err);
        assert!(up_err > lw_err);
        // upwind is dissipative
        assert!(max_abs(&up) < 1.0);
    }

    #[test]
    fn test_ftcs_blows_up() {
        let (_, u0) = sine(20);
        let u = advance(AdvectionScheme::Ftcs, 0.9, &u0, 400).unwrap();
        assert!(u.norm() > 10.0 * u0.norm());
    }

    #[test]
    fn test_beam_warming_needs_wider_grid() {
        assert!(scheme_matrix(AdvectionScheme::BeamWarming, 0.5, 4).is_err());
        assert!(scheme_matrix(AdvectionScheme::BeamWarming, 0.5, 5).is_ok());
    }
}
