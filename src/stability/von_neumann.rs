// src/stability/von_neumann.rs

use std::f64::consts::PI;

use nalgebra::Complex;
use serde::{Deserialize, Serialize};

/// Amplification factor `G(theta) = sum_k c_k exp(i k theta)` of the explicit
/// update `u_j <- sum_k c_k u_{j+k}`.
pub fn amplification_factor(stencil: &[(isize, f64)], theta: f64) -> Complex<f64> {
    stencil
        .iter()
        .map(|&(k, c)| Complex::from_polar(c, k as f64 * theta))
        .sum()
}

/// Fully discrete schemes for `u_t + a u_x = 0`, parameterized by the Courant
/// number `nu = a dt / dx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvectionScheme {
    /// First-order upwind for `a > 0`.
    Upwind,
    LaxFriedrichs,
    LaxWendroff,
    /// Second-order one-sided upwind for `a > 0`.
    BeamWarming,
    /// Forward time, centered space.
    Ftcs,
}

impl AdvectionScheme {
    /// `(offset, coefficient)` pairs of the update `u_j <- sum c_k u_{j+k}`.
    pub fn stencil(&self, courant: f64) -> Vec<(isize, f64)> {
        let nu = courant;
        match self {
            AdvectionScheme::Upwind => vec![(-1, nu), (0, 1.0 - nu)],
            AdvectionScheme::LaxFriedrichs => vec![(-1, 0.5 * (1.0 + nu)), (1, 0.5 * (1.0 - nu))],
            AdvectionScheme::LaxWendroff => vec![
                (-1, 0.5 * nu * (1.0 + nu)),
                (0, 1.0 - nu * nu),
                (1, -0.5 * nu * (1.0 - nu)),
            ],
            AdvectionScheme::BeamWarming => vec![
                (-2, 0.5 * nu * (nu - 1.0)),
                (-1, nu * (2.0 - nu)),
                (0, 1.0 - 1.5 * nu + 0.5 * nu * nu),
            ],
            AdvectionScheme::Ftcs => vec![(-1, 0.5 * nu), (0, 1.0), (1, -0.5 * nu)],
        }
    }

    pub fn amplification(&self, courant: f64, theta: f64) -> Complex<f64> {
        amplification_factor(&self.stencil(courant), theta)
    }

    /// Largest `|G(theta)|` over `samples` wavenumbers in `[0, 2 pi)`.
    pub fn max_amplification(&self, courant: f64, samples: usize) -> f64 {
        let stencil = self.stencil(courant);
        (0..samples.max(1))
            .map(|s| 2.0 * PI * s as f64 / samples.max(1) as f64)
            .map(|theta| amplification_factor(&stencil, theta).norm())
            .fold(0.0, f64::max)
    }

    /// Von Neumann stability: `|G(theta)| <= 1` for every sampled wavenumber.
    pub fn is_stable(&self, courant: f64) -> bool {
        self.max_amplification(courant, 720) <= 1.0 + 1e-12
    }
}
