// src/stability/absolute.rs

use nalgebra::Complex;
use serde::{Deserialize, Serialize};

/// Slack on `|R(z)| <= 1` for roundoff in the stability function itself.
const UNIT_TOLERANCE: f64 = 1e-14;

/// One-step integrators for `u' = A u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStepper {
    ForwardEuler,
    BackwardEuler,
    Trapezoidal,
    /// Two-stage second-order Runge-Kutta (Heun).
    Rk2,
    /// Classical fourth-order Runge-Kutta.
    Rk4,
}

/// Largest time step keeping every `dt * lambda` inside the absolute
/// stability region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepLimit {
    Unconditional,
    Bounded(f64),
    /// No positive time step is stable.
    Unstable,
}

impl StepLimit {
    pub fn time_step(&self) -> Option<f64> {
        match self {
            StepLimit::Bounded(dt) => Some(*dt),
            StepLimit::Unconditional => Some(f64::INFINITY),
            StepLimit::Unstable => None,
        }
    }
}

impl TimeStepper {
    pub fn is_implicit(&self) -> bool {
        matches!(self, TimeStepper::BackwardEuler | TimeStepper::Trapezoidal)
    }

    /// `R(z)` such that one step of `u' = lambda u` multiplies `u` by
    /// `R(dt * lambda)`.
    pub fn stability_function(&self, z: Complex<f64>) -> Complex<f64> {
        let one = Complex::new(1.0, 0.0);
        match self {
            TimeStepper::ForwardEuler => one + z,
            TimeStepper::BackwardEuler => one / (one - z),
            TimeStepper::Trapezoidal => (one + z * 0.5) / (one - z * 0.5),
            TimeStepper::Rk2 => one + z + z * z * 0.5,
            TimeStepper::Rk4 => one + z * (one + z * (one * 0.5 + z * (one / 6.0 + z / 24.0))),
        }
    }

    pub fn is_absolutely_stable(&self, z: Complex<f64>) -> bool {
        self.stability_function(z).norm() <= 1.0 + UNIT_TOLERANCE
    }

    /// Largest `dt` with `dt * lambda` absolutely stable for every eigenvalue.
    ///
    /// A spectrum that is already unstable at `dt = 1e-3 / max|lambda|` is
    /// reported as [`StepLimit::Unstable`]; one that stays stable up to
    /// `dt = 1e8 / max|lambda|` as [`StepLimit::Unconditional`].
    pub fn max_stable_time_step(&self, eigenvalues: &[Complex<f64>]) -> StepLimit {
        let scale = eigenvalues.iter().map(|l| l.norm()).fold(0.0, f64::max);
        if scale == 0.0 {
            return StepLimit::Unconditional;
        }
        let stable = |dt: f64| eigenvalues.iter().all(|&l| self.is_absolutely_stable(l * dt));

        let trial = 1e-3 / scale;
        if !stable(trial) {
            return StepLimit::Unstable;
        }
        if stable(1e8 / scale) {
            return StepLimit::Unconditional;
        }

        let mut lo = trial;
        let mut hi = 2.0 * trial;
        while hi < 1e8 / scale && stable(hi) {
            lo = hi;
            hi *= 2.0;
        }
        for _ in 0..60 {
            let mid = 0.5 * (lo + hi);
            if stable(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        StepLimit::Bounded(lo)
    }

    /// Extent of the stability region along the negative real axis.
    pub fn real_axis_limit(&self) -> StepLimit {
        self.max_stable_time_step(&[Complex::new(-1.0, 0.0)])
    }

    /// Extent of the stability region along the imaginary axis.
    pub fn imaginary_axis_limit(&self) -> StepLimit {
        self.max_stable_time_step(&[Complex::new(0.0, 1.0)])
    }
}
