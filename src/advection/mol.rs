// src/advection/mol.rs

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CsrMatrix;

use crate::errors::{FdError, Result};
use crate::operators::deriv_matrix;
use crate::stability::{StepLimit, TimeStepper};
use crate::stencil::Grid1D;
use crate::utils::eigenvalues;

/// Method-of-lines discretization of `u_t + a u_x = 0` on a periodic grid.
///
/// Space is discretized with the centered `2 * width + 1` point first
/// derivative, leaving the ODE system `u' = A u` with `A = -a D`.
#[derive(Debug, Clone)]
pub struct AdvectionProblem {
    velocity: f64,
    grid: Grid1D,
    width: usize,
    operator: CsrMatrix<f64>,
}

impl AdvectionProblem {
    pub fn new(velocity: f64, grid: Grid1D, width: usize) -> Result<Self> {
        if !grid.is_periodic() {
            return Err(FdError::grid("advection needs a periodic grid"));
        }
        if !velocity.is_finite() {
            return Err(FdError::input(format!("velocity must be finite, got {}", velocity)));
        }
        let operator = deriv_matrix(1, &grid, width)? * -velocity;
        Ok(AdvectionProblem {
            velocity,
            grid,
            width,
            operator,
        })
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn grid(&self) -> &Grid1D {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The semi-discrete operator `A`.
    pub fn operator(&self) -> &CsrMatrix<f64> {
        &self.operator
    }

    /// Largest stable time step of `stepper` for the spectrum of `A`.
    pub fn stable_time_step(&self, stepper: TimeStepper) -> Result<StepLimit> {
        let spectrum = eigenvalues(&self.operator)?;
        Ok(stepper.max_stable_time_step(&spectrum))
    }

    /// Advances `u0` by `steps` steps of size `dt`.
    pub fn integrate(
        &self,
        stepper: TimeStepper,
        u0: DVector<f64>,
        dt: f64,
        steps: usize,
    ) -> Result<DVector<f64>> {
        if u0.len() != self.grid.len() {
            return Err(FdError::input(format!(
                "initial state has {} entries, grid has {} points",
                u0.len(),
                self.grid.len()
            )));
        }
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(FdError::input(format!("time step must be positive, got {}", dt)));
        }

        let implicit = match stepper {
            TimeStepper::BackwardEuler => Some(self.implicit_propagator(dt, 1.0)?),
            TimeStepper::Trapezoidal => Some(self.implicit_propagator(dt, 0.5)?),
            _ => None,
        };

        let mut u = u0;
        for _ in 0..steps {
            u = match &implicit {
                Some(propagator) => propagator * &u,
                None => self.explicit_step(stepper, &u, dt),
            };
        }
        Ok(u)
    }

    fn explicit_step(&self, stepper: TimeStepper, u: &DVector<f64>, dt: f64) -> DVector<f64> {
        let a = &self.operator;
        match stepper {
            TimeStepper::ForwardEuler => u + (a * u) * dt,
            TimeStepper::Rk2 => {
                let k1 = a * u;
                let k2 = a * &(u + &k1 * dt);
                u + (k1 + k2) * (0.5 * dt)
            }
            TimeStepper::Rk4 => {
                let k1 = a * u;
                let k2 = a * &(u + &k1 * (0.5 * dt));
                let k3 = a * &(u + &k2 * (0.5 * dt));
                let k4 = a * &(u + &k3 * dt);
                u + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
            }
            TimeStepper::BackwardEuler | TimeStepper::Trapezoidal => {
                unreachable!("implicit steppers use the precomputed propagator")
            }
        }
    }

    /// Dense one-step propagator `(I - theta dt A)^-1 (I + (1 - theta) dt A)`.
    fn implicit_propagator(&self, dt: f64, theta: f64) -> Result<DMatrix<f64>> {
        let n = self.grid.len();
        let a = DMatrix::from(&self.operator);
        let identity = DMatrix::<f64>::identity(n, n);
        let lhs = &identity - &a * (theta * dt);
        let rhs = &identity + &a * ((1.0 - theta) * dt);
        let lu = lhs.lu();
        lu.solve(&rhs)
            .ok_or_else(|| FdError::LinAlg("implicit step matrix is singular".into()))
    }
}
