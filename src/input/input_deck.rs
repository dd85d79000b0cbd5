// src/input/input_deck.rs
use serde::{Deserialize, Serialize};

use crate::advection::InitialCondition;
use crate::errors::{FdError, Result};
use crate::stability::{AdvectionScheme, TimeStepper};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub start: f64,          // Left end of the domain
    pub end: f64,            // Right end (periodic runs exclude it)
    pub n_points: usize,     // Points per axis
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StencilSettings {
    #[serde(default = "StencilSettings::default_width")]
    pub width: usize,        // Half-width w, stencils use 2w+1 nodes
}

impl StencilSettings {
    const fn default_width() -> usize {
        1
    }
}

impl Default for StencilSettings {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
        }
    }
}

/// Time discretization of an advection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeMethod {
    /// Method of lines: spatial stencil plus a one-step integrator.
    Mol { stepper: TimeStepper },
    /// Fully discrete scheme on the uniform grid.
    Scheme { scheme: AdvectionScheme },
}

/// Upper bound on the number of time steps a deck may request.
pub const MAX_TIME_STEPS: usize = 10_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvectionSettings {
    pub velocity: f64,       // Advection speed a
    pub courant: f64,        // |a| dt / dx
    pub final_time: f64,
    pub method: TimeMethod,
    pub initial: InitialCondition,
}

impl AdvectionSettings {
    /// Number of equal steps reaching `final_time` without exceeding the
    /// nominal step `courant * dx / |velocity|`.
    pub fn step_count(&self, dx: f64) -> Result<usize> {
        let nominal = self.courant * dx / self.velocity.abs();
        // shave roundoff so an exact multiple of the nominal step is not rounded up
        let steps = (self.final_time / nominal * (1.0 - 1e-12)).ceil();
        if !(steps.is_finite() && steps <= MAX_TIME_STEPS as f64) {
            return Err(FdError::input(format!(
                "final time {} with a nominal step of {:e} needs more than {} steps",
                self.final_time, nominal, MAX_TIME_STEPS
            )));
        }
        Ok(steps as usize)
    }
}

/// Manufactured solutions for the Dirichlet Poisson problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManufacturedSolution {
    /// `exp(x + y)`
    ExpSum,
    /// `sin(pi x) sin(pi y)`
    SinSin,
    /// `x^2 - y^2`
    Harmonic,
}

impl ManufacturedSolution {
    pub fn exact(&self, x: f64, y: f64) -> f64 {
        use std::f64::consts::PI;
        match self {
            ManufacturedSolution::ExpSum => (x + y).exp(),
            ManufacturedSolution::SinSin => (PI * x).sin() * (PI * y).sin(),
            ManufacturedSolution::Harmonic => x * x - y * y,
        }
    }

    /// `Δu` of the exact solution.
    pub fn laplacian(&self, x: f64, y: f64) -> f64 {
        use std::f64::consts::PI;
        match self {
            ManufacturedSolution::ExpSum => 2.0 * (x + y).exp(),
            ManufacturedSolution::SinSin => -2.0 * PI * PI * (PI * x).sin() * (PI * y).sin(),
            ManufacturedSolution::Harmonic => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonSettings {
    pub solution: ManufacturedSolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDeck {
    pub grid: GridSettings,
    #[serde(default)]
    pub stencil: StencilSettings,
    pub advection: Option<AdvectionSettings>,
    pub poisson: Option<PoissonSettings>,
}

impl InputDeck {
    /// Parses a deck from YAML text and checks its parameters.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let deck: InputDeck = serde_yaml::from_str(contents)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if !(grid.start.is_finite() && grid.end.is_finite() && grid.end > grid.start) {
            return Err(FdError::input(format!(
                "grid end {} must exceed start {}",
                grid.end, grid.start
            )));
        }
        if grid.n_points < 2 * self.stencil.width + 1 {
            return Err(FdError::input(format!(
                "half-width {} needs at least {} points, got {}",
                self.stencil.width,
                2 * self.stencil.width + 1,
                grid.n_points
            )));
        }
        if let Some(adv) = &self.advection {
            if !(adv.velocity.is_finite() && adv.velocity != 0.0) {
                return Err(FdError::input("advection velocity must be finite and non-zero"));
            }
            if !(adv.courant > 0.0 && adv.courant.is_finite()) {
                return Err(FdError::input("courant number must be positive"));
            }
            if !(adv.final_time >= 0.0 && adv.final_time.is_finite()) {
                return Err(FdError::input("final time must be non-negative"));
            }
            adv.initial.validate()?;
            adv.step_count((grid.end - grid.start) / grid.n_points as f64)?;
        }
        if self.advection.is_none() && self.poisson.is_none() {
            return Err(FdError::input("deck configures neither an advection nor a poisson run"));
        }
        Ok(())
    }
}
