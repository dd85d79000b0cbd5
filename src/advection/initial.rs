// src/advection/initial.rs

use std::f64::consts::PI;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::errors::{FdError, Result};
use crate::stencil::Grid1D;

/// Periodic initial profiles for the advection equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialCondition {
    /// `sin(2 pi k (x - start) / period)`.
    Sine {
        #[serde(default = "InitialCondition::default_wavenumber")]
        wavenumber: f64,
    },
    /// `exp(-((x - center) / width)^2)`, measured to the nearest periodic image.
    Gaussian { center: f64, width: f64 },
}

impl InitialCondition {
    const fn default_wavenumber() -> f64 {
        1.0
    }

    /// Rejects profiles that cannot be sampled.
    pub fn validate(&self) -> Result<()> {
        match *self {
            InitialCondition::Sine { wavenumber } if !wavenumber.is_finite() => Err(
                FdError::input(format!("sine wavenumber must be finite, got {}", wavenumber)),
            ),
            InitialCondition::Gaussian { center, .. } if !center.is_finite() => Err(
                FdError::input(format!("gaussian center must be finite, got {}", center)),
            ),
            InitialCondition::Gaussian { width, .. } if !(width > 0.0 && width.is_finite()) => Err(
                FdError::input(format!("gaussian width must be positive, got {}", width)),
            ),
            _ => Ok(()),
        }
    }

    pub fn evaluate(&self, x: f64, start: f64, period: f64) -> f64 {
        match *self {
            InitialCondition::Sine { wavenumber } => {
                (2.0 * PI * wavenumber * (x - start) / period).sin()
            }
            InitialCondition::Gaussian { center, width } => {
                let d = (x - center + 0.5 * period).rem_euclid(period) - 0.5 * period;
                (-(d / width).powi(2)).exp()
            }
        }
    }
}

/// Samples the translated profile `u0(x - velocity * time)` on a periodic grid.
pub fn exact_solution(
    initial: &InitialCondition,
    grid: &Grid1D,
    velocity: f64,
    time: f64,
) -> Result<DVector<f64>> {
    let period = grid
        .period()
        .ok_or_else(|| FdError::grid("advection needs a periodic grid"))?;
    initial.validate()?;
    let start = grid.nodes()[0];
    Ok(DVector::from_iterator(
        grid.len(),
        grid.nodes().iter().map(|&x| {
            let shifted = start + (x - velocity * time - start).rem_euclid(period);
            initial.evaluate(shifted, start, period)
        }),
    ))
}
