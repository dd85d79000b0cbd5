// src/runner.rs

use nalgebra::DVector;
use tracing::{info, warn};

use crate::advection::{advance, exact_solution, AdvectionProblem};
use crate::errors::{FdError, Result};
use crate::input::{InputDeck, PoissonSettings, TimeMethod};
use crate::operators::poisson_2d;
use crate::stability::StepLimit;
use crate::stencil::{Grid1D, Grid2D};
use crate::utils::solve;

/// Outcome of an advection run.
#[derive(Debug, Clone)]
pub struct AdvectionReport {
    pub steps: usize,
    pub time_step: f64,
    /// Max-norm distance to the exactly translated initial profile.
    pub max_error: f64,
    pub solution: DVector<f64>,
}

/// Outcome of a Poisson run.
#[derive(Debug, Clone)]
pub struct PoissonReport {
    pub unknowns: usize,
    pub max_error: f64,
    pub solution: DVector<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub advection: Option<AdvectionReport>,
    pub poisson: Option<PoissonReport>,
}

/// Runs every section the deck configures.
pub fn run(deck: &InputDeck) -> Result<RunReport> {
    deck.validate()?;
    let advection = match deck.advection {
        Some(_) => Some(run_advection(deck)?),
        None => None,
    };
    let poisson = match &deck.poisson {
        Some(settings) => Some(run_poisson(deck, settings)?),
        None => None,
    };
    Ok(RunReport { advection, poisson })
}

/// Advects the initial profile to `final_time` on the periodic grid
/// `[start, end)` and compares against the exact translated solution.
pub fn run_advection(deck: &InputDeck) -> Result<AdvectionReport> {
    let settings = deck
        .advection
        .as_ref()
        .ok_or_else(|| FdError::input("deck has no advection section"))?;
    let grid = Grid1D::periodic_uniform(deck.grid.start, deck.grid.end, deck.grid.n_points)?;
    let dx = (deck.grid.end - deck.grid.start) / deck.grid.n_points as f64;

    let steps = settings.step_count(dx)?;
    let time_step = if steps == 0 { 0.0 } else { settings.final_time / steps as f64 };

    let u0 = exact_solution(&settings.initial, &grid, settings.velocity, 0.0)?;
    let solution = match settings.method {
        TimeMethod::Mol { stepper } => {
            let problem = AdvectionProblem::new(settings.velocity, grid.clone(), deck.stencil.width)?;
            match problem.stable_time_step(stepper)? {
                StepLimit::Bounded(limit) if time_step > limit => {
                    warn!(?stepper, time_step, limit, "time step exceeds the absolute stability limit")
                }
                StepLimit::Unstable => {
                    warn!(?stepper, "spectrum lies outside the absolute stability region")
                }
                _ => {}
            }
            if steps == 0 {
                u0
            } else {
                problem.integrate(stepper, u0, time_step, steps)?
            }
        }
        TimeMethod::Scheme { scheme } => {
            if settings.velocity < 0.0 {
                warn!(?scheme, "negative velocity with a scheme built for a > 0");
            }
            let courant = settings.velocity * time_step / dx;
            advance(scheme, courant, &u0, steps)?
        }
    };

    let exact = exact_solution(&settings.initial, &grid, settings.velocity, settings.final_time)?;
    let max_error = (&solution - &exact).amax();
    info!(steps, time_step, max_error, "advection run finished");

    Ok(AdvectionReport {
        steps,
        time_step,
        max_error,
        solution,
    })
}

/// Solves `Δu = f` on `[start, end]^2` with Dirichlet data from the
/// manufactured solution.
pub fn run_poisson(deck: &InputDeck, settings: &PoissonSettings) -> Result<PoissonReport> {
    let g = &deck.grid;
    let grid = Grid2D::uniform(g.start, g.end, g.n_points, g.start, g.end, g.n_points)?;
    let exact = settings.solution;
    let system = poisson_2d(
        &grid,
        deck.stencil.width,
        |x, y| exact.laplacian(x, y),
        |x, y| exact.exact(x, y),
    )?;
    let solution = solve(&system)?;

    let max_error = (0..grid.len())
        .map(|k| {
            let (x, y) = grid.coords(k);
            (solution[k] - exact.exact(x, y)).abs()
        })
        .fold(0.0, f64::max);
    info!(unknowns = grid.len(), max_error, solution = ?exact, "poisson run finished");

    Ok(PoissonReport {
        unknowns: grid.len(),
        max_error,
        solution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(yaml: &str) -> InputDeck {
        InputDeck::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_mol_run() {
        let report = run_advection(&deck(
            "
grid: {start: 0.0, end: 1.0, n_points: 40}
stencil: {width: 2}
advection:
  velocity: 1.0
  courant: 0.4
  final_time: 1.0
  method: {kind: mol, stepper: rk4}
  initial: {kind: sine}
",
        ))
        .unwrap();
        assert_eq!(report.steps, 100);
        assert_approx_eq!(report.time_step, 0.01, 1e-12);
        assert_eq!(report.solution.len(), 40);
        assert!(report.max_error < 1e-3, "error = {}", report.max_error);
    }

    #[test]
    fn test_scheme_run_with_exact_shift() {
        let report = run_advection(&deck(
            "
grid: {start: 0.0, end: 2.0, n_points: 20}
advection:
  velocity: 0.5
  courant: 1.0
  final_time: 1.0
  method: {kind: scheme, scheme: upwind}
  initial: {kind: gaussian, center: 1.0, width: 0.3}
",
        ))
        .unwrap();
        assert_eq!(report.steps, 5);
        assert!(report.max_error < 1e-12, "error = {}", report.max_error);
    }

    #[test]
    fn test_zero_final_time() {
        let report = run_advection(&deck(
            "
grid: {start: 0.0, end: 1.0, n_points: 10}
advection:
  velocity: 1.0
  courant: 0.5
  final_time: 0.0
  method: {kind: mol, stepper: trapezoidal}
  initial: {kind: sine}
",
        ))
        .unwrap();
        assert_eq!(report.steps, 0);
        assert!(report.max_error < 1e-15);
    }

    #[test]
    fn test_poisson_run() {
        let d = deck(
            "
grid: {start: 0.0, end: 1.0, n_points: 11}
poisson: {solution: harmonic}
",
        );
        let report = run(&d).unwrap();
        assert!(report.advection.is_none());
        let poisson = report.poisson.unwrap();
        assert_eq!(poisson.unknowns, 121);
        assert!(poisson.max_error < 1e-10);
    }

    #[test]
    fn test_poisson_sin_sin_accuracy() {
        let d = deck(
            "
grid: {start: 0.0, end: 1.0, n_points: 17}
poisson: {solution: sin_sin}
",
        );
        let settings = d.poisson.clone().unwrap();
        let report = run_poisson(&d, &settings).unwrap();
        // 5-point error is about (pi h)^2 / 12 for this mode
        assert!(report.max_error < 5e-3, "error = {}", report.max_error);
        assert!(report.max_error > 1e-6);
    }

    #[test]
    fn test_unbounded_step_count_fails_before_stepping() {
        let mut d = deck(
            "
grid: {start: 0.0, end: 1.0, n_points: 10}
advection:
  velocity: 1.0
  courant: 0.5
  final_time: 1.0
  method: {kind: scheme, scheme: upwind}
  initial: {kind: sine}
",
        );
        if let Some(adv) = d.advection.as_mut() {
            adv.courant = 1e-300;
        }
        assert!(matches!(run_advection(&d), Err(FdError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_section() {
        let d = deck(
            "
grid: {start: 0.0, end: 1.0, n_points: 11}
poisson: {solution: harmonic}
",
        );
        assert!(matches!(run_advection(&d), Err(FdError::InvalidInput(_))));
    }
}
