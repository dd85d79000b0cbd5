//! Finite-difference coefficients and the sparse operators built from them:
//! 1-D derivative matrices on bounded or periodic grids, the 2-D Dirichlet
//! Poisson system, plus the interpolation, stability and advection tools
//! that exercise them.

#[cfg(test)]
#[macro_use]
mod macros;

pub mod advection;
pub mod errors;
pub mod input;
pub mod interpolation;
pub mod operators;
pub mod runner;
pub mod stability;
pub mod stencil;
pub mod utils;

pub use errors::{FdError, Result};
pub use input::{parse_input_deck, InputDeck};
pub use operators::{deriv_matrix, first_deriv_matrix, poisson_2d, second_deriv_matrix};
pub use stencil::{fd_coeff, Grid1D, Grid2D};
pub use utils::LinearSystem;
