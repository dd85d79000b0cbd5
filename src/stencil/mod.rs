// src/stencil/mod.rs

pub mod coefficients;
pub mod grid;

pub use coefficients::{fd_coeff, fd_coeff_vandermonde, fd_weights};
pub use grid::{Grid1D, Grid2D};
