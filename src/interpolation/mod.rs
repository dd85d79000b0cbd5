// src/interpolation/mod.rs

pub mod lagrange;
pub mod piecewise;

pub use lagrange::{chebyshev_nodes, lagrange_basis, uniform_nodes, Lagrange};
pub use piecewise::piecewise_linear;
