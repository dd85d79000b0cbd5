// src/operators/mod.rs

pub mod boundary;
pub mod derivative;
pub mod poisson;

pub use boundary::apply_dirichlet;
pub use derivative::{deriv_matrix, first_deriv_matrix, second_deriv_matrix};
pub use poisson::{laplacian_2d, poisson_2d};
