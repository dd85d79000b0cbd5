// src/advection/mod.rs

pub mod initial;
pub mod mol;
pub mod schemes;

pub use initial::{exact_solution, InitialCondition};
pub use mol::AdvectionProblem;
pub use schemes::{advance, scheme_matrix};
