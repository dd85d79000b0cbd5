// src/stability/mod.rs

pub mod absolute;
pub mod von_neumann;

pub use absolute::{StepLimit, TimeStepper};
pub use von_neumann::{amplification_factor, AdvectionScheme};
