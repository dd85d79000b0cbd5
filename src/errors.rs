// src/errors.rs

use thiserror::Error;

/// Error type shared by every module of the crate.
#[derive(Debug, Error)]
pub enum FdError {
    /// Fewer nodes than needed to resolve the requested derivative.
    #[error("derivative of order {order} needs at least {} nodes, got {nodes}", .order + 1)]
    InsufficientNodes { order: usize, nodes: usize },
    /// Two nodes share a location, which makes the weight system singular.
    #[error("nodes {first} and {second} coincide at x = {location}")]
    CoincidentNodes {
        first: usize,
        second: usize,
        location: f64,
    },
    /// Stencil half-width too small for the derivative order.
    #[error("half-width {width} cannot resolve a derivative of order {order}")]
    InvalidWidth { width: usize, order: usize },
    /// Grid description that cannot carry the requested operator.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    /// Malformed run parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Singular or otherwise unsolvable linear algebra problems.
    #[error("linear algebra error: {0}")]
    LinAlg(String),
    /// Wrapper around I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FdError {
    pub fn grid<T: Into<String>>(msg: T) -> Self {
        Self::InvalidGrid(msg.into())
    }

    pub fn input<T: Into<String>>(msg: T) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type Result<T, E = FdError> = std::result::Result<T, E>;
