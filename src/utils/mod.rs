// src/utils/mod.rs

pub mod linear_algebra;

// Re-export specific functions for easier access
pub use linear_algebra::{
    eigenvalues,
    kron,
    solve,
    sparse_diagonal,
    sparse_from_triplets,
    LinearSystem,
};
