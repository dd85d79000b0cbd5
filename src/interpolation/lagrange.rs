// src/interpolation/lagrange.rs

use std::f64::consts::PI;

use crate::errors::{FdError, Result};

/// `n` equally spaced nodes on `[a, b]`, endpoints included.
pub fn uniform_nodes(n: usize, a: f64, b: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.5 * (a + b)],
        _ => (0..n)
            .map(|i| a + (b - a) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// `n` Chebyshev extreme points `cos(pi * i / (n - 1))` mapped to `[a, b]`,
/// in increasing order.
pub fn chebyshev_nodes(n: usize, a: f64, b: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.5 * (a + b)],
        _ => (0..n)
            .map(|i| {
                let t = -(PI * i as f64 / (n - 1) as f64).cos();
                0.5 * (a + b) + 0.5 * (b - a) * t
            })
            .collect(),
    }
}

/// Value at `x` of the `j`-th Lagrange basis polynomial on `nodes`.
pub fn lagrange_basis(nodes: &[f64], j: usize, x: f64) -> f64 {
    let xj = nodes[j];
    nodes
        .iter()
        .enumerate()
        .filter(|(m, _)| *m != j)
        .map(|(_, &xm)| (x - xm) / (xj - xm))
        .product()
}

/// Interpolating polynomial through `(nodes[i], values[i])`, evaluated with
/// the second (true) barycentric formula.
#[derive(Debug, Clone)]
pub struct Lagrange {
    nodes: Vec<f64>,
    values: Vec<f64>,
    weights: Vec<f64>,
}

impl Lagrange {
    pub fn new(nodes: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if nodes.is_empty() || nodes.len() != values.len() {
            return Err(FdError::input(format!(
                "interpolation needs matching non-empty data, got {} nodes and {} values",
                nodes.len(),
                values.len()
            )));
        }
        let mut weights = Vec::with_capacity(nodes.len());
        for (j, &xj) in nodes.iter().enumerate() {
            let mut w = 1.0;
            for (m, &xm) in nodes.iter().enumerate() {
                if m == j {
                    continue;
                }
                if xm == xj {
                    return Err(FdError::CoincidentNodes {
                        first: j.min(m),
                        second: j.max(m),
                        location: xj,
                    });
                }
                w *= xj - xm;
            }
            weights.push(1.0 / w);
        }
        Ok(Lagrange {
            nodes,
            values,
            weights,
        })
    }

    /// Samples `f` at `nodes`.
    pub fn from_fn<F: Fn(f64) -> f64>(nodes: Vec<f64>, f: F) -> Result<Self> {
        let values = nodes.iter().map(|&x| f(x)).collect();
        Self::new(nodes, values)
    }

    pub fn degree(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for ((&xj, &fj), &wj) in self.nodes.iter().zip(&self.values).zip(&self.weights) {
            let diff = x - xj;
            if diff == 0.0 {
                return fj;
            }
            let t = wj / diff;
            numerator += t * fj;
            denominator += t;
        }
        numerator / denominator
    }

    /// Largest deviation from `f` over `samples` equally spaced points on the
    /// node interval.
    pub fn max_error<F: Fn(f64) -> f64>(&self, f: F, samples: usize) -> f64 {
        let a = self.nodes.iter().cloned().fold(f64::INFINITY, f64::min);
        let b = self.nodes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        uniform_nodes(samples, a, b)
            .into_iter()
            .map(|x| (self.evaluate(x) - f(x)).abs())
            .fold(0.0, f64::max)
    }
}
