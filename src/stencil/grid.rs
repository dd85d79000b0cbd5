// src/stencil/grid.rs

use crate::errors::{FdError, Result};

/// One-dimensional grid of strictly increasing nodes.
///
/// A periodic grid stores one period worth of nodes; the node at index `k`
/// outside `0..n` sits at `x[k mod n] + period * floor(k / n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    nodes: Vec<f64>,
    period: Option<f64>,
}

impl Grid1D {
    /// Creates a bounded grid from explicit node locations.
    pub fn new(nodes: Vec<f64>) -> Result<Self> {
        check_increasing(&nodes)?;
        Ok(Grid1D {
            nodes,
            period: None,
        })
    }

    /// Creates a bounded grid of `n` equally spaced points spanning `[a, b]`.
    pub fn uniform(a: f64, b: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(FdError::grid(format!("need at least 2 points, got {}", n)));
        }
        let dx = (b - a) / (n - 1) as f64;
        Self::new((0..n).map(|i| a + dx * i as f64).collect())
    }

    /// Creates a periodic grid. `period` must exceed the span of the nodes.
    pub fn periodic(nodes: Vec<f64>, period: f64) -> Result<Self> {
        check_increasing(&nodes)?;
        let span = nodes[nodes.len() - 1] - nodes[0];
        if !(period.is_finite() && period > span) {
            return Err(FdError::grid(format!(
                "period {} must exceed the node span {}",
                period, span
            )));
        }
        Ok(Grid1D {
            nodes,
            period: Some(period),
        })
    }

    /// Creates a periodic grid of `n` equally spaced points on `[a, b)`.
    pub fn periodic_uniform(a: f64, b: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(FdError::grid(format!("need at least 2 points, got {}", n)));
        }
        let dx = (b - a) / n as f64;
        Self::periodic((0..n).map(|i| a + dx * i as f64).collect(), b - a)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn period(&self) -> Option<f64> {
        self.period
    }

    pub fn is_periodic(&self) -> bool {
        self.period.is_some()
    }

    /// Smallest distance between neighbouring nodes, including the wrap-around
    /// gap of a periodic grid.
    pub fn spacing(&self) -> f64 {
        let interior = self
            .nodes
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min);
        match self.period {
            Some(period) => interior.min(self.nodes[0] + period - self.nodes[self.len() - 1]),
            None => interior,
        }
    }

    /// Maps a possibly out-of-range stencil index onto `0..n`.
    pub fn wrap(&self, k: isize) -> usize {
        k.rem_euclid(self.len() as isize) as usize
    }

    /// Location of node `k`, unrolling periodic copies.
    pub fn position(&self, k: isize) -> f64 {
        let n = self.len() as isize;
        let base = self.nodes[k.rem_euclid(n) as usize];
        match self.period {
            Some(period) => base + period * k.div_euclid(n) as f64,
            None => base,
        }
    }

    /// Node indices of the `2 * width + 1` point stencil used by row `i`.
    ///
    /// Periodic grids and interior rows get the centered window. On a bounded
    /// grid, rows closer than `width` to an edge reuse the first (or last)
    /// `2 * width + 1` nodes. Fails if the grid has fewer nodes than the
    /// stencil or `i` is not a row of the grid.
    pub fn stencil_window(&self, i: usize, width: usize) -> Result<Vec<isize>> {
        let size = 2 * width + 1;
        if self.len() < size {
            return Err(FdError::grid(format!(
                "half-width {} needs at least {} points, grid has {}",
                width,
                size,
                self.len()
            )));
        }
        if i >= self.len() {
            return Err(FdError::grid(format!(
                "row {} is outside a grid of {} points",
                i,
                self.len()
            )));
        }
        let start = if self.is_periodic() {
            i as isize - width as isize
        } else {
            i.saturating_sub(width).min(self.len() - size) as isize
        };
        Ok((start..start + size as isize).collect())
    }
}

fn check_increasing(nodes: &[f64]) -> Result<()> {
    if nodes.len() < 2 {
        return Err(FdError::grid(format!(
            "need at least 2 points, got {}",
            nodes.len()
        )));
    }
    if nodes.iter().any(|x| !x.is_finite()) {
        return Err(FdError::grid("nodes must be finite"));
    }
    if let Some(i) = nodes.windows(2).position(|w| w[1] <= w[0]) {
        return Err(FdError::grid(format!(
            "nodes must be strictly increasing (x[{}] = {}, x[{}] = {})",
            i,
            nodes[i],
            i + 1,
            nodes[i + 1]
        )));
    }
    Ok(())
}

/// Tensor-product grid. Point `(i, j)` has `y = y[i]`, `x = x[j]` and is
/// stored at linear index `i * nx + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    pub x: Grid1D,
    pub y: Grid1D,
}

impl Grid2D {
    pub fn new(x: Grid1D, y: Grid1D) -> Result<Self> {
        if x.is_periodic() || y.is_periodic() {
            return Err(FdError::grid("2-D grids must be bounded in both directions"));
        }
        Ok(Grid2D { x, y })
    }

    /// Uniform grid of `nx x ny` points on `[ax, bx] x [ay, by]`.
    pub fn uniform(ax: f64, bx: f64, nx: usize, ay: f64, by: f64, ny: usize) -> Result<Self> {
        Self::new(Grid1D::uniform(ax, bx, nx)?, Grid1D::uniform(ay, by, ny)?)
    }

    pub fn nx(&self) -> usize {
        self.x.len()
    }

    pub fn ny(&self) -> usize {
        self.y.len()
    }

    pub fn len(&self) -> usize {
        self.nx() * self.ny()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn linear_index(&self, i: usize, j: usize) -> usize {
        i * self.nx() + j
    }

    /// Inverse of [`Grid2D::linear_index`].
    pub fn indices(&self, k: usize) -> (usize, usize) {
        (k / self.nx(), k % self.nx())
    }

    /// `(x, y)` coordinates of linear index `k`.
    pub fn coords(&self, k: usize) -> (f64, f64) {
        let (i, j) = self.indices(k);
        (self.x.nodes()[j], self.y.nodes()[i])
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.ny() || j + 1 == self.nx()
    }
}
