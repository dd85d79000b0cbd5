// src/interpolation/piecewise.rs

use crate::errors::{FdError, Result};

/// Performs linear interpolation given vectors of x and y values and a target value.
///
/// Values outside the table are clamped to the first or last entry.
///
/// # Arguments
///
/// * `x` - Strictly increasing x-values.
/// * `y` - y-values, one per x-value.
/// * `value` - Target x-value.
///
/// # Returns
///
/// * Interpolated y-value.
pub fn piecewise_linear(x: &[f64], y: &[f64], value: f64) -> Result<f64> {
    if x.is_empty() || x.len() != y.len() {
        return Err(FdError::input(format!(
            "table needs matching non-empty columns, got {} x-values and {} y-values",
            x.len(),
            y.len()
        )));
    }
    if value <= x[0] {
        return Ok(y[0]);
    }
    if value >= x[x.len() - 1] {
        return Ok(y[y.len() - 1]);
    }
    // first index with x[i] > value; the clamps above keep it in 1..len
    let i = x.partition_point(|&xi| xi <= value);
    let t = (value - x[i - 1]) / (x[i] - x[i - 1]);
    Ok(y[i - 1] * (1.0 - t) + y[i] * t)
}
