//! Common test utilities for hadley.
//!
//! Data generators with known statistics, so percentile expectations in
//! the integration tests can be computed by hand.

use ndarray::{Array1, Array2, ArrayD};

/// Evenly spaced values from `min` to `max` inclusive.
///
/// With `n - 1` dividing the span evenly, percentiles land exactly on
/// grid values: the p-th percentile is `min + p/100 * (max - min)`.
pub fn ramp(min: f64, max: f64, n: usize) -> ArrayD<f64> {
    let values: Vec<f64> = (0..n)
        .map(|i| min + (max - min) * i as f64 / (n - 1) as f64)
        .collect();
    Array1::from(values).into_dyn()
}

/// A 2-D gradient grid spanning `min` to `max` across all cells
pub fn grid(min: f64, max: f64, rows: usize, cols: usize) -> ArrayD<f64> {
    let total = rows * cols;
    let values: Vec<f64> = (0..total)
        .map(|i| min + (max - min) * i as f64 / (total - 1) as f64)
        .collect();
    Array2::from_shape_vec((rows, cols), values)
        .unwrap()
        .into_dyn()
}

/// Mostly-zero data with one negative and one positive outlier, for
/// exercising the sparse-difference-data guard
pub fn sparse(negative: f64, positive: f64, zeros: usize) -> ArrayD<f64> {
    let mut values = vec![0.0; zeros];
    values.push(negative);
    values.push(positive);
    Array1::from(values).into_dyn()
}
