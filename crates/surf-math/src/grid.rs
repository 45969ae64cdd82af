//! Linearly spaced parameter samples.

use ndarray::{Array1, Array2};

/// `n` evenly spaced samples from `min` to `max`, both inclusive.
///
/// The last sample is pinned to `max` so that closed ranges such as
/// `[0, 2π]` end exactly on their upper bound.
pub fn linspace(min: f64, max: f64, n: usize) -> Array1<f64> {
    let mut samples = Array1::linspace(min, max, n);
    if n > 0 {
        samples[n - 1] = max;
    }
    samples
}

/// Cartesian product of two sample vectors.
///
/// Returns `(U, V)`, both of shape `(v.len(), u.len())`, with
/// `U[[i, j]] = u[j]` and `V[[i, j]] = v[i]`.
pub fn meshgrid(u: &Array1<f64>, v: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (v.len(), u.len());
    let uu = Array2::from_shape_fn(shape, |(_, j)| u[j]);
    let vv = Array2::from_shape_fn(shape, |(i, _)| v[i]);
    (uu, vv)
}
