//! Elementwise combination of arrays under NumPy broadcasting rules.
//!
//! Shapes are aligned on their trailing axes. Each aligned pair of lengths
//! must be equal, or one of them must be 1. A 0-d array (a scalar) therefore
//! combines with any shape.

use ndarray::{ArrayD, IxDyn, Zip};

/// Compute the common shape of two operands, or `None` if they cannot be
/// broadcast together.
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let mut shape = vec![0; ndim];
    for (axis, out) in shape.iter_mut().enumerate() {
        // Missing leading axes behave as length 1.
        let da = axis
            .checked_sub(ndim - a.len())
            .map_or(1, |i| a[i]);
        let db = axis
            .checked_sub(ndim - b.len())
            .map_or(1, |i| b[i]);
        *out = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }
    Some(shape)
}

/// Apply `f` elementwise over `a` and `b` after broadcasting both to their
/// common shape. Returns `None` on incompatible shapes.
pub fn zip_broadcast<F>(a: &ArrayD<f64>, b: &ArrayD<f64>, f: F) -> Option<ArrayD<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    if a.shape() == b.shape() {
        return Some(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)));
    }
    let shape = broadcast_shape(a.shape(), b.shape())?;
    let av = a.broadcast(IxDyn(&shape))?;
    let bv = b.broadcast(IxDyn(&shape))?;
    Some(Zip::from(av).and(bv).map_collect(|&x, &y| f(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, arr1, arr2};

    #[test]
    fn test_shape_rules() {
        assert_eq!(broadcast_shape(&[], &[3, 4]), Some(vec![3, 4]));
        assert_eq!(broadcast_shape(&[3, 4], &[4]), Some(vec![3, 4]));
        assert_eq!(broadcast_shape(&[3, 1], &[1, 4]), Some(vec![3, 4]));
        assert_eq!(broadcast_shape(&[5], &[5]), Some(vec![5]));
        assert_eq!(broadcast_shape(&[3, 4], &[3]), None);
        assert_eq!(broadcast_shape(&[1000], &[100, 100]), None);
    }

    #[test]
    fn test_scalar_with_array() {
        let a = arr0(2.0).into_dyn();
        let b = arr1(&[1.0, 2.0, 3.0]).into_dyn();
        let out = zip_broadcast(&a, &b, |x, y| x * y).unwrap();
        assert_eq!(out, arr1(&[2.0, 4.0, 6.0]).into_dyn());
    }

    #[test]
    fn test_row_against_matrix() {
        let m = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        let row = arr1(&[10.0, 20.0]).into_dyn();
        let out = zip_broadcast(&m, &row, |x, y| x + y).unwrap();
        assert_eq!(out, arr2(&[[11.0, 22.0], [13.0, 24.0]]).into_dyn());
    }

    #[test]
    fn test_incompatible() {
        let a = arr1(&[1.0, 2.0, 3.0]).into_dyn();
        let b = arr1(&[1.0, 2.0]).into_dyn();
        assert!(zip_broadcast(&a, &b, |x, y| x + y).is_none());
    }
}
