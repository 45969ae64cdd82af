//! Sampled curves as polylines.

use std::ops::Range;

use serde::Serialize;
use surf_core::traits::BoundingBox;
use surf_core::{Result, SurfError};
use surf_field::CoordinateTriple;
use surf_math::{Aabb3, Point3};

/// Ordered curve samples. Non-finite samples split the curve into runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Polyline {
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Index ranges of maximal runs of consecutive finite points with at
    /// least two points each; these are the pieces a renderer should draw.
    pub fn finite_runs(&self) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut start = None;
        for (i, p) in self.points.iter().enumerate() {
            match (p.is_finite(), start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    if i - s >= 2 {
                        runs.push(s..i);
                    }
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            if self.points.len() - s >= 2 {
                runs.push(s..self.points.len());
            }
        }
        runs
    }

    /// Total length of the drawable runs.
    pub fn length(&self) -> f64 {
        self.finite_runs()
            .into_iter()
            .map(|run| {
                self.points[run]
                    .windows(2)
                    .map(|w| w[0].distance(w[1]))
                    .sum::<f64>()
            })
            .sum()
    }
}

impl BoundingBox for Polyline {
    type Point = Point3;

    fn bounding_box(&self) -> Option<(Point3, Point3)> {
        Aabb3::from_points(&self.points).map(|b| (b.min, b.max))
    }
}

/// Convert a 1D curve triple into a polyline.
pub fn curve_to_polyline(triple: &CoordinateTriple) -> Result<Polyline> {
    if triple.shape().len() != 1 {
        return Err(SurfError::Invalid(format!(
            "polyline needs 1D coordinate arrays, got shape {:?}",
            triple.shape()
        )));
    }
    Ok(Polyline {
        points: triple.points(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use surf_math::DVec3;

    fn line(xs: &[f64]) -> Polyline {
        Polyline {
            points: xs.iter().map(|&x| DVec3::new(x, 0.0, 0.0)).collect(),
        }
    }

    #[test]
    fn test_runs_split_on_non_finite() {
        let poly = line(&[0.0, 1.0, f64::NAN, 2.0, f64::INFINITY, 3.0, 4.0, 5.0]);
        assert_eq!(poly.finite_runs(), vec![0..2, 5..8]);
        assert_relative_eq!(poly.length(), 3.0);
    }

    #[test]
    fn test_all_finite() {
        let poly = line(&[0.0, 0.5, 2.0]);
        assert_eq!(poly.finite_runs(), vec![0..3]);
        assert_relative_eq!(poly.length(), 2.0);
        let (min, max) = poly.bounding_box().unwrap();
        assert_eq!(min.x, 0.0);
        assert_eq!(max.x, 2.0);
    }

    #[test]
    fn test_from_curve_triple() {
        let triple = surf_field::generate_curve("1", "t", "pi / 2", (0.0, std::f64::consts::TAU)).unwrap();
        let poly = curve_to_polyline(&triple).unwrap();
        assert_eq!(poly.points.len(), 1000);
        assert_relative_eq!(poly.length(), std::f64::consts::TAU, epsilon = 1e-3);
    }

    #[test]
    fn test_rejects_surface_shape() {
        let triple = surf_field::generate_surface(
            "u",
            "v",
            "0",
            (0.0, 1.0),
            (0.0, 1.0),
            surf_field::CoordinateMode::Direct,
        )
        .unwrap();
        assert!(curve_to_polyline(&triple).is_err());
    }
}
