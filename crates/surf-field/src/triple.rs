//! Coordinate arrays handed to the rendering layer.

use ndarray::{ArrayD, Zip};
use surf_math::{Aabb3, Point3};

/// Three coordinate arrays of one shape: `(x, y, z)` after any transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTriple {
    pub x: ArrayD<f64>,
    pub y: ArrayD<f64>,
    pub z: ArrayD<f64>,
}

/// Non-finite entries per component. A non-zero count is a domain warning,
/// not an error: the values are still returned as computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainReport {
    pub total: usize,
    pub non_finite: [usize; 3],
}

impl DomainReport {
    pub fn is_clean(&self) -> bool {
        self.non_finite.iter().all(|&n| n == 0)
    }
}

impl CoordinateTriple {
    /// # Panics
    /// If the three arrays do not share one shape.
    pub fn new(x: ArrayD<f64>, y: ArrayD<f64>, z: ArrayD<f64>) -> Self {
        assert!(
            x.shape() == y.shape() && y.shape() == z.shape(),
            "coordinate arrays must share a shape: {:?} {:?} {:?}",
            x.shape(),
            y.shape(),
            z.shape()
        );
        Self { x, y, z }
    }

    pub fn shape(&self) -> &[usize] {
        self.x.shape()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points in logical (row-major) order.
    pub fn points(&self) -> Vec<Point3> {
        let mut points = Vec::with_capacity(self.len());
        Zip::from(&self.x)
            .and(&self.y)
            .and(&self.z)
            .for_each(|&x, &y, &z| points.push(Point3::new(x, y, z)));
        points
    }

    /// Bounding box of the finite points.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.points())
    }

    pub fn domain_report(&self) -> DomainReport {
        let count = |a: &ArrayD<f64>| a.iter().filter(|v| !v.is_finite()).count();
        DomainReport {
            total: self.len(),
            non_finite: [count(&self.x), count(&self.y), count(&self.z)],
        }
    }
}
