use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Bounding box of the finite points. Points with an `inf` or `NaN`
    /// coordinate are skipped; returns `None` when no finite point remains.
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let mut finite = points.iter().copied().filter(|p| p.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Edge lengths along x, y and z.
    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }
}
