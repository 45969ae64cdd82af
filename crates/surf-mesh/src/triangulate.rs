use serde::Serialize;
use surf_core::traits::BoundingBox;
use surf_math::{Aabb3, Point2, Point3, Vector3};

/// Renderer-ready triangle mesh with per-vertex attributes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Accumulate face normals onto each vertex and normalize (smooth shading).
    ///
    /// Vertices that belong to no triangle, or only to degenerate ones, get
    /// a zero normal.
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];
            let normal = (p1 - p0).cross(p2 - p0);
            if !normal.is_finite() {
                continue;
            }
            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        for n in &mut self.normals {
            let len = n.length();
            if len > 1e-12 {
                *n /= len;
            }
        }
    }

    /// Bounding box of the finite vertices.
    pub fn aabb(&self) -> Option<Aabb3> {
        Aabb3::from_points(&self.positions)
    }
}

impl BoundingBox for TriangleMesh {
    type Point = Point3;

    fn bounding_box(&self) -> Option<(Point3, Point3)> {
        self.aabb().map(|b| (b.min, b.max))
    }
}
