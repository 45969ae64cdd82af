//! Triangulation of a sampled surface grid.

use surf_core::{Result, SurfError};
use surf_field::CoordinateTriple;
use surf_math::Point2;

use crate::TriangleMesh;

/// Convert a `(rows, cols)` surface triple into a triangle mesh.
///
/// Every grid sample becomes a vertex, in row-major order. Each grid cell is
/// split into two triangles; triangles touching a non-finite vertex are
/// dropped, leaving a gap. UVs run from 0 to 1 across columns (u) and rows (v).
pub fn surface_to_mesh(triple: &CoordinateTriple) -> Result<TriangleMesh> {
    let &[rows, cols] = triple.shape() else {
        return Err(SurfError::Invalid(format!(
            "surface mesh needs 2D coordinate arrays, got shape {:?}",
            triple.shape()
        )));
    };
    if rows < 2 || cols < 2 {
        return Err(SurfError::Invalid(format!(
            "surface mesh needs at least 2x2 samples, got {rows}x{cols}"
        )));
    }
    check_index_range(rows, cols)?;

    let positions = triple.points();
    let uvs = (0..rows)
        .flat_map(|i| {
            (0..cols).map(move |j| {
                Point2::new(j as f64 / (cols - 1) as f64, i as f64 / (rows - 1) as f64)
            })
        })
        .collect();

    let idx = |i: usize, j: usize| -> u32 { (i * cols + j) as u32 };
    let finite = |i: u32| positions[i as usize].is_finite();

    let mut indices = Vec::with_capacity((rows - 1) * (cols - 1) * 6);
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            let quad = [idx(i, j), idx(i, j + 1), idx(i + 1, j + 1), idx(i + 1, j)];
            for tri in [[quad[0], quad[1], quad[2]], [quad[0], quad[2], quad[3]]] {
                if tri.iter().all(|&k| finite(k)) {
                    indices.extend_from_slice(&tri);
                }
            }
        }
    }

    let mut mesh = TriangleMesh {
        positions,
        normals: Vec::new(),
        indices,
        uvs,
    };
    mesh.compute_normals();
    Ok(mesh)
}

/// Mesh indices are `u32`, so every vertex number must fit in one.
fn check_index_range(rows: usize, cols: usize) -> Result<()> {
    match rows.checked_mul(cols).map(u32::try_from) {
        Some(Ok(_)) => Ok(()),
        _ => Err(SurfError::Invalid(format!(
            "surface mesh of {rows}x{cols} samples exceeds the u32 vertex index range"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn plane(rows: usize, cols: usize) -> CoordinateTriple {
        CoordinateTriple::new(
            Array2::from_shape_fn((rows, cols), |(_, j)| j as f64).into_dyn(),
            Array2::from_shape_fn((rows, cols), |(i, _)| i as f64).into_dyn(),
            Array2::<f64>::zeros((rows, cols)).into_dyn(),
        )
    }

    #[test]
    fn test_index_range() {
        assert!(check_index_range(1000, 1000).is_ok());
        assert!(check_index_range(65_536, 65_535).is_ok());

        let err = check_index_range(65_536, 65_536).unwrap_err();
        assert!(err.to_string().contains("u32 vertex index range"));
        assert!(check_index_range(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_counts() {
        let mesh = surface_to_mesh(&plane(4, 5)).unwrap();
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.triangle_count(), 3 * 4 * 2);
        assert_eq!(mesh.uvs.len(), 20);
        assert_eq!(mesh.uvs[19], Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_indices_valid() {
        let mesh = surface_to_mesh(&plane(3, 3)).unwrap();
        let n = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < n, "Triangle index {} out of bounds (n={})", idx, n);
        }
    }

    #[test]
    fn test_plane_normals_point_up() {
        let mesh = surface_to_mesh(&plane(3, 3)).unwrap();
        for n in &mesh.normals {
            assert!((n.z - 1.0).abs() < 1e-12, "normal {n:?}");
        }
    }

    #[test]
    fn test_non_finite_vertex_leaves_gap() {
        let mut triple = plane(3, 3);
        triple.z[[1, 1]] = f64::INFINITY;
        let mesh = surface_to_mesh(&triple).unwrap();
        // Six of the eight triangles of a 3x3 grid touch the centre vertex
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 9);

        let mut triple = plane(3, 3);
        triple.x[[0, 0]] = f64::NAN;
        let mesh = surface_to_mesh(&triple).unwrap();
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn test_rejects_curve_shape() {
        let triple = CoordinateTriple::new(
            ndarray::arr1(&[0.0, 1.0]).into_dyn(),
            ndarray::arr1(&[0.0, 1.0]).into_dyn(),
            ndarray::arr1(&[0.0, 1.0]).into_dyn(),
        );
        assert!(surface_to_mesh(&triple).is_err());
    }
}
