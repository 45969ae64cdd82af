pub mod grid_mesh;
pub mod polyline;
pub mod triangulate;

pub use grid_mesh::surface_to_mesh;
pub use polyline::{curve_to_polyline, Polyline};
pub use triangulate::TriangleMesh;
