pub mod aabb;
pub mod broadcast;
pub mod grid;
pub mod spherical;

pub use glam::{DVec2, DVec3};
pub use aabb::Aabb3;
pub use broadcast::{broadcast_shape, zip_broadcast};
pub use grid::{linspace, meshgrid};
pub use spherical::{spherical_point, spherical_to_cartesian};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
