//! SurfGraph parametric field generator.
//!
//! Samples a parameter domain, evaluates three equations over it and returns
//! the resulting coordinate arrays, optionally converting spherical
//! `(rho, theta, phi)` output to Cartesian `(x, y, z)`.

pub mod error;
pub mod generator;
pub mod grid;
pub mod presets;
pub mod request;
pub mod triple;

pub use error::{FieldError, Result};
pub use generator::{
    generate_curve, generate_curve_with, generate_surface, generate_surface_with, CoordinateMode,
    EquationSlot,
};
pub use grid::ParameterGrid;
pub use presets::Preset;
pub use request::PlotRequest;
pub use triple::{CoordinateTriple, DomainReport};
