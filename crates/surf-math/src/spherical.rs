//! Spherical to Cartesian conversion.
//!
//! `rho` is the radius, `theta` the azimuth measured in the xy-plane from the
//! x-axis, and `phi` the inclination measured from the z-axis:
//!
//! `x = rho * sin(phi) * cos(theta)`
//! `y = rho * sin(phi) * sin(theta)`
//! `z = rho * cos(phi)`

use ndarray::{ArrayD, Zip};

use crate::Point3;

/// Convert a single spherical coordinate to a Cartesian point.
pub fn spherical_point(rho: f64, theta: f64, phi: f64) -> Point3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Point3::new(
        rho * sin_phi * cos_theta,
        rho * sin_phi * sin_theta,
        rho * cos_phi,
    )
}

/// Convert `(rho, theta, phi)` arrays elementwise into `(x, y, z)` arrays.
///
/// Non-finite inputs propagate into the outputs.
///
/// # Panics
/// If the three inputs do not share one shape.
pub fn spherical_to_cartesian(
    rho: &ArrayD<f64>,
    theta: &ArrayD<f64>,
    phi: &ArrayD<f64>,
) -> (ArrayD<f64>, ArrayD<f64>, ArrayD<f64>) {
    let mut x = ArrayD::zeros(rho.raw_dim());
    let mut y = ArrayD::zeros(rho.raw_dim());
    let mut z = ArrayD::zeros(rho.raw_dim());

    Zip::from(&mut x)
        .and(&mut y)
        .and(&mut z)
        .and(rho)
        .and(theta)
        .and(phi)
        .for_each(|x, y, z, &r, &t, &p| {
            let point = spherical_point(r, t, p);
            *x = point.x;
            *y = point.y;
            *z = point.z;
        });

    (x, y, z)
}
