//! Surface and curve generation from three equations.

use std::fmt;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use surf_core::traits::Validate;
use surf_core::SamplingConfig;
use surf_expr::{EvalError, Expression};
use surf_math::spherical_to_cartesian;

use crate::error::{FieldError, Result};
use crate::grid::ParameterGrid;
use crate::triple::CoordinateTriple;

/// How the three equation outputs are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    /// Outputs are `(x, y, z)`.
    #[default]
    Direct,
    /// Outputs are `(rho, theta, phi)` and are converted to Cartesian.
    Polar,
}

impl CoordinateMode {
    pub fn slots(self) -> [EquationSlot; 3] {
        match self {
            CoordinateMode::Direct => [EquationSlot::X, EquationSlot::Y, EquationSlot::Z],
            CoordinateMode::Polar => [EquationSlot::Rho, EquationSlot::Theta, EquationSlot::Phi],
        }
    }
}

/// Position of an equation in a call, named by the quantity it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationSlot {
    X,
    Y,
    Z,
    Rho,
    Theta,
    Phi,
}

impl fmt::Display for EquationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquationSlot::X => "X",
            EquationSlot::Y => "Y",
            EquationSlot::Z => "Z",
            EquationSlot::Rho => "ρ",
            EquationSlot::Theta => "θ",
            EquationSlot::Phi => "φ",
        };
        f.write_str(name)
    }
}

/// Evaluate one equation and broadcast a scalar result up to the grid shape.
fn evaluate_slot(
    equation: &str,
    slot: EquationSlot,
    grid: &ParameterGrid,
    ns: &surf_expr::Namespace,
) -> Result<ArrayD<f64>> {
    let wrap = |source: EvalError| FieldError::Equation { slot, source };

    let value = Expression::parse(equation)
        .and_then(|expr| expr.evaluate(ns))
        .map_err(wrap)?;
    log::trace!("{slot} = '{equation}' -> shape {:?}", value.shape());

    let shape = grid.shape();
    if value.shape() == shape {
        return Ok(value);
    }
    match value.broadcast(IxDyn(shape)) {
        Some(view) => Ok(view.to_owned()),
        None => Err(wrap(EvalError::ShapeMismatch {
            op: "result".into(),
            left: value.shape().to_vec(),
            right: shape.to_vec(),
        })),
    }
}

/// Evaluate three equations over `grid` in order, stopping at the first failure.
fn evaluate_triple(
    grid: &ParameterGrid,
    equations: [&str; 3],
    mode: CoordinateMode,
) -> Result<CoordinateTriple> {
    let ns = grid.namespace();
    let [s0, s1, s2] = mode.slots();

    let a = evaluate_slot(equations[0], s0, grid, &ns)?;
    let b = evaluate_slot(equations[1], s1, grid, &ns)?;
    let c = evaluate_slot(equations[2], s2, grid, &ns)?;

    let triple = match mode {
        CoordinateMode::Direct => CoordinateTriple::new(a, b, c),
        CoordinateMode::Polar => {
            let (x, y, z) = spherical_to_cartesian(&a, &b, &c);
            CoordinateTriple::new(x, y, z)
        }
    };

    let report = triple.domain_report();
    if !report.is_clean() {
        log::debug!(
            "non-finite values in output: x={} y={} z={} of {}",
            report.non_finite[0],
            report.non_finite[1],
            report.non_finite[2],
            report.total
        );
    }
    Ok(triple)
}

/// Generate a surface on the default 100×100 grid.
///
/// In [`CoordinateMode::Direct`] the equations give `(x, y, z)`; in
/// [`CoordinateMode::Polar`] they give `(rho, theta, phi)`. All three
/// output arrays have shape `(Nv, Nu)`.
pub fn generate_surface(
    x_eq: &str,
    y_eq: &str,
    z_eq: &str,
    u_range: (f64, f64),
    v_range: (f64, f64),
    mode: CoordinateMode,
) -> Result<CoordinateTriple> {
    generate_surface_with(x_eq, y_eq, z_eq, u_range, v_range, mode, &SamplingConfig::default())
}

/// [`generate_surface`] with an explicit sampling resolution.
#[allow(clippy::too_many_arguments)]
pub fn generate_surface_with(
    x_eq: &str,
    y_eq: &str,
    z_eq: &str,
    u_range: (f64, f64),
    v_range: (f64, f64),
    mode: CoordinateMode,
    config: &SamplingConfig,
) -> Result<CoordinateTriple> {
    config.validate()?;
    let grid = ParameterGrid::surface(u_range, v_range, config.surface_u, config.surface_v)?;
    log::debug!("surface {mode:?} on {:?} grid, u={u_range:?} v={v_range:?}", grid.shape());
    evaluate_triple(&grid, [x_eq, y_eq, z_eq], mode)
}

/// Generate a spherical curve over the default 1000-sample `t` vector.
pub fn generate_curve(
    rho_eq: &str,
    theta_eq: &str,
    phi_eq: &str,
    t_range: (f64, f64),
) -> Result<CoordinateTriple> {
    generate_curve_with(rho_eq, theta_eq, phi_eq, t_range, &SamplingConfig::default())
}

/// [`generate_curve`] with an explicit sampling resolution.
pub fn generate_curve_with(
    rho_eq: &str,
    theta_eq: &str,
    phi_eq: &str,
    t_range: (f64, f64),
    config: &SamplingConfig,
) -> Result<CoordinateTriple> {
    config.validate()?;
    let grid = ParameterGrid::curve(t_range, config.curve_t)?;
    log::debug!("curve on {} samples, t={t_range:?}", grid.len());
    evaluate_triple(&grid, [rho_eq, theta_eq, phi_eq], CoordinateMode::Polar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slot_names() {
        assert_eq!(EquationSlot::X.to_string(), "X");
        assert_eq!(EquationSlot::Theta.to_string(), "θ");
        assert_eq!(CoordinateMode::Polar.slots()[2], EquationSlot::Phi);
    }

    #[test]
    fn test_scalar_equation_broadcast_to_grid() {
        let config = SamplingConfig::new(4, 3, 2);
        let triple = generate_surface_with(
            "u",
            "v",
            "2.5",
            (0.0, 1.0),
            (0.0, 1.0),
            CoordinateMode::Direct,
            &config,
        )
        .unwrap();
        assert_eq!(triple.z.shape(), &[3, 4]);
        assert!(triple.z.iter().all(|&z| z == 2.5));
    }

    #[test]
    fn test_polar_curve_on_circle() {
        let triple = generate_curve("2", "t", "pi / 2", (0.0, 6.0)).unwrap();
        assert_eq!(triple.shape(), &[1000]);
        for p in triple.points() {
            assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(p.truncate().length(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_stops_at_first_failure() {
        let err = generate_surface(
            "bad(u)",
            "1 +",
            "v",
            (0.0, 1.0),
            (0.0, 1.0),
            CoordinateMode::Direct,
        )
        .unwrap_err();
        assert_eq!(err.slot(), Some(EquationSlot::X));
        assert_eq!(
            err.eval_error(),
            Some(&EvalError::UnknownIdentifier("bad".into()))
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = SamplingConfig::new(1, 100, 1000);
        let err = generate_surface_with(
            "u",
            "v",
            "0",
            (0.0, 1.0),
            (0.0, 1.0),
            CoordinateMode::Direct,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, FieldError::Config(_)));
    }
}
