//! Parameter grids over which equations are sampled.

use ndarray::ArrayD;
use surf_expr::Namespace;
use surf_math::{linspace, meshgrid};

use crate::error::{FieldError, Result};

/// Sampled parameter values bound into the namespace as `u`, `v` or `t`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterGrid {
    /// `u` and `v` of shape `(nv, nu)`, `u` varying along columns.
    Surface { u: ArrayD<f64>, v: ArrayD<f64> },
    /// `t` of shape `(nt,)`.
    Curve { t: ArrayD<f64> },
}

/// Reject non-finite or inverted bounds. Equal bounds are allowed.
fn check_range(parameter: &'static str, (min, max): (f64, f64)) -> Result<()> {
    let reason = if !min.is_finite() || !max.is_finite() {
        "bounds must be finite"
    } else if min > max {
        "min must not exceed max"
    } else {
        return Ok(());
    };
    Err(FieldError::InvalidRange {
        parameter,
        min,
        max,
        reason,
    })
}

impl ParameterGrid {
    /// Build a `(nv, nu)` surface grid from two inclusive ranges.
    pub fn surface(u_range: (f64, f64), v_range: (f64, f64), nu: usize, nv: usize) -> Result<Self> {
        check_range("u", u_range)?;
        check_range("v", v_range)?;
        let u = linspace(u_range.0, u_range.1, nu);
        let v = linspace(v_range.0, v_range.1, nv);
        let (uu, vv) = meshgrid(&u, &v);
        Ok(ParameterGrid::Surface {
            u: uu.into_dyn(),
            v: vv.into_dyn(),
        })
    }

    /// Build an `nt`-sample curve parameter vector from an inclusive range.
    pub fn curve(t_range: (f64, f64), nt: usize) -> Result<Self> {
        check_range("t", t_range)?;
        Ok(ParameterGrid::Curve {
            t: linspace(t_range.0, t_range.1, nt).into_dyn(),
        })
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            ParameterGrid::Surface { u, .. } => u.shape(),
            ParameterGrid::Curve { t } => t.shape(),
        }
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh namespace with this grid's parameters bound.
    pub fn namespace(&self) -> Namespace {
        match self {
            ParameterGrid::Surface { u, v } => {
                Namespace::new().with("u", u.clone()).with("v", v.clone())
            }
            ParameterGrid::Curve { t } => Namespace::new().with("t", t.clone()),
        }
    }
}
