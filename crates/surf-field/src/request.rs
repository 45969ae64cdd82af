//! A complete plot request as a UI would submit it.

use serde::{Deserialize, Serialize};
use surf_core::SamplingConfig;

use crate::error::Result;
use crate::generator::{generate_curve_with, generate_surface_with, CoordinateMode};
use crate::triple::CoordinateTriple;

/// Three equations plus the domain they are sampled over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlotRequest {
    Surface {
        equations: [String; 3],
        u_range: (f64, f64),
        v_range: (f64, f64),
        #[serde(default)]
        mode: CoordinateMode,
    },
    Curve {
        equations: [String; 3],
        t_range: (f64, f64),
    },
}

impl PlotRequest {
    pub fn surface(
        equations: [&str; 3],
        u_range: (f64, f64),
        v_range: (f64, f64),
        mode: CoordinateMode,
    ) -> Self {
        PlotRequest::Surface {
            equations: equations.map(String::from),
            u_range,
            v_range,
            mode,
        }
    }

    pub fn curve(equations: [&str; 3], t_range: (f64, f64)) -> Self {
        PlotRequest::Curve {
            equations: equations.map(String::from),
            t_range,
        }
    }

    pub fn equations(&self) -> &[String; 3] {
        match self {
            PlotRequest::Surface { equations, .. } | PlotRequest::Curve { equations, .. } => {
                equations
            }
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, PlotRequest::Curve { .. })
    }

    pub fn generate(&self, config: &SamplingConfig) -> Result<CoordinateTriple> {
        match self {
            PlotRequest::Surface {
                equations: [a, b, c],
                u_range,
                v_range,
                mode,
            } => generate_surface_with(a, b, c, *u_range, *v_range, *mode, config),
            PlotRequest::Curve {
                equations: [a, b, c],
                t_range,
            } => generate_curve_with(a, b, c, *t_range, config),
        }
    }
}
