//! Named example plots.

use std::f64::consts::{PI, TAU};

use crate::generator::CoordinateMode;
use crate::request::PlotRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub request: PlotRequest,
}

/// All presets, in display order.
pub fn all() -> Vec<Preset> {
    vec![
        Preset {
            name: "klein-bottle",
            description: "Klein bottle immersion in x, y, z",
            request: PlotRequest::surface(
                [
                    "-(4 - 2 * cos(u)) * cos(v) + 6 * (sin(u) + 1) * cos(u)",
                    "16 * sin(u)",
                    "(4 - 2 * cos(u)) * sin(v)",
                ],
                (0.0, TAU),
                (0.0, TAU),
                CoordinateMode::Direct,
            ),
        },
        Preset {
            name: "torus",
            description: "Ring torus with radii 3 and 1",
            request: PlotRequest::surface(
                ["(3 + cos(v)) * cos(u)", "(3 + cos(v)) * sin(u)", "sin(v)"],
                (0.0, TAU),
                (0.0, TAU),
                CoordinateMode::Direct,
            ),
        },
        Preset {
            name: "polar-shell",
            description: "Polar surface rho = u*v, theta = cos(u), phi = sin(v)",
            request: PlotRequest::surface(
                ["u*v", "cos(u)", "sin(v)"],
                (0.0, TAU),
                (0.0, TAU),
                CoordinateMode::Polar,
            ),
        },
        Preset {
            name: "unit-sphere",
            description: "Unit sphere from rho = 1",
            request: PlotRequest::surface(
                ["1", "u", "v"],
                (0.0, TAU),
                (0.0, PI),
                CoordinateMode::Polar,
            ),
        },
        Preset {
            name: "spherical-spiral",
            description: "Curve winding from pole to pole on the unit sphere",
            request: PlotRequest::curve(["1", "8 * t", "t"], (0.0, PI)),
        },
    ]
}

/// Look up a preset by name.
pub fn find(name: &str) -> Option<Preset> {
    all().into_iter().find(|preset| preset.name == name)
}
