//! JSON documents written for the rendering layer.
//!
//! `inf` and `NaN` have no JSON representation and are written as `null`,
//! which plotting libraries treat as a gap.

use serde::Serialize;
use surf_field::{CoordinateTriple, FieldError, PlotRequest};
use surf_math::{Aabb3, Vector3};
use surf_mesh::{Polyline, TriangleMesh};

#[derive(Debug, Serialize)]
pub struct FieldDocument {
    pub kind: &'static str,
    /// `[rows, cols]` for surfaces, `[samples]` for curves. Arrays below are
    /// flattened row-major.
    pub shape: Vec<usize>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub bounds: Option<Aabb3>,
    pub non_finite: [usize; 3],
}

impl FieldDocument {
    pub fn new(request: &PlotRequest, triple: &CoordinateTriple) -> Self {
        Self {
            kind: kind(request),
            shape: triple.shape().to_vec(),
            x: triple.x.iter().copied().collect(),
            y: triple.y.iter().copied().collect(),
            z: triple.z.iter().copied().collect(),
            bounds: triple.bounding_box(),
            non_finite: triple.domain_report().non_finite,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeometryDocument {
    Mesh {
        bounds: Option<Aabb3>,
        #[serde(flatten)]
        mesh: TriangleMesh,
    },
    Polyline {
        bounds: Option<Aabb3>,
        runs: Vec<(usize, usize)>,
        #[serde(flatten)]
        polyline: Polyline,
    },
}

impl GeometryDocument {
    pub fn mesh(mesh: TriangleMesh) -> Self {
        GeometryDocument::Mesh {
            bounds: mesh.aabb(),
            mesh,
        }
    }

    pub fn polyline(polyline: Polyline) -> Self {
        GeometryDocument::Polyline {
            bounds: Aabb3::from_points(&polyline.points),
            runs: polyline
                .finite_runs()
                .into_iter()
                .map(|r| (r.start, r.end))
                .collect(),
            polyline,
        }
    }
}

/// One line of the `presets --render` summary.
#[derive(Debug, Serialize)]
pub struct PresetSummary {
    pub name: &'static str,
    pub kind: &'static str,
    pub shape: Vec<usize>,
    pub bounds: Option<Aabb3>,
    /// Edge lengths of `bounds`.
    pub extents: Option<Vector3>,
    pub non_finite: [usize; 3],
    pub error: Option<String>,
}

impl PresetSummary {
    pub fn new(
        name: &'static str,
        request: &PlotRequest,
        generated: Result<CoordinateTriple, FieldError>,
    ) -> Self {
        match generated {
            Ok(triple) => {
                let bounds = triple.bounding_box();
                PresetSummary {
                    name,
                    kind: kind(request),
                    shape: triple.shape().to_vec(),
                    bounds,
                    extents: bounds.map(|b| b.extents()),
                    non_finite: triple.domain_report().non_finite,
                    error: None,
                }
            }
            Err(e) => PresetSummary {
                name,
                kind: kind(request),
                shape: Vec::new(),
                bounds: None,
                extents: None,
                non_finite: [0; 3],
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn kind(request: &PlotRequest) -> &'static str {
    if request.is_curve() {
        "curve"
    } else {
        "surface"
    }
}
