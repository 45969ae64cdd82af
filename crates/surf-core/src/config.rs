//! Sampling resolution used when building parameter grids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfError};
use crate::traits::Validate;

/// Number of samples taken along each parameter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Samples along `u` for surfaces
    pub surface_u: usize,
    /// Samples along `v` for surfaces
    pub surface_v: usize,
    /// Samples along `t` for curves
    pub curve_t: usize,
}

impl SamplingConfig {
    pub const DEFAULT_SURFACE: usize = 100;
    pub const DEFAULT_CURVE: usize = 1000;
    /// Linear spacing needs both endpoints.
    pub const MIN_SAMPLES: usize = 2;

    pub fn new(surface_u: usize, surface_v: usize, curve_t: usize) -> Self {
        Self {
            surface_u,
            surface_v,
            curve_t,
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!(
            "loaded sampling config from {}: {}x{} surface, {} curve",
            path.as_ref().display(),
            config.surface_u,
            config.surface_v,
            config.curve_t
        );
        Ok(config)
    }

    /// Number of points on a surface grid.
    pub fn surface_points(&self) -> usize {
        self.surface_u * self.surface_v
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            surface_u: Self::DEFAULT_SURFACE,
            surface_v: Self::DEFAULT_SURFACE,
            curve_t: Self::DEFAULT_CURVE,
        }
    }
}

impl Validate for SamplingConfig {
    fn validate(&self) -> Result<()> {
        for (name, n) in [
            ("surface_u", self.surface_u),
            ("surface_v", self.surface_v),
            ("curve_t", self.curve_t),
        ] {
            if n < Self::MIN_SAMPLES {
                return Err(SurfError::Config(format!(
                    "{name} must be at least {}, got {n}",
                    Self::MIN_SAMPLES
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_resolution() {
        let config = SamplingConfig::default();
        assert_eq!(config.surface_u, 100);
        assert_eq!(config.surface_v, 100);
        assert_eq!(config.curve_t, 1000);
        assert_eq!(config.surface_points(), 10_000);
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_single_sample() {
        let config = SamplingConfig::new(100, 1, 1000);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("surface_v"), "{err}");
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "curve_t": 250 }}"#).unwrap();

        let config = SamplingConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.curve_t, 250);
        assert_eq!(config.surface_u, 100);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = SamplingConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, SurfError::Serialization(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "surface_u": 0 }}"#).unwrap();

        let err = SamplingConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, SurfError::Config(_)));
    }
}
