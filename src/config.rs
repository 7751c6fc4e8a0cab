//! Scene settings, loadable from a JSON file.
//!
//! Every section is optional in the file; missing fields fall back to the
//! defaults below, which reproduce the stock scene.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ocean::gerstner::MAX_TOTAL_STEEPNESS;
use crate::ocean::{GerstnerWaves, Sun};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Perspective camera and fly controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    /// World units per second
    pub speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 55.0,
            near: 1.0,
            far: 20000.0,
            position: [30.0, 30.0, 100.0],
            speed: 50.0,
        }
    }
}

/// Atmospheric scattering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySettings {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    /// Tone mapping exposure
    pub exposure: f32,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 2.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            exposure: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    /// `0xRRGGBB`, sRGB
    pub sun_color: u32,
    /// `0xRRGGBB`, sRGB
    pub water_color: u32,
    pub distortion_scale: f32,
    /// Scale of the ripple noise
    pub size: f32,
    pub alpha: f32,
    /// Side length of the water plane
    pub extent: f32,
    /// Grid cells per side
    pub segments: u32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            sun_color: 0xffffff,
            water_color: 0x001e0f,
            distortion_scale: 3.7,
            size: 1.0,
            alpha: 1.0,
            extent: 2048.0,
            segments: 512,
        }
    }
}

impl WaterSettings {
    /// Width of one grid cell
    pub fn cell_size(&self) -> f32 {
        self.extent / self.segments.max(1) as f32
    }

    /// Shortest wavelength the grid can displace without aliasing
    pub fn min_wavelength(&self) -> f32 {
        2.0 * self.cell_size()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeascapeSettings {
    /// Camera path clock relative to wall time
    pub time_scale: f32,
    pub eye_height: f32,
    pub forward_speed: f32,
}

impl Default for SeascapeSettings {
    fn default() -> Self {
        Self {
            time_scale: 0.3,
            eye_height: 3.5,
            forward_speed: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sun: Sun,
    pub camera: CameraSettings,
    pub sky: SkySettings,
    pub water: WaterSettings,
    pub waves: GerstnerWaves,
    pub seascape: SeascapeSettings,
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(text)?;
        settings.sun = Sun::new(settings.sun.elevation, settings.sun.azimuth);
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(1.0..179.0).contains(&self.camera.fov_y_degrees) {
            return invalid("camera.fov_y_degrees", "must be between 1 and 179");
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return invalid("camera.far", "need 0 < near < far");
        }
        if self.sky.exposure <= 0.0 {
            return invalid("sky.exposure", "must be positive");
        }
        if self.water.segments == 0 || self.water.extent <= 0.0 {
            return invalid("water.segments", "plane needs a positive extent and at least one segment");
        }
        let min_wavelength = self.water.min_wavelength();
        for layer in &self.waves.layers {
            if layer.wavelength <= 0.0 {
                return invalid("waves.layers.wavelength", "must be positive");
            }
            if layer.wavelength <= min_wavelength {
                return Err(ConfigError::Invalid {
                    field: "waves.layers.wavelength",
                    reason: format!(
                        "{} is too short for a {} unit grid cell, need more than {}",
                        layer.wavelength,
                        self.water.cell_size(),
                        min_wavelength
                    ),
                });
            }
            if !(0.0..=1.0).contains(&layer.steepness) {
                return invalid("waves.layers.steepness", "must be within [0, 1]");
            }
            if layer.direction == [0.0, 0.0] {
                return invalid("waves.layers.direction", "must be non-zero");
            }
        }
        if self.waves.total_steepness() > MAX_TOTAL_STEEPNESS {
            return invalid("waves.layers.steepness", "summed steepness must stay at or below 0.9");
        }
        if self.seascape.time_scale < 0.0 {
            return invalid("seascape.time_scale", "must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::WaveLayer;

    #[test]
    fn empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_json(r#"{ "sun": { "elevation": 30.0 }, "sky": { "exposure": 0.8 } }"#).unwrap();
        assert_eq!(settings.sun.elevation, 30.0);
        assert_eq!(settings.sun.azimuth, Sun::default().azimuth);
        assert_eq!(settings.sky.exposure, 0.8);
        assert_eq!(settings.sky.turbidity, 10.0);
    }

    #[test]
    fn wave_layers_parse() {
        let settings = Settings::from_json(
            r#"{ "waves": { "layers": [ { "direction": [1.0, 0.5], "steepness": 0.2, "wavelength": 40.0 } ] } }"#,
        )
        .unwrap();
        assert_eq!(settings.waves.layers, vec![WaveLayer::new(1.0, 0.5, 0.2, 40.0)]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Settings::from_json("{ sun: }"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_wavelength_is_rejected() {
        let mut settings = Settings::default();
        settings.waves.layers[0].wavelength = 0.0;
        match settings.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "waves.layers.wavelength"),
            other => panic!("expected invalid wavelength, got {:?}", other),
        }
    }

    #[test]
    fn inverted_clip_planes_are_rejected() {
        let mut settings = Settings::default();
        settings.camera.near = 100.0;
        settings.camera.far = 10.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn default_grid_resolves_default_waves() {
        let settings = Settings::default();
        let step = settings.water.cell_size();
        for layer in &settings.waves.layers {
            assert!(step < layer.wavelength / 2.0, "step {} vs wavelength {}", step, layer.wavelength);
        }
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn coarse_grid_is_rejected() {
        let mut settings = Settings::default();
        settings.water.extent = 10000.0;
        settings.water.segments = 256;
        match settings.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "waves.layers.wavelength"),
            other => panic!("expected aliasing grid to be rejected, got {:?}", other),
        }

        settings.waves.layers.clear();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn folding_steepness_is_rejected() {
        let mut settings = Settings::default();
        for layer in &mut settings.waves.layers {
            layer.steepness = 1.0;
        }
        match settings.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "waves.layers.steepness"),
            other => panic!("expected folding waves to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn sun_from_file_is_normalized() {
        let settings = Settings::from_json(r#"{ "sun": { "elevation": 120.0, "azimuth": 540.0 } }"#).unwrap();
        assert_eq!(settings.sun, Sun::new(90.0, 180.0));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
