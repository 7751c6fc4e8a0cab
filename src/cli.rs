// cli.rs - Command-line interface configuration
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{ConfigError, Settings};
use crate::ocean::Sun;

/// Which ocean to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Gerstner-displaced water plane under a scattering sky
    Water,
    /// Full-screen raymarched sea
    Seascape,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "ocean-scene")]
#[command(about = "GPU ocean renderer", long_about = None)]
pub struct Cli {
    /// Scene variant to render
    #[arg(long, value_enum, default_value_t = SceneKind::Water)]
    pub scene: SceneKind,

    /// JSON settings file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sun elevation in degrees above the horizon
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f32>,

    /// Sun azimuth in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub azimuth: Option<f32>,

    /// Tone mapping exposure
    #[arg(long)]
    pub exposure: Option<f32>,

    /// Seascape camera height above the rest plane
    #[arg(long)]
    pub eye_height: Option<f32>,

    /// Render the water without wave displacement
    #[arg(long, default_value = "false")]
    pub flat: bool,

    /// Disable UI elements
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

impl Cli {
    /// Load the settings file (if any) and layer the flag overrides on top.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut Settings) {
        if self.elevation.is_some() || self.azimuth.is_some() {
            settings.sun = Sun::new(
                self.elevation.unwrap_or(settings.sun.elevation),
                self.azimuth.unwrap_or(settings.sun.azimuth),
            );
        }
        if let Some(exposure) = self.exposure {
            settings.sky.exposure = exposure;
        }
        if let Some(eye_height) = self.eye_height {
            settings.seascape.eye_height = eye_height;
        }
        if self.flat {
            settings.waves.layers.clear();
        }
    }
}
