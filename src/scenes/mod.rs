mod seascape;
mod water_sky;

pub use seascape::{SeascapeScene, SeascapeState};
pub use water_sky::{WaterSkyScene, WaterSkyState, EYE_CLEARANCE};

use anyhow::Result;

use crate::cli::SceneKind;
use crate::config::Settings;
use crate::core::GpuContext;
use crate::traits::OceanScene;

/// Build the controller for `kind`
pub fn create_scene(
    kind: SceneKind,
    gpu: &GpuContext,
    format: wgpu::TextureFormat,
    settings: &Settings,
    width: u32,
    height: u32,
) -> Result<Box<dyn OceanScene>> {
    Ok(match kind {
        SceneKind::Water => Box::new(WaterSkyScene::new(gpu, format, settings, width, height)?),
        SceneKind::Seascape => Box::new(SeascapeScene::new(gpu, format, &settings.seascape, width, height)),
    })
}
