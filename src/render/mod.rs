mod hud;
mod renderer;
mod seascape;
mod sky;
mod water;

pub use hud::Hud;
pub use renderer::{FrameStatus, Renderer, DEPTH_FORMAT};
pub use seascape::{SeascapePass, SeascapeUniform};
pub use sky::{AtmosphereBindings, SkyPass, SkyUniform};
pub use water::{WaterPass, WaterUniform};

/// Layout entry for a uniform buffer at `binding`.
pub(crate) fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub(crate) fn create_shader(device: &wgpu::Device, label: &str, source: String) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}
