use wgpu::util::DeviceExt;

use super::{create_shader, uniform_entry, DEPTH_FORMAT};
use crate::camera::CameraUniform;
use crate::config::SkySettings;
use crate::shader;

/// Scattering parameters shared by the sky and water passes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniform {
    pub sun_direction: [f32; 3],
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub exposure: f32,
}

impl SkyUniform {
    pub fn new(settings: &SkySettings, sun_direction: glam::Vec3) -> Self {
        Self {
            sun_direction: sun_direction.to_array(),
            turbidity: settings.turbidity,
            rayleigh: settings.rayleigh,
            mie_coefficient: settings.mie_coefficient,
            mie_directional_g: settings.mie_directional_g,
            exposure: settings.exposure,
        }
    }
}

/// Group 0 of the sky and water shaders: camera at binding 0, sky at 1
pub struct AtmosphereBindings {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    sky_buffer: wgpu::Buffer,
}

impl AtmosphereBindings {
    pub fn new(device: &wgpu::Device, camera: &CameraUniform, sky: &SkyUniform) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[*camera]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let sky_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sky Buffer"),
            contents: bytemuck::cast_slice(&[*sky]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, stages), uniform_entry(1, stages)],
            label: Some("atmosphere_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: sky_buffer.as_entire_binding(),
                },
            ],
            label: Some("atmosphere_bind_group"),
        });

        Self {
            layout,
            bind_group,
            camera_buffer,
            sky_buffer,
        }
    }

    pub fn write_camera(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera]));
    }

    pub fn write_sky(&self, queue: &wgpu::Queue, sky: &SkyUniform) {
        queue.write_buffer(&self.sky_buffer, 0, bytemuck::cast_slice(&[*sky]));
    }
}

/// Full-screen Preetham sky drawn behind everything else
pub struct SkyPass {
    pipeline: wgpu::RenderPipeline,
}

impl SkyPass {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, atmosphere: &AtmosphereBindings) -> Self {
        let shader = create_shader(device, "Sky Shader", shader::sky_source());

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&atmosphere.layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sky Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Shares the water pass; never writes depth
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self { pipeline }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, atmosphere: &AtmosphereBindings) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &atmosphere.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::Sun;

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<SkyUniform>(), 32);
    }

    #[test]
    fn carries_settings_and_sun() {
        let settings = SkySettings::default();
        let sun = Sun::default().direction();
        let uniform = SkyUniform::new(&settings, sun);
        assert_eq!(uniform.sun_direction, sun.to_array());
        assert_eq!(uniform.turbidity, 10.0);
        assert_eq!(uniform.exposure, 0.5);
    }
}
