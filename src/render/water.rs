use anyhow::Result;
use wgpu::util::DeviceExt;

use super::sky::AtmosphereBindings;
use super::{create_shader, uniform_entry, DEPTH_FORMAT};
use crate::config::WaterSettings;
use crate::geometry::{PlaneMesh, Vertex};
use crate::math::hex_to_linear_rgb;
use crate::ocean::{GerstnerWaves, WaveUniform};
use crate::shader::{self, ShaderPatch};

/// Water material parameters (group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaterUniform {
    pub sun_color: [f32; 3],
    pub distortion_scale: f32,
    pub water_color: [f32; 3],
    pub size: f32,
    pub alpha: f32,
    pub time: f32,
    pub _pad: [f32; 2],
}

impl WaterUniform {
    pub fn new(settings: &WaterSettings, time: f32) -> Self {
        Self {
            sun_color: hex_to_linear_rgb(settings.sun_color),
            distortion_scale: settings.distortion_scale,
            water_color: hex_to_linear_rgb(settings.water_color),
            size: settings.size,
            alpha: settings.alpha,
            time,
            _pad: [0.0; 2],
        }
    }
}

/// Wave buffer and group 2, present only when the shader is patched
struct WaveBindings {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Tessellated water plane
pub struct WaterPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    water_buffer: wgpu::Buffer,
    water_bind_group: wgpu::BindGroup,
    waves: Option<WaveBindings>,
}

impl WaterPass {
    /// Build the pass. An empty wave set compiles the unpatched shader.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        atmosphere: &AtmosphereBindings,
        settings: &WaterSettings,
        waves: &GerstnerWaves,
    ) -> Result<Self> {
        let patch = if waves.active_layers().is_empty() {
            ShaderPatch::new()
        } else {
            waves.shader_patch()
        };
        let source = shader::water_source(&patch)?;
        let shader = create_shader(device, "Water Shader", source);
        log::debug!("Water shader patched: {}", !patch.is_empty());

        let mesh = PlaneMesh::new(settings.extent, settings.segments);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let water_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Buffer"),
            contents: bytemuck::cast_slice(&[WaterUniform::new(settings, 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let water_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
            label: Some("water_bind_group_layout"),
        });
        let water_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &water_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: water_buffer.as_entire_binding(),
            }],
            label: Some("water_bind_group"),
        });

        let wave_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
            label: Some("wave_bind_group_layout"),
        });
        let wave_bindings = (!patch.is_empty()).then(|| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Wave Buffer"),
                contents: bytemuck::cast_slice(&[waves.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &wave_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("wave_bind_group"),
            });
            WaveBindings { buffer, bind_group }
        });

        let mut bind_group_layouts = vec![&atmosphere.layout, &water_layout];
        if wave_bindings.is_some() {
            bind_group_layouts.push(&wave_layout);
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Water Pipeline Layout"),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Water Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // Visible from below too
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            water_buffer,
            water_bind_group,
            waves: wave_bindings,
        })
    }

    pub fn is_patched(&self) -> bool {
        self.waves.is_some()
    }

    pub fn write_water(&self, queue: &wgpu::Queue, water: &WaterUniform) {
        queue.write_buffer(&self.water_buffer, 0, bytemuck::cast_slice(&[*water]));
    }

    /// Upload a new wave set. Ignored by the unpatched shader.
    pub fn write_waves(&self, queue: &wgpu::Queue, waves: &WaveUniform) {
        if let Some(bindings) = &self.waves {
            queue.write_buffer(&bindings.buffer, 0, bytemuck::cast_slice(&[*waves]));
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, atmosphere: &AtmosphereBindings) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &atmosphere.bind_group, &[]);
        pass.set_bind_group(1, &self.water_bind_group, &[]);
        if let Some(bindings) = &self.waves {
            pass.set_bind_group(2, &bindings.bind_group, &[]);
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<WaterUniform>(), 48);
    }

    #[test]
    fn colors_are_linearized() {
        let uniform = WaterUniform::new(&WaterSettings::default(), 1.5);
        assert!(uniform.sun_color.iter().all(|c| (c - 1.0).abs() < 1e-6));
        // 0x001e0f is dark green-blue; linear values sit well below sRGB ones
        assert_eq!(uniform.water_color[0], 0.0);
        assert!(uniform.water_color[1] < 30.0 / 255.0);
        assert!(uniform.water_color[2] < uniform.water_color[1]);
        assert_eq!(uniform.time, 1.5);
        assert_eq!(uniform.distortion_scale, 3.7);
    }
}
