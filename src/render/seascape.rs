use wgpu::util::DeviceExt;

use super::{create_shader, uniform_entry};
use crate::ocean::SeascapeCamera;
use crate::shader;

/// Per-frame state of the raymarched sea
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SeascapeUniform {
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad0: f32,
    pub eye: [f32; 3],
    pub _pad1: f32,
    /// Columns of a `mat3x3<f32>`, each padded to 16 bytes
    pub orientation: [[f32; 4]; 3],
}

impl SeascapeUniform {
    pub fn new(width: u32, height: u32, time: f32, camera: &SeascapeCamera) -> Self {
        let m = camera.orientation;
        Self {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            time,
            _pad0: 0.0,
            eye: camera.origin.to_array(),
            _pad1: 0.0,
            orientation: [m.x_axis.extend(0.0).to_array(), m.y_axis.extend(0.0).to_array(), m.z_axis.extend(0.0).to_array()],
        }
    }
}

/// Full-screen triangle running the sea raymarcher
pub struct SeascapePass {
    pipeline: wgpu::RenderPipeline,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SeascapePass {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, initial: &SeascapeUniform) -> Self {
        let shader = create_shader(device, "Seascape Shader", shader::seascape_source());

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Seascape Buffer"),
            contents: bytemuck::cast_slice(&[*initial]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
            label: Some("seascape_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("seascape_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Seascape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Seascape Pipeline"),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            buffer,
            bind_group,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniform: &SeascapeUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
