//! Raymarched sea.

use crate::config::SeascapeSettings;
use crate::core::{FrameInfo, GpuContext};
use crate::ocean::SeascapeCamera;
use crate::render::{SeascapePass, SeascapeUniform};
use crate::traits::OceanScene;

/// Clocks and viewport of the seascape, independent of the GPU
pub struct SeascapeState {
    pub settings: SeascapeSettings,
    pub width: u32,
    pub height: u32,
    /// Sea animation clock (elapsed seconds)
    pub time: f32,
    /// Camera path clock, integrated at `time_scale`
    pub path_time: f32,
}

impl SeascapeState {
    pub fn new(settings: &SeascapeSettings, width: u32, height: u32) -> Self {
        Self {
            settings: settings.clone(),
            width: width.max(1),
            height: height.max(1),
            time: 0.0,
            path_time: 0.0,
        }
    }

    pub fn advance(&mut self, frame: &FrameInfo) {
        self.time = frame.time;
        self.path_time += frame.delta * self.settings.time_scale;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn camera(&self) -> SeascapeCamera {
        SeascapeCamera::at(
            self.path_time,
            self.time,
            self.settings.eye_height,
            self.settings.forward_speed,
        )
    }

    pub fn uniform(&self) -> SeascapeUniform {
        SeascapeUniform::new(self.width, self.height, self.time, &self.camera())
    }
}

pub struct SeascapeScene {
    state: SeascapeState,
    pass: SeascapePass,
}

impl SeascapeScene {
    pub fn new(gpu: &GpuContext, format: wgpu::TextureFormat, settings: &SeascapeSettings, width: u32, height: u32) -> Self {
        let state = SeascapeState::new(settings, width, height);
        let pass = SeascapePass::new(gpu.device(), format, &state.uniform());
        log::info!("Seascape scene: eye height {:.1}", state.settings.eye_height);
        Self { state, pass }
    }
}

impl OceanScene for SeascapeScene {
    fn name(&self) -> &'static str {
        "Seascape"
    }

    fn update(&mut self, queue: &wgpu::Queue, frame: &FrameInfo) {
        self.state.advance(frame);
        self.pass.write(queue, &self.state.uniform());
    }

    fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.state.set_viewport(width, height);
        self.pass.write(queue, &self.state.uniform());
    }

    fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, _depth: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Seascape Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        self.pass.draw(&mut pass);
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let settings = &mut self.state.settings;
        ui.add(egui::Slider::new(&mut settings.time_scale, 0.0..=2.0).text("time scale"));
        ui.add(egui::Slider::new(&mut settings.eye_height, 0.5..=10.0).text("eye height"));
        ui.add(egui::Slider::new(&mut settings.forward_speed, 0.0..=20.0).text("speed"));
    }
}
