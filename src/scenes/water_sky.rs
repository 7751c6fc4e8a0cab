//! Gerstner water under a scattering sky.

use anyhow::Result;
use winit::event::KeyEvent;

use crate::camera::Camera;
use crate::config::{Settings, SkySettings, WaterSettings};
use crate::core::{FrameInfo, GpuContext};
use crate::ocean::{GerstnerWaves, Sun};
use crate::render::{AtmosphereBindings, SkyPass, SkyUniform, WaterPass, WaterUniform};
use crate::traits::OceanScene;

/// Minimum height of the eye above the displaced surface
pub const EYE_CLEARANCE: f32 = 2.0;

/// Everything the water/sky scene animates, independent of the GPU
pub struct WaterSkyState {
    pub camera: Camera,
    pub sun: Sun,
    pub sky: SkySettings,
    pub water: WaterSettings,
    pub waves: GerstnerWaves,
    pub time: f32,
}

impl WaterSkyState {
    pub fn new(settings: &Settings, width: u32, height: u32) -> Self {
        let mut camera = Camera::new(&settings.camera, 1.0);
        camera.set_viewport(width, height);
        Self {
            camera,
            sun: settings.sun,
            sky: settings.sky.clone(),
            water: settings.water.clone(),
            waves: settings.waves.clone(),
            time: 0.0,
        }
    }

    /// Move to `frame`: water clock follows elapsed time, camera integrates delta
    pub fn advance(&mut self, frame: &FrameInfo) {
        self.time = frame.time;
        self.camera.update(frame.delta);
        let p = self.camera.position;
        let floor = self.waves.surface_height(p.x, p.z, self.time) + EYE_CLEARANCE;
        self.camera.clamp_above(floor);
    }

    pub fn set_sun(&mut self, elevation: f32, azimuth: f32) {
        self.sun = Sun::new(elevation, azimuth);
    }

    pub fn sky_uniform(&self) -> SkyUniform {
        SkyUniform::new(&self.sky, self.sun.direction())
    }

    pub fn water_uniform(&self) -> WaterUniform {
        WaterUniform::new(&self.water, self.time)
    }
}

pub struct WaterSkyScene {
    state: WaterSkyState,
    atmosphere: AtmosphereBindings,
    sky: SkyPass,
    water: WaterPass,
    sky_dirty: bool,
    waves_dirty: bool,
}

impl WaterSkyScene {
    pub fn new(gpu: &GpuContext, format: wgpu::TextureFormat, settings: &Settings, width: u32, height: u32) -> Result<Self> {
        let state = WaterSkyState::new(settings, width, height);
        let device = gpu.device();

        let atmosphere = AtmosphereBindings::new(device, &state.camera.to_uniform(), &state.sky_uniform());
        let sky = SkyPass::new(device, format, &atmosphere);
        let water = WaterPass::new(device, format, &atmosphere, &state.water, &state.waves)?;

        log::info!(
            "Water scene: {} wave layers, sun at {:.1} deg elevation",
            state.waves.active_layers().len(),
            state.sun.elevation
        );

        Ok(Self {
            state,
            atmosphere,
            sky,
            water,
            sky_dirty: false,
            waves_dirty: false,
        })
    }
}

impl OceanScene for WaterSkyScene {
    fn name(&self) -> &'static str {
        "Water"
    }

    fn update(&mut self, queue: &wgpu::Queue, frame: &FrameInfo) {
        self.state.advance(frame);
        self.atmosphere.write_camera(queue, &self.state.camera.to_uniform());
        self.water.write_water(queue, &self.state.water_uniform());

        if self.sky_dirty {
            self.atmosphere.write_sky(queue, &self.state.sky_uniform());
            self.sky_dirty = false;
        }
        if self.waves_dirty {
            self.water.write_waves(queue, &self.state.waves.to_uniform());
            self.waves_dirty = false;
        }
    }

    fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.state.camera.set_viewport(width, height);
        self.atmosphere.write_camera(queue, &self.state.camera.to_uniform());
    }

    fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, depth: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Water Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        self.sky.draw(&mut pass, &self.atmosphere);
        self.water.draw(&mut pass, &self.atmosphere);
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        self.state.camera.process_keyboard(event);
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;

        ui.heading("Sky");
        let mut elevation = state.sun.elevation;
        let mut azimuth = state.sun.azimuth;
        let mut changed = ui.add(egui::Slider::new(&mut elevation, -10.0..=90.0).text("elevation")).changed();
        changed |= ui.add(egui::Slider::new(&mut azimuth, -180.0..=180.0).text("azimuth")).changed();
        changed |= ui
            .add(egui::Slider::new(&mut state.sky.exposure, 0.01..=1.0).text("exposure"))
            .changed();
        if changed {
            state.set_sun(elevation, azimuth);
            self.sky_dirty = true;
        }

        ui.heading("Water");
        ui.add(egui::Slider::new(&mut state.water.distortion_scale, 0.0..=8.0).text("distortion scale"));
        ui.add(egui::Slider::new(&mut state.water.size, 0.1..=10.0).text("size"));

        if self.water.is_patched() {
            ui.heading("Waves");
            // Keep wavelengths resolvable by the grid and the summed steepness foldless
            let shortest = state.water.min_wavelength() + 1.0;
            let longest = shortest.max(100.0);
            for i in 0..state.waves.active_layers().len() {
                ui.label(format!("Wave {}", i + 1));
                let mut steepness = state.waves.layers[i].steepness;
                let headroom = state.waves.steepness_headroom(i);
                if ui
                    .add(egui::Slider::new(&mut steepness, 0.0..=headroom).text("steepness"))
                    .changed()
                {
                    state.waves.set_layer_steepness(i, steepness);
                    self.waves_dirty = true;
                }
                self.waves_dirty |= ui
                    .add(egui::Slider::new(&mut state.waves.layers[i].wavelength, shortest..=longest).text("wavelength"))
                    .changed();
            }
        }
    }
}
