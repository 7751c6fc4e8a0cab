//! Gerstner wave displacement for the water surface.
//!
//! The WGSL injected into the water vertex stage (`shaders/gerstner.wgsl`)
//! and the CPU functions below compute the same sum, so the camera can be
//! kept above the animated surface without reading anything back from the GPU.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::shader::{Hook, ShaderPatch};

/// Gravity used by the deep-water dispersion relation (m/s²)
pub const GRAVITY: f32 = 9.8;

/// Layers the GPU uniform has room for
pub const MAX_WAVE_LAYERS: usize = 4;

/// Summed steepness ceiling; above it crests fold over and the
/// rest-position inverse stops converging
pub const MAX_TOTAL_STEEPNESS: f32 = 0.9;

const SURFACE_ITERATIONS: usize = 48;

const GERSTNER_DECLARATIONS: &str = include_str!("../shaders/gerstner.wgsl");

const GERSTNER_DISPLACEMENT: &str = "\
    var tangent = vec3<f32>(1.0, 0.0, 0.0);
    var binormal = vec3<f32>(0.0, 0.0, 1.0);
    let grid_point = position;
    for (var i = 0u; i < min(waves.count, 4u); i = i + 1u) {
        position += gerstner_wave(waves.layers[i], grid_point, &tangent, &binormal);
    }
    normal = normalize(cross(binormal, tangent));";

/// A single traveling wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveLayer {
    /// Travel direction in the XZ plane, need not be normalized
    pub direction: [f32; 2],
    /// 0 is flat, 1 is the sharpest crest before the surface loops over itself
    pub steepness: f32,
    /// Crest-to-crest distance in world units
    pub wavelength: f32,
}

impl WaveLayer {
    pub const fn new(dir_x: f32, dir_z: f32, steepness: f32, wavelength: f32) -> Self {
        Self {
            direction: [dir_x, dir_z],
            steepness,
            wavelength,
        }
    }

    fn wave_number(&self) -> f32 {
        2.0 * PI / self.wavelength
    }

    /// Phase speed from `c = sqrt(g / k)`.
    pub fn phase_speed(&self) -> f32 {
        (GRAVITY / self.wave_number()).sqrt()
    }

    /// Crest height above the rest plane.
    pub fn amplitude(&self) -> f32 {
        self.steepness / self.wave_number()
    }

    fn to_gpu(self) -> [f32; 4] {
        [
            self.direction[0],
            self.direction[1],
            self.steepness,
            self.wavelength,
        ]
    }
}

pub const DEFAULT_WAVE_LAYERS: [WaveLayer; 3] = [
    WaveLayer::new(1.0, 0.0, 0.25, 60.0),
    WaveLayer::new(0.0, 1.0, 0.25, 31.0),
    WaveLayer::new(1.0, 1.0, 0.25, 18.0),
];

/// Displacement and surface frame at one grid point.
#[derive(Debug, Clone, Copy)]
pub struct WaveSample {
    pub displacement: Vec3,
    pub tangent: Vec3,
    pub binormal: Vec3,
}

impl WaveSample {
    pub fn normal(&self) -> Vec3 {
        self.binormal.cross(self.tangent).normalize()
    }
}

/// GPU layout of the wave set, bound at group 2 of the patched water shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniform {
    pub layers: [[f32; 4]; MAX_WAVE_LAYERS],
    pub count: u32,
    pub _pad: [u32; 3],
}

/// Sum of Gerstner waves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GerstnerWaves {
    pub layers: Vec<WaveLayer>,
}

impl Default for GerstnerWaves {
    fn default() -> Self {
        Self {
            layers: DEFAULT_WAVE_LAYERS.to_vec(),
        }
    }
}

impl GerstnerWaves {
    pub fn new(layers: Vec<WaveLayer>) -> Self {
        Self { layers }
    }

    /// Layers that actually reach the GPU.
    pub fn active_layers(&self) -> &[WaveLayer] {
        &self.layers[..self.layers.len().min(MAX_WAVE_LAYERS)]
    }

    /// Summed steepness of the active layers.
    pub fn total_steepness(&self) -> f32 {
        self.active_layers().iter().map(|layer| layer.steepness).sum()
    }

    /// Largest steepness layer `index` can take with the others unchanged.
    pub fn steepness_headroom(&self, index: usize) -> f32 {
        let others: f32 = self
            .active_layers()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, layer)| layer.steepness)
            .sum();
        (MAX_TOTAL_STEEPNESS - others).max(0.0)
    }

    /// Set one layer's steepness, clamped so the sum stays under [`MAX_TOTAL_STEEPNESS`].
    pub fn set_layer_steepness(&mut self, index: usize, steepness: f32) {
        let headroom = self.steepness_headroom(index);
        if let Some(layer) = self.layers.get_mut(index) {
            layer.steepness = steepness.clamp(0.0, headroom);
        }
    }

    /// Evaluate the wave sum at an undisplaced grid point.
    pub fn sample(&self, x: f32, z: f32, time: f32) -> WaveSample {
        let p = Vec2::new(x, z);
        let mut sample = WaveSample {
            displacement: Vec3::ZERO,
            tangent: Vec3::X,
            binormal: Vec3::Z,
        };

        for layer in self.active_layers() {
            let k = layer.wave_number();
            let c = layer.phase_speed();
            let d = Vec2::from_array(layer.direction).normalize_or_zero();
            let f = k * (d.dot(p) - c * time);
            let a = layer.steepness / k;
            let s = layer.steepness;
            let (sin_f, cos_f) = f.sin_cos();

            sample.tangent += Vec3::new(-d.x * d.x * (s * sin_f), d.x * (s * cos_f), -d.x * d.y * (s * sin_f));
            sample.binormal += Vec3::new(-d.x * d.y * (s * sin_f), d.y * (s * cos_f), -d.y * d.y * (s * sin_f));
            sample.displacement += Vec3::new(d.x * (a * cos_f), a * sin_f, d.y * (a * cos_f));
        }

        sample
    }

    /// Where a rest-plane point ends up after displacement.
    pub fn displaced(&self, base: Vec3, time: f32) -> Vec3 {
        base + self.sample(base.x, base.z, time).displacement
    }

    /// Rest-plane point whose displaced position lands on world `(x, z)`.
    ///
    /// Fixed-point iteration; it contracts as long as the summed steepness
    /// stays below 1, and [`MAX_TOTAL_STEEPNESS`] keeps it well inside that.
    pub fn rest_position(&self, x: f32, z: f32, time: f32) -> Vec2 {
        let target = Vec2::new(x, z);
        let mut grid = target;
        for _ in 0..SURFACE_ITERATIONS {
            let d = self.sample(grid.x, grid.y, time).displacement;
            grid = target - Vec2::new(d.x, d.z);
        }
        grid
    }

    /// Surface height at a world XZ position.
    pub fn surface_height(&self, x: f32, z: f32, time: f32) -> f32 {
        let grid = self.rest_position(x, z, time);
        self.sample(grid.x, grid.y, time).displacement.y
    }

    /// Upper bound on crest height.
    pub fn max_amplitude(&self) -> f32 {
        self.active_layers().iter().map(WaveLayer::amplitude).sum()
    }

    pub fn to_uniform(&self) -> WaveUniform {
        let mut layers = [[0.0; 4]; MAX_WAVE_LAYERS];
        for (slot, layer) in layers.iter_mut().zip(self.active_layers()) {
            *slot = layer.to_gpu();
        }
        WaveUniform {
            layers,
            count: self.active_layers().len() as u32,
            _pad: [0; 3],
        }
    }

    /// Patch that adds the wave declarations and displaces each vertex.
    pub fn shader_patch(&self) -> ShaderPatch {
        ShaderPatch::new()
            .insert(Hook::VertexDeclarations, GERSTNER_DECLARATIONS)
            .insert(Hook::VertexDisplacement, GERSTNER_DISPLACEMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_sea_has_no_displacement() {
        let waves = GerstnerWaves::new(vec![]);
        let sample = waves.sample(12.0, -4.0, 3.0);
        assert_eq!(sample.displacement, Vec3::ZERO);
        assert!((sample.normal() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn single_wave_crest_height_matches_amplitude() {
        let layer = WaveLayer::new(1.0, 0.0, 0.5, 20.0);
        let waves = GerstnerWaves::new(vec![layer]);
        let k = 2.0 * PI / 20.0;
        // sin(f) = 1 where k * x = PI / 2 at t = 0
        let x = (PI / 2.0) / k;
        let sample = waves.sample(x, 0.0, 0.0);
        assert!((sample.displacement.y - layer.amplitude()).abs() < 1e-4);
    }

    #[test]
    fn waves_travel_at_phase_speed() {
        let layer = WaveLayer::new(0.0, 1.0, 0.3, 40.0);
        let waves = GerstnerWaves::new(vec![layer]);
        let c = layer.phase_speed();
        let t = 1.7;
        let now = waves.sample(0.0, 5.0 + c * t, t).displacement;
        let before = waves.sample(0.0, 5.0, 0.0).displacement;
        assert!((now - before).length() < 1e-3);
    }

    #[test]
    fn normals_point_up() {
        let waves = GerstnerWaves::default();
        for i in 0..50 {
            let n = waves.sample(i as f32 * 7.3, i as f32 * -3.1, i as f32 * 0.2).normal();
            assert!(n.y > 0.0);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn surface_height_never_exceeds_bound() {
        let waves = GerstnerWaves::default();
        let bound = waves.max_amplitude() + 1e-3;
        for i in 0..100 {
            let h = waves.surface_height(i as f32 * 3.7, i as f32 * 1.3, i as f32 * 0.1);
            assert!(h.abs() <= bound, "height {} over bound {}", h, bound);
        }
    }

    #[test]
    fn surface_height_lands_on_target() {
        let waves = GerstnerWaves::default();
        let (x, z, t) = (14.0, -9.0, 2.5);
        let h = waves.surface_height(x, z, t);

        let grid = waves.rest_position(x, z, t);
        let landed = waves.displaced(Vec3::new(grid.x, 0.0, grid.y), t);
        assert!((landed.x - x).abs() < 0.25);
        assert!((landed.z - z).abs() < 0.25);
        assert!((landed.y - h).abs() < 1e-5);
    }

    #[test]
    fn uniform_packs_layers_in_order() {
        let waves = GerstnerWaves::default();
        let uniform = waves.to_uniform();
        assert_eq!(uniform.count, 3);
        assert_eq!(uniform.layers[0], [1.0, 0.0, 0.25, 60.0]);
        assert_eq!(uniform.layers[2], [1.0, 1.0, 0.25, 18.0]);
        assert_eq!(uniform.layers[3], [0.0; 4]);
        assert_eq!(std::mem::size_of::<WaveUniform>(), 80);
    }

    #[test]
    fn extra_layers_are_ignored() {
        let waves = GerstnerWaves::new(vec![WaveLayer::new(1.0, 0.0, 0.1, 10.0); 6]);
        assert_eq!(waves.active_layers().len(), MAX_WAVE_LAYERS);
        assert_eq!(waves.to_uniform().count, MAX_WAVE_LAYERS as u32);
    }

    #[test]
    fn layer_steepness_respects_total_limit() {
        let mut waves = GerstnerWaves::default();
        waves.set_layer_steepness(0, 3.0);
        assert!((waves.layers[0].steepness - (MAX_TOTAL_STEEPNESS - 0.5)).abs() < 1e-6);
        assert!(waves.total_steepness() <= MAX_TOTAL_STEEPNESS + 1e-6);

        waves.set_layer_steepness(1, -1.0);
        assert_eq!(waves.layers[1].steepness, 0.0);

        // Out-of-range index is ignored
        waves.set_layer_steepness(7, 0.5);
        assert_eq!(waves.layers.len(), 3);
    }

    #[test]
    fn rest_position_converges_at_steepness_limit() {
        let mut waves = GerstnerWaves::default();
        for i in 0..waves.layers.len() {
            waves.set_layer_steepness(i, 1.0);
        }
        assert!(waves.total_steepness() <= MAX_TOTAL_STEEPNESS + 1e-6);

        let mut worst: f32 = 0.0;
        for i in 0..60 {
            let (x, z, t) = (i as f32 * 5.3 - 150.0, i as f32 * -2.9 + 40.0, i as f32 * 0.37);
            let grid = waves.rest_position(x, z, t);
            let landed = waves.displaced(Vec3::new(grid.x, 0.0, grid.y), t);
            worst = worst.max((landed.x - x).abs()).max((landed.z - z).abs());
        }
        assert!(worst < 0.25, "worst xz miss {}", worst);
    }
}
