//! Value noise shared by the shaders and their CPU mirrors.
//!
//! These functions follow `shaders/math.wgsl` operation for operation.
//! GPU `sin` precision differs from the CPU, so results agree to within
//! a small tolerance rather than bit for bit.

use glam::{Mat2, Vec2};

/// Rotation-and-scale applied between noise octaves (`mat2(1.6, 1.2, -1.2, 1.6)`).
pub const OCTAVE_ROTATION: Mat2 = Mat2::from_cols_array(&[1.6, 1.2, -1.2, 1.6]);

/// Advance a sample point to the next octave. The shaders multiply the row
/// vector (`p * m`), which is the transpose applied to a column vector.
pub fn next_octave(p: Vec2) -> Vec2 {
    OCTAVE_ROTATION.transpose() * p
}

/// Pseudo-random value in [0, 1) for a lattice point.
pub fn hash(p: Vec2) -> f32 {
    let h = p.dot(Vec2::new(127.1, 311.7)).sin() * 43758.545;
    h - h.floor()
}

/// Smoothly interpolated lattice noise in [-1, 1].
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    let bottom = a + (b - a) * u.x;
    let top = c + (d - c) * u.x;
    -1.0 + 2.0 * (bottom + (top - bottom) * u.y)
}

/// Fractal Brownian motion: `octaves` layers of value noise, each at double
/// frequency and half amplitude, rotated by [`OCTAVE_ROTATION`] (which
/// scales by exactly 2).
pub fn fbm(mut p: Vec2, octaves: u32) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..octaves {
        value += amplitude * value_noise(p);
        p = next_octave(p);
        amplitude *= 0.5;
    }
    value
}
