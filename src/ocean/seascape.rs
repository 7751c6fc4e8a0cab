//! Sea height field used by the raymarched seascape.
//!
//! Mirrors `shaders/seascape.wgsl`: choppy octave noise summed into a height
//! field, intersected by bisection along a view ray. The shader owns the
//! per-pixel work; the CPU side uses it to keep the camera out of the water
//! and for tests.

use glam::{Mat3, Vec2, Vec3};

use crate::math::{next_octave, value_noise};

pub const NUM_STEPS: usize = 8;
pub const EPSILON: f32 = 1e-3;
pub const ITER_GEOMETRY: usize = 3;
pub const ITER_FRAGMENT: usize = 5;
pub const SEA_HEIGHT: f32 = 0.6;
pub const SEA_CHOPPY: f32 = 4.0;
pub const SEA_SPEED: f32 = 0.8;
pub const SEA_FREQ: f32 = 0.16;

/// Distance at which a ray that never dips below the surface gives up.
pub const FAR: f32 = 1000.0;

/// Minimum gap kept between the camera and the wave crests.
pub const CAMERA_CLEARANCE: f32 = 0.5;

/// Animation phase of the sea for a given clock time.
pub fn sea_time(time: f32) -> f32 {
    1.0 + time * SEA_SPEED
}

/// One octave of sharp-crested sea noise.
pub fn sea_octave(uv: Vec2, choppy: f32) -> f32 {
    let uv = uv + Vec2::splat(value_noise(uv));
    let wv = Vec2::ONE - Vec2::new(uv.x.sin().abs(), uv.y.sin().abs());
    let swv = Vec2::new(uv.x.cos().abs(), uv.y.cos().abs());
    let wv = wv + (swv - wv) * wv;
    (1.0 - (wv.x * wv.y).powf(0.65)).powf(choppy)
}

/// Signed vertical distance from `p` to the sea surface using `iterations`
/// octaves. Positive above the water.
pub fn height_field(p: Vec3, time: f32, iterations: usize) -> f32 {
    let phase = sea_time(time);
    let mut freq = SEA_FREQ;
    let mut amp = SEA_HEIGHT;
    let mut choppy = SEA_CHOPPY;
    let mut uv = Vec2::new(p.x * 0.75, p.z);

    let mut h = 0.0;
    for _ in 0..iterations {
        let mut d = sea_octave((uv + Vec2::splat(phase)) * freq, choppy);
        d += sea_octave((uv - Vec2::splat(phase)) * freq, choppy);
        h += d * amp;
        uv = next_octave(uv);
        freq *= 1.9;
        amp *= 0.22;
        choppy += (1.0 - choppy) * 0.2;
    }
    p.y - h
}

/// Coarse field used while marching.
pub fn map(p: Vec3, time: f32) -> f32 {
    height_field(p, time, ITER_GEOMETRY)
}

/// Fine field used for shading normals.
pub fn map_detailed(p: Vec3, time: f32) -> f32 {
    height_field(p, time, ITER_FRAGMENT)
}

/// Height of the detailed surface at a world XZ position.
pub fn surface_height(x: f32, z: f32, time: f32) -> f32 {
    -map_detailed(Vec3::new(x, 0.0, z), time)
}

/// Result of intersecting a ray with the height field.
#[derive(Debug, Clone, Copy)]
pub struct TraceHit {
    pub distance: f32,
    pub point: Vec3,
    /// False when the ray stays above the water out to [`FAR`]
    pub hit: bool,
}

/// Intersect a ray with the height field by bisection between the origin
/// and [`FAR`].
pub fn trace_height_field(origin: Vec3, dir: Vec3, time: f32) -> TraceHit {
    let mut tm = 0.0;
    let mut tx = FAR;

    let mut hx = map(origin + dir * tx, time);
    if hx > 0.0 {
        return TraceHit {
            distance: tx,
            point: origin + dir * tx,
            hit: false,
        };
    }

    let mut hm = map(origin, time);
    let mut tmid = 0.0;
    let mut point = origin;
    for _ in 0..NUM_STEPS {
        tmid = tm + (tx - tm) * (hm / (hm - hx));
        point = origin + dir * tmid;
        let hmid = map(point, time);
        if hmid < 0.0 {
            tx = tmid;
            hx = hmid;
        } else {
            tm = tmid;
            hm = hmid;
        }
        if hmid.abs() < EPSILON {
            break;
        }
    }

    TraceHit {
        distance: tmid,
        point,
        hit: true,
    }
}

/// Surface normal by forward differences of the detailed field.
pub fn normal(p: Vec3, eps: f32, time: f32) -> Vec3 {
    let center = map_detailed(p, time);
    let dx = map_detailed(Vec3::new(p.x + eps, p.y, p.z), time) - center;
    let dz = map_detailed(Vec3::new(p.x, p.y, p.z + eps), time) - center;
    Vec3::new(dx, eps, dz).normalize()
}

/// Rotation from (roll, pitch, yaw) angles. Columns are uploaded as-is to
/// the seascape uniform.
pub fn from_euler(ang: Vec3) -> Mat3 {
    let (a1s, a1c) = ang.x.sin_cos();
    let (a2s, a2c) = ang.y.sin_cos();
    let (a3s, a3c) = ang.z.sin_cos();
    Mat3::from_cols(
        Vec3::new(a1c * a3c - a1s * a2s * a3s, a1c * a2s * a3s + a3c * a1s, -a2c * a3s),
        Vec3::new(-a2c * a1s, a1c * a2c, a2s),
        Vec3::new(a3c * a1s * a2s + a1c * a3s, a1s * a3s - a1c * a3c * a2s, a2c * a3c),
    )
}

/// Camera that glides over the sea along +Z, swaying with time.
#[derive(Debug, Clone, Copy)]
pub struct SeascapeCamera {
    pub origin: Vec3,
    pub orientation: Mat3,
}

impl SeascapeCamera {
    /// Camera pose at `path_time` (the slowed-down camera clock), lifted
    /// above the crests at `sea_clock`.
    pub fn at(path_time: f32, sea_clock: f32, eye_height: f32, forward_speed: f32) -> Self {
        let ang = Vec3::new(
            (path_time * 3.0).sin() * 0.1,
            path_time.sin() * 0.2 + 0.3,
            path_time,
        );
        let mut origin = Vec3::new(0.0, eye_height, path_time * forward_speed);
        let floor = surface_height(origin.x, origin.z, sea_clock) + CAMERA_CLEARANCE;
        origin.y = origin.y.max(floor);

        Self {
            origin,
            orientation: from_euler(ang),
        }
    }

    /// World-space ray through a pixel given in [-1, 1] coordinates with
    /// the aspect ratio already applied to x.
    pub fn ray(&self, uv: Vec2) -> Vec3 {
        let mut dir = Vec3::new(uv.x, uv.y, -2.0).normalize();
        dir.z += uv.length() * 0.14;
        // Shader multiplies `dir * m`
        self.orientation.transpose() * dir.normalize()
    }
}
