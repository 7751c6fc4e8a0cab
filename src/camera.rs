use glam::{Mat4, Vec3};
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::CameraSettings;

/// Radians per second for Q/E and arrow-key turning
pub const CAMERA_ROTATION_SPEED: f32 = 1.2;

const MAX_PITCH: f32 = 89.0_f32 * std::f32::consts::PI / 180.0;

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

#[derive(Default, Clone, Copy)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
}

impl MovementState {
    const fn to_direction(&self, positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32, f32) {
        (
            self.to_direction(self.forward, self.backward),
            self.to_direction(self.right, self.left),
            self.to_direction(self.up, self.down),
        )
    }

    const fn rotation_velocity(&self) -> (f32, f32) {
        (
            self.to_direction(self.rotate_left, self.rotate_right),
            self.to_direction(self.pitch_up, self.pitch_down),
        )
    }
}

/// Perspective fly camera
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement: MovementState,
    pub speed: f32,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(settings.position),
            yaw: 0.0,
            pitch: 0.0,
            movement: MovementState::default(),
            speed: settings.speed,
            fov_y: settings.fov_y_degrees.to_radians(),
            aspect: aspect.max(f32::EPSILON),
            near: settings.near,
            far: settings.far,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// Turn to face `target`
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.yaw = dir.x.atan2(dir.z);
        self.pitch = dir.y.asin().clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Match the projection to a new viewport; zero-sized viewports are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Apply held keys for `delta` seconds
    pub fn update(&mut self, delta: f32) {
        let (fwd, right_dir, up_dir) = self.movement.velocity();
        let step = self.speed * delta;

        let displacement = self.forward() * fwd * step
            + self.right() * right_dir * step
            + Vec3::Y * up_dir * step;
        self.position += displacement;

        let (yaw_dir, pitch_dir) = self.movement.rotation_velocity();
        self.yaw += yaw_dir * CAMERA_ROTATION_SPEED * delta;
        self.pitch = (self.pitch + pitch_dir * CAMERA_ROTATION_SPEED * delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Keep the eye at or above `floor`
    pub fn clamp_above(&mut self, floor: f32) {
        self.position.y = self.position.y.max(floor);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        let view_proj = self.projection_matrix() * self.view_matrix();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            position: self.position.to_array(),
            _pad: 0.0,
        }
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            self.set_key(keycode, is_pressed);
        }
    }

    fn set_key(&mut self, keycode: KeyCode, is_pressed: bool) {
        match keycode {
            KeyCode::KeyW => self.movement.forward = is_pressed,
            KeyCode::KeyS => self.movement.backward = is_pressed,
            KeyCode::KeyA => self.movement.left = is_pressed,
            KeyCode::KeyD => self.movement.right = is_pressed,
            KeyCode::Space => self.movement.up = is_pressed,
            KeyCode::ShiftLeft => self.movement.down = is_pressed,
            KeyCode::KeyQ => self.movement.rotate_left = is_pressed,
            KeyCode::KeyE => self.movement.rotate_right = is_pressed,
            KeyCode::ArrowUp => self.movement.pitch_up = is_pressed,
            KeyCode::ArrowDown => self.movement.pitch_down = is_pressed,
            _ => {}
        }
    }
}
