use glam::{Mat4, Vec3};
use sdl2::keyboard::Keycode;

use crate::input::InputState;

/// A first-person camera. Yaw and pitch are in degrees; yaw 0 looks down -Z.
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    /// Units per second.
    pub speed: f32,
    /// Degrees per pixel of mouse motion.
    pub sensitivity: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov: 70.0,
            speed: 2.5,
            sensitivity: 0.1,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let pitch_rad = self.pitch.to_radians();
        let yaw_rad = self.yaw.to_radians();

        Vec3::new(
            yaw_rad.sin() * pitch_rad.cos(),
            pitch_rad.sin(),
            -yaw_rad.cos() * pitch_rad.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Turns the camera by a mouse delta in pixels. Pitch stops short of straight up or down.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx * self.sensitivity).rem_euclid(360.0);
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-89.0, 89.0);
    }

    /// Applies one frame of mouse look and WASD / Space / LShift movement.
    pub fn update(&mut self, input: &InputState, delta_time: f32) {
        self.look(input.mouse.delta.x, input.mouse.delta.y);

        let flat_forward = Vec3::new(self.forward().x, 0.0, self.forward().z).normalize_or_zero();
        let right = self.right();

        let mut direction = Vec3::ZERO;
        if input.is_down(Keycode::W) {
            direction += flat_forward;
        }
        if input.is_down(Keycode::S) {
            direction -= flat_forward;
        }
        if input.is_down(Keycode::D) {
            direction += right;
        }
        if input.is_down(Keycode::A) {
            direction -= right;
        }
        if input.is_down(Keycode::Space) {
            direction += Vec3::Y;
        }
        if input.is_down(Keycode::LShift) {
            direction -= Vec3::Y;
        }

        self.position += direction.normalize_or_zero() * self.speed * delta_time;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect_ratio, 0.1, 100.0)
    }
}
