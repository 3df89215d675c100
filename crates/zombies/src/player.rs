//! Player view
//!
//! The player stands still; yaw and pitch are set by whatever reads input.

use nalgebra::{Rotation3, Vector3};

use scene_engine::foundation::math::{Mat4, Vec3};
use scene_engine::render::{Camera, Player};

/// First-person camera with a fixed eye position
#[derive(Debug, Clone)]
pub struct PlayerCamera {
    camera: Camera,
    yaw: f32,
    pitch: f32,
}

impl PlayerCamera {
    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 60.0;

    /// Eye at `eye`, looking down -Z
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            camera: Camera::perspective(eye, Self::FOV_DEGREES, aspect, 0.1, 200.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Eye position
    pub fn eye(&self) -> Vec3 {
        self.camera.position
    }

    /// Turn to `yaw` (around +Y) and `pitch` (up is positive), in radians
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-1.5, 1.5);
        let target = self.camera.position + self.forward();
        self.camera.look_at(target);
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch);
        rotation * -Vec3::z()
    }
}

impl Player for PlayerCamera {
    fn projection_matrix(&self) -> Mat4 {
        self.camera.view_projection_matrix()
    }
}
