//! # Camera and player collaborator
//!
//! The frame loop only needs two things from whoever controls the view: an
//! optional per-frame hook and the combined projection matrix. How the player
//! moves is up to the implementor of [`Player`].

use crate::foundation::math::{constants, Mat4, Mat4Ext, Vec3};

/// Player/camera collaborator driven by the frame loop
pub trait Player {
    /// Per-frame hook, called after the clear and before objects tick
    fn tick(&mut self, _delta_time: f32) {}

    /// Projection (including view) used for every draw this frame
    fn projection_matrix(&self) -> Mat4;
}

/// Perspective camera with a right-handed, Y-up view
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at
    pub target: Vec3,

    /// Up vector (typically +Y)
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Width / height
    pub aspect: f32,

    /// Near clip distance
    pub near: f32,

    /// Far clip distance
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking down -Z
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: position - Vec3::z(),
            up: Vec3::y(),
            fov: fov_degrees * constants::DEG_TO_RAD,
            aspect,
            near,
            far,
        }
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// View to clip transform
    pub fn projection_only(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `projection * view`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_only() * self.view_matrix()
    }
}

impl Player for Camera {
    fn projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix()
    }
}
