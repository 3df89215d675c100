//! Math utilities and types
//!
//! Provides the vector/matrix aliases used across the engine and the flat
//! per-object [`Transform`] (position, yaw/pitch/roll, non-uniform scale and an
//! anchor offset).

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Euler rotation in radians.
///
/// Yaw turns around Y, pitch around X, roll around Z. Composition order is
/// yaw * pitch * roll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// Rotation around the Y axis
    pub yaw: f32,
    /// Rotation around the X axis
    pub pitch: f32,
    /// Rotation around the Z axis
    pub roll: f32,
}

impl EulerAngles {
    /// Create a rotation from yaw, pitch and roll
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Rotation as a homogeneous matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.yaw) * Mat4::rotation_x(self.pitch) * Mat4::rotation_z(self.roll)
    }
}

/// Per-object placement.
///
/// The anchor offset re-centres geometry that was authored off-origin. It is
/// folded into the translation, so the model matrix is
/// `T(position + anchor) * R * S`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Yaw / pitch / roll
    pub rotation: EulerAngles,

    /// Scale factors
    pub scale: Vec3,

    /// Offset added to the translation before rotation and scale are applied
    pub anchor: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: EulerAngles::default(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            anchor: Vec3::zeros(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: set rotation
    pub fn with_rotation(mut self, rotation: EulerAngles) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: set non-uniform scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: set anchor offset
    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self
    }

    /// Model matrix: translation, then rotation, then scale
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&(self.position + self.anchor))
            * self.rotation.to_matrix()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Normal matrix for lighting.
    ///
    /// Inverse-transpose of the model matrix, re-scaled by the scale vector.
    /// A degenerate (non-invertible) model falls back to the identity.
    pub fn normal_matrix(&self) -> Mat4 {
        let inverse_transpose = self
            .to_matrix()
            .try_inverse()
            .map_or_else(Mat4::identity, |inverse| inverse.transpose());
        inverse_transpose * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2, a quarter turn
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a right-handed perspective projection matrix (clip depth -1..1)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}
