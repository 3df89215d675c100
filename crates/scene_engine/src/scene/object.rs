//! Scene objects
//!
//! A scene object is a placed instance of a mesh asset with an optional
//! texture and an optional per-frame hook. Objects that take part in
//! proximity tests expose that through [`SceneObject::as_hittable`] rather
//! than being recognised by type.

use std::any::Any;

use crate::foundation::collections::new_key_type;
use crate::foundation::math::Transform;
use crate::physics::Hittable;
use crate::scene::context::FrameContext;

new_key_type! {
    /// Generational handle to a live scene object
    pub struct ObjectId;
}

/// A placed object the frame loop ticks, tests and draws
pub trait SceneObject: Any {
    /// Placement
    fn transform(&self) -> &Transform;

    /// Mutable placement
    fn transform_mut(&mut self) -> &mut Transform;

    /// Logical name of the mesh asset to draw
    fn mesh_name(&self) -> &str;

    /// Logical name of the texture asset, if any
    fn texture_name(&self) -> Option<&str> {
        None
    }

    /// 1-based animation frame for animated meshes, `None` for static ones
    fn animation_frame(&self) -> Option<u32> {
        None
    }

    /// Per-frame hook, run before interaction tests and drawing
    fn tick(&mut self, _id: ObjectId, _ctx: &mut FrameContext<'_>) {}

    /// Proximity-test capability
    fn as_hittable(&self) -> Option<&dyn Hittable> {
        None
    }

    /// Mutable proximity-test capability
    fn as_hittable_mut(&mut self) -> Option<&mut dyn Hittable> {
        None
    }

    /// Concrete object, for game code that needs its own type back
    fn as_any(&self) -> &dyn Any;

    /// Mutable concrete object
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Per-frame hook of a [`Prop`]
pub type PropHook = Box<dyn FnMut(ObjectId, &mut Transform, &mut FrameContext<'_>)>;

/// Static mesh instance with an optional update closure
pub struct Prop {
    transform: Transform,
    mesh: String,
    texture: Option<String>,
    hook: Option<PropHook>,
}

impl Prop {
    /// Place `mesh` with `transform`
    pub fn new(mesh: impl Into<String>, transform: Transform) -> Self {
        Self {
            transform,
            mesh: mesh.into(),
            texture: None,
            hook: None,
        }
    }

    /// Builder pattern: set texture
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Builder pattern: set per-frame hook
    pub fn with_hook(
        mut self,
        hook: impl FnMut(ObjectId, &mut Transform, &mut FrameContext<'_>) + 'static,
    ) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl SceneObject for Prop {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn mesh_name(&self) -> &str {
        &self.mesh
    }

    fn texture_name(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    fn tick(&mut self, id: ObjectId, ctx: &mut FrameContext<'_>) {
        if let Some(hook) = self.hook.as_mut() {
            hook(id, &mut self.transform, ctx);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Animated mesh instance; the frame is advanced by whoever owns it
pub struct AnimatedProp {
    transform: Transform,
    mesh: String,
    texture: Option<String>,
    frame: u32,
}

impl AnimatedProp {
    /// Place animated `mesh` at frame 1
    pub fn new(mesh: impl Into<String>, transform: Transform) -> Self {
        Self {
            transform,
            mesh: mesh.into(),
            texture: None,
            frame: 1,
        }
    }

    /// Builder pattern: set texture
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Current 1-based frame
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Select the 1-based frame to draw
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }
}

impl SceneObject for AnimatedProp {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn mesh_name(&self) -> &str {
        &self.mesh
    }

    fn texture_name(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    fn animation_frame(&self) -> Option<u32> {
        Some(self.frame)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
