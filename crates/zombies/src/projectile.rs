//! Thrown projectile

use std::any::Any;

use scene_engine::foundation::math::{Transform, Vec3};
use scene_engine::physics::{BoundingSphere, HitInfo, HitLayers, Hittable};
use scene_engine::scene::{FrameContext, ObjectId, SceneObject};

/// Object flying in a straight line until it hits an enemy or expires
#[derive(Debug, Clone)]
pub struct Projectile {
    transform: Transform,
    mesh: String,
    velocity: Vec3,
    lifetime: f32,
    radius: f32,
    spent: bool,
}

impl Projectile {
    /// Launch `mesh` from `origin` with `velocity`
    pub fn new(mesh: impl Into<String>, origin: Vec3, velocity: Vec3, lifetime: f32, radius: f32) -> Self {
        Self {
            transform: Transform::from_position(origin).with_uniform_scale(0.25),
            mesh: mesh.into(),
            velocity,
            lifetime,
            radius,
            spent: false,
        }
    }

    /// Seconds left before it expires
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Whether it already hit something this frame
    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

impl SceneObject for Projectile {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn mesh_name(&self) -> &str {
        &self.mesh
    }

    fn tick(&mut self, id: ObjectId, ctx: &mut FrameContext<'_>) {
        let delta_time = ctx.delta_time;
        self.transform.position += self.velocity * delta_time;
        self.transform.rotation.pitch += 4.0 * delta_time;

        self.lifetime -= delta_time;
        if self.lifetime <= 0.0 {
            log::trace!("Projectile {id:?} expired");
            ctx.despawn(id);
        }
    }

    fn as_hittable(&self) -> Option<&dyn Hittable> {
        Some(self)
    }

    fn as_hittable_mut(&mut self) -> Option<&mut dyn Hittable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Hittable for Projectile {
    fn hit_volume(&self) -> BoundingSphere {
        BoundingSphere::new(self.transform.position, self.radius)
    }

    // A spent projectile leaves every layer so nothing else reacts to it
    // before its removal is applied.
    fn hit_layer(&self) -> HitLayers {
        if self.spent {
            HitLayers::empty()
        } else {
            HitLayers::PROJECTILE
        }
    }

    fn hit_mask(&self) -> HitLayers {
        if self.spent {
            HitLayers::empty()
        } else {
            HitLayers::ENEMY
        }
    }

    fn on_hit(&mut self, me: ObjectId, instigator: &HitInfo, ctx: &mut FrameContext<'_>) {
        if self.spent || !instigator.layer.intersects(HitLayers::ENEMY) {
            return;
        }
        self.spent = true;
        ctx.despawn(me);
    }
}
