//! Zombie state machine
//!
//! A zombie walks in place until something on the projectile layer reaches
//! it. The first hit knocks it down: the HUD shows a notice, the kill is
//! tallied and the body starts to fall. Falling turns the yaw by
//! `fall_rate / delta_time` every frame until it passes a quarter turn, after
//! which the zombie is dead and never changes again. Dead zombies stay in the
//! scene.

use std::any::Any;
use std::f32::consts::FRAC_PI_2;

use scene_engine::foundation::math::Transform;
use scene_engine::physics::{BoundingSphere, HitInfo, HitLayers, Hittable};
use scene_engine::scene::{FrameContext, ObjectId, SceneObject};

use crate::config::GameplayConfig;

/// Outcome recorded on the scoreboard for every knocked-down zombie
pub const KILL_OUTCOME: &str = "zombie_killed";

/// Seconds the knock-down notice stays up
pub const KILL_MESSAGE_SECONDS: f32 = 2.0;

/// Lifecycle of a zombie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZombieState {
    /// Walking; reacts to projectiles
    Alive,
    /// Knocked down and falling over
    Hit,
    /// On the ground; terminal
    Dead,
}

/// Animated, hittable zombie
#[derive(Debug, Clone)]
pub struct Zombie {
    transform: Transform,
    state: ZombieState,
    mesh: String,
    texture: Option<String>,
    frame: u32,
    frame_count: u32,
    frame_elapsed: f32,
    frame_seconds: f32,
    fall_rate: f32,
    radius: f32,
}

impl Zombie {
    /// Create a walking zombie using the `mesh` walk cycle of `frame_count` frames
    pub fn new(mesh: impl Into<String>, frame_count: u32, transform: Transform, gameplay: &GameplayConfig) -> Self {
        Self {
            transform,
            state: ZombieState::Alive,
            mesh: mesh.into(),
            texture: None,
            frame: 1,
            frame_count: frame_count.max(1),
            frame_elapsed: 0.0,
            frame_seconds: gameplay.walk_frame_seconds,
            fall_rate: gameplay.fall_rate,
            radius: gameplay.zombie_radius,
        }
    }

    /// Builder pattern: set texture
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Current state
    pub fn state(&self) -> ZombieState {
        self.state
    }

    /// Current 1-based walk frame
    pub fn frame(&self) -> u32 {
        self.frame
    }

    fn walk(&mut self, delta_time: f32) {
        if self.frame_count < 2 || delta_time <= 0.0 {
            return;
        }
        self.frame_elapsed += delta_time;
        while self.frame_elapsed >= self.frame_seconds {
            self.frame_elapsed -= self.frame_seconds;
            self.frame = self.frame % self.frame_count + 1;
        }
    }

    fn fall(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }
        let yaw = &mut self.transform.rotation.yaw;
        *yaw += self.fall_rate / delta_time;
        if *yaw > FRAC_PI_2 {
            log::debug!("Zombie down at yaw {:.3}", *yaw);
            self.state = ZombieState::Dead;
        }
    }
}

impl SceneObject for Zombie {
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

    fn tick(&mut self, _id: ObjectId, ctx: &mut FrameContext<'_>) {
        match self.state {
            ZombieState::Alive => self.walk(ctx.delta_time),
            ZombieState::Hit => self.fall(ctx.delta_time),
            ZombieState::Dead => {}
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

impl Hittable for Zombie {
    fn hit_volume(&self) -> BoundingSphere {
        BoundingSphere::new(self.transform.position, self.radius)
    }

    fn hit_layer(&self) -> HitLayers {
        HitLayers::ENEMY
    }

    fn hit_mask(&self) -> HitLayers {
        HitLayers::PROJECTILE
    }

    fn on_hit(&mut self, me: ObjectId, instigator: &HitInfo, ctx: &mut FrameContext<'_>) {
        if self.state != ZombieState::Alive {
            return;
        }
        log::debug!("Zombie {me:?} hit by {:?}", instigator.id);
        self.state = ZombieState::Hit;
        ctx.show_message("Zombie down!", "Nice throw.", KILL_MESSAGE_SECONDS);
        ctx.record_outcome(KILL_OUTCOME);
    }
}
