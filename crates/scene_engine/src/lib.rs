//! # Scene Engine
//!
//! Runtime core of a real-time 3D scene.
//!
//! ## Features
//!
//! - **Asset Streaming**: meshes, animated meshes and textures load off the
//!   frame thread; unready assets are skipped, never waited on
//! - **Scene Registry**: flat set of placed objects behind generational ids
//! - **Interactions**: pairwise proximity tests between hittable objects
//! - **Frame Loop**: one ordered per-frame driver for time, lighting, ticks,
//!   interactions and drawing
//! - **Backend Agnostic**: draws through the [`render::RenderBackend`] trait;
//!   a headless software backend is included
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut backend = HeadlessBackend::new(config.renderer.width, config.renderer.height)?;
//!     let shaders = ShaderSources::new("/* vertex */", "/* fragment */");
//!     let mut engine = Engine::new(config, &mut backend, &shaders)?;
//!
//!     engine.assets_mut().load_all(&[MeshDescriptor::new("crate", "crate.obj")], &[]);
//!     engine.scene_mut().add(Box::new(Prop::new("crate", Transform::identity())));
//!
//!     let mut camera = Camera::perspective(Vec3::new(0.0, 1.0, 5.0), 60.0, 4.0 / 3.0, 0.1, 100.0);
//!     let mut hud = LogHud::new();
//!     let mut scheduler = FixedFrameScheduler::new(60);
//!     let mut timestamp = 0.0;
//!     while scheduler.should_continue() {
//!         engine.frame(timestamp, &mut backend, &mut camera, &mut hud, &mut scheduler)?;
//!         timestamp += 1000.0 / 60.0;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;
pub mod ui;

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{
    Engine, EngineError, FixedFrameScheduler, FrameReport, FrameScheduler, FrameState,
};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{
            AnimatedMeshDescriptor, AssetRegistry, MeshData, MeshDescriptor, TextureDescriptor,
        },
        core::{ApplicationConfig, Config},
        foundation::math::{EulerAngles, Mat4, Transform, Vec3},
        physics::{BoundingSphere, HitInfo, HitLayers, Hittable},
        render::{Camera, HeadlessBackend, Player, RenderBackend, ShaderSources},
        scene::{AnimatedProp, FrameContext, ObjectId, Prop, SceneObject},
        ui::{Hud, LogHud},
        Engine, EngineError, FixedFrameScheduler, FrameScheduler,
    };
}
