//! # Rendering System
//!
//! Everything between the scene and the graphics context:
//! - **Backend**: the immediate-mode [`RenderBackend`] trait and its handles
//! - **Draw pass**: per-object buffer binding, uniforms and the indexed draw
//! - **Lighting**: the day/night level behind the clear color and light direction
//! - **Camera**: the [`Player`] collaborator and a perspective camera
//! - **Screenshot**: export of the read-back frame buffer

pub mod backend;
pub mod backends;
pub mod camera;
pub mod draw_pass;
pub mod lighting;
pub mod screenshot;

pub use backend::{
    AttributeSlot, BackendResult, BufferHandle, BufferKind, DepthTest, FilterMode, FrameCapture,
    RenderBackend, RenderError, ShaderSources, TextureHandle, TextureSampling, Uniform, WrapMode,
};
pub use backends::HeadlessBackend;
pub use camera::{Camera, Player};
pub use draw_pass::{DrawOutcome, DrawPass, SkipReason};
pub use lighting::{LightingLevel, LightingMode};
pub use screenshot::{PngFileSink, ScreenshotError, ScreenshotSink};
