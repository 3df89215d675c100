//! Backend implementations for the render module
//!
//! Only the headless software backend lives here. Hosts with a real graphics
//! context implement [`RenderBackend`](crate::render::RenderBackend) themselves.

/// Software backend with a command log
pub mod headless;

pub use headless::{Command, HeadlessBackend, TextureInfo};
