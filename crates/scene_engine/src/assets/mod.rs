//! Asset management system
//!
//! Meshes, animated meshes and textures are registered by logical name and
//! loaded off the frame thread. See [`registry`] for the loading flow.

pub mod descriptors;
pub mod geometry;
pub mod image_loader;
pub mod mesh_loader;
pub mod registry;
pub mod texture;

pub use descriptors::{AnimatedMeshDescriptor, MeshDescriptor, TextureDescriptor};
pub use geometry::{GeometryBuilder, GpuBufferSet};
pub use image_loader::{FileImageSource, ImageData, ImageSource, MemoryImageSource};
pub use mesh_loader::{MemoryMeshSource, MeshData, MeshSource, ObjMeshSource};
pub use registry::{AssetRegistry, AssetStats, LoadState};
pub use texture::TexturePlan;

use thiserror::Error;

use crate::render::backend::RenderError;

/// Asset management errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Backend rejected an upload
    #[error("Upload failed: {0}")]
    Upload(#[from] RenderError),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
