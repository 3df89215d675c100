//! Asset descriptors
//!
//! Mapping from a logical asset name to where its data lives. Descriptors are
//! handed to the registry once at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the 1-based frame index in animated mesh paths
pub const FRAME_PLACEHOLDER: &str = "{frame}";

/// Single-frame mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    /// Logical name objects refer to
    pub name: String,
    /// Path relative to the asset directory
    pub path: PathBuf,
}

impl MeshDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Multi-frame mesh, one file per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatedMeshDescriptor {
    /// Logical name objects refer to
    pub name: String,
    /// Path template containing `{frame}`
    pub path_template: String,
    /// Number of frames, indexed from 1
    pub frame_count: u32,
}

impl AnimatedMeshDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, path_template: impl Into<String>, frame_count: u32) -> Self {
        Self {
            name: name.into(),
            path_template: path_template.into(),
            frame_count,
        }
    }

    /// Path of one frame
    pub fn frame_path(&self, frame: u32) -> PathBuf {
        PathBuf::from(self.path_template.replace(FRAME_PLACEHOLDER, &frame.to_string()))
    }
}

/// Texture image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Logical name objects refer to
    pub name: String,
    /// Path relative to the asset directory
    pub path: PathBuf,
}

impl TextureDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
