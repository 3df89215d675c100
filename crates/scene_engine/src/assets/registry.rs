//! Asset registry
//!
//! Holds every mesh, animated mesh and texture by logical name.
//!
//! ```text
//! load_all ──► one loader thread per mesh / frame / texture
//!                 │  (MeshSource / ImageSource)
//!                 ▼
//!             mpsc channel
//!                 │
//! poll (frame thread) ──► GeometryBuilder / texture upload ──► ready
//! ```
//!
//! There is no "loading done" signal. Consumers check for a buffer set before
//! every use and treat a missing one as "not yet". A failed asset stays
//! unready forever and never affects its siblings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::assets::descriptors::{AnimatedMeshDescriptor, MeshDescriptor, TextureDescriptor};
use crate::assets::geometry::{GeometryBuilder, GpuBufferSet};
use crate::assets::texture;
use crate::assets::{
    AssetError, FileImageSource, ImageData, ImageSource, MeshData, MeshSource, ObjMeshSource,
};
use crate::core::AssetConfig;
use crate::render::backend::{RenderBackend, TextureHandle};

/// Readiness of one asset or animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Loader still running
    Pending,
    /// Buffers or texture contents are on the GPU
    Ready,
    /// Load or upload failed; never retried
    Failed,
}

/// CPU metadata and GPU buffers of a loaded mesh or frame
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    /// CPU-side arrays
    pub metadata: MeshData,
    /// GPU buffers built from `metadata`
    pub buffers: GpuBufferSet,
}

/// Single-frame mesh asset
#[derive(Debug)]
pub struct MeshAsset {
    /// Logical name
    pub name: String,
    /// Resolved source path
    pub path: PathBuf,
    state: LoadState,
    loaded: Option<LoadedMesh>,
}

impl MeshAsset {
    /// Readiness
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Metadata and buffers, once ready
    pub fn loaded(&self) -> Option<&LoadedMesh> {
        self.loaded.as_ref()
    }
}

/// Multi-frame mesh asset
#[derive(Debug)]
pub struct AnimatedMeshAsset {
    /// Logical name
    pub name: String,
    /// Descriptor the asset was created from
    pub descriptor: AnimatedMeshDescriptor,
    states: Vec<LoadState>,
    frames: Vec<Option<LoadedMesh>>,
}

impl AnimatedMeshAsset {
    /// Declared frame count
    pub fn frame_count(&self) -> u32 {
        self.descriptor.frame_count
    }

    /// A frame by 1-based index, `None` if out of range or not loaded yet
    pub fn frame(&self, frame: u32) -> Option<&LoadedMesh> {
        let slot = frame_slot(frame, self.frame_count())?;
        self.frames[slot].as_ref()
    }

    /// Readiness of a frame by 1-based index
    pub fn frame_state(&self, frame: u32) -> Option<LoadState> {
        frame_slot(frame, self.frame_count()).map(|slot| self.states[slot])
    }
}

fn frame_slot(frame: u32, frame_count: u32) -> Option<usize> {
    (1..=frame_count).contains(&frame).then(|| (frame - 1) as usize)
}

/// Texture asset, backed by a placeholder until its image is decoded
#[derive(Debug)]
pub struct TextureAsset {
    /// Logical name
    pub name: String,
    /// Resolved source path
    pub path: PathBuf,
    /// GPU texture, valid from registration onward
    pub handle: TextureHandle,
    state: LoadState,
    size: Option<(u32, u32)>,
}

impl TextureAsset {
    /// Readiness of the decoded image (the handle itself is always usable)
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Image size once decoded
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }
}

/// Counts of assets by readiness, frames counted individually
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetStats {
    /// Ready meshes, frames and textures
    pub loaded: usize,
    /// Still loading
    pub pending: usize,
    /// Failed permanently
    pub failed: usize,
}

enum LoadMessage {
    Mesh {
        name: String,
        result: Result<MeshData, AssetError>,
    },
    AnimatedFrame {
        name: String,
        frame: u32,
        result: Result<MeshData, AssetError>,
    },
    Texture {
        name: String,
        result: Result<ImageData, AssetError>,
    },
}

/// Registry of every asset the scene can refer to by name
pub struct AssetRegistry {
    meshes: HashMap<String, MeshAsset>,
    animated: HashMap<String, AnimatedMeshAsset>,
    textures: HashMap<String, TextureAsset>,
    mesh_source: Arc<dyn MeshSource>,
    image_source: Arc<dyn ImageSource>,
    assets_dir: PathBuf,
    placeholder_color: [u8; 4],
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
}

impl AssetRegistry {
    /// Registry reading OBJ meshes and image files from disk
    pub fn new(config: &AssetConfig) -> Self {
        Self::with_sources(config, Arc::new(ObjMeshSource), Arc::new(FileImageSource))
    }

    /// Registry with custom mesh and image sources
    pub fn with_sources(
        config: &AssetConfig,
        mesh_source: Arc<dyn MeshSource>,
        image_source: Arc<dyn ImageSource>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            meshes: HashMap::new(),
            animated: HashMap::new(),
            textures: HashMap::new(),
            mesh_source,
            image_source,
            assets_dir: PathBuf::from(&config.assets_dir),
            placeholder_color: config.placeholder_color,
            sender,
            receiver,
        }
    }

    /// Start loading every static and animated mesh.
    ///
    /// Returns immediately; results are picked up by [`poll`](Self::poll).
    /// Names already registered are skipped.
    pub fn load_all(&mut self, meshes: &[MeshDescriptor], animated: &[AnimatedMeshDescriptor]) {
        for descriptor in meshes {
            self.load_mesh(descriptor);
        }
        for descriptor in animated {
            self.load_animated(descriptor);
        }
        log::info!(
            "Loading {} meshes and {} animated meshes",
            meshes.len(),
            animated.len()
        );
    }

    fn load_mesh(&mut self, descriptor: &MeshDescriptor) {
        if self.meshes.contains_key(&descriptor.name) {
            log::warn!("Mesh '{}' is already registered", descriptor.name);
            return;
        }

        let path = self.assets_dir.join(&descriptor.path);
        let mut asset = MeshAsset {
            name: descriptor.name.clone(),
            path: path.clone(),
            state: LoadState::Pending,
            loaded: None,
        };

        let source = Arc::clone(&self.mesh_source);
        let name = descriptor.name.clone();
        let spawned = self.spawn_loader(&descriptor.name, move || LoadMessage::Mesh {
            result: source.load_mesh(&path),
            name,
        });
        if !spawned {
            asset.state = LoadState::Failed;
        }
        self.meshes.insert(descriptor.name.clone(), asset);
    }

    fn load_animated(&mut self, descriptor: &AnimatedMeshDescriptor) {
        if self.animated.contains_key(&descriptor.name) {
            log::warn!("Animated mesh '{}' is already registered", descriptor.name);
            return;
        }

        let frame_count = descriptor.frame_count as usize;
        let mut asset = AnimatedMeshAsset {
            name: descriptor.name.clone(),
            descriptor: descriptor.clone(),
            states: vec![LoadState::Pending; frame_count],
            frames: (0..frame_count).map(|_| None).collect(),
        };

        for frame in 1..=descriptor.frame_count {
            let path = self.assets_dir.join(descriptor.frame_path(frame));
            let source = Arc::clone(&self.mesh_source);
            let name = descriptor.name.clone();
            let spawned = self.spawn_loader(&descriptor.name, move || LoadMessage::AnimatedFrame {
                result: source.load_mesh(&path),
                name,
                frame,
            });
            if !spawned {
                asset.states[(frame - 1) as usize] = LoadState::Failed;
            }
        }
        self.animated.insert(descriptor.name.clone(), asset);
    }

    /// Register a texture.
    ///
    /// A 1x1 placeholder is uploaded right away so the handle can be bound
    /// immediately; the decoded image replaces it during a later `poll`.
    pub fn load_texture(
        &mut self,
        backend: &mut dyn RenderBackend,
        descriptor: &TextureDescriptor,
    ) -> Result<TextureHandle, AssetError> {
        if let Some(existing) = self.textures.get(&descriptor.name) {
            log::warn!("Texture '{}' is already registered", descriptor.name);
            return Ok(existing.handle);
        }

        let handle = texture::create_placeholder(backend, self.placeholder_color)?;
        let path = self.assets_dir.join(&descriptor.path);
        let mut asset = TextureAsset {
            name: descriptor.name.clone(),
            path: path.clone(),
            handle,
            state: LoadState::Pending,
            size: None,
        };

        let source = Arc::clone(&self.image_source);
        let name = descriptor.name.clone();
        let spawned = self.spawn_loader(&descriptor.name, move || LoadMessage::Texture {
            result: source.load_image(&path),
            name,
        });
        if !spawned {
            asset.state = LoadState::Failed;
        }
        self.textures.insert(descriptor.name.clone(), asset);
        Ok(handle)
    }

    /// Register several textures
    pub fn load_textures(
        &mut self,
        backend: &mut dyn RenderBackend,
        descriptors: &[TextureDescriptor],
    ) -> Result<(), AssetError> {
        for descriptor in descriptors {
            self.load_texture(backend, descriptor)?;
        }
        Ok(())
    }

    fn spawn_loader<F>(&self, name: &str, load: F) -> bool
    where
        F: FnOnce() -> LoadMessage + Send + 'static,
    {
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("asset-{name}"))
            .spawn(move || {
                // Receiver gone means the registry was dropped; nothing to report to
                let _ = sender.send(load());
            });

        match spawned {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Could not start loader for '{name}': {e}");
                false
            }
        }
    }

    /// Install every load that has completed since the last call.
    ///
    /// Runs on the frame thread. Never blocks and never fails: an asset whose
    /// data or upload is bad is logged and marked failed. Returns how many
    /// completions were processed.
    pub fn poll(&mut self, backend: &mut dyn RenderBackend) -> usize {
        let mut processed = 0;
        // The registry holds a sender itself, so the channel never disconnects
        while let Ok(message) = self.receiver.try_recv() {
            self.install(backend, message);
            processed += 1;
        }
        processed
    }

    fn install(&mut self, backend: &mut dyn RenderBackend, message: LoadMessage) {
        match message {
            LoadMessage::Mesh { name, result } => {
                let Some(asset) = self.meshes.get_mut(&name) else {
                    return;
                };
                match build_mesh(backend, result) {
                    Ok(loaded) => {
                        log::debug!("Mesh '{name}' ready ({} indices)", loaded.buffers.index_count);
                        asset.loaded = Some(loaded);
                        asset.state = LoadState::Ready;
                    }
                    Err(e) => {
                        log::warn!("Mesh '{name}' failed to load from {}: {e}", asset.path.display());
                        asset.state = LoadState::Failed;
                    }
                }
            }
            LoadMessage::AnimatedFrame { name, frame, result } => {
                let Some(asset) = self.animated.get_mut(&name) else {
                    return;
                };
                let Some(slot) = frame_slot(frame, asset.frame_count()) else {
                    return;
                };
                match build_mesh(backend, result) {
                    Ok(loaded) => {
                        log::debug!("Animated mesh '{name}' frame {frame} ready");
                        asset.frames[slot] = Some(loaded);
                        asset.states[slot] = LoadState::Ready;
                    }
                    Err(e) => {
                        log::warn!("Animated mesh '{name}' frame {frame} failed to load: {e}");
                        asset.states[slot] = LoadState::Failed;
                    }
                }
            }
            LoadMessage::Texture { name, result } => {
                let Some(asset) = self.textures.get_mut(&name) else {
                    return;
                };
                let uploaded = result.and_then(|image| {
                    texture::upload_image(backend, asset.handle, &image)
                        .map(|_| (image.width, image.height))
                });
                match uploaded {
                    Ok(size) => {
                        log::debug!("Texture '{name}' ready ({}x{})", size.0, size.1);
                        asset.size = Some(size);
                        asset.state = LoadState::Ready;
                    }
                    Err(e) => {
                        log::warn!("Texture '{name}' failed to load from {}: {e}", asset.path.display());
                        asset.state = LoadState::Failed;
                    }
                }
            }
        }
    }

    /// Static mesh by name
    pub fn mesh(&self, name: &str) -> Option<&MeshAsset> {
        self.meshes.get(name)
    }

    /// Animated mesh by name
    pub fn animated_mesh(&self, name: &str) -> Option<&AnimatedMeshAsset> {
        self.animated.get(name)
    }

    /// Texture by name
    pub fn texture(&self, name: &str) -> Option<&TextureAsset> {
        self.textures.get(name)
    }

    /// Texture handle by name
    pub fn texture_handle(&self, name: &str) -> Option<TextureHandle> {
        self.textures.get(name).map(|texture| texture.handle)
    }

    /// Buffers to draw for a mesh name.
    ///
    /// With `frame` set, the name is looked up among animated meshes and the
    /// 1-based frame is used; otherwise among static meshes. `None` means
    /// unknown, out of range or not loaded yet.
    pub fn buffers(&self, name: &str, frame: Option<u32>) -> Option<&GpuBufferSet> {
        let loaded = match frame {
            Some(frame) => self.animated.get(name)?.frame(frame),
            None => self.meshes.get(name)?.loaded(),
        };
        loaded.map(|mesh| &mesh.buffers)
    }

    /// Readiness counts across every asset
    pub fn stats(&self) -> AssetStats {
        let mut stats = AssetStats::default();
        let states = self
            .meshes
            .values()
            .map(MeshAsset::state)
            .chain(self.animated.values().flat_map(|asset| asset.states.iter().copied()))
            .chain(self.textures.values().map(TextureAsset::state));

        for state in states {
            match state {
                LoadState::Pending => stats.pending += 1,
                LoadState::Ready => stats.loaded += 1,
                LoadState::Failed => stats.failed += 1,
            }
        }
        stats
    }

    /// Directory asset paths are resolved against
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}

fn build_mesh(
    backend: &mut dyn RenderBackend,
    result: Result<MeshData, AssetError>,
) -> Result<LoadedMesh, AssetError> {
    let metadata = result?;
    let buffers = GeometryBuilder::build(backend, &metadata)?;
    Ok(LoadedMesh { metadata, buffers })
}
