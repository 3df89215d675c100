//! Geometry buffer builder
//!
//! Turns validated [`MeshData`] into GPU buffers. Every mesh (or animation
//! frame) gets its own [`GpuBufferSet`]; sets are never shared between assets.

use crate::assets::{AssetError, MeshData};
use crate::render::backend::{BackendResult, BufferHandle, BufferKind, RenderBackend};

/// GPU buffers for one mesh or one animation frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuBufferSet {
    /// `vec3` positions
    pub positions: BufferHandle,
    /// `u32` triangle indices
    pub indices: BufferHandle,
    /// `vec2` texture coordinates, `None` for untextured meshes
    pub texcoords: Option<BufferHandle>,
    /// `vec3` normals
    pub normals: BufferHandle,
    /// Number of indices to draw
    pub index_count: u32,
}

impl GpuBufferSet {
    /// Whether the mesh declared texture coordinates
    pub fn is_textured(&self) -> bool {
        self.texcoords.is_some()
    }
}

/// Builds GPU buffer sets from mesh data
pub struct GeometryBuilder;

impl GeometryBuilder {
    /// Validate `mesh` and upload each of its arrays to a fresh buffer.
    ///
    /// If the backend rejects one of the uploads, the buffers already created
    /// for this mesh are released before the error is returned.
    pub fn build(backend: &mut dyn RenderBackend, mesh: &MeshData) -> Result<GpuBufferSet, AssetError> {
        mesh.validate()?;

        let index_count = u32::try_from(mesh.index_count())
            .map_err(|_| AssetError::InvalidData(format!("{} indices", mesh.index_count())))?;

        let mut created = Vec::with_capacity(4);
        match Self::upload(backend, mesh, index_count, &mut created) {
            Ok(set) => Ok(set),
            Err(e) => {
                for buffer in created {
                    if let Err(release) = backend.delete_buffer(buffer) {
                        log::warn!("Could not release buffer {}: {release}", buffer.0);
                    }
                }
                Err(e.into())
            }
        }
    }

    fn upload(
        backend: &mut dyn RenderBackend,
        mesh: &MeshData,
        index_count: u32,
        created: &mut Vec<BufferHandle>,
    ) -> BackendResult<GpuBufferSet> {
        let mut create = |kind: BufferKind, data: &[u8]| -> BackendResult<BufferHandle> {
            let buffer = backend.create_buffer(kind, data)?;
            created.push(buffer);
            Ok(buffer)
        };

        let positions = create(BufferKind::Vertex, bytemuck::cast_slice(&mesh.positions))?;
        let indices = create(BufferKind::Index, bytemuck::cast_slice(&mesh.indices))?;
        let normals = create(BufferKind::Vertex, bytemuck::cast_slice(&mesh.normals))?;
        let texcoords = if mesh.has_texcoords() {
            Some(create(BufferKind::Vertex, bytemuck::cast_slice(&mesh.texcoords))?)
        } else {
            None
        };

        Ok(GpuBufferSet {
            positions,
            indices,
            texcoords,
            normals,
            index_count,
        })
    }
}
