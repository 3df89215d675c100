//! Mesh data and mesh sources
//!
//! [`MeshData`] is the CPU-side metadata of a mesh: flat position, index,
//! texture coordinate and normal arrays, ready to be cast to bytes for upload.
//! A [`MeshSource`] turns a path into `MeshData`; sources run on loader
//! threads, so they must be `Send + Sync`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::AssetError;

/// CPU-side triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// `xyz` per vertex
    pub positions: Vec<f32>,
    /// Triangle list indices
    pub indices: Vec<u32>,
    /// `uv` per vertex, empty for untextured meshes
    pub texcoords: Vec<f32>,
    /// `xyz` per vertex
    pub normals: Vec<f32>,
}

impl MeshData {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of indices drawn
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Whether the mesh declares texture coordinates
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Check array shapes and index bounds
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.positions.is_empty() || self.positions.len() % 3 != 0 {
            return Err(AssetError::InvalidData(format!(
                "{} position components is not a non-empty multiple of 3",
                self.positions.len()
            )));
        }

        let vertices = self.vertex_count();
        if self.normals.len() != self.positions.len() {
            return Err(AssetError::InvalidData(format!(
                "{} normal components for {vertices} vertices",
                self.normals.len()
            )));
        }
        if self.has_texcoords() && self.texcoords.len() != vertices * 2 {
            return Err(AssetError::InvalidData(format!(
                "{} texture coordinate components for {vertices} vertices",
                self.texcoords.len()
            )));
        }
        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(AssetError::InvalidData(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }
        if let Some(index) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(AssetError::InvalidData(format!(
                "index {index} out of range for {vertices} vertices"
            )));
        }
        Ok(())
    }

    /// Axis-aligned unit cube centred on the origin, with texture coordinates
    pub fn unit_cube() -> Self {
        // (normal, tangent u, tangent v) per face
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut mesh = Self::default();
        for (face, (normal, u_axis, v_axis)) in FACES.iter().enumerate() {
            for (u, v) in CORNERS {
                for axis in 0..3 {
                    mesh.positions
                        .push(0.5 * (normal[axis] + u * u_axis[axis] + v * v_axis[axis]));
                }
                mesh.normals.extend_from_slice(normal);
                mesh.texcoords.extend_from_slice(&[(u + 1.0) * 0.5, (v + 1.0) * 0.5]);
            }
            let base = (face * 4) as u32;
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

/// Turns an asset path into mesh data
pub trait MeshSource: Send + Sync {
    /// Load the mesh stored at `path`
    fn load_mesh(&self, path: &Path) -> Result<MeshData, AssetError>;
}

/// Wavefront OBJ files via `tobj`
///
/// Every model in the file is merged into one mesh. Missing normals are
/// replaced with flat face normals.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjMeshSource;

impl MeshSource for ObjMeshSource {
    fn load_mesh(&self, path: &Path) -> Result<MeshData, AssetError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|e| AssetError::LoadFailed(format!("{}: {e}", path.display())))?;

        let mut merged = MeshData::default();
        for model in models {
            let mesh = model.mesh;
            let base = merged.vertex_count() as u32;
            let normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
            } else {
                face_normals(&mesh.positions, &mesh.indices)
            };

            merged.indices.extend(mesh.indices.iter().map(|i| i + base));
            merged.positions.extend_from_slice(&mesh.positions);
            merged.normals.extend_from_slice(&normals);
            merged.texcoords.extend_from_slice(&mesh.texcoords);
        }

        // A file where only some models carry UVs cannot be drawn textured
        if merged.texcoords.len() != merged.vertex_count() * 2 {
            merged.texcoords.clear();
        }

        log::debug!(
            "Parsed {}: {} vertices, {} triangles",
            path.display(),
            merged.vertex_count(),
            merged.index_count() / 3
        );
        Ok(merged)
    }
}

/// Flat per-vertex normals accumulated from each triangle's face normal
fn face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut normals = vec![0.0_f32; positions.len()];
    let vertex = |i: u32| {
        let at = i as usize * 3;
        nalgebra::Vector3::new(positions[at], positions[at + 1], positions[at + 2])
    };

    for triangle in indices.chunks_exact(3) {
        if triangle.iter().any(|&i| i as usize * 3 + 2 >= positions.len()) {
            continue;
        }
        let (a, b, c) = (vertex(triangle[0]), vertex(triangle[1]), vertex(triangle[2]));
        let normal = (b - a).cross(&(c - a));
        for &i in triangle {
            let at = i as usize * 3;
            normals[at] += normal.x;
            normals[at + 1] += normal.y;
            normals[at + 2] += normal.z;
        }
    }

    for normal in normals.chunks_exact_mut(3) {
        let length = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if length > f32::EPSILON {
            normal.iter_mut().for_each(|n| *n /= length);
        }
    }
    normals
}

/// Meshes held in memory, keyed by path
#[derive(Debug, Default, Clone)]
pub struct MemoryMeshSource {
    meshes: HashMap<PathBuf, MeshData>,
}

impl MemoryMeshSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: serve `mesh` for `path`
    pub fn with_mesh(mut self, path: impl Into<PathBuf>, mesh: MeshData) -> Self {
        self.meshes.insert(path.into(), mesh);
        self
    }
}

impl MeshSource for MemoryMeshSource {
    fn load_mesh(&self, path: &Path) -> Result<MeshData, AssetError> {
        self.meshes
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.display().to_string()))
    }
}
