//! Per-object draw
//!
//! Binds one object's buffers and texture, sets its uniforms and issues the
//! indexed draw. An object whose mesh is unknown or still loading is skipped
//! for the frame; that is a normal state, not an error.

use crate::assets::AssetRegistry;
use crate::foundation::math::Mat4;
use crate::render::backend::{AttributeSlot, BackendResult, RenderBackend, Uniform};
use crate::render::lighting::LightingLevel;
use crate::scene::SceneObject;

/// What happened to one object in the draw pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Draw call issued
    Drawn {
        /// Whether a texture was bound
        textured: bool,
    },
    /// Nothing issued this frame
    Skipped(SkipReason),
}

/// Why an object was not drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No mesh asset registered under the object's mesh name
    UnknownMesh,
    /// Mesh (or the selected animation frame) has no buffers yet
    NotLoaded,
}

/// Issues draw calls for scene objects
pub struct DrawPass;

impl DrawPass {
    /// Draw `object` with the frame's projection and lighting
    pub fn draw(
        backend: &mut dyn RenderBackend,
        assets: &AssetRegistry,
        object: &dyn SceneObject,
        projection: &Mat4,
        lighting: &LightingLevel,
    ) -> BackendResult<DrawOutcome> {
        let mesh_name = object.mesh_name();
        let frame = object.animation_frame();
        let known = match frame {
            Some(_) => assets.animated_mesh(mesh_name).is_some(),
            None => assets.mesh(mesh_name).is_some(),
        };
        if !known {
            log::trace!("Skipping '{mesh_name}': no such mesh");
            return Ok(DrawOutcome::Skipped(SkipReason::UnknownMesh));
        }
        let Some(buffers) = assets.buffers(mesh_name, frame) else {
            log::trace!("Skipping '{mesh_name}' (frame {frame:?}): not loaded");
            return Ok(DrawOutcome::Skipped(SkipReason::NotLoaded));
        };

        backend.bind_vertex_buffer(AttributeSlot::Position, buffers.positions)?;
        match buffers.texcoords {
            Some(texcoords) => backend.bind_vertex_buffer(AttributeSlot::TexCoord, texcoords)?,
            None => backend.disable_attribute(AttributeSlot::TexCoord)?,
        }
        backend.bind_vertex_buffer(AttributeSlot::Normal, buffers.normals)?;
        backend.bind_index_buffer(buffers.indices)?;

        let transform = object.transform();
        backend.set_uniform(Uniform::Projection(*projection))?;
        backend.set_uniform(Uniform::Model(transform.to_matrix()))?;
        backend.set_uniform(Uniform::LightDirection(lighting.light_direction()))?;
        backend.set_uniform(Uniform::Normal(transform.normal_matrix()))?;

        let texture = if buffers.is_textured() {
            object.texture_name().and_then(|name| assets.texture_handle(name))
        } else {
            None
        };
        backend.set_uniform(Uniform::UseTexture(texture.is_some()))?;
        backend.bind_texture(texture)?;

        backend.draw_indexed_triangles(buffers.index_count)?;
        Ok(DrawOutcome::Drawn {
            textured: texture.is_some(),
        })
    }
}
