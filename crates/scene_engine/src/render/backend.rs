//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement so the
//! draw pass and frame loop can stay independent of the graphics API behind
//! the surface. Resources are referenced through opaque handles.

use thiserror::Error;

use crate::foundation::math::{Mat4, Vec3};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a GPU buffer owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Handle to a GPU texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// What a buffer is bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Per-vertex attribute data
    Vertex,
    /// Triangle index data (`u32`)
    Index,
}

/// Shader attribute slots the draw pass binds vertex buffers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSlot {
    /// `vec3` position
    Position,
    /// `vec2` texture coordinate
    TexCoord,
    /// `vec3` normal
    Normal,
}

impl AttributeSlot {
    /// Number of `f32` components per vertex
    pub const fn components(self) -> usize {
        match self {
            Self::Position | Self::Normal => 3,
            Self::TexCoord => 2,
        }
    }
}

/// Shader uniforms set per draw
#[derive(Debug, Clone, PartialEq)]
pub enum Uniform {
    /// Camera projection (including view)
    Projection(Mat4),
    /// Object model transform
    Model(Mat4),
    /// Light-corrected normal transform
    Normal(Mat4),
    /// Direction of the scene light
    LightDirection(Vec3),
    /// Whether the fragment stage samples the bound texture
    UseTexture(bool),
}

/// Texture wrapping modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the texture
    Repeat,
    /// Clamp to edge
    ClampToEdge,
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Linear filtering
    Linear,
    /// Trilinear filtering across mip levels
    LinearMipmapLinear,
}

/// Sampler state for a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSampling {
    /// Wrapping on both axes
    pub wrap: WrapMode,
    /// Minification filter
    pub min_filter: FilterMode,
}

/// Depth comparison used for the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthTest {
    /// Pass when the incoming depth is less than or equal to the stored depth
    LessOrEqual,
}

/// Shader program sources handed to the backend at initialization
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSources {
    /// Create from vertex and fragment source text
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Frame buffer contents read back from the backend
#[derive(Debug, Clone)]
pub struct FrameCapture {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first
    pub rgba: Vec<u8>,
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// No usable rendering surface or context
    #[error("Rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Shader compilation failed
    #[error("Shader compilation failed: {0}")]
    ShaderCompile(String),

    /// Shader program linking failed
    #[error("Shader link failed: {0}")]
    ShaderLink(String),

    /// A handle did not refer to a live resource
    #[error("Invalid resource handle: {0}")]
    InvalidHandle(String),

    /// Backend rejected the supplied data
    #[error("Invalid resource data: {0}")]
    InvalidData(String),

    /// Draw issued without a complete pipeline state
    #[error("Incomplete draw state: {0}")]
    IncompleteState(String),
}

/// Main rendering backend trait
///
/// Mirrors an immediate-mode graphics context: resources are created up front,
/// then every draw binds its buffers, sets uniforms and issues an indexed
/// triangle draw.
pub trait RenderBackend {
    /// Surface size in pixels
    fn extent(&self) -> (u32, u32);

    /// Compile and link the shader program used for every draw
    fn create_program(&mut self, sources: &ShaderSources) -> BackendResult<()>;

    /// Create a buffer initialised with `data`
    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> BackendResult<BufferHandle>;

    /// Release a buffer; it is unbound from any slot it was bound to
    fn delete_buffer(&mut self, buffer: BufferHandle) -> BackendResult<()>;

    /// Create an empty texture object
    fn create_texture(&mut self) -> BackendResult<TextureHandle>;

    /// Replace a texture's contents with RGBA8 pixels
    fn upload_texture(
        &mut self,
        texture: TextureHandle,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> BackendResult<()>;

    /// Build the mip chain for a texture
    fn generate_mipmaps(&mut self, texture: TextureHandle) -> BackendResult<()>;

    /// Set wrap/filter state for a texture
    fn set_sampling(&mut self, texture: TextureHandle, sampling: TextureSampling) -> BackendResult<()>;

    /// Clear color and depth and configure depth testing for a new frame
    fn begin_frame(&mut self, clear_color: [f32; 4], depth_test: DepthTest) -> BackendResult<()>;

    /// Bind a vertex buffer to an attribute slot
    fn bind_vertex_buffer(&mut self, slot: AttributeSlot, buffer: BufferHandle) -> BackendResult<()>;

    /// Stop sourcing an attribute slot from a buffer
    fn disable_attribute(&mut self, slot: AttributeSlot) -> BackendResult<()>;

    /// Bind the index buffer for the next draw
    fn bind_index_buffer(&mut self, buffer: BufferHandle) -> BackendResult<()>;

    /// Set a shader uniform
    fn set_uniform(&mut self, uniform: Uniform) -> BackendResult<()>;

    /// Bind a texture to the sampler, or unbind with `None`
    fn bind_texture(&mut self, texture: Option<TextureHandle>) -> BackendResult<()>;

    /// Draw indexed triangles from the bound index buffer
    fn draw_indexed_triangles(&mut self, index_count: u32) -> BackendResult<()>;

    /// Read back the current frame buffer
    fn read_pixels(&mut self) -> BackendResult<FrameCapture>;
}
