//! Headless rendering backend
//!
//! A software stand-in for a GPU context. It owns buffers and textures, checks
//! every handle and every draw for a complete pipeline state, keeps an RGBA
//! frame buffer filled with the last clear color, and records each call in a
//! command log. It does not rasterize triangles.
//!
//! The log holds the calls since the last `begin_frame` (or since creation),
//! so it stays one frame long however long the host runs. Draw calls are
//! also counted across frames.
//!
//! Used by the demo binary and by tests that need to observe exactly which
//! commands a frame produced.

use std::collections::HashMap;

use crate::render::backend::{
    AttributeSlot, BackendResult, BufferHandle, BufferKind, DepthTest, FrameCapture,
    RenderBackend, RenderError, ShaderSources, TextureHandle, TextureSampling, Uniform,
};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Shader program compiled and linked
    CreateProgram,
    /// Buffer released
    DeleteBuffer(BufferHandle),
    /// Buffer created
    CreateBuffer {
        /// New handle
        buffer: BufferHandle,
        /// Binding kind
        kind: BufferKind,
        /// Size in bytes
        bytes: usize,
    },
    /// Texture object created
    CreateTexture(TextureHandle),
    /// Texture contents replaced
    UploadTexture {
        /// Target texture
        texture: TextureHandle,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Mip chain generated
    GenerateMipmaps(TextureHandle),
    /// Sampler state changed
    SetSampling {
        /// Target texture
        texture: TextureHandle,
        /// New sampler state
        sampling: TextureSampling,
    },
    /// Frame cleared
    BeginFrame {
        /// Clear color
        clear_color: [f32; 4],
        /// Depth comparison
        depth_test: DepthTest,
    },
    /// Vertex buffer bound
    BindVertexBuffer {
        /// Attribute slot
        slot: AttributeSlot,
        /// Bound buffer
        buffer: BufferHandle,
    },
    /// Attribute slot disabled
    DisableAttribute(AttributeSlot),
    /// Index buffer bound
    BindIndexBuffer(BufferHandle),
    /// Uniform set
    SetUniform(Uniform),
    /// Texture bound or unbound
    BindTexture(Option<TextureHandle>),
    /// Indexed triangle draw
    DrawIndexed {
        /// Number of indices drawn
        index_count: u32,
    },
    /// Frame buffer read back
    ReadPixels,
}

#[derive(Debug, Clone)]
struct BufferRecord {
    kind: BufferKind,
    bytes: usize,
}

/// State of a texture held by the headless backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width of the current contents
    pub width: u32,
    /// Height of the current contents
    pub height: u32,
    /// Whether a mip chain exists for the current contents
    pub mipmapped: bool,
    /// Sampler state, if one was set
    pub sampling: Option<TextureSampling>,
}

/// Software rendering backend with a command log
pub struct HeadlessBackend {
    width: u32,
    height: u32,
    program_ready: bool,
    next_handle: u64,
    buffers: HashMap<u64, BufferRecord>,
    textures: HashMap<u64, TextureInfo>,
    attributes: HashMap<AttributeSlot, BufferHandle>,
    index_buffer: Option<BufferHandle>,
    bound_texture: Option<TextureHandle>,
    frame_buffer: Vec<u8>,
    commands: Vec<Command>,
    draw_calls: usize,
}

impl HeadlessBackend {
    /// Create a backend with a `width` x `height` surface
    pub fn new(width: u32, height: u32) -> BackendResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable(format!(
                "surface size {width}x{height} has no pixels"
            )));
        }

        log::info!("Headless backend created with a {width}x{height} surface");
        Ok(Self {
            width,
            height,
            program_ready: false,
            next_handle: 1,
            buffers: HashMap::new(),
            textures: HashMap::new(),
            attributes: HashMap::new(),
            index_buffer: None,
            bound_texture: None,
            frame_buffer: vec![0; pixel_bytes(width, height)],
            commands: Vec::new(),
            draw_calls: 0,
        })
    }

    /// Commands recorded since the current frame began
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drain the command log and restart the draw count
    pub fn take_commands(&mut self) -> Vec<Command> {
        self.draw_calls = 0;
        std::mem::take(&mut self.commands)
    }

    /// Draw calls issued since creation or the last [`take_commands`](Self::take_commands)
    pub fn draw_call_count(&self) -> usize {
        self.draw_calls
    }

    /// Current state of a texture
    pub fn texture_info(&self, texture: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(&texture.0)
    }

    /// Number of live buffers
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn allocate_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn buffer(&self, buffer: BufferHandle) -> BackendResult<&BufferRecord> {
        self.buffers
            .get(&buffer.0)
            .ok_or_else(|| RenderError::InvalidHandle(format!("buffer {}", buffer.0)))
    }

    fn texture_mut(&mut self, texture: TextureHandle) -> BackendResult<&mut TextureInfo> {
        self.textures
            .get_mut(&texture.0)
            .ok_or_else(|| RenderError::InvalidHandle(format!("texture {}", texture.0)))
    }
}

fn pixel_bytes(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn color_to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
}

impl RenderBackend for HeadlessBackend {
    fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn create_program(&mut self, sources: &ShaderSources) -> BackendResult<()> {
        if sources.vertex.trim().is_empty() {
            return Err(RenderError::ShaderCompile("vertex shader source is empty".to_string()));
        }
        if sources.fragment.trim().is_empty() {
            return Err(RenderError::ShaderCompile("fragment shader source is empty".to_string()));
        }

        self.program_ready = true;
        self.commands.push(Command::CreateProgram);
        Ok(())
    }

    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> BackendResult<BufferHandle> {
        if kind == BufferKind::Index && data.len() % std::mem::size_of::<u32>() != 0 {
            return Err(RenderError::InvalidData(format!(
                "index buffer of {} bytes is not a whole number of u32 indices",
                data.len()
            )));
        }

        let buffer = BufferHandle(self.allocate_handle());
        self.buffers.insert(buffer.0, BufferRecord { kind, bytes: data.len() });
        self.commands.push(Command::CreateBuffer {
            buffer,
            kind,
            bytes: data.len(),
        });
        Ok(buffer)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) -> BackendResult<()> {
        if self.buffers.remove(&buffer.0).is_none() {
            return Err(RenderError::InvalidHandle(format!("buffer {}", buffer.0)));
        }

        // deleting a bound buffer unbinds it
        self.attributes.retain(|_, bound| *bound != buffer);
        if self.index_buffer == Some(buffer) {
            self.index_buffer = None;
        }
        self.commands.push(Command::DeleteBuffer(buffer));
        Ok(())
    }

    fn create_texture(&mut self) -> BackendResult<TextureHandle> {
        let texture = TextureHandle(self.allocate_handle());
        self.textures.insert(
            texture.0,
            TextureInfo {
                width: 0,
                height: 0,
                mipmapped: false,
                sampling: None,
            },
        );
        self.commands.push(Command::CreateTexture(texture));
        Ok(texture)
    }

    fn upload_texture(
        &mut self,
        texture: TextureHandle,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> BackendResult<()> {
        if width == 0 || height == 0 || rgba.len() != pixel_bytes(width, height) {
            return Err(RenderError::InvalidData(format!(
                "{} bytes do not describe a {width}x{height} RGBA image",
                rgba.len()
            )));
        }

        let info = self.texture_mut(texture)?;
        info.width = width;
        info.height = height;
        info.mipmapped = false;
        self.commands.push(Command::UploadTexture { texture, width, height });
        Ok(())
    }

    fn generate_mipmaps(&mut self, texture: TextureHandle) -> BackendResult<()> {
        let info = self.texture_mut(texture)?;
        if !(info.width.is_power_of_two() && info.height.is_power_of_two()) {
            return Err(RenderError::InvalidData(format!(
                "mipmaps need power-of-two dimensions, texture is {}x{}",
                info.width, info.height
            )));
        }
        info.mipmapped = true;
        self.commands.push(Command::GenerateMipmaps(texture));
        Ok(())
    }

    fn set_sampling(&mut self, texture: TextureHandle, sampling: TextureSampling) -> BackendResult<()> {
        self.texture_mut(texture)?.sampling = Some(sampling);
        self.commands.push(Command::SetSampling { texture, sampling });
        Ok(())
    }

    fn begin_frame(&mut self, clear_color: [f32; 4], depth_test: DepthTest) -> BackendResult<()> {
        let pixel = color_to_rgba8(clear_color);
        for chunk in self.frame_buffer.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
        self.commands.clear();
        self.commands.push(Command::BeginFrame {
            clear_color,
            depth_test,
        });
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, slot: AttributeSlot, buffer: BufferHandle) -> BackendResult<()> {
        if self.buffer(buffer)?.kind != BufferKind::Vertex {
            return Err(RenderError::InvalidHandle(format!(
                "buffer {} is not a vertex buffer",
                buffer.0
            )));
        }
        self.attributes.insert(slot, buffer);
        self.commands.push(Command::BindVertexBuffer { slot, buffer });
        Ok(())
    }

    fn disable_attribute(&mut self, slot: AttributeSlot) -> BackendResult<()> {
        self.attributes.remove(&slot);
        self.commands.push(Command::DisableAttribute(slot));
        Ok(())
    }

    fn bind_index_buffer(&mut self, buffer: BufferHandle) -> BackendResult<()> {
        if self.buffer(buffer)?.kind != BufferKind::Index {
            return Err(RenderError::InvalidHandle(format!(
                "buffer {} is not an index buffer",
                buffer.0
            )));
        }
        self.index_buffer = Some(buffer);
        self.commands.push(Command::BindIndexBuffer(buffer));
        Ok(())
    }

    fn set_uniform(&mut self, uniform: Uniform) -> BackendResult<()> {
        if !self.program_ready {
            return Err(RenderError::IncompleteState("no shader program".to_string()));
        }
        self.commands.push(Command::SetUniform(uniform));
        Ok(())
    }

    fn bind_texture(&mut self, texture: Option<TextureHandle>) -> BackendResult<()> {
        if let Some(handle) = texture {
            if !self.textures.contains_key(&handle.0) {
                return Err(RenderError::InvalidHandle(format!("texture {}", handle.0)));
            }
        }
        self.bound_texture = texture;
        self.commands.push(Command::BindTexture(texture));
        Ok(())
    }

    fn draw_indexed_triangles(&mut self, index_count: u32) -> BackendResult<()> {
        if !self.program_ready {
            return Err(RenderError::IncompleteState("no shader program".to_string()));
        }
        if !self.attributes.contains_key(&AttributeSlot::Position) {
            return Err(RenderError::IncompleteState("no position buffer bound".to_string()));
        }
        let index_buffer = self
            .index_buffer
            .ok_or_else(|| RenderError::IncompleteState("no index buffer bound".to_string()))?;

        let available = self.buffer(index_buffer)?.bytes / std::mem::size_of::<u32>();
        if index_count as usize > available {
            return Err(RenderError::InvalidData(format!(
                "draw of {index_count} indices exceeds the {available} in buffer {}",
                index_buffer.0
            )));
        }

        self.draw_calls += 1;
        self.commands.push(Command::DrawIndexed { index_count });
        Ok(())
    }

    fn read_pixels(&mut self) -> BackendResult<FrameCapture> {
        self.commands.push(Command::ReadPixels);
        Ok(FrameCapture {
            width: self.width,
            height: self.height,
            rgba: self.frame_buffer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_backend() -> HeadlessBackend {
        let mut backend = HeadlessBackend::new(4, 2).expect("backend");
        backend
            .create_program(&ShaderSources::new("void main() {}", "void main() {}"))
            .expect("program");
        backend
    }

    #[test]
    fn zero_sized_surface_is_unavailable() {
        assert!(matches!(
            HeadlessBackend::new(0, 10),
            Err(RenderError::SurfaceUnavailable(_))
        ));
    }

    #[test]
    fn empty_shader_fails_to_compile() {
        let mut backend = HeadlessBackend::new(1, 1).expect("backend");
        let result = backend.create_program(&ShaderSources::new("", "void main() {}"));
        assert!(matches!(result, Err(RenderError::ShaderCompile(_))));
    }

    #[test]
    fn clear_fills_frame_buffer() {
        let mut backend = ready_backend();
        backend
            .begin_frame([1.0, 0.0, 0.5, 1.0], DepthTest::LessOrEqual)
            .expect("clear");
        let capture = backend.read_pixels().expect("read");

        assert_eq!(capture.rgba.len(), 4 * 2 * 4);
        assert_eq!(&capture.rgba[0..4], &[255, 0, 128, 255]);
    }

    #[test]
    fn draw_requires_bound_buffers() {
        let mut backend = ready_backend();
        assert!(matches!(
            backend.draw_indexed_triangles(3),
            Err(RenderError::IncompleteState(_))
        ));

        let positions = backend
            .create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&[0.0_f32; 9]))
            .expect("positions");
        let indices = backend
            .create_buffer(BufferKind::Index, bytemuck::cast_slice(&[0_u32, 1, 2]))
            .expect("indices");
        backend.bind_vertex_buffer(AttributeSlot::Position, positions).expect("bind");
        backend.bind_index_buffer(indices).expect("bind");

        assert!(backend.draw_indexed_triangles(3).is_ok());
        assert!(matches!(
            backend.draw_indexed_triangles(6),
            Err(RenderError::InvalidData(_))
        ));
        assert_eq!(backend.draw_call_count(), 1);
    }

    #[test]
    fn log_keeps_one_frame_while_draws_are_counted() {
        let mut backend = ready_backend();
        let positions = backend
            .create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&[0.0_f32; 9]))
            .expect("positions");
        let indices = backend
            .create_buffer(BufferKind::Index, bytemuck::cast_slice(&[0_u32, 1, 2]))
            .expect("indices");

        for _ in 0..500 {
            backend.begin_frame([0.0; 4], DepthTest::LessOrEqual).expect("clear");
            for _ in 0..10 {
                backend.bind_vertex_buffer(AttributeSlot::Position, positions).expect("bind");
                backend.bind_index_buffer(indices).expect("bind");
                backend.draw_indexed_triangles(3).expect("draw");
            }
        }

        assert_eq!(backend.commands().len(), 1 + 10 * 3);
        assert!(matches!(backend.commands().first(), Some(Command::BeginFrame { .. })));
        assert_eq!(backend.draw_call_count(), 5000);

        backend.take_commands();
        assert_eq!(backend.draw_call_count(), 0);
    }

    #[test]
    fn deleted_buffer_is_unbound_and_gone() {
        let mut backend = ready_backend();
        let positions = backend
            .create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&[0.0_f32; 9]))
            .expect("positions");
        let indices = backend
            .create_buffer(BufferKind::Index, bytemuck::cast_slice(&[0_u32, 1, 2]))
            .expect("indices");
        backend.bind_vertex_buffer(AttributeSlot::Position, positions).expect("bind");
        backend.bind_index_buffer(indices).expect("bind");

        backend.delete_buffer(indices).expect("delete");
        assert_eq!(backend.buffer_count(), 1);
        assert!(matches!(
            backend.draw_indexed_triangles(3),
            Err(RenderError::IncompleteState(_))
        ));
        assert!(matches!(
            backend.delete_buffer(indices),
            Err(RenderError::InvalidHandle(_))
        ));
        assert!(backend.bind_index_buffer(indices).is_err());
    }

    #[test]
    fn buffer_kinds_are_checked_on_bind() {
        let mut backend = ready_backend();
        let indices = backend
            .create_buffer(BufferKind::Index, bytemuck::cast_slice(&[0_u32, 1, 2]))
            .expect("indices");
        assert!(backend.bind_vertex_buffer(AttributeSlot::Normal, indices).is_err());
        assert!(backend.bind_index_buffer(BufferHandle(999)).is_err());
    }

    #[test]
    fn mipmaps_need_power_of_two_contents() {
        let mut backend = ready_backend();
        let texture = backend.create_texture().expect("texture");
        backend.upload_texture(texture, 3, 2, &[0; 3 * 2 * 4]).expect("upload");
        assert!(backend.generate_mipmaps(texture).is_err());

        backend.upload_texture(texture, 4, 2, &[0; 4 * 2 * 4]).expect("upload");
        backend.generate_mipmaps(texture).expect("mipmaps");
        assert!(backend.texture_info(texture).is_some_and(|info| info.mipmapped));
    }
}
