//! Multi-component scenario tests and their shared fixtures

mod frame_loop;
mod scene_lifecycle;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::assets::{AssetRegistry, MemoryImageSource, MemoryMeshSource};
use crate::core::{ApplicationConfig, AssetConfig};
use crate::foundation::math::Mat4;
use crate::render::backend::{
    AttributeSlot, BackendResult, BufferHandle, BufferKind, DepthTest, FrameCapture, RenderBackend, RenderError,
    ShaderSources, TextureHandle, TextureSampling, Uniform,
};
use crate::render::backends::headless::HeadlessBackend;
use crate::render::{Player, ScreenshotError, ScreenshotSink};
use crate::ui::Hud;
use crate::Engine;

/// What the HUD was told, in order
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HudEvent {
    Show(String),
    Hide,
}

#[derive(Default)]
pub(crate) struct RecordingHud {
    pub events: Vec<HudEvent>,
    pub frame_rates: Vec<f32>,
}

impl Hud for RecordingHud {
    fn show_message(&mut self, title: &str, _body: &str, _duration_seconds: f32) {
        self.events.push(HudEvent::Show(title.to_string()));
    }

    fn hide_message(&mut self) {
        self.events.push(HudEvent::Hide);
    }

    fn show_frame_rate(&mut self, fps: f32) {
        self.frame_rates.push(fps);
    }
}

/// Player with an identity projection that counts its ticks
#[derive(Default)]
pub(crate) struct StillPlayer {
    pub ticks: Vec<f32>,
}

impl Player for StillPlayer {
    fn tick(&mut self, delta_time: f32) {
        self.ticks.push(delta_time);
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::identity()
    }
}

/// Screenshot sink keeping captures in memory
#[derive(Clone, Default)]
pub(crate) struct MemorySink {
    pub captures: Rc<RefCell<Vec<FrameCapture>>>,
}

impl ScreenshotSink for MemorySink {
    fn export(&mut self, capture: &FrameCapture) -> Result<(), ScreenshotError> {
        self.captures.borrow_mut().push(capture.clone());
        Ok(())
    }
}

/// Headless backend that rejects chosen calls, counted from zero
pub(crate) struct FaultyBackend {
    pub inner: HeadlessBackend,
    pub fail_buffer: Option<usize>,
    pub fail_draw: Option<usize>,
    buffers: usize,
    draws: usize,
}

impl FaultyBackend {
    pub fn new(inner: HeadlessBackend) -> Self {
        Self {
            inner,
            fail_buffer: None,
            fail_draw: None,
            buffers: 0,
            draws: 0,
        }
    }
}

impl RenderBackend for FaultyBackend {
    fn extent(&self) -> (u32, u32) {
        self.inner.extent()
    }

    fn create_program(&mut self, sources: &ShaderSources) -> BackendResult<()> {
        self.inner.create_program(sources)
    }

    fn create_buffer(&mut self, kind: BufferKind, data: &[u8]) -> BackendResult<BufferHandle> {
        let call = self.buffers;
        self.buffers += 1;
        if self.fail_buffer == Some(call) {
            return Err(RenderError::InvalidData("out of buffer memory".to_string()));
        }
        self.inner.create_buffer(kind, data)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) -> BackendResult<()> {
        self.inner.delete_buffer(buffer)
    }

    fn create_texture(&mut self) -> BackendResult<TextureHandle> {
        self.inner.create_texture()
    }

    fn upload_texture(&mut self, texture: TextureHandle, width: u32, height: u32, rgba: &[u8]) -> BackendResult<()> {
        self.inner.upload_texture(texture, width, height, rgba)
    }

    fn generate_mipmaps(&mut self, texture: TextureHandle) -> BackendResult<()> {
        self.inner.generate_mipmaps(texture)
    }

    fn set_sampling(&mut self, texture: TextureHandle, sampling: TextureSampling) -> BackendResult<()> {
        self.inner.set_sampling(texture, sampling)
    }

    fn begin_frame(&mut self, clear_color: [f32; 4], depth_test: DepthTest) -> BackendResult<()> {
        self.inner.begin_frame(clear_color, depth_test)
    }

    fn bind_vertex_buffer(&mut self, slot: AttributeSlot, buffer: BufferHandle) -> BackendResult<()> {
        self.inner.bind_vertex_buffer(slot, buffer)
    }

    fn disable_attribute(&mut self, slot: AttributeSlot) -> BackendResult<()> {
        self.inner.disable_attribute(slot)
    }

    fn bind_index_buffer(&mut self, buffer: BufferHandle) -> BackendResult<()> {
        self.inner.bind_index_buffer(buffer)
    }

    fn set_uniform(&mut self, uniform: Uniform) -> BackendResult<()> {
        self.inner.set_uniform(uniform)
    }

    fn bind_texture(&mut self, texture: Option<TextureHandle>) -> BackendResult<()> {
        self.inner.bind_texture(texture)
    }

    fn draw_indexed_triangles(&mut self, index_count: u32) -> BackendResult<()> {
        let call = self.draws;
        self.draws += 1;
        if self.fail_draw == Some(call) {
            return Err(RenderError::IncompleteState("context lost".to_string()));
        }
        self.inner.draw_indexed_triangles(index_count)
    }

    fn read_pixels(&mut self) -> BackendResult<FrameCapture> {
        self.inner.read_pixels()
    }
}

pub(crate) fn backend() -> HeadlessBackend {
    HeadlessBackend::new(4, 4).expect("backend")
}

/// Engine reading meshes from `meshes`, screenshots going to `sink`
pub(crate) fn engine(backend: &mut HeadlessBackend, meshes: MemoryMeshSource, sink: MemorySink) -> Engine {
    let config = ApplicationConfig::default();
    let assets = AssetRegistry::with_sources(
        &AssetConfig::default().with_assets_dir(""),
        Arc::new(meshes),
        Arc::new(MemoryImageSource::new()),
    );
    Engine::new(config, backend, &ShaderSources::new("vs", "fs"))
        .expect("engine")
        .with_assets(assets)
        .with_screenshot_sink(Box::new(sink))
}

/// Wait for every loader thread to report back, installing results
pub(crate) fn settle(engine: &mut Engine, backend: &mut HeadlessBackend) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while engine.assets().stats().pending > 0 && Instant::now() < deadline {
        engine.assets_mut().poll(backend);
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// Host timestamp of frame `n` at 60 Hz
pub(crate) fn at_60hz(n: u32) -> f64 {
    f64::from(n) * 1000.0 / 60.0
}
