//! Core engine implementation
//!
//! [`Engine::frame`] is the single per-frame driver and the only source of
//! simulation time. One call runs, in order:
//!
//! 1. install finished asset loads
//! 2. advance the clock from the host timestamp
//! 3. update the lighting level
//! 4. count down the HUD message, hiding it when it runs out
//! 5. report the frame rate
//! 6. clear color and depth (less-or-equal depth test)
//! 7. tick the player and take its projection
//! 8. tick every object, then apply queued spawns/despawns
//! 9. run the interaction pass, then apply queued spawns/despawns
//! 10. draw every object in registry order; an object the backend rejects is
//!     skipped for this frame only
//! 11. export a screenshot if one was requested
//! 12. ask the host for the next frame

use thiserror::Error;

use crate::assets::{AssetError, AssetRegistry};
use crate::core::{ApplicationConfig, ConfigError, LightingConfig};
use crate::foundation::time::FrameClock;
use crate::physics::{InteractionEngine, InteractionReport};
use crate::render::{
    DepthTest, DrawOutcome, DrawPass, LightingLevel, Player, PngFileSink, RenderBackend,
    RenderError, ScreenshotSink, ShaderSources,
};
use crate::scene::{FrameContext, SceneCommands, SceneRegistry};
use crate::ui::{Hud, MessageTimer, Scoreboard};

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization failed; the engine is unusable
    #[error("Engine initialization failed: {0}")]
    Init(String),

    /// Backend failure during a frame
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Asset system failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Host hook for scheduling the next frame
pub trait FrameScheduler {
    /// Called once at the end of every frame
    fn request_frame(&mut self);
}

/// Scheduler that grants a fixed number of frames
#[derive(Debug, Clone)]
pub struct FixedFrameScheduler {
    budget: u64,
    requested: u64,
}

impl FixedFrameScheduler {
    /// Allow `budget` frames
    pub fn new(budget: u64) -> Self {
        Self { budget, requested: 0 }
    }

    /// Whether the host should run another frame
    pub fn should_continue(&self) -> bool {
        self.requested < self.budget
    }

    /// Frames requested so far
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for FixedFrameScheduler {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

/// Mutable process state owned by the frame loop
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Frame timing
    pub clock: FrameClock,
    /// Day/night level
    pub lighting: LightingLevel,
    /// HUD message countdown
    pub message_timer: MessageTimer,
    /// Outcome tally
    pub scoreboard: Scoreboard,
    screenshot_requested: bool,
    lighting_config: LightingConfig,
}

impl FrameState {
    /// Fresh state for the given lighting settings
    pub fn new(lighting: &LightingConfig) -> Self {
        Self {
            clock: FrameClock::new(),
            lighting: LightingLevel::new(lighting),
            message_timer: MessageTimer::new(),
            scoreboard: Scoreboard::new(),
            screenshot_requested: false,
            lighting_config: lighting.clone(),
        }
    }

    /// Ask for the next frame to be exported
    pub fn request_screenshot(&mut self) {
        self.screenshot_requested = true;
    }

    /// Whether an export is pending
    pub fn screenshot_requested(&self) -> bool {
        self.screenshot_requested
    }

    /// Return to the state at construction
    pub fn reset(&mut self) {
        *self = Self::new(&self.lighting_config);
    }
}

/// Summary of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Frames run so far, this one included
    pub frame: u64,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Lighting level after this frame's update
    pub lighting_level: f32,
    /// Asset loads installed at the start of the frame
    pub assets_installed: usize,
    /// Objects drawn
    pub drawn: usize,
    /// Objects skipped because their mesh was unknown or not loaded, or
    /// because the backend rejected their draw
    pub skipped: usize,
    /// Interaction pass counts
    pub interactions: InteractionReport,
    /// Whether a screenshot was exported
    pub screenshot_exported: bool,
}

/// Main engine struct
///
/// Owns the asset registry, the scene and the frame state. The graphics
/// context, player, HUD and scheduler belong to the host and are lent to
/// each [`frame`](Self::frame) call.
pub struct Engine {
    config: ApplicationConfig,
    assets: AssetRegistry,
    scene: SceneRegistry,
    state: FrameState,
    interactions: InteractionEngine,
    commands: SceneCommands,
    screenshot_sink: Box<dyn ScreenshotSink>,
}

impl Engine {
    /// Create an engine and compile its shader program.
    ///
    /// A surface with no pixels or a program that fails to compile or link is
    /// fatal.
    pub fn new(
        config: ApplicationConfig,
        backend: &mut dyn RenderBackend,
        shaders: &ShaderSources,
    ) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let (width, height) = backend.extent();
        if width == 0 || height == 0 {
            log::error!("Rendering surface is {width}x{height}");
            return Err(EngineError::Init(format!("rendering surface is {width}x{height}")));
        }

        backend.create_program(shaders).map_err(|e| {
            log::error!("Shader program failed: {e}");
            EngineError::Init(e.to_string())
        })?;

        let assets = AssetRegistry::new(&config.assets);
        let screenshot_sink = Box::new(PngFileSink::new(".", &config.renderer.screenshot_file));
        let state = FrameState::new(&config.engine.lighting);

        log::info!("Engine ready ({width}x{height})");
        Ok(Self {
            config,
            assets,
            scene: SceneRegistry::new(),
            state,
            interactions: InteractionEngine::new(),
            commands: SceneCommands::new(),
            screenshot_sink,
        })
    }

    /// Builder pattern: replace the asset registry
    pub fn with_assets(mut self, assets: AssetRegistry) -> Self {
        self.assets = assets;
        self
    }

    /// Builder pattern: replace the screenshot destination
    pub fn with_screenshot_sink(mut self, sink: Box<dyn ScreenshotSink>) -> Self {
        self.screenshot_sink = sink;
        self
    }

    /// Run one frame at host time `timestamp_ms`
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        backend: &mut dyn RenderBackend,
        player: &mut dyn Player,
        hud: &mut dyn Hud,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<FrameReport, EngineError> {
        let assets_installed = self.assets.poll(backend);

        let delta_time = self.state.clock.tick(timestamp_ms);
        self.state.lighting.update(delta_time);
        if self.state.message_timer.update(delta_time) {
            hud.hide_message();
        }
        if let Some(fps) = self.state.clock.current_fps() {
            hud.show_frame_rate(fps);
        }

        let clear_color = self.state.lighting.clear_color(self.config.renderer.clear_weights);
        backend.begin_frame(clear_color, DepthTest::LessOrEqual)?;

        player.tick(delta_time);
        let projection = player.projection_matrix();

        let lighting_level = self.state.lighting.level();
        {
            let mut ctx = FrameContext::new(
                delta_time,
                lighting_level,
                &mut *hud,
                &mut self.state.message_timer,
                &mut self.state.scoreboard,
                &mut self.commands,
            );
            for id in self.scene.ids() {
                if let Some(object) = self.scene.get_by_id_mut(id) {
                    object.tick(id, &mut ctx);
                }
            }
        }
        self.scene.apply(&mut self.commands);

        let interactions = {
            let mut ctx = FrameContext::new(
                delta_time,
                lighting_level,
                &mut *hud,
                &mut self.state.message_timer,
                &mut self.state.scoreboard,
                &mut self.commands,
            );
            self.interactions.run(&mut self.scene, &mut ctx)
        };
        self.scene.apply(&mut self.commands);

        let (mut drawn, mut skipped) = (0, 0);
        for (id, object) in self.scene.iter() {
            match DrawPass::draw(backend, &self.assets, object, &projection, &self.state.lighting) {
                Ok(DrawOutcome::Drawn { .. }) => drawn += 1,
                Ok(DrawOutcome::Skipped(_)) => skipped += 1,
                Err(e) => {
                    log::warn!("Skipping {id:?} ('{}') this frame: {e}", object.mesh_name());
                    skipped += 1;
                }
            }
        }

        let screenshot_exported = self.state.screenshot_requested && self.export_screenshot(backend)?;

        scheduler.request_frame();

        let report = FrameReport {
            frame: self.state.clock.frame_count(),
            delta_time,
            lighting_level,
            assets_installed,
            drawn,
            skipped,
            interactions,
            screenshot_exported,
        };
        log::trace!("Frame {report:?}");
        Ok(report)
    }

    fn export_screenshot(&mut self, backend: &mut dyn RenderBackend) -> Result<bool, EngineError> {
        self.state.screenshot_requested = false;
        let capture = backend.read_pixels()?;
        match self.screenshot_sink.export(&capture) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("Screenshot export failed: {e}");
                Ok(false)
            }
        }
    }

    /// Export the frame buffer at the end of the next frame
    pub fn request_screenshot(&mut self) {
        self.state.request_screenshot();
    }

    /// Clear the scene and return frame state to its initial values.
    ///
    /// Loaded assets are kept.
    pub fn reset(&mut self) {
        log::info!("Resetting engine state");
        self.scene.clear();
        self.commands = SceneCommands::new();
        self.state.reset();
    }

    /// Engine configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Asset registry
    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    /// Mutable asset registry
    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    /// Live scene objects
    pub fn scene(&self) -> &SceneRegistry {
        &self.scene
    }

    /// Mutable scene objects
    pub fn scene_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scene
    }

    /// Frame state
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Mutable frame state
    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }
}
