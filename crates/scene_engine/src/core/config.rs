//! # Unified Configuration System
//!
//! Configuration for the frame loop, the renderer surface and asset loading,
//! bundled in [`ApplicationConfig`]. All structures are serializable through
//! the [`Config`] trait (TOML or RON).

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::render::lighting::LightingMode;

/// # Lighting Configuration
///
/// Day/night interpolation settings for the process-wide lighting level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Level at startup and after a reset, in [0, 1]
    pub initial_level: f32,
    /// Level change per second
    pub rate: f32,
    /// Direction the level moves in at startup
    pub mode: LightingMode,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            initial_level: 1.0,
            rate: 0.1,
            mode: LightingMode::Day,
        }
    }
}

/// # Engine Configuration
///
/// Core engine behavior: logging and frame-loop state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Lighting level settings
    pub lighting: LightingConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            lighting: LightingConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set lighting configuration
    pub fn with_lighting(mut self, lighting: LightingConfig) -> Self {
        self.lighting = lighting;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Renderer Configuration
///
/// Surface size, frame clear weights and screenshot output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Per-channel weights multiplied by the lighting level for the clear color
    pub clear_weights: [f32; 3],
    /// Fixed file name used when exporting a screenshot
    pub screenshot_file: String,
}

impl RendererConfig {
    /// Set surface size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            clear_weights: [0.5, 0.6, 1.0],
            screenshot_file: "screenshot.png".to_string(),
        }
    }
}

/// # Asset Configuration
///
/// Where assets live and what a texture looks like before it has loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory that relative asset paths are resolved against
    pub assets_dir: String,
    /// RGBA color of the 1x1 placeholder texture
    pub placeholder_color: [u8; 4],
}

impl AssetConfig {
    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            placeholder_color: [0, 0, 255, 255],
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Rendering surface configuration
    pub renderer: RendererConfig,
    /// Asset system configuration
    pub assets: AssetConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lighting = &self.engine.lighting;
        if !(0.0..=1.0).contains(&lighting.initial_level) {
            return Err(ConfigError::Invalid(format!(
                "lighting.initial_level must be in [0, 1], got {}",
                lighting.initial_level
            )));
        }
        if !lighting.rate.is_finite() || lighting.rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "lighting.rate must be a non-negative number, got {}",
                lighting.rate
            )));
        }
        if self.renderer.width == 0 || self.renderer.height == 0 {
            return Err(ConfigError::Invalid("renderer size must be non-zero".to_string()));
        }
        if self.renderer.screenshot_file.is_empty() {
            return Err(ConfigError::Invalid("renderer.screenshot_file cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
