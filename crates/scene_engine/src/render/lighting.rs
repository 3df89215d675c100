//! Day/night lighting level
//!
//! A single scalar in [0, 1] drives both the frame clear color and the
//! direction of the scene light.

use serde::{Deserialize, Serialize};

use crate::core::LightingConfig;
use crate::foundation::math::Vec3;

/// Direction the lighting level moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingMode {
    /// Brighten toward 1
    Day,
    /// Darken toward 0
    Night,
}

/// Process-wide lighting level
#[derive(Debug, Clone)]
pub struct LightingLevel {
    level: f32,
    rate: f32,
    mode: LightingMode,
}

impl LightingLevel {
    /// Create a lighting level from configuration
    pub fn new(config: &LightingConfig) -> Self {
        Self {
            level: config.initial_level.clamp(0.0, 1.0),
            rate: config.rate,
            mode: config.mode,
        }
    }

    /// Current level in [0, 1]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Current mode
    pub fn mode(&self) -> LightingMode {
        self.mode
    }

    /// Select the direction the level moves in
    pub fn set_mode(&mut self, mode: LightingMode) {
        self.mode = mode;
    }

    /// Advance by `delta_time` seconds.
    ///
    /// The level only moves while strictly inside the bound it is heading
    /// for, and a step that would pass the bound stops on it.
    pub fn update(&mut self, delta_time: f32) {
        let step = self.rate * delta_time.max(0.0);
        match self.mode {
            LightingMode::Day if self.level < 1.0 => {
                self.level = (self.level + step).min(1.0);
            }
            LightingMode::Night if self.level > 0.0 => {
                self.level = (self.level - step).max(0.0);
            }
            _ => {}
        }
    }

    /// Frame clear color: each weight scaled by the level, opaque alpha
    pub fn clear_color(&self, weights: [f32; 3]) -> [f32; 4] {
        [
            weights[0] * self.level,
            weights[1] * self.level,
            weights[2] * self.level,
            1.0,
        ]
    }

    /// Light direction uniform: `(1 - level, level, level)`
    pub fn light_direction(&self) -> Vec3 {
        Vec3::new(1.0 - self.level, self.level, self.level)
    }
}

impl Default for LightingLevel {
    fn default() -> Self {
        Self::new(&LightingConfig::default())
    }
}
