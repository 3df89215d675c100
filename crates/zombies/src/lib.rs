//! # Zombies
//!
//! Throw things at zombies until they fall over. Game rules on top of
//! `scene_engine`: the zombie state machine, projectiles, the player view and
//! the round/game-over flow.

#![warn(missing_docs)]

pub mod config;
pub mod player;
pub mod projectile;
pub mod session;
pub mod zombie;

#[cfg(test)]
mod tests;

pub use config::{AssetManifest, GameConfig, GameplayConfig};
pub use player::PlayerCamera;
pub use projectile::Projectile;
pub use session::{AutoPrompt, GameOverReport, GameSession, RestartPrompt};
pub use zombie::{Zombie, ZombieState, KILL_OUTCOME};

use thiserror::Error;

use scene_engine::assets::AssetError;
use scene_engine::core::ConfigError;
use scene_engine::EngineError;

/// Game errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Asset registration failed
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Engine failure
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
