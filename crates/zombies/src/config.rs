//! Game configuration
//!
//! Gameplay tuning plus the asset manifest, loadable from TOML or RON through
//! the engine's [`Config`] trait.

use serde::{Deserialize, Serialize};

use scene_engine::assets::{AnimatedMeshDescriptor, MeshDescriptor, TextureDescriptor};
use scene_engine::core::{Config, ConfigError};

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// What to load and under which names
    pub assets: AssetManifest,
}

impl GameConfig {
    /// Check values the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gameplay = &self.gameplay;
        if !(gameplay.fall_rate.is_finite() && gameplay.fall_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gameplay.fall_rate must be positive, got {}",
                gameplay.fall_rate
            )));
        }
        if gameplay.walk_frame_seconds <= 0.0 {
            return Err(ConfigError::Invalid("gameplay.walk_frame_seconds must be positive".to_string()));
        }
        if gameplay.projectile_lifetime <= 0.0 {
            return Err(ConfigError::Invalid("gameplay.projectile_lifetime must be positive".to_string()));
        }
        if gameplay.zombie_radius < 0.0 || gameplay.projectile_radius < 0.0 {
            return Err(ConfigError::Invalid("hit radii cannot be negative".to_string()));
        }

        let walk = &self.assets.zombie_walk;
        if walk.frame_count == 0 {
            return Err(ConfigError::Invalid(format!("'{}' needs at least one frame", walk.name)));
        }
        Ok(())
    }
}

impl Config for GameConfig {}

/// Gameplay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Zombies placed at the start of a round
    pub zombie_count: u32,

    /// Distance from the player at which zombies stand
    pub spawn_distance: f32,

    /// Width of the line zombies are scattered along
    pub spawn_spread: f32,

    /// Seed for spawn placement
    pub spawn_seed: u64,

    /// Proximity radius of a zombie
    pub zombie_radius: f32,

    /// Fall speed numerator: yaw grows by `fall_rate / delta_time` per frame
    pub fall_rate: f32,

    /// Seconds each walk frame is shown
    pub walk_frame_seconds: f32,

    /// Projectile speed (units per second)
    pub projectile_speed: f32,

    /// Projectile lifetime (seconds)
    pub projectile_lifetime: f32,

    /// Proximity radius of a projectile
    pub projectile_radius: f32,

    /// Height of the player's eye above the ground
    pub eye_height: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            zombie_count: 5,
            spawn_distance: 12.0,
            spawn_spread: 10.0,
            spawn_seed: 7,
            zombie_radius: 0.8,
            fall_rate: 0.0005,
            walk_frame_seconds: 0.1,
            projectile_speed: 20.0,
            projectile_lifetime: 2.0,
            projectile_radius: 0.3,
            eye_height: 1.7,
        }
    }
}

/// Asset manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Zombie walk cycle
    pub zombie_walk: AnimatedMeshDescriptor,

    /// Texture applied to zombies
    pub zombie_texture: Option<TextureDescriptor>,

    /// Thrown object
    pub projectile: MeshDescriptor,

    /// Static scenery placed once per round at the origin
    pub scenery: Vec<MeshDescriptor>,

    /// Textures applied to scenery, by matching name
    pub scenery_textures: Vec<TextureDescriptor>,
}

impl AssetManifest {
    /// Every static mesh to load
    pub fn meshes(&self) -> Vec<MeshDescriptor> {
        std::iter::once(self.projectile.clone())
            .chain(self.scenery.iter().cloned())
            .collect()
    }

    /// Every texture to load
    pub fn textures(&self) -> Vec<TextureDescriptor> {
        self.zombie_texture
            .iter()
            .chain(&self.scenery_textures)
            .cloned()
            .collect()
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            zombie_walk: AnimatedMeshDescriptor::new("zombie", "zombie/walk_{frame}.obj", 8),
            zombie_texture: Some(TextureDescriptor::new("zombie", "zombie/skin.png")),
            projectile: MeshDescriptor::new("brain", "brain.obj"),
            scenery: vec![MeshDescriptor::new("ground", "ground.obj")],
            scenery_textures: vec![TextureDescriptor::new("ground", "ground.png")],
        }
    }
}
