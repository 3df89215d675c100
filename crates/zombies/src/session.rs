//! Game session
//!
//! Owns the game rules around an [`Engine`]: what gets loaded, where zombies
//! stand, throwing, and the game-over flow.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scene_engine::foundation::math::{EulerAngles, Transform, Vec3};
use scene_engine::render::RenderBackend;
use scene_engine::scene::{ObjectId, Prop};
use scene_engine::Engine;

use crate::config::GameConfig;
use crate::player::PlayerCamera;
use crate::projectile::Projectile;
use crate::zombie::{Zombie, ZombieState, KILL_OUTCOME};
use crate::GameError;

/// Asks whether to play another round
pub trait RestartPrompt {
    /// Show the final tally and return `true` to restart
    fn confirm_restart(&mut self, kills: u32, zombies: u32) -> bool;
}

/// Prompt with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt {
    /// Answer given to every prompt
    pub restart: bool,
}

impl RestartPrompt for AutoPrompt {
    fn confirm_restart(&mut self, kills: u32, zombies: u32) -> bool {
        log::info!(
            "Game over: {kills}/{zombies} zombies down, {}",
            if self.restart { "restarting" } else { "not restarting" }
        );
        self.restart
    }
}

/// Result of [`GameSession::game_over`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    /// Zombies knocked down this round
    pub kills: u32,
    /// Zombies placed this round
    pub zombies: u32,
    /// Whether a new round was started
    pub restarted: bool,
}

/// One game on top of an engine
pub struct GameSession {
    config: GameConfig,
    zombies: Vec<ObjectId>,
    rounds: u32,
}

impl GameSession {
    /// Create a session; fails on unusable configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            zombies: Vec::new(),
            rounds: 0,
        })
    }

    /// Game configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start loading every asset in the manifest.
    ///
    /// Files that are missing or broken simply never become ready.
    pub fn register_assets(&self, engine: &mut Engine, backend: &mut dyn RenderBackend) -> Result<(), GameError> {
        let manifest = &self.config.assets;
        let assets = engine.assets_mut();
        assets.load_all(&manifest.meshes(), std::slice::from_ref(&manifest.zombie_walk));
        assets.load_textures(backend, &manifest.textures())?;
        log::info!("Registered assets: {:?}", assets.stats());
        Ok(())
    }

    /// Place scenery and a fresh set of zombies
    pub fn start_round(&mut self, engine: &mut Engine) {
        let gameplay = &self.config.gameplay;
        let manifest = &self.config.assets;
        let scene = engine.scene_mut();

        for scenery in &manifest.scenery {
            let mut prop = Prop::new(scenery.name.clone(), Transform::identity());
            if manifest.scenery_textures.iter().any(|t| t.name == scenery.name) {
                prop = prop.with_texture(scenery.name.clone());
            }
            scene.add(Box::new(prop));
        }

        let mut rng = StdRng::seed_from_u64(gameplay.spawn_seed.wrapping_add(u64::from(self.rounds)));
        let half_spread = gameplay.spawn_spread * 0.5;
        self.zombies = (0..gameplay.zombie_count)
            .map(|_| {
                let x = if half_spread > 0.0 {
                    rng.gen_range(-half_spread..=half_spread)
                } else {
                    0.0
                };
                let facing = EulerAngles::new(rng.gen_range(-0.3..=0.3), 0.0, 0.0);
                let transform = Transform::from_position(Vec3::new(x, 0.0, -gameplay.spawn_distance))
                    .with_rotation(facing);
                let mut zombie = Zombie::new(
                    manifest.zombie_walk.name.clone(),
                    manifest.zombie_walk.frame_count,
                    transform,
                    gameplay,
                );
                if let Some(texture) = &manifest.zombie_texture {
                    zombie = zombie.with_texture(texture.name.clone());
                }
                scene.add(Box::new(zombie))
            })
            .collect();

        self.rounds += 1;
        log::info!("Round {} started with {} zombies", self.rounds, self.zombies.len());
    }

    /// Throw a projectile from the player's eye along the view direction
    pub fn throw_projectile(&self, engine: &mut Engine, player: &PlayerCamera) -> ObjectId {
        let gameplay = &self.config.gameplay;
        let projectile = Projectile::new(
            self.config.assets.projectile.name.clone(),
            player.eye(),
            player.forward() * gameplay.projectile_speed,
            gameplay.projectile_lifetime,
            gameplay.projectile_radius,
        );
        let id = engine.scene_mut().add(Box::new(projectile));
        log::debug!("Threw projectile {id:?}");
        id
    }

    /// Zombies knocked down since the last reset
    pub fn kill_count(&self, engine: &Engine) -> u32 {
        engine.state().scoreboard.count(KILL_OUTCOME)
    }

    /// Ids of this round's zombies
    pub fn zombies(&self) -> &[ObjectId] {
        &self.zombies
    }

    /// State of each of this round's zombies, in spawn order
    pub fn zombie_states(&self, engine: &Engine) -> Vec<ZombieState> {
        self.zombies
            .iter()
            .filter_map(|id| engine.scene().get_as::<Zombie>(*id))
            .map(Zombie::state)
            .collect()
    }

    /// Rounds started so far
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// End the round: report the tally and restart on confirmation.
    ///
    /// A restart resets the whole engine state (scene, lighting, timers and
    /// tally) and places a new round; loaded assets are kept.
    pub fn game_over(&mut self, engine: &mut Engine, prompt: &mut dyn RestartPrompt) -> GameOverReport {
        let kills = self.kill_count(engine);
        let zombies = u32::try_from(self.zombies.len()).unwrap_or(u32::MAX);
        let restarted = prompt.confirm_restart(kills, zombies);

        if restarted {
            engine.reset();
            self.start_round(engine);
        }

        GameOverReport {
            kills,
            zombies,
            restarted,
        }
    }
}
