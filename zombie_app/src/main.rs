//! Headless zombie demo
//!
//! Loads `engine.toml` and `zombies.toml` when present, plays a scripted
//! round against the headless backend with synthetic 60 Hz timestamps, throws
//! at each standing zombie in turn, saves a screenshot of the last frame and
//! reports the tally.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use scene_engine::assets::{AssetRegistry, ImageData, MemoryImageSource, MemoryMeshSource, MeshData};
use scene_engine::core::{ApplicationConfig, Config, ConfigError};
use scene_engine::foundation::logging;
use scene_engine::foundation::math::Vec3;
use scene_engine::render::{HeadlessBackend, RenderError, ShaderSources};
use scene_engine::scene::SceneObject;
use scene_engine::ui::LogHud;
use scene_engine::{Engine, EngineError, FixedFrameScheduler};
use zombies::{AutoPrompt, GameConfig, GameError, GameOverReport, GameSession, PlayerCamera, Zombie, ZombieState};

/// Frames in the scripted round (10 s at 60 Hz)
const FRAMES: u64 = 600;

/// Frames between throws
const THROW_INTERVAL: u64 = 45;

const FRAME_MS: f64 = 1000.0 / 60.0;

const VERTEX_SHADER: &str = "
    attribute vec3 position;
    attribute vec2 texcoord;
    attribute vec3 normal;
    uniform mat4 projection, model, normal_matrix;
    varying vec2 v_texcoord;
    varying vec3 v_normal;
    void main() {
        v_texcoord = texcoord;
        v_normal = (normal_matrix * vec4(normal, 0.0)).xyz;
        gl_Position = projection * model * vec4(position, 1.0);
    }
";

const FRAGMENT_SHADER: &str = "
    precision mediump float;
    uniform sampler2D sampler;
    uniform vec3 light_direction;
    uniform bool use_texture;
    varying vec2 v_texcoord;
    varying vec3 v_normal;
    void main() {
        float light = 0.3 + 0.7 * max(dot(normalize(v_normal), normalize(light_direction)), 0.0);
        vec4 base = use_texture ? texture2D(sampler, v_texcoord) : vec4(0.6, 0.6, 0.6, 1.0);
        gl_FragColor = vec4(base.rgb * light, base.a);
    }
";

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Game(#[from] GameError),
}

struct ZombieApp {
    engine: Engine,
    backend: HeadlessBackend,
    session: GameSession,
    player: PlayerCamera,
    hud: LogHud,
    scheduler: FixedFrameScheduler,
    next_target: usize,
}

impl ZombieApp {
    fn new(app_config: ApplicationConfig, game_config: GameConfig) -> Result<Self, AppError> {
        let (width, height) = (app_config.renderer.width, app_config.renderer.height);
        let mut backend = HeadlessBackend::new(width, height)?;

        let assets = asset_registry(&app_config, &game_config);
        let shaders = ShaderSources::new(VERTEX_SHADER, FRAGMENT_SHADER);
        let mut engine = Engine::new(app_config, &mut backend, &shaders)?.with_assets(assets);

        let eye = Vec3::new(0.0, game_config.gameplay.eye_height, 0.0);
        #[allow(clippy::cast_precision_loss)]
        let player = PlayerCamera::new(eye, width as f32 / height as f32);

        let mut session = GameSession::new(game_config)?;
        session.register_assets(&mut engine, &mut backend)?;
        session.start_round(&mut engine);

        Ok(Self {
            engine,
            backend,
            session,
            player,
            hud: LogHud::new(),
            scheduler: FixedFrameScheduler::new(FRAMES),
            next_target: 0,
        })
    }

    fn run(&mut self) -> Result<GameOverReport, AppError> {
        let mut timestamp = 0.0;
        while self.scheduler.should_continue() {
            let frame = self.scheduler.requested();
            if frame > 0 && frame % THROW_INTERVAL == 0 {
                self.throw_at_next_zombie();
            }
            if frame + 1 == FRAMES {
                self.engine.request_screenshot();
            }

            let report = self.engine.frame(
                timestamp,
                &mut self.backend,
                &mut self.player,
                &mut self.hud,
                &mut self.scheduler,
            )?;
            if report.assets_installed > 0 {
                log::info!("Frame {}: {:?}", report.frame, self.engine.assets().stats());
            }
            if report.screenshot_exported {
                log::info!("Saved {}", self.engine.config().renderer.screenshot_file);
            }
            timestamp += FRAME_MS;
        }

        log::info!("Draw calls issued: {}", self.backend.draw_call_count());
        Ok(self
            .session
            .game_over(&mut self.engine, &mut AutoPrompt { restart: false }))
    }

    /// Aim at the next zombie still standing and throw
    fn throw_at_next_zombie(&mut self) {
        let zombies = self.session.zombies();
        let target = (0..zombies.len())
            .map(|offset| (self.next_target + offset) % zombies.len())
            .find_map(|index| {
                let zombie = self.engine.scene().get_as::<Zombie>(zombies[index])?;
                (zombie.state() == ZombieState::Alive).then(|| (index, zombie.transform().position))
            });

        let Some((index, position)) = target else {
            log::debug!("Nothing left standing to throw at");
            return;
        };
        self.next_target = index + 1;

        let to_target = position - self.player.eye();
        let yaw = (-to_target.x).atan2(-to_target.z);
        let pitch = to_target.y.atan2(to_target.x.hypot(to_target.z));
        self.player.look(yaw, pitch);
        self.session.throw_projectile(&mut self.engine, &self.player);
    }
}

/// Registry reading from the configured asset directory, or stand-in cubes
/// when that directory does not exist
fn asset_registry(app_config: &ApplicationConfig, game_config: &GameConfig) -> AssetRegistry {
    let config = &app_config.assets;
    let dir = Path::new(&config.assets_dir);
    if dir.is_dir() {
        return AssetRegistry::new(config);
    }

    log::warn!("Asset directory '{}' not found, using stand-in cubes", dir.display());
    let manifest = &game_config.assets;
    let walk = &manifest.zombie_walk;
    let mesh_paths = manifest
        .meshes()
        .into_iter()
        .map(|mesh| mesh.path)
        .chain((1..=walk.frame_count).map(|frame| walk.frame_path(frame)));
    let meshes = mesh_paths.fold(MemoryMeshSource::new(), |source, path| {
        source.with_mesh(dir.join(path), MeshData::unit_cube())
    });
    let images = manifest.textures().into_iter().fold(MemoryImageSource::new(), |source, texture| {
        source.with_image(dir.join(&texture.path), ImageData::solid_color(2, 2, [90, 140, 60, 255]))
    });

    AssetRegistry::with_sources(config, Arc::new(meshes), Arc::new(images))
}

fn run() -> Result<GameOverReport, AppError> {
    let app_config = ApplicationConfig::load_or_default("engine.toml")?;
    logging::init(&app_config.engine.log_level);
    log::info!("Starting zombie demo");

    let game_config = GameConfig::load_or_default("zombies.toml")?;
    ZombieApp::new(app_config, game_config)?.run()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match run() {
        Ok(report) => {
            log::info!(
                "Demo finished: {} of {} zombies down after {} frames",
                report.kills,
                report.zombies,
                FRAMES
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Demo failed: {e}");
            Err(e.into())
        }
    }
}
