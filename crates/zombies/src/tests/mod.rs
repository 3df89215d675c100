//! Whole-game scenarios run through the engine's frame loop

use scene_engine::prelude::*;
use scene_engine::render::backends::headless::HeadlessBackend;

use crate::{GameConfig, GameSession, GameplayConfig, PlayerCamera, Projectile, ZombieState};

#[derive(Default)]
struct TitleHud {
    shown: Vec<String>,
    hidden: u32,
}

impl Hud for TitleHud {
    fn show_message(&mut self, title: &str, _body: &str, _duration_seconds: f32) {
        self.shown.push(title.to_string());
    }

    fn hide_message(&mut self) {
        self.hidden += 1;
    }
}

struct Game {
    session: GameSession,
    engine: Engine,
    backend: HeadlessBackend,
    player: PlayerCamera,
    hud: TitleHud,
    scheduler: FixedFrameScheduler,
    frame: u32,
}

impl Game {
    /// One zombie straight ahead of a player standing at ground level
    fn single_zombie() -> Self {
        let gameplay = GameplayConfig {
            zombie_count: 1,
            spawn_spread: 0.0,
            ..GameplayConfig::default()
        };
        let config = GameConfig {
            gameplay,
            ..GameConfig::default()
        };
        let mut backend = HeadlessBackend::new(8, 8).expect("backend");
        let mut engine = Engine::new(
            ApplicationConfig::default(),
            &mut backend,
            &ShaderSources::new("vs", "fs"),
        )
        .expect("engine");
        let mut session = GameSession::new(config).expect("session");
        session.start_round(&mut engine);

        Self {
            session,
            engine,
            backend,
            player: PlayerCamera::new(Vec3::zeros(), 1.0),
            hud: TitleHud::default(),
            scheduler: FixedFrameScheduler::new(u64::MAX),
            frame: 0,
        }
    }

    fn run(&mut self, frames: u32) {
        for _ in 0..frames {
            let timestamp = f64::from(self.frame) * 1000.0 / 60.0;
            self.engine
                .frame(
                    timestamp,
                    &mut self.backend,
                    &mut self.player,
                    &mut self.hud,
                    &mut self.scheduler,
                )
                .expect("frame");
            self.frame += 1;
        }
    }

    fn zombie_state(&self) -> ZombieState {
        self.session.zombie_states(&self.engine)[0]
    }
}

#[test]
fn thrown_projectile_knocks_zombie_down_then_it_dies() {
    let mut game = Game::single_zombie();
    game.run(1);
    let projectile = game.session.throw_projectile(&mut game.engine, &game.player);

    // 12 units at 20 per second
    game.run(40);
    assert_eq!(game.zombie_state(), ZombieState::Hit);
    assert!(!game.engine.scene().contains(projectile));
    assert_eq!(game.session.kill_count(&game.engine), 1);
    assert_eq!(game.hud.shown, vec!["Zombie down!".to_string()]);

    game.run(60);
    assert_eq!(game.zombie_state(), ZombieState::Dead);
    // dead zombies stay in the scene
    assert_eq!(game.engine.scene().get_by_mesh_name("zombie").len(), 1);

    game.run(80);
    assert_eq!(game.hud.hidden, 1);
    assert_eq!(game.session.kill_count(&game.engine), 1);
}

#[test]
fn missed_projectile_expires_and_zombie_keeps_walking() {
    let mut game = Game::single_zombie();
    game.player.look(std::f32::consts::PI, 0.0);
    game.run(1);
    let projectile = game.session.throw_projectile(&mut game.engine, &game.player);

    game.run(60);
    assert!(game
        .engine
        .scene()
        .get_as::<Projectile>(projectile)
        .is_some_and(|p| p.lifetime() > 0.0));

    game.run(70);
    assert!(!game.engine.scene().contains(projectile));
    assert_eq!(game.zombie_state(), ZombieState::Alive);
    assert_eq!(game.session.kill_count(&game.engine), 0);
    assert!(game.hud.shown.is_empty());
}
