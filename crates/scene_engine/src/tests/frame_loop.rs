//! Frame ordering, timing and per-frame bookkeeping

use super::*;
use crate::assets::{MeshData, MeshDescriptor};
use crate::foundation::math::{Transform, Vec3};
use crate::render::backend::{DepthTest, Uniform};
use crate::render::backends::headless::Command;
use crate::scene::Prop;
use crate::{FixedFrameScheduler, FrameScheduler};
use approx::assert_relative_eq;

fn cube_engine(backend: &mut HeadlessBackend, sink: MemorySink) -> Engine {
    let meshes = MemoryMeshSource::new().with_mesh("cube.obj", MeshData::unit_cube());
    let mut engine = engine(backend, meshes, sink);
    engine
        .assets_mut()
        .load_all(&[MeshDescriptor::new("cube", "cube.obj")], &[]);
    settle(&mut engine, backend);
    engine
}

#[test]
fn first_frame_has_zero_delta_then_follows_timestamps() {
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(10);

    let first = engine
        .frame(5000.0, &mut backend, &mut player, &mut hud, &mut scheduler)
        .expect("frame");
    let second = engine
        .frame(5000.0 + 1000.0 / 60.0, &mut backend, &mut player, &mut hud, &mut scheduler)
        .expect("frame");

    assert_eq!(first.delta_time, 0.0);
    assert_relative_eq!(second.delta_time, 1.0 / 60.0, epsilon = 1e-4);
    assert_eq!(player.ticks.len(), 2);
    assert_eq!(hud.frame_rates.len(), 1);
    assert_relative_eq!(hud.frame_rates[0], 60.0, epsilon = 0.1);
    assert_eq!(scheduler.requested(), 2);
}

#[test]
fn clear_precedes_draws_and_uses_lighting_level() {
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    engine
        .scene_mut()
        .add(Box::new(Prop::new("cube", Transform::from_position(Vec3::new(0.0, 0.0, -2.0)))));
    backend.take_commands();

    let report = engine
        .frame(
            0.0,
            &mut backend,
            &mut StillPlayer::default(),
            &mut RecordingHud::default(),
            &mut FixedFrameScheduler::new(1),
        )
        .expect("frame");
    assert_eq!(report.drawn, 1);

    let commands = backend.commands();
    assert_eq!(
        commands.first(),
        Some(&Command::BeginFrame {
            clear_color: [0.5, 0.6, 1.0, 1.0],
            depth_test: DepthTest::LessOrEqual,
        })
    );
    assert!(commands.contains(&Command::SetUniform(Uniform::Projection(Mat4::identity()))));
    assert_eq!(commands.last(), Some(&Command::DrawIndexed { index_count: 36 }));
}

#[test]
fn objects_draw_in_insertion_order() {
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    let positions = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
    for position in positions {
        engine
            .scene_mut()
            .add(Box::new(Prop::new("cube", Transform::from_position(position))));
    }
    backend.take_commands();

    engine
        .frame(
            0.0,
            &mut backend,
            &mut StillPlayer::default(),
            &mut RecordingHud::default(),
            &mut FixedFrameScheduler::new(1),
        )
        .expect("frame");

    let models: Vec<Mat4> = backend
        .commands()
        .iter()
        .filter_map(|command| match command {
            Command::SetUniform(Uniform::Model(model)) => Some(*model),
            _ => None,
        })
        .collect();
    let expected: Vec<Mat4> = positions
        .iter()
        .map(|p| Transform::from_position(*p).to_matrix())
        .collect();
    assert_eq!(models, expected);
}

#[test]
fn message_is_hidden_when_its_timer_runs_out() {
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    let mut shown = false;
    engine.scene_mut().add(Box::new(Prop::new("cube", Transform::identity()).with_hook(
        move |_, _, ctx| {
            if !shown {
                ctx.show_message("Hello", "world", 0.05);
                shown = true;
            }
        },
    )));

    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(10);
    for n in 0..5 {
        engine
            .frame(at_60hz(n), &mut backend, &mut player, &mut hud, &mut scheduler)
            .expect("frame");
    }

    // 50 ms runs out within four 60 Hz frames and is hidden exactly once
    assert_eq!(hud.events, vec![HudEvent::Show("Hello".to_string()), HudEvent::Hide]);
    assert_eq!(engine.state().message_timer.remaining_ms(), 0.0);
}

#[test]
fn screenshot_is_exported_once_per_request() {
    let sink = MemorySink::default();
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, sink.clone());
    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(10);

    engine.request_screenshot();
    let first = engine
        .frame(0.0, &mut backend, &mut player, &mut hud, &mut scheduler)
        .expect("frame");
    let second = engine
        .frame(at_60hz(1), &mut backend, &mut player, &mut hud, &mut scheduler)
        .expect("frame");

    assert!(first.screenshot_exported);
    assert!(!second.screenshot_exported);
    assert!(!engine.state().screenshot_requested());

    let captures = sink.captures.borrow();
    assert_eq!(captures.len(), 1);
    assert_eq!((captures[0].width, captures[0].height), (4, 4));
    // full daylight clear color (0.5, 0.6, 1.0)
    assert_eq!(&captures[0].rgba[0..4], &[128, 153, 255, 255]);
}

#[test]
fn lighting_darkens_under_night_mode() {
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    engine
        .state_mut()
        .lighting
        .set_mode(crate::render::LightingMode::Night);
    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(10);

    let mut previous = 1.0;
    for n in 0..4 {
        let report = engine
            .frame(at_60hz(n) * 60.0, &mut backend, &mut player, &mut hud, &mut scheduler)
            .expect("frame");
        assert!(report.lighting_level <= previous);
        previous = report.lighting_level;
    }
    // three one-second steps at the default rate of 0.1 per second
    assert_relative_eq!(previous, 0.7, epsilon = 1e-4);
}

#[test]
fn scheduler_is_asked_for_every_frame() {
    struct Counting(u32);
    impl FrameScheduler for Counting {
        fn request_frame(&mut self) {
            self.0 += 1;
        }
    }

    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    let mut scheduler = Counting(0);
    for n in 0..3 {
        engine
            .frame(
                at_60hz(n),
                &mut backend,
                &mut StillPlayer::default(),
                &mut RecordingHud::default(),
                &mut scheduler,
            )
            .expect("frame");
    }
    assert_eq!(scheduler.0, 3);
}

#[test]
fn rejected_draw_skips_only_that_object() {
    let sink = MemorySink::default();
    let mut backend = FaultyBackend::new(backend());
    let mut engine = cube_engine(&mut backend.inner, sink.clone());
    for x in [-1.0, 1.0] {
        engine
            .scene_mut()
            .add(Box::new(Prop::new("cube", Transform::from_position(Vec3::new(x, 0.0, -3.0)))));
    }
    backend.fail_draw = Some(0);
    engine.request_screenshot();

    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(10);
    let report = engine
        .frame(0.0, &mut backend, &mut player, &mut hud, &mut scheduler)
        .expect("a failed draw does not fail the frame");

    assert_eq!((report.drawn, report.skipped), (1, 1));
    assert_eq!(backend.inner.draw_call_count(), 1);
    assert!(report.screenshot_exported);
    assert_eq!(sink.captures.borrow().len(), 1);
    assert_eq!(scheduler.requested(), 1);
}

#[test]
fn zero_length_message_is_hidden_next_frame() {
    let mut backend = backend();
    let mut engine = cube_engine(&mut backend, MemorySink::default());
    let mut shown = false;
    engine.scene_mut().add(Box::new(Prop::new("cube", Transform::identity()).with_hook(
        move |_, _, ctx| {
            if !shown {
                ctx.show_message("Blink", "", 0.0);
                shown = true;
            }
        },
    )));

    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(10);
    for n in 0..2 {
        engine
            .frame(at_60hz(n), &mut backend, &mut player, &mut hud, &mut scheduler)
            .expect("frame");
    }

    assert_eq!(hud.events, vec![HudEvent::Show("Blink".to_string()), HudEvent::Hide]);
    assert!(!engine.state().message_timer.is_active());
}
