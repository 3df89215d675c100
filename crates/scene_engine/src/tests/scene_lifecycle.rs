//! Object removal, partially loaded assets, interactions and reset inside
//! full frames

use std::any::Any;

use super::*;
use crate::assets::{AnimatedMeshDescriptor, MeshData, MeshDescriptor};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::{BoundingSphere, HitInfo, Hittable};
use crate::render::backends::headless::Command;
use crate::scene::{AnimatedProp, FrameContext, ObjectId, Prop, SceneObject};
use crate::FixedFrameScheduler;

/// Hittable that counts its ticks and reactions
struct Probe {
    transform: Transform,
    ticks: u32,
    hits: Vec<ObjectId>,
}

impl Probe {
    fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ticks: 0,
            hits: Vec::new(),
        }
    }
}

impl SceneObject for Probe {
    fn transform(&self) -> &Transform {
        &self.transform
    }
    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
    fn mesh_name(&self) -> &str {
        "cube"
    }
    fn tick(&mut self, _id: ObjectId, _ctx: &mut FrameContext<'_>) {
        self.ticks += 1;
    }
    fn as_hittable(&self) -> Option<&dyn Hittable> {
        Some(self)
    }
    fn as_hittable_mut(&mut self) -> Option<&mut dyn Hittable> {
        Some(self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Hittable for Probe {
    fn hit_volume(&self) -> BoundingSphere {
        BoundingSphere::new(self.transform.position, 0.0)
    }
    fn on_hit(&mut self, _me: ObjectId, instigator: &HitInfo, _ctx: &mut FrameContext<'_>) {
        self.hits.push(instigator.id);
    }
}

fn run_frames(engine: &mut Engine, backend: &mut HeadlessBackend, frames: std::ops::Range<u32>) {
    let (mut player, mut hud) = (StillPlayer::default(), RecordingHud::default());
    let mut scheduler = FixedFrameScheduler::new(u64::MAX);
    for n in frames {
        engine
            .frame(at_60hz(n), backend, &mut player, &mut hud, &mut scheduler)
            .expect("frame");
    }
}

fn loaded_engine(backend: &mut HeadlessBackend) -> Engine {
    let meshes = MemoryMeshSource::new().with_mesh("cube.obj", MeshData::unit_cube());
    let mut engine = engine(backend, meshes, MemorySink::default());
    engine
        .assets_mut()
        .load_all(&[MeshDescriptor::new("cube", "cube.obj")], &[]);
    settle(&mut engine, backend);
    engine
}

#[test]
fn coincident_hittables_react_on_first_frame() {
    let mut backend = backend();
    let mut engine = loaded_engine(&mut backend);
    let a = engine.scene_mut().add(Box::new(Probe::at(Vec3::new(1.0, 2.0, 3.0))));
    let b = engine.scene_mut().add(Box::new(Probe::at(Vec3::new(1.0, 2.0, 3.0))));

    run_frames(&mut engine, &mut backend, 0..1);

    let probe_a = engine.scene().get_as::<Probe>(a).expect("a");
    let probe_b = engine.scene().get_as::<Probe>(b).expect("b");
    assert!(probe_a.hits.contains(&b));
    assert!(probe_b.hits.contains(&a));
    assert!(!probe_a.hits.contains(&a));
    assert!(!probe_b.hits.contains(&b));
}

#[test]
fn removed_object_is_not_ticked_tested_or_drawn() {
    let mut backend = backend();
    let mut engine = loaded_engine(&mut backend);
    let keep = engine.scene_mut().add(Box::new(Probe::at(Vec3::zeros())));
    let gone = engine.scene_mut().add(Box::new(Probe::at(Vec3::zeros())));

    run_frames(&mut engine, &mut backend, 0..1);
    assert!(engine.scene_mut().remove(gone).is_some());
    backend.take_commands();
    run_frames(&mut engine, &mut backend, 1..3);

    assert!(engine.scene().get_by_id(gone).is_none());
    assert!(engine.scene().get_by_mesh_name("cube").iter().all(|id| *id == keep));
    let probe = engine.scene().get_as::<Probe>(keep).expect("keep");
    assert_eq!(probe.ticks, 3);
    // two hits from the first frame, none after the removal
    assert_eq!(probe.hits, vec![gone, gone]);
    assert_eq!(backend.draw_call_count(), 2);
}

#[test]
fn object_despawning_itself_mid_tick_is_gone_before_draw() {
    let mut backend = backend();
    let mut engine = loaded_engine(&mut backend);
    engine.scene_mut().add(Box::new(
        Prop::new("cube", Transform::identity()).with_hook(|id, _, ctx| ctx.despawn(id)),
    ));
    let survivor = engine
        .scene_mut()
        .add(Box::new(Prop::new("cube", Transform::identity())));
    backend.take_commands();

    run_frames(&mut engine, &mut backend, 0..1);

    assert_eq!(engine.scene().ids(), vec![survivor]);
    assert_eq!(backend.draw_call_count(), 1);
}

#[test]
fn objects_spawned_by_hooks_join_after_the_pass() {
    let mut backend = backend();
    let mut engine = loaded_engine(&mut backend);
    let mut spawned = false;
    engine.scene_mut().add(Box::new(Prop::new("cube", Transform::identity()).with_hook(
        move |_, _, ctx| {
            if !spawned {
                ctx.spawn(Box::new(Prop::new("cube", Transform::identity())));
                spawned = true;
            }
        },
    )));

    run_frames(&mut engine, &mut backend, 0..1);
    assert_eq!(engine.scene().len(), 2);
}

#[test]
fn unloaded_meshes_are_skipped_without_touching_the_frame() {
    let meshes = MemoryMeshSource::new().with_mesh("walk_1.obj", MeshData::unit_cube());
    let mut backend = backend();
    let mut engine = engine(&mut backend, meshes, MemorySink::default());
    engine.assets_mut().load_all(
        &[MeshDescriptor::new("broken", "broken.obj")],
        &[AnimatedMeshDescriptor::new("walk", "walk_{frame}.obj", 2)],
    );
    settle(&mut engine, &mut backend);

    engine
        .scene_mut()
        .add(Box::new(Prop::new("broken", Transform::identity())));
    engine
        .scene_mut()
        .add(Box::new(Prop::new("never_registered", Transform::identity())));
    let walker = engine
        .scene_mut()
        .add(Box::new(AnimatedProp::new("walk", Transform::identity())));
    backend.take_commands();

    let report = engine
        .frame(
            0.0,
            &mut backend,
            &mut StillPlayer::default(),
            &mut RecordingHud::default(),
            &mut FixedFrameScheduler::new(1),
        )
        .expect("unready assets are not an error");
    assert_eq!((report.drawn, report.skipped), (1, 2));

    // frame 2 never loaded: nothing but the clear
    engine
        .scene_mut()
        .get_as_mut::<AnimatedProp>(walker)
        .expect("walker")
        .set_frame(2);
    backend.take_commands();
    let report = engine
        .frame(
            at_60hz(1),
            &mut backend,
            &mut StillPlayer::default(),
            &mut RecordingHud::default(),
            &mut FixedFrameScheduler::new(1),
        )
        .expect("frame");
    assert_eq!((report.drawn, report.skipped), (0, 3));
    assert!(matches!(backend.commands(), [Command::BeginFrame { .. }]));
}

#[test]
fn reset_clears_scene_and_state_but_keeps_assets() {
    let mut backend = backend();
    let mut engine = loaded_engine(&mut backend);
    engine.scene_mut().add(Box::new(Probe::at(Vec3::zeros())));
    engine.state_mut().scoreboard.record("zombie_killed");
    run_frames(&mut engine, &mut backend, 0..3);

    engine.reset();

    assert!(engine.scene().is_empty());
    assert_eq!(engine.state().scoreboard.count("zombie_killed"), 0);
    assert_eq!(engine.state().clock.frame_count(), 0);
    assert!(engine.assets().buffers("cube", None).is_some());

    // the next frame is treated as the first again
    let report = engine
        .frame(
            99_000.0,
            &mut backend,
            &mut StillPlayer::default(),
            &mut RecordingHud::default(),
            &mut FixedFrameScheduler::new(1),
        )
        .expect("frame");
    assert_eq!(report.delta_time, 0.0);
}
