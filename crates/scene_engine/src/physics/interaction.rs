//! Pairwise interaction pass
//!
//! Runs once per frame after every object has ticked. Each ordered pair
//! (A, B) of distinct hittable objects is tested from A's side; when A's test
//! against B succeeds, A reacts with B as the instigator and then B reacts
//! with A as the instigator. (B, A) is tested on its own later in the same
//! pass, so a symmetric hit runs each reaction once per direction.
//!
//! The pass is O(n²) in the number of hittable objects, which is fine at the
//! scene sizes this engine targets.

use crate::physics::layers::HitLayers;
use crate::physics::primitives::BoundingSphere;
use crate::scene::{FrameContext, ObjectId, SceneRegistry};

/// Snapshot of the other side of a hit, taken before either reaction runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Instigating object
    pub id: ObjectId,
    /// Its layer
    pub layer: HitLayers,
    /// Its proximity volume
    pub volume: BoundingSphere,
}

/// Proximity-test capability of a scene object
pub trait Hittable {
    /// Volume used for proximity tests, in world space
    fn hit_volume(&self) -> BoundingSphere;

    /// Layer this object sits on
    fn hit_layer(&self) -> HitLayers {
        HitLayers::all()
    }

    /// Layers this object reacts to
    fn hit_mask(&self) -> HitLayers {
        HitLayers::all()
    }

    /// Test this object against `other`.
    ///
    /// The default passes when `other`'s layer is in this object's mask and
    /// the two volumes touch.
    fn hit_test(&self, other: &dyn Hittable) -> bool {
        self.hit_mask().reacts_to(other.hit_layer()) && self.hit_volume().intersects(&other.hit_volume())
    }

    /// Reaction to a successful test
    fn on_hit(&mut self, me: ObjectId, instigator: &HitInfo, ctx: &mut FrameContext<'_>);
}

fn snapshot(id: ObjectId, hittable: &dyn Hittable) -> HitInfo {
    HitInfo {
        id,
        layer: hittable.hit_layer(),
        volume: hittable.hit_volume(),
    }
}

/// Counts from one interaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionReport {
    /// Ordered pairs tested
    pub tests: usize,
    /// Tests that succeeded
    pub hits: usize,
}

/// Runs the pairwise proximity pass
#[derive(Debug, Default)]
pub struct InteractionEngine;

impl InteractionEngine {
    /// Create the pass
    pub fn new() -> Self {
        Self
    }

    /// Test every ordered pair of distinct hittable objects and dispatch
    /// reactions.
    ///
    /// Reactions can only queue registry changes through `ctx`, so every
    /// object present when the pass starts stays resolvable until it ends.
    pub fn run(&self, scene: &mut SceneRegistry, ctx: &mut FrameContext<'_>) -> InteractionReport {
        let hittable: Vec<ObjectId> = scene
            .iter()
            .filter(|(_, object)| object.as_hittable().is_some())
            .map(|(id, _)| id)
            .collect();

        let mut report = InteractionReport::default();
        for &a in &hittable {
            for &b in &hittable {
                if a == b {
                    continue;
                }

                report.tests += 1;
                let Some((info_a, info_b)) = Self::test_pair(scene, a, b) else {
                    continue;
                };
                report.hits += 1;
                log::trace!("Hit {a:?} -> {b:?}");

                if let Some(target) = scene.get_by_id_mut(a).and_then(|o| o.as_hittable_mut()) {
                    target.on_hit(a, &info_b, ctx);
                }
                if let Some(target) = scene.get_by_id_mut(b).and_then(|o| o.as_hittable_mut()) {
                    target.on_hit(b, &info_a, ctx);
                }
            }
        }
        report
    }

    /// A's test against B; both snapshots on success
    fn test_pair(scene: &SceneRegistry, a: ObjectId, b: ObjectId) -> Option<(HitInfo, HitInfo)> {
        let hittable_a = scene.get_by_id(a)?.as_hittable()?;
        let hittable_b = scene.get_by_id(b)?.as_hittable()?;

        hittable_a
            .hit_test(hittable_b)
            .then(|| (snapshot(a, hittable_a), snapshot(b, hittable_b)))
    }
}
