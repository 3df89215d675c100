//! Per-frame context handed to object hooks
//!
//! Object hooks run while the registry is being iterated, so they cannot add
//! or remove objects directly. They queue [`SceneCommands`] instead, which the
//! frame loop applies once the current pass has finished.

use crate::scene::object::{ObjectId, SceneObject};
use crate::ui::{Hud, MessageTimer, Scoreboard};

/// Deferred registry mutations
#[derive(Default)]
pub struct SceneCommands {
    despawn: Vec<ObjectId>,
    spawn: Vec<Box<dyn SceneObject>>,
}

impl SceneCommands {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue removal of an object
    pub fn despawn(&mut self, id: ObjectId) {
        if !self.despawn.contains(&id) {
            self.despawn.push(id);
        }
    }

    /// Queue insertion of an object
    pub fn spawn(&mut self, object: Box<dyn SceneObject>) {
        self.spawn.push(object);
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.despawn.is_empty() && self.spawn.is_empty()
    }

    pub(crate) fn drain(&mut self) -> (Vec<ObjectId>, Vec<Box<dyn SceneObject>>) {
        (std::mem::take(&mut self.despawn), std::mem::take(&mut self.spawn))
    }
}

/// Everything an object hook may read or touch during a frame
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Current lighting level in [0, 1]
    pub lighting_level: f32,
    hud: &'a mut dyn Hud,
    message_timer: &'a mut MessageTimer,
    scoreboard: &'a mut Scoreboard,
    commands: &'a mut SceneCommands,
}

impl<'a> FrameContext<'a> {
    /// Assemble a context from the frame's state
    pub fn new(
        delta_time: f32,
        lighting_level: f32,
        hud: &'a mut dyn Hud,
        message_timer: &'a mut MessageTimer,
        scoreboard: &'a mut Scoreboard,
        commands: &'a mut SceneCommands,
    ) -> Self {
        Self {
            delta_time,
            lighting_level,
            hud,
            message_timer,
            scoreboard,
            commands,
        }
    }

    /// Show a transient HUD message and start its countdown
    pub fn show_message(&mut self, title: &str, body: &str, duration_seconds: f32) {
        self.hud.show_message(title, body, duration_seconds);
        self.message_timer.start(duration_seconds);
    }

    /// Count one occurrence of a named outcome
    pub fn record_outcome(&mut self, outcome: &str) {
        self.scoreboard.record(outcome);
    }

    /// Occurrences of a named outcome so far
    pub fn outcome_count(&self, outcome: &str) -> u32 {
        self.scoreboard.count(outcome)
    }

    /// Remove an object once the current pass finishes
    pub fn despawn(&mut self, id: ObjectId) {
        self.commands.despawn(id);
    }

    /// Add an object once the current pass finishes
    pub fn spawn(&mut self, object: Box<dyn SceneObject>) {
        self.commands.spawn(object);
    }
}
