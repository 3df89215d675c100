//! Message countdown and outcome tally

use std::collections::HashMap;

/// Countdown for the transient HUD message, in milliseconds.
///
/// A started timer stays armed until an update runs it out, so a zero or
/// negative duration expires on the very next update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageTimer {
    remaining_ms: Option<f32>,
}

impl MessageTimer {
    /// Create an inactive timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown
    pub fn start(&mut self, duration_seconds: f32) {
        self.remaining_ms = Some((duration_seconds * 1000.0).max(0.0));
    }

    /// Whether a message is being timed
    pub fn is_active(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Time left in milliseconds
    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms.unwrap_or(0.0)
    }

    /// Count down by `delta_time` seconds.
    ///
    /// Returns `true` on the update that runs the timer out, after which the
    /// timer is inactive.
    pub fn update(&mut self, delta_time: f32) -> bool {
        let Some(remaining) = self.remaining_ms.as_mut() else {
            return false;
        };
        *remaining -= delta_time * 1000.0;
        if *remaining <= 0.0 {
            self.remaining_ms = None;
            return true;
        }
        false
    }

    /// Stop without signalling expiry
    pub fn clear(&mut self) {
        self.remaining_ms = None;
    }
}

/// Named outcome counters, e.g. kills
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    counts: HashMap<String, u32>,
}

impl Scoreboard {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `outcome`
    pub fn record(&mut self, outcome: &str) {
        *self.counts.entry(outcome.to_string()).or_insert(0) += 1;
    }

    /// Occurrences of `outcome` so far
    pub fn count(&self, outcome: &str) -> u32 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Forget every count
    pub fn reset(&mut self) {
        self.counts.clear();
    }
}
