//! HUD collaborator
//!
//! The engine never renders text itself. It tells a [`Hud`] what to show and
//! owns only the countdown that hides a message again.

/// Transient on-screen messages and the frame rate readout
pub trait Hud {
    /// Show a message; the engine hides it after its duration
    fn show_message(&mut self, title: &str, body: &str, duration_seconds: f32);

    /// Hide the current message
    fn hide_message(&mut self);

    /// Diagnostic frames-per-second readout
    fn show_frame_rate(&mut self, _fps: f32) {}
}

/// HUD that writes everything to the log
#[derive(Debug, Default)]
pub struct LogHud {
    visible: Option<String>,
}

impl LogHud {
    /// Create a HUD with nothing shown
    pub fn new() -> Self {
        Self::default()
    }

    /// Title of the message currently shown
    pub fn visible_message(&self) -> Option<&str> {
        self.visible.as_deref()
    }
}

impl Hud for LogHud {
    fn show_message(&mut self, title: &str, body: &str, duration_seconds: f32) {
        log::info!("[hud] {title}: {body} ({duration_seconds}s)");
        self.visible = Some(title.to_string());
    }

    fn hide_message(&mut self) {
        if let Some(title) = self.visible.take() {
            log::debug!("[hud] hide '{title}'");
        }
    }

    fn show_frame_rate(&mut self, fps: f32) {
        log::trace!("[hud] {fps:.1} fps");
    }
}
