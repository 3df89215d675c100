//! HUD collaborator interface and the state the engine keeps for it

pub mod hud;
pub mod timer;

pub use hud::{Hud, LogHud};
pub use timer::{MessageTimer, Scoreboard};
