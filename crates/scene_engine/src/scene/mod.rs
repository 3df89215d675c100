//! Scene management
//!
//! A flat set of placed objects. There is no hierarchy: each object carries
//! its own transform, with an anchor offset for off-origin geometry.

pub mod context;
pub mod object;
pub mod registry;

pub use context::{FrameContext, SceneCommands};
pub use object::{AnimatedProp, ObjectId, Prop, PropHook, SceneObject};
pub use registry::SceneRegistry;
