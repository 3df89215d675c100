//! Discrete proximity interactions
//!
//! No collision response or continuous detection: each frame, hittable
//! objects are tested pairwise and react to the tests that pass.

pub mod interaction;
pub mod layers;
pub mod primitives;

pub use interaction::{HitInfo, Hittable, InteractionEngine, InteractionReport};
pub use layers::HitLayers;
pub use primitives::BoundingSphere;
