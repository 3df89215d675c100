//! Building blocks shared by every subsystem: vector/matrix aliases and the
//! per-object transform, the ordered arena behind the scene registry, the
//! frame clock and logger setup.

pub mod collections;
pub mod logging;
pub mod math;
pub mod time;
