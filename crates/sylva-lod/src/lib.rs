//! Level-of-detail management: distance-based per-instance LOD selection
//! with anti-flicker hysteresis and batched visibility updates.

mod batches;
mod controller;

pub use batches::{BatchVisibility, VisibilitySink};
pub use controller::{LOD_HIDDEN, LodController, VISIBLE_LEVELS};
