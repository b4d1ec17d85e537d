//! Deterministic seeded generation utilities.
//!
//! Provides the explicit-state random stream used by every generation
//! component, per-instance seed derivation from a world seed, and
//! deterministic math functions via `libm` for cross-platform bit-exact
//! results.

mod det;
mod rng;

pub use det::{
    det_acosf, det_cbrtf, det_cos, det_cosf, det_pow, det_powf, det_sin, det_sinf, det_sqrt,
};
pub use rng::{DeterministicRng, derive_seed, mix64};
