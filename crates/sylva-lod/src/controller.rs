//! Distance-based LOD state machine with hysteresis.
//!
//! Four levels: 0 (full detail) through 3 (hidden). Promotion to a
//! coarser level happens only past `threshold + hysteresis`, demotion to
//! a finer one only below `threshold - hysteresis`, so a camera lingering
//! at a boundary never toggles. Updates run at a configurable cadence
//! gated by an elapsed-time accumulator.

use glam::DVec3;
use sylva_config::LodConfig;

use crate::batches::VisibilitySink;

/// Number of levels with renderable geometry.
pub const VISIBLE_LEVELS: u8 = 3;
/// The hidden level.
pub const LOD_HIDDEN: u8 = 3;

/// Per-instance LOD state.
#[derive(Clone, Copy, Debug)]
struct InstanceLod {
    level: u8,
    initialized: bool,
}

/// Per-scene LOD controller.
///
/// Owns the level state for every instance; created once per scene,
/// updated every render tick from a single thread, destroyed with the
/// scene.
pub struct LodController {
    config: LodConfig,
    states: Vec<InstanceLod>,
    accumulator: f32,
}

impl LodController {
    /// Create a controller for `instance_count` instances.
    ///
    /// All instances start uninitialized; their first update classifies
    /// them by plain thresholds with no hysteresis.
    pub fn new(config: LodConfig, instance_count: usize) -> Self {
        Self {
            config,
            states: vec![
                InstanceLod {
                    level: LOD_HIDDEN,
                    initialized: false,
                };
                instance_count
            ],
            accumulator: 0.0,
        }
    }

    /// Number of tracked instances.
    pub fn instance_count(&self) -> usize {
        self.states.len()
    }

    /// Current level of `instance`.
    pub fn level(&self, instance: usize) -> u8 {
        self.states[instance].level
    }

    /// Advance time and, if the cadence gate opens (or `force` is set),
    /// run a full LOD pass over all instances.
    ///
    /// `positions[i]` is the world position of instance `i`; the slice
    /// length must match the instance count. Returns whether a pass ran.
    pub fn update(
        &mut self,
        dt: f32,
        camera: DVec3,
        positions: &[DVec3],
        sink: &mut dyn VisibilitySink,
        force: bool,
    ) -> bool {
        debug_assert_eq!(positions.len(), self.states.len());

        self.accumulator += dt;
        let period = 1.0 / self.config.update_hz;
        if !force && self.accumulator < period {
            return false;
        }
        self.accumulator = 0.0;

        for (instance, state) in self.states.iter_mut().enumerate() {
            let distance = (positions[instance] - camera).length();
            let level = if state.initialized {
                settle(state.level, distance, &self.config)
            } else {
                state.initialized = true;
                classify(distance, &self.config)
            };
            state.level = level;

            for batch_level in 0..VISIBLE_LEVELS {
                sink.set_visible_at(batch_level, instance, batch_level == level);
            }
        }
        true
    }
}

/// Plain threshold classification, used for the first update only.
fn classify(distance: f64, config: &LodConfig) -> u8 {
    if distance < config.lod0_distance {
        0
    } else if distance < config.lod1_distance {
        1
    } else if distance < config.lod2_distance {
        2
    } else {
        LOD_HIDDEN
    }
}

/// Walk the level toward the hysteresis-stable band for `distance`.
///
/// From level L, promotion requires `distance > threshold[L] + hysteresis`
/// and demotion requires `distance < threshold[L-1] - hysteresis`. The
/// walk loops so a teleporting camera settles in a single pass; inside
/// the dead band both conditions fail and the level holds.
fn settle(current: u8, distance: f64, config: &LodConfig) -> u8 {
    let thresholds = [
        config.lod0_distance,
        config.lod1_distance,
        config.lod2_distance,
        config.hidden_distance,
    ];
    let mut level = current;
    loop {
        if level < LOD_HIDDEN && distance > thresholds[level as usize] + config.hysteresis {
            level += 1;
            continue;
        }
        if level > 0 && distance < thresholds[level as usize - 1] - config.hysteresis {
            level -= 1;
            continue;
        }
        return level;
    }
}
