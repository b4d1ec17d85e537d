//! Space-colonization skeleton growth.
//!
//! A trunk is grown as a bent chain, a cloud of canopy attractors is
//! sampled, and the skeleton then grows toward the attractors over up to
//! `max_iterations` rounds. Every random decision flows through one
//! [`DeterministicRng`] in a fixed draw order, so a `(preset, config,
//! seed)` triple always produces a bit-identical skeleton.

use glam::Vec3;
use sylva_config::{GrowthConfig, TreeSpeciesPreset};
use sylva_seed::{DeterministicRng, det_cosf, det_sinf};

use crate::attractor::sample_canopy_attractors;
use crate::influence::InfluenceBuffer;
use crate::tree::TreeSkeleton;

/// World axis the wind blows along; lean and wind shear both act on it.
pub const WIND_AXIS: Vec3 = Vec3::X;

/// Maximum lateral jitter per trunk segment, in world units per step.
const TRUNK_JITTER: f32 = 0.07;
/// How quickly apical dominance fades with branch depth.
const APICAL_DEPTH_DECAY: f32 = 0.35;
/// Strength of the wind lean folded into every growth direction.
const WIND_GROWTH_LEAN: f32 = 0.08;
/// New nodes may not land within this fraction of a step of any existing node.
const CHILD_SPACING_FACTOR: f32 = 0.58;
/// Below this squared length a growth direction is considered degenerate.
const DEGENERATE_DIR_EPSILON: f32 = 1e-8;

/// Per-instance scalars drawn from the species ranges.
///
/// The draw order is part of the determinism contract: trunk height,
/// canopy height, canopy radius, attractor count — one uniform draw each,
/// in that order, before anything else touches the stream.
struct DrawnParams {
    trunk_height: f32,
    canopy_height: f32,
    canopy_radius: f32,
    attractor_count: u32,
}

fn draw_params(preset: &TreeSpeciesPreset, rng: &mut DeterministicRng) -> DrawnParams {
    DrawnParams {
        trunk_height: rng.range_f32(preset.trunk_height.0, preset.trunk_height.1),
        canopy_height: rng.range_f32(preset.canopy_height.0, preset.canopy_height.1),
        canopy_radius: rng.range_f32(preset.canopy_radius.0, preset.canopy_radius.1),
        attractor_count: rng.range_u32(preset.attractor_count.0, preset.attractor_count.1),
    }
}

/// Grow a tree skeleton for `preset` from an integer seed.
///
/// The root sits at the origin. With zero attractors the result is a
/// trunk-only skeleton; all other degeneracies fall back rather than
/// erroring.
pub fn grow_skeleton(
    preset: &TreeSpeciesPreset,
    config: &GrowthConfig,
    seed: u64,
) -> TreeSkeleton {
    let mut rng = DeterministicRng::new(seed);
    let params = draw_params(preset, &mut rng);

    let mut skeleton = TreeSkeleton::new(Vec3::ZERO);
    let trunk_top = grow_trunk(&mut skeleton, preset, config, &params, &mut rng);

    let mut attractors = sample_canopy_attractors(
        preset.shape,
        params.attractor_count,
        params.canopy_height,
        params.canopy_radius,
        preset.wind_skew,
        trunk_top,
        &mut rng,
    );

    let mut buffer = InfluenceBuffer::with_len(skeleton.len());
    let kill_d2 = config.kill_distance * config.kill_distance;
    let influence_d2 = config.influence_radius * config.influence_radius;
    let mut iterations_used = 0;

    for _ in 0..config.max_iterations {
        if attractors.is_empty() {
            break;
        }
        iterations_used += 1;
        buffer.ensure_len(skeleton.len());

        // Classification pass: each attractor votes on its nearest node.
        attractors.retain(|&attractor| {
            let (nearest, d2) = skeleton.nearest_node(attractor);
            if d2 <= kill_d2 {
                return false;
            }
            if d2 <= influence_d2 {
                let pull = (attractor - skeleton.nodes[nearest].position).normalize_or_zero();
                buffer.add(nearest, pull);
            }
            true
        });

        // Growth pass: every influenced node steps once.
        let influenced: Vec<_> = buffer.influenced_indices().collect();
        if influenced.is_empty() {
            break;
        }
        for id in influenced {
            let node_position = skeleton.nodes[id].position;
            let depth = skeleton.nodes[id].depth as f32;

            let mut dir = buffer.average(id).normalize_or_zero();
            dir += Vec3::Y * (config.apical_dominance / (1.0 + depth * APICAL_DEPTH_DECAY));
            dir.x *= config.lateral_bias;
            dir.z *= config.lateral_bias;
            dir += WIND_AXIS * (preset.wind_skew * WIND_GROWTH_LEAN);

            let dir = if dir.length_squared() < DEGENERATE_DIR_EPSILON {
                Vec3::Y
            } else {
                dir.normalize()
            };

            let candidate = node_position + dir * config.step_size;
            if !skeleton.any_node_within(candidate, config.step_size * CHILD_SPACING_FACTOR) {
                skeleton.add_child(id, candidate);
            }
        }
    }

    skeleton.recompute_terminals();
    log::debug!(
        "grew '{}': {} nodes, {} terminals, {} attractors left after {} iterations",
        preset.name,
        skeleton.len(),
        skeleton.terminal_node_ids.len(),
        attractors.len(),
        iterations_used
    );
    skeleton
}

/// Grow the trunk chain and return the tip position.
///
/// Segment count is `max(4, floor(trunk_height / step_size))`. Each
/// segment consumes two draws (jitter angle, jitter magnitude) and bends
/// toward a lean- and wind-influenced target, pulled back toward vertical
/// by `trunk_lift_bias`.
fn grow_trunk(
    skeleton: &mut TreeSkeleton,
    preset: &TreeSpeciesPreset,
    config: &GrowthConfig,
    params: &DrawnParams,
    rng: &mut DeterministicRng,
) -> Vec3 {
    let segments = ((params.trunk_height / config.step_size) as usize).max(4);
    let target = Vec3::Y + WIND_AXIS * (preset.lean + preset.wind_skew * 0.5);

    let mut tip = skeleton.root_id;
    let mut position = skeleton.nodes[tip].position;
    for _ in 0..segments {
        let jitter_angle = rng.range_f32(0.0, std::f32::consts::TAU);
        let jitter_mag = rng.next_f32() * TRUNK_JITTER;
        let jitter = Vec3::new(det_cosf(jitter_angle), 0.0, det_sinf(jitter_angle)) * jitter_mag;

        let bent = (target + jitter).lerp(Vec3::Y, config.trunk_lift_bias);
        let dir = if bent.length_squared() < DEGENERATE_DIR_EPSILON {
            Vec3::Y
        } else {
            bent.normalize()
        };

        position += dir * config.step_size;
        tip = skeleton.add_child(tip, position);
    }
    position
}
