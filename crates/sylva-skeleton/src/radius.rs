//! Pipe-model branch radius solving and twig pruning.
//!
//! Radii flow bottom-up: terminals get `twig_radius`, and an internal
//! node's radius satisfies `radius^gamma = Σ child.radius^gamma` (the
//! pipe/Murray's-law conservation rule). A pruning pass then detaches
//! dead-end twigs below `min_kept_radius`, leaving the near-root topology
//! untouched.

use sylva_config::RadiusConfig;
use sylva_seed::det_powf;

use crate::tree::TreeSkeleton;

/// Sums at or below this are treated as degenerate and fall back to `twig_radius`.
const RADIUS_SUM_EPSILON: f32 = 1e-12;

/// Assign branch radii in place, then prune thin dead-end branches.
///
/// Operates only on the root-reachable set; detached nodes keep whatever
/// radius they last had. After the call, `terminal_node_ids` reflects the
/// pruned tree.
pub fn solve_radii(skeleton: &mut TreeSkeleton, config: &RadiusConfig) {
    debug_assert!(config.gamma > 0.0, "gamma must be positive");

    let preorder = skeleton.reachable_ids();

    // Reverse preorder visits every child before its parent: a bottom-up
    // pass without recursion.
    for &id in preorder.iter().rev() {
        let radius = if skeleton.nodes[id].children.is_empty() {
            config.twig_radius
        } else {
            let sum: f32 = skeleton.nodes[id]
                .children
                .iter()
                .map(|&c| det_powf(skeleton.nodes[c].radius, config.gamma))
                .sum();
            if sum <= RADIUS_SUM_EPSILON {
                config.twig_radius
            } else {
                det_powf(sum, 1.0 / config.gamma)
            }
        };
        skeleton.nodes[id].radius = radius;
    }

    // Prune: detach children that are deep, thin, and childless. Bottom-up
    // order lets a detachment expose the parent as the next dead end, so
    // whole thin chains unwind in one pass.
    let mut pruned = 0usize;
    for &id in preorder.iter().rev() {
        let doomed: Vec<_> = skeleton.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&c| {
                let child = &skeleton.nodes[c];
                child.depth > config.trunk_preserve_depth
                    && child.radius < config.min_kept_radius
                    && child.children.is_empty()
            })
            .collect();
        if !doomed.is_empty() {
            pruned += doomed.len();
            skeleton.nodes[id].children.retain(|c| !doomed.contains(c));
        }
    }

    skeleton.recompute_terminals();
    if pruned > 0 {
        log::debug!("pruned {pruned} twig nodes below radius {}", config.min_kept_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use sylva_config::{GrowthConfig, TreeSpeciesPreset};

    use crate::grower::grow_skeleton;

    fn two_leaf_skeleton() -> TreeSkeleton {
        let mut skeleton = TreeSkeleton::new(Vec3::ZERO);
        skeleton.add_child(0, Vec3::new(-0.5, 1.0, 0.0));
        skeleton.add_child(0, Vec3::new(0.5, 1.0, 0.0));
        skeleton.recompute_terminals();
        skeleton
    }

    #[test]
    fn root_with_two_twigs_matches_pipe_model() {
        let mut skeleton = two_leaf_skeleton();
        let config = RadiusConfig {
            gamma: 2.0,
            twig_radius: 0.05,
            min_kept_radius: 0.0,
            trunk_preserve_depth: 0,
        };
        solve_radii(&mut skeleton, &config);
        // sqrt(0.05^2 + 0.05^2) ≈ 0.0707
        assert!(
            (skeleton.nodes[0].radius - 0.070_710_68).abs() < 1e-4,
            "root radius {}",
            skeleton.nodes[0].radius
        );
        assert_eq!(skeleton.nodes[1].radius, 0.05);
        assert_eq!(skeleton.nodes[2].radius, 0.05);
    }

    #[test]
    fn radius_never_decreases_toward_the_root() {
        let skeleton = {
            let mut s = grow_skeleton(
                &TreeSpeciesPreset::default(),
                &GrowthConfig::default(),
                2024,
            );
            solve_radii(&mut s, &RadiusConfig::default());
            s
        };
        for &id in &skeleton.reachable_ids() {
            let node = &skeleton.nodes[id];
            for &c in &node.children {
                assert!(
                    node.radius >= skeleton.nodes[c].radius - 1e-6,
                    "node {id} radius {} < child {c} radius {}",
                    node.radius,
                    skeleton.nodes[c].radius
                );
            }
        }
    }

    #[test]
    fn pruning_removes_deep_thin_dead_ends_only() {
        let mut skeleton = TreeSkeleton::new(Vec3::ZERO);
        let mut tip = 0;
        for i in 1..=5 {
            tip = skeleton.add_child(tip, Vec3::new(0.0, i as f32, 0.0));
        }
        // A thin side twig deep in the tree, and one at protected depth.
        let deep_twig = skeleton.add_child(tip, Vec3::new(0.5, 5.0, 0.0));
        let protected_twig = skeleton.add_child(1, Vec3::new(0.5, 1.0, 0.0));
        skeleton.recompute_terminals();

        let config = RadiusConfig {
            gamma: 2.0,
            twig_radius: 0.02,
            min_kept_radius: 0.05,
            trunk_preserve_depth: 2,
        };
        solve_radii(&mut skeleton, &config);

        let reachable = skeleton.reachable_ids();
        assert!(
            !reachable.contains(&deep_twig),
            "deep twig should be detached"
        );
        // The chain above the preserve depth was all twig-thin, so pruning
        // cascades down to it.
        assert_eq!(reachable, vec![0, 1, 2, protected_twig]);
        assert!(
            reachable.contains(&protected_twig),
            "twig at depth {} is inside trunk_preserve_depth",
            skeleton.nodes[protected_twig].depth
        );
        // Detached, not deallocated.
        assert_eq!(skeleton.nodes.len(), 8);
    }

    #[test]
    fn pruning_postcondition_holds_on_grown_trees() {
        let config = RadiusConfig::default();
        for seed in [3, 17, 404] {
            let mut skeleton = grow_skeleton(
                &TreeSpeciesPreset::default(),
                &GrowthConfig::default(),
                seed,
            );
            solve_radii(&mut skeleton, &config);
            for &id in &skeleton.reachable_ids() {
                let node = &skeleton.nodes[id];
                let exempt =
                    node.depth <= config.trunk_preserve_depth || !node.children.is_empty();
                assert!(
                    node.radius >= config.min_kept_radius || exempt,
                    "seed {seed}: node {id} (depth {}, radius {}) survived pruning",
                    node.depth,
                    node.radius
                );
            }
        }
    }

    #[test]
    fn terminals_are_rebuilt_after_pruning() {
        let mut skeleton = grow_skeleton(
            &TreeSpeciesPreset::default(),
            &GrowthConfig::default(),
            55,
        );
        solve_radii(&mut skeleton, &RadiusConfig::default());
        skeleton.validate().unwrap();
    }

    #[test]
    fn degenerate_child_sum_falls_back_to_twig_radius() {
        let mut skeleton = two_leaf_skeleton();
        let config = RadiusConfig {
            gamma: 2.0,
            twig_radius: 0.0,
            min_kept_radius: 0.0,
            trunk_preserve_depth: 0,
        };
        solve_radii(&mut skeleton, &config);
        // Children are zero-radius, so the pipe sum is zero and the root
        // falls back to twig_radius.
        assert_eq!(skeleton.nodes[0].radius, 0.0);
    }

    #[test]
    fn gamma_three_combines_cubically() {
        let mut skeleton = two_leaf_skeleton();
        let config = RadiusConfig {
            gamma: 3.0,
            twig_radius: 0.1,
            min_kept_radius: 0.0,
            trunk_preserve_depth: 0,
        };
        solve_radii(&mut skeleton, &config);
        let expected = (2.0f32 * 0.1f32.powi(3)).powf(1.0 / 3.0);
        assert!((skeleton.nodes[0].radius - expected).abs() < 1e-5);
    }

    #[test]
    fn deterministic_radii_for_the_same_seed() {
        let config = RadiusConfig::default();
        let solve = |seed| {
            let mut s = grow_skeleton(
                &TreeSpeciesPreset::default(),
                &GrowthConfig::default(),
                seed,
            );
            solve_radii(&mut s, &config);
            s
        };
        let a = solve(9000);
        let b = solve(9000);
        let radii = |s: &TreeSkeleton| -> Vec<f32> {
            s.reachable_ids().iter().map(|&i| s.nodes[i].radius).collect()
        };
        assert_eq!(radii(&a), radii(&b), "radius pass must be bit-stable");
    }
}
