//! End-to-end forest generation pipeline.
//!
//! Drives field placement, per-placement skeleton growth, and radius
//! solving from a single [`Config`], and exposes a determinism digest
//! over the finished forest. Meshing is downstream of this crate; the
//! [`MeshLevelOptions`] type is the data contract handed to it.

mod digest;
mod mesh_options;

pub use digest::forest_digest;
pub use mesh_options::{MeshLevelOptions, default_mesh_levels};

use sylva_config::Config;
use sylva_placement::{RockFormation, TerrainSampler, TreePlacement, generate_placements};
use sylva_skeleton::{TreeSkeleton, grow_skeleton, solve_radii};

/// A generated forest: placements and their finished skeletons.
///
/// `skeletons[i]` belongs to `placements[i]`. Skeletons are final after
/// generation; the meshing stage may read them freely.
#[derive(Clone, Debug)]
pub struct Forest {
    /// Placed tree instances in placement order.
    pub placements: Vec<TreePlacement>,
    /// One solved skeleton per placement.
    pub skeletons: Vec<TreeSkeleton>,
}

impl Forest {
    /// Total reachable node count across all skeletons.
    pub fn total_nodes(&self) -> usize {
        self.skeletons.iter().map(|s| s.reachable_ids().len()).sum()
    }
}

/// Generate a complete forest from a config, terrain, and rock set.
///
/// Placement runs once with the world seed; each placement then grows a
/// skeleton from its own per-instance seed and gets its radii solved.
/// The whole pipeline is synchronous and reproducible: the same inputs
/// always produce the same [`forest_digest`].
pub fn generate_forest(
    config: &Config,
    terrain: &dyn TerrainSampler,
    rocks: &[RockFormation],
) -> Forest {
    let span = tracing::info_span!("generate_forest", seed = config.seed);
    let _guard = span.enter();

    let placements = generate_placements(
        &config.placement,
        terrain,
        rocks,
        &config.species,
        config.seed,
    );
    tracing::info!(count = placements.len(), "field placement complete");

    let mut skeletons = Vec::with_capacity(placements.len());
    for placement in &placements {
        let preset = &config.species[placement.species];
        let mut skeleton = grow_skeleton(preset, &config.growth, placement.seed);
        solve_radii(&mut skeleton, &config.radius);

        if config.debug.validate_skeletons
            && let Err(error) = skeleton.validate()
        {
            tracing::warn!(%error, species = %preset.name, "skeleton failed validation");
        }
        skeletons.push(skeleton);
    }

    let forest = Forest {
        placements,
        skeletons,
    };
    tracing::info!(
        trees = forest.placements.len(),
        nodes = forest.total_nodes(),
        "forest generated"
    );
    forest
}
