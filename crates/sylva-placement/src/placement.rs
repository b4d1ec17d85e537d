//! Bridson-style blue-noise tree placement.
//!
//! Placement runs in three phases: a seed phase that finds the first
//! valid point, a growth phase that rings new candidates around active
//! points, and a fill phase that tops up with uniform candidates if the
//! growth phase fell short. All randomness flows through one
//! [`DeterministicRng`] in a fixed draw order, so a `(config, seed)` pair
//! always yields the same field.
//!
//! Per-candidate draws: seed/fill candidates consume two draws (disk
//! angle, disk radius), growth candidates two (ring angle, ring radius);
//! the acceptance predicate consumes one jitter draw only after the
//! annulus, rock, and slope checks pass. Each accepted point then
//! consumes five draws: species, variant, per-tree seed, yaw, scale.

use glam::{DVec2, DVec3};
use sylva_config::{PlacementConfig, TreeSpeciesPreset};
use sylva_seed::{DeterministicRng, derive_seed, det_cos, det_sin, det_sqrt};

use crate::density::DensityField;
use crate::grid::SpatialGrid;
use crate::rocks::RockFormation;
use crate::terrain::TerrainSampler;

/// Stream index used to derive the density field seed from the world seed.
const DENSITY_SEED_INDEX: u64 = 0xD1;
/// Per-instance scale jitter range.
const SCALE_JITTER: (f64, f64) = (0.85, 1.15);

/// One placed tree instance.
///
/// Entries are independent; their order only matters for RNG-stream
/// reproducibility, not correctness.
#[derive(Clone, Debug)]
pub struct TreePlacement {
    /// Terrain-projected world position.
    pub position: DVec3,
    /// Rotation around the up axis, in radians.
    pub yaw: f64,
    /// Uniform scale multiplier.
    pub scale: f64,
    /// Index into the species preset list.
    pub species: usize,
    /// Mesh variant index in `[0, variants_per_species)`.
    pub variant: u32,
    /// Seed for growing this instance's skeleton.
    pub seed: u64,
}

/// Distribute tree placements across the field.
///
/// Returns at most `config.tree_count` placements with pairwise planar
/// spacing of at least `config.min_spacing`. On heavily constrained
/// terrain the result may be shorter than requested; that is a documented
/// best-effort contract, not an error.
pub fn generate_placements(
    config: &PlacementConfig,
    terrain: &dyn TerrainSampler,
    rocks: &[RockFormation],
    species: &[TreeSpeciesPreset],
    world_seed: u64,
) -> Vec<TreePlacement> {
    if species.is_empty() || config.tree_count == 0 {
        log::warn!("placement skipped: no species or zero tree count");
        return Vec::new();
    }

    let mut rng = DeterministicRng::new(world_seed);
    let density = DensityField::new(
        derive_seed(world_seed, DENSITY_SEED_INDEX) as u32,
        config.density_noise_scale,
    );
    let total_weight: f64 = species.iter().map(|s| s.placement_weight as f64).sum();

    let mut field = Field {
        config,
        terrain,
        rocks,
        species,
        total_weight,
        density,
        grid: SpatialGrid::new(config.min_spacing),
        placements: Vec::with_capacity(config.tree_count as usize),
        active: Vec::new(),
    };

    // Seed phase: find the first valid point anywhere in the field disk.
    for _ in 0..config.max_placement_attempts {
        let candidate = field.uniform_disk_candidate(&mut rng);
        if field.try_place(candidate, &mut rng) {
            break;
        }
    }
    let seeded = field.placements.len();

    // Growth phase: ring candidates around active points until the active
    // list drains or the target count is reached.
    while !field.active.is_empty() && field.placements.len() < config.tree_count as usize {
        let slot = rng.index(field.active.len());
        let base = field.active[slot];
        let mut grown = false;
        for _ in 0..config.poisson_attempts {
            let angle = rng.range_f64(0.0, std::f64::consts::TAU);
            let distance = rng.range_f64(config.min_spacing, 2.0 * config.min_spacing);
            let candidate = base + DVec2::new(det_cos(angle), det_sin(angle)) * distance;
            if field.try_place(candidate, &mut rng) {
                grown = true;
                break;
            }
        }
        if !grown {
            field.active.swap_remove(slot);
        }
    }
    let grown_total = field.placements.len();

    // Fill phase: best-effort top-up with uniform candidates.
    let mut fill_attempts = 0u32;
    while field.placements.len() < config.tree_count as usize
        && fill_attempts < config.max_placement_attempts
    {
        fill_attempts += 1;
        let candidate = field.uniform_disk_candidate(&mut rng);
        field.try_place(candidate, &mut rng);
    }

    log::debug!(
        "placed {} trees (seeded {seeded}, grown {}, filled {}) of {} requested",
        field.placements.len(),
        grown_total - seeded,
        field.placements.len() - grown_total,
        config.tree_count
    );
    field.placements
}

/// Working state shared by the three placement phases.
struct Field<'a> {
    config: &'a PlacementConfig,
    terrain: &'a dyn TerrainSampler,
    rocks: &'a [RockFormation],
    species: &'a [TreeSpeciesPreset],
    total_weight: f64,
    density: DensityField,
    grid: SpatialGrid,
    placements: Vec<TreePlacement>,
    active: Vec<DVec2>,
}

impl Field<'_> {
    /// Uniform-by-area candidate in the field disk. Two draws.
    fn uniform_disk_candidate(&self, rng: &mut DeterministicRng) -> DVec2 {
        let angle = rng.range_f64(0.0, std::f64::consts::TAU);
        let radius = self.config.field_radius * det_sqrt(rng.next_f64());
        DVec2::new(det_cos(angle), det_sin(angle)) * radius
    }

    /// Run the acceptance predicate; on success register the point and
    /// append a fully drawn placement. Returns whether the candidate stuck.
    fn try_place(&mut self, candidate: DVec2, rng: &mut DeterministicRng) -> bool {
        if !self.accept(candidate, rng) {
            return false;
        }

        let species = self.pick_species(rng);
        let variant = rng.range_u32(0, self.config.variants_per_species.saturating_sub(1));
        let seed = rng.next_u64();
        let yaw = rng.range_f64(0.0, std::f64::consts::TAU);
        let scale = rng.range_f64(SCALE_JITTER.0, SCALE_JITTER.1);

        let height = self.terrain.sample_height(candidate.x, candidate.y);
        self.grid.insert(candidate);
        self.active.push(candidate);
        self.placements.push(TreePlacement {
            position: DVec3::new(candidate.x, height, candidate.y),
            yaw,
            scale,
            species,
            variant,
            seed,
        });
        true
    }

    /// The acceptance predicate from the placement contract: annulus,
    /// rocks, slope, density (one jitter draw), then grid spacing.
    fn accept(&self, candidate: DVec2, rng: &mut DeterministicRng) -> bool {
        let radial = candidate.length();
        if radial < self.config.clearing_radius || radial > self.config.field_radius {
            return false;
        }
        if self
            .rocks
            .iter()
            .any(|r| r.excludes(candidate.x, candidate.y, self.config.rock_clearance))
        {
            return false;
        }
        if self.terrain.sample_slope(candidate.x, candidate.y) > self.config.max_slope {
            return false;
        }
        let cut = self.config.density_threshold + rng.next_f64() * self.config.density_jitter;
        if self.density.sample01(candidate.x, candidate.y) < cut {
            return false;
        }
        !self
            .grid
            .has_neighbor_within(candidate, self.config.min_spacing)
    }

    /// Cumulative-weight species draw. One draw.
    fn pick_species(&self, rng: &mut DeterministicRng) -> usize {
        let mut remaining = rng.range_f64(0.0, self.total_weight);
        for (index, preset) in self.species.iter().enumerate() {
            remaining -= preset.placement_weight as f64;
            if remaining <= 0.0 {
                return index;
            }
        }
        self.species.len() - 1
    }
}
