//! Field placement: blue-noise tree distribution over terrain under
//! spacing, slope, clearance, and density constraints.

mod density;
mod grid;
mod placement;
mod rocks;
mod terrain;

pub use density::DensityField;
pub use grid::SpatialGrid;
pub use placement::{TreePlacement, generate_placements};
pub use rocks::RockFormation;
pub use terrain::{FlatTerrain, NoiseTerrain, NoiseTerrainParams, TerrainSampler};
