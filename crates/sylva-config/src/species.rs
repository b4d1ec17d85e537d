//! Tree species presets: the per-species parameter ranges and shape tags
//! that drive attractor sampling and field placement.

use serde::{Deserialize, Serialize};

/// Canopy silhouette family. Selects the attractor-sampling distribution
/// used when growing a skeleton of this species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanopyShape {
    /// Tapering cone: attractors thin out toward the tip.
    Conical,
    /// Near-uniform ellipsoid cloud.
    Spherical,
    /// Ellipsoid cloud sheared along the wind axis.
    Windswept,
    /// Tall, radially compressed cloud.
    Columnar,
}

/// Parameter set for one tree species.
///
/// Ranges are `(min, max)` pairs sampled once per tree instance; scalars
/// apply to every instance. Colors and `canopy_puff_radius` pass through
/// untouched to the external meshing stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSpeciesPreset {
    /// Display name, also used in logs.
    pub name: String,
    /// Trunk height range in world units.
    pub trunk_height: (f32, f32),
    /// Canopy height range in world units.
    pub canopy_height: (f32, f32),
    /// Canopy radius range in world units.
    pub canopy_radius: (f32, f32),
    /// Number of growth attractors sampled into the canopy volume.
    pub attractor_count: (u32, u32),
    /// Canopy silhouette family.
    pub shape: CanopyShape,
    /// Trunk lean strength along the +X axis.
    pub lean: f32,
    /// Wind shear strength; biases trunk, canopy, and growth along the wind axis.
    pub wind_skew: f32,
    /// Relative selection weight during field placement.
    pub placement_weight: f32,
    /// Leaf-puff radius for the meshing stage.
    pub canopy_puff_radius: f32,
    /// Trunk material tint (linear RGB), consumed by the meshing stage.
    pub trunk_color: [f32; 3],
    /// Canopy material tint (linear RGB), consumed by the meshing stage.
    pub canopy_color: [f32; 3],
}

impl Default for TreeSpeciesPreset {
    fn default() -> Self {
        Self {
            name: "oak".to_string(),
            trunk_height: (2.2, 3.4),
            canopy_height: (2.6, 3.8),
            canopy_radius: (1.8, 2.8),
            attractor_count: (220, 340),
            shape: CanopyShape::Spherical,
            lean: 0.08,
            wind_skew: 0.05,
            placement_weight: 1.0,
            canopy_puff_radius: 0.55,
            trunk_color: [0.36, 0.25, 0.16],
            canopy_color: [0.22, 0.42, 0.18],
        }
    }
}

/// Default species mix: a broadleaf, a conifer, a coastal windswept pine,
/// and a sparse columnar cypress.
pub fn default_species() -> Vec<TreeSpeciesPreset> {
    vec![
        TreeSpeciesPreset::default(),
        TreeSpeciesPreset {
            name: "pine".to_string(),
            trunk_height: (3.0, 4.6),
            canopy_height: (3.4, 5.2),
            canopy_radius: (1.2, 1.9),
            attractor_count: (260, 380),
            shape: CanopyShape::Conical,
            lean: 0.03,
            wind_skew: 0.02,
            placement_weight: 0.8,
            canopy_puff_radius: 0.4,
            trunk_color: [0.3, 0.21, 0.13],
            canopy_color: [0.13, 0.3, 0.14],
        },
        TreeSpeciesPreset {
            name: "shore_pine".to_string(),
            trunk_height: (1.6, 2.6),
            canopy_height: (1.8, 2.6),
            canopy_radius: (1.6, 2.4),
            attractor_count: (160, 260),
            shape: CanopyShape::Windswept,
            lean: 0.22,
            wind_skew: 0.35,
            placement_weight: 0.35,
            canopy_puff_radius: 0.5,
            trunk_color: [0.33, 0.24, 0.16],
            canopy_color: [0.25, 0.38, 0.16],
        },
        TreeSpeciesPreset {
            name: "cypress".to_string(),
            trunk_height: (2.8, 3.8),
            canopy_height: (4.2, 5.6),
            canopy_radius: (0.9, 1.3),
            attractor_count: (200, 300),
            shape: CanopyShape::Columnar,
            lean: 0.02,
            wind_skew: 0.03,
            placement_weight: 0.25,
            canopy_puff_radius: 0.35,
            trunk_color: [0.34, 0.26, 0.18],
            canopy_color: [0.16, 0.33, 0.17],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_roundtrips_through_ron() {
        let preset = TreeSpeciesPreset::default();
        let text = ron::to_string(&preset).unwrap();
        let back: TreeSpeciesPreset = ron::from_str(&text).unwrap();
        assert_eq!(preset, back);
    }

    #[test]
    fn shape_tag_serializes_by_name() {
        let text = ron::to_string(&CanopyShape::Windswept).unwrap();
        assert!(text.contains("Windswept"), "unexpected encoding: {text}");
    }

    #[test]
    fn default_species_have_positive_weights_and_ordered_ranges() {
        for s in default_species() {
            assert!(s.placement_weight > 0.0, "{}: weight must be > 0", s.name);
            assert!(s.trunk_height.0 <= s.trunk_height.1, "{}", s.name);
            assert!(s.canopy_height.0 <= s.canopy_height.1, "{}", s.name);
            assert!(s.canopy_radius.0 <= s.canopy_radius.1, "{}", s.name);
            assert!(s.attractor_count.0 <= s.attractor_count.1, "{}", s.name);
        }
    }
}
