//! Per-detail-level options handed to the external meshing stage.

use serde::{Deserialize, Serialize};

/// How the mesher should tessellate one detail level of a skeleton.
///
/// The mesher itself lives outside this pipeline; it must only ever see
/// a skeleton after radius solving has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshLevelOptions {
    /// Cylinder cross-section segments per branch.
    pub radial_segments: u32,
    /// Take every n-th skeleton node along a branch.
    pub sample_stride: u32,
    /// Skip branches deeper than this, if set.
    pub depth_limit: Option<u32>,
}

/// Default tessellation for the three visible detail levels, finest first.
pub fn default_mesh_levels() -> [MeshLevelOptions; 3] {
    [
        MeshLevelOptions {
            radial_segments: 8,
            sample_stride: 1,
            depth_limit: None,
        },
        MeshLevelOptions {
            radial_segments: 5,
            sample_stride: 2,
            depth_limit: Some(12),
        },
        MeshLevelOptions {
            radial_segments: 3,
            sample_stride: 4,
            depth_limit: Some(6),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_get_coarser_with_distance() {
        let levels = default_mesh_levels();
        assert!(levels[0].radial_segments > levels[1].radial_segments);
        assert!(levels[1].radial_segments > levels[2].radial_segments);
        assert!(levels[0].sample_stride <= levels[1].sample_stride);
        assert!(levels[0].depth_limit.is_none(), "full detail is uncapped");
    }

    #[test]
    fn options_roundtrip_through_ron() {
        let options = default_mesh_levels()[1];
        let text = ron::to_string(&options).unwrap();
        let back: MeshLevelOptions = ron::from_str(&text).unwrap();
        assert_eq!(options, back);
    }
}
