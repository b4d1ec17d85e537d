//! Configuration structs with documented defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::species::{TreeSpeciesPreset, default_species};

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World seed; every generated artifact is reproducible from this value.
    pub seed: u64,
    /// Skeleton growth settings.
    pub growth: GrowthConfig,
    /// Branch radius solving and pruning settings.
    pub radius: RadiusConfig,
    /// Field placement settings.
    pub placement: PlacementConfig,
    /// Level-of-detail controller settings.
    pub lod: LodConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Species mix available to the placer.
    pub species: Vec<TreeSpeciesPreset>,
}

/// Space-colonization growth parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrowthConfig {
    /// Length of one growth step in world units.
    pub step_size: f32,
    /// Attractors within this distance of a node pull on it.
    pub influence_radius: f32,
    /// Attractors within this distance of a node are consumed.
    pub kill_distance: f32,
    /// Hard cap on growth iterations.
    pub max_iterations: u32,
    /// Strength of the upward pull on growth; decays with branch depth.
    pub apical_dominance: f32,
    /// Damping factor applied to the horizontal growth component.
    pub lateral_bias: f32,
    /// Blend toward vertical applied to each trunk segment.
    pub trunk_lift_bias: f32,
}

/// Pipe-model radius solving and twig pruning parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RadiusConfig {
    /// Pipe-model exponent; child radii to this power sum to the parent's.
    pub gamma: f32,
    /// Radius assigned to leaf (terminal) nodes.
    pub twig_radius: f32,
    /// Dead-end branches thinner than this are pruned.
    pub min_kept_radius: f32,
    /// Nodes at or above this depth are never pruned, protecting the
    /// near-root topology.
    pub trunk_preserve_depth: u32,
}

/// Blue-noise field placement parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum planar distance between any two placed trees.
    pub min_spacing: f64,
    /// Outer radius of the placement field.
    pub field_radius: f64,
    /// Inner exclusion radius around the field center.
    pub clearing_radius: f64,
    /// Extra margin added around every rock collider footprint.
    pub rock_clearance: f64,
    /// Maximum terrain slope (rise over run) a tree will accept.
    pub max_slope: f64,
    /// Spatial frequency of the density noise field.
    pub density_noise_scale: f64,
    /// Density values below this threshold reject the candidate.
    pub density_threshold: f64,
    /// Random jitter added to the density threshold per candidate.
    pub density_jitter: f64,
    /// Attempt budget for the seed and fill phases.
    pub max_placement_attempts: u32,
    /// Candidates tried around each active point before retiring it.
    pub poisson_attempts: u32,
    /// Target number of trees; the result never exceeds it but may fall
    /// short on heavily constrained terrain.
    pub tree_count: u32,
    /// Mesh variants generated per species; each placement picks one.
    pub variants_per_species: u32,
}

/// Distance thresholds and cadence for the LOD controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Maximum distance for full detail (level 0).
    pub lod0_distance: f64,
    /// Maximum distance for level 1.
    pub lod1_distance: f64,
    /// Maximum distance for level 2; beyond `hidden_distance` instances hide.
    pub lod2_distance: f64,
    /// Distance past which instances are hidden entirely (level 3).
    pub hidden_distance: f64,
    /// Half-width of the dead band straddling each threshold.
    pub hysteresis: f64,
    /// Full LOD passes per second.
    pub update_hz: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Validate skeleton invariants after each tree is grown and log failures.
    pub validate_skeletons: bool,
}

// --- Default implementations ---

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            step_size: 0.35,
            influence_radius: 1.6,
            kill_distance: 0.45,
            max_iterations: 48,
            apical_dominance: 0.35,
            lateral_bias: 0.7,
            trunk_lift_bias: 0.6,
        }
    }
}

impl Default for RadiusConfig {
    fn default() -> Self {
        Self {
            gamma: 2.0,
            twig_radius: 0.02,
            min_kept_radius: 0.028,
            trunk_preserve_depth: 3,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_spacing: 2.5,
            field_radius: 60.0,
            clearing_radius: 6.0,
            rock_clearance: 1.2,
            max_slope: 0.55,
            density_noise_scale: 0.045,
            density_threshold: 0.35,
            density_jitter: 0.25,
            max_placement_attempts: 800,
            poisson_attempts: 24,
            tree_count: 180,
            variants_per_species: 3,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            lod0_distance: 25.0,
            lod1_distance: 60.0,
            lod2_distance: 120.0,
            hidden_distance: 220.0,
            hysteresis: 2.5,
            update_hz: 8.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            validate_skeletons: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// A default config with the default species mix filled in.
    ///
    /// `Config::default()` leaves `species` empty (the serde-default for a
    /// `Vec`); this is the variant callers actually want.
    pub fn with_default_species() -> Self {
        Self {
            species: default_species(),
            ..Self::default()
        }
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("sylva.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::with_default_species();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `sylva.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("sylva.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("sylva.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::with_default_species();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("min_spacing: 2.5"));
        assert!(ron_str.contains("gamma: 2.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::with_default_species();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        // Config missing the `lod` section entirely
        let ron_str = "(seed: 7, growth: (), radius: (), placement: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.lod, LodConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_default_species();
        config.seed = 99;
        config.placement.tree_count = 12;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_default_species();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.seed = 1234;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().seed, 1234);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_default_species();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_lod_thresholds_default_ordering() {
        let lod = LodConfig::default();
        assert!(lod.lod0_distance < lod.lod1_distance);
        assert!(lod.lod1_distance < lod.lod2_distance);
        assert!(lod.lod2_distance < lod.hidden_distance);
        assert!(lod.hysteresis * 2.0 < lod.lod1_distance - lod.lod0_distance);
    }
}
