//! Configuration system for the Sylva vegetation pipeline.
//!
//! Provides the nested parameter groups consumed by the generation
//! components, species preset definitions, RON persistence with
//! hot-reload detection, and CLI overrides via clap.

mod cli;
mod config;
mod error;
mod species;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GrowthConfig, LodConfig, PlacementConfig, RadiusConfig};
pub use error::ConfigError;
pub use species::{CanopyShape, TreeSpeciesPreset};
