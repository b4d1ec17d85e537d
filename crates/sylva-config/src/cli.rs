//! Command-line argument parsing for the Sylva tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Sylva command-line arguments.
///
/// CLI values override settings loaded from `sylva.ron`.
#[derive(Parser, Debug)]
#[command(name = "sylva", about = "Sylva vegetation pipeline")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target tree count for field placement.
    #[arg(long)]
    pub trees: Option<u32>,

    /// Outer field radius in world units.
    #[arg(long)]
    pub field_radius: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(trees) = args.trees {
            self.placement.tree_count = trees;
        }
        if let Some(radius) = args.field_radius {
            self.placement.field_radius = radius;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
