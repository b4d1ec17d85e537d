//! Headless demo: generate a forest from `sylva.ron` and print statistics.
//!
//! Configuration is loaded from the config directory (or created with
//! defaults on first run) and can be overridden via CLI flags.
//! Run with `cargo run -p sylva-demo -- --seed 7 --trees 120`.

use clap::Parser;
use glam::DVec3;
use sylva_config::{CliArgs, Config};
use sylva_forest::{forest_digest, generate_forest};
use sylva_lod::{BatchVisibility, LodController, VISIBLE_LEVELS};
use sylva_placement::{NoiseTerrain, NoiseTerrainParams, RockFormation};
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to load config: {error}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    sylva_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let terrain = NoiseTerrain::new(NoiseTerrainParams {
        seed: config.seed as u32,
        ..NoiseTerrainParams::default()
    });
    let rocks = [
        RockFormation {
            position: DVec3::new(14.0, 0.0, -8.0),
            half_extents: DVec3::new(3.0, 2.0, 2.5),
        },
        RockFormation {
            position: DVec3::new(-22.0, 0.0, 17.0),
            half_extents: DVec3::new(5.0, 3.0, 4.0),
        },
    ];

    let forest = generate_forest(&config, &terrain, &rocks);
    info!(
        trees = forest.placements.len(),
        nodes = forest.total_nodes(),
        digest = forest_digest(&forest),
        "forest ready"
    );

    // Walk a camera out of the field and report how the LOD mix shifts.
    let positions: Vec<DVec3> = forest.placements.iter().map(|p| p.position).collect();
    let mut controller = LodController::new(config.lod.clone(), positions.len());
    let mut batches = BatchVisibility::new(positions.len());

    for step in 0..6 {
        let camera = DVec3::new(step as f64 * 50.0, 10.0, 0.0);
        controller.update(0.0, camera, &positions, &mut batches, true);
        let counts: Vec<usize> = (0..VISIBLE_LEVELS)
            .map(|level| batches.visible_count(level))
            .collect();
        let hidden = positions.len() - counts.iter().sum::<usize>();
        info!(
            camera_x = camera.x,
            lod0 = counts[0],
            lod1 = counts[1],
            lod2 = counts[2],
            hidden,
            "lod mix"
        );
    }

    let tallest = forest
        .skeletons
        .iter()
        .enumerate()
        .max_by_key(|(_, s)| s.reachable_ids().len());
    if let Some((index, skeleton)) = tallest {
        info!(
            tree = index,
            nodes = skeleton.reachable_ids().len(),
            terminals = skeleton.terminal_node_ids.len(),
            trunk_radius = skeleton.nodes[skeleton.root_id].radius,
            "largest skeleton"
        );
    }
}
