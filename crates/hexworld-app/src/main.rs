//! Headless driver: load config, generate one grid, log a summary.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use hexworld_config::{CliArgs, Config};
use hexworld_geodesic::GeoCoord;
use hexworld_grid::{Grid, GridError, GridService, GridSettings};
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexworld_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config, &config_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("grid generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, config_dir: &Path) -> Result<(), GridError> {
    info!(config_dir = %config_dir.display(), "starting hexworld");

    let service = GridService::new(GridSettings::from_config(config)?);
    let grid = service.generate()?;
    summarize(&service, &grid);
    Ok(())
}

fn summarize(service: &GridService, grid: &Grid) {
    let (m, n) = grid.frequency();
    info!(
        m,
        n,
        cells = grid.len(),
        pentagons = grid.pentagons().count(),
        facets = grid.facet_count(),
        seed = grid.noise_config().seed,
        "grid ready"
    );

    let registry = service.registry();
    for (category, count) in grid.category_histogram() {
        let name = registry.get(category).map_or("?", |def| def.name.as_str());
        let share = 100.0 * count as f64 / grid.len() as f64;
        info!(category = name, cells = count, "{share:.1}%");
    }

    for cell in grid.pentagons() {
        let coord = GeoCoord::from_point(cell.centroid);
        debug!(
            cell = %cell.id,
            lon = coord.lon,
            lat = coord.lat,
            neighbors = ?cell.neighbors,
            "pentagon"
        );
    }

    let palette = service.palette();
    debug!(updates = palette.color_updates(grid).len(), "color updates ready");
}
