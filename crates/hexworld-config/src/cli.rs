//! Command-line argument parsing for Hexworld.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, PolarConfig};

/// Hexworld command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexworld", about = "Goldberg hexagon sphere generator")]
pub struct CliArgs {
    /// First Goldberg parameter (segments per icosahedron edge).
    #[arg(long)]
    pub m: Option<u32>,

    /// Second Goldberg parameter (0 for class-I grids).
    #[arg(long)]
    pub n: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Base noise frequency.
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Amplitude ratio between octaves.
    #[arg(long)]
    pub persistence: Option<f64>,

    /// Enable the polar override above this latitude, in degrees.
    #[arg(long)]
    pub polar: Option<f64>,

    /// Classification worker threads (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

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
        if let Some(m) = args.m {
            self.grid.m = m;
        }
        if let Some(n) = args.n {
            self.grid.n = n;
        }
        if let Some(seed) = args.seed {
            self.noise.seed = Some(seed);
        }
        if let Some(frequency) = args.frequency {
            self.noise.frequency = frequency;
        }
        if let Some(octaves) = args.octaves {
            self.noise.octaves = octaves;
        }
        if let Some(persistence) = args.persistence {
            self.noise.persistence = persistence;
        }
        if let Some(cutoff_deg) = args.polar {
            let polar = self.terrain.polar.get_or_insert_with(PolarConfig::default);
            polar.cutoff_deg = cutoff_deg;
        }
        if let Some(threads) = args.threads {
            self.grid.classify_threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
