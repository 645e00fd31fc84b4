//! Configuration system for Hexworld.
//!
//! Grid, noise, and terrain settings persist to disk as a RON file, with CLI
//! overrides via clap, hot-reload detection, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BandConfig, Config, DebugConfig, GridConfig, NoiseSettings, PaletteEntry, PolarConfig,
    TerrainConfig,
};
pub use error::ConfigError;
