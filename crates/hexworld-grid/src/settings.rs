//! Resolved generation settings.

use hexworld_config::Config;
use hexworld_geodesic::{DEFAULT_KEY_DECIMALS, DEFAULT_OUTPUT_DECIMALS};
use hexworld_terrain::{NoiseConfig, PolarOverride, Rgba, TerrainPreset};
use tracing::warn;

use crate::GridError;

const DEFAULT_HIGHLIGHT: Rgba = Rgba([0xF4, 0x43, 0x36, 0xFF]);

/// Everything [`crate::GridService`] needs to generate a grid, with category
/// names already resolved to ids.
#[derive(Clone, Debug)]
pub struct GridSettings {
    /// First Goldberg parameter.
    pub m: u32,
    /// Second Goldberg parameter.
    pub n: u32,
    /// Decimal places of the vertex identity key.
    pub key_decimals: u32,
    /// Decimal places of output coordinates.
    pub output_decimals: Option<u32>,
    /// Classification worker threads (0 = one per CPU, 1 = sequential).
    pub classify_threads: usize,
    /// Fractal noise parameters; a missing seed is generated per run.
    pub noise: NoiseConfig,
    /// Categories and the elevation bands over them.
    pub preset: TerrainPreset,
    /// Optional latitude override applied before the bands.
    pub polar: Option<PolarOverride>,
    /// Color of the hovered cell.
    pub highlight: Rgba,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            m: 24,
            n: 0,
            key_decimals: DEFAULT_KEY_DECIMALS,
            output_decimals: Some(DEFAULT_OUTPUT_DECIMALS),
            classify_threads: 0,
            noise: NoiseConfig::default(),
            preset: TerrainPreset::globe(),
            polar: None,
            highlight: DEFAULT_HIGHLIGHT,
        }
    }
}

impl GridSettings {
    /// Settings for an `(m, n)` grid with the default globe preset.
    pub fn with_frequency(m: u32, n: u32) -> Self {
        Self {
            m,
            n,
            ..Self::default()
        }
    }

    /// Resolve a loaded [`Config`].
    ///
    /// Bands without a palette entry are drawn gray. A polar category absent
    /// from the bands is registered on the fly.
    ///
    /// # Errors
    ///
    /// Fails on malformed colors, band tables, or polar cutoffs.
    pub fn from_config(config: &Config) -> Result<Self, GridError> {
        let terrain = &config.terrain;
        let color_of = |name: &str| -> Result<Rgba, GridError> {
            match terrain.color_of(name) {
                Some(hex) => Ok(Rgba::from_hex(hex)?),
                None => {
                    warn!(category = name, "no palette color configured, using gray");
                    Ok(Rgba::GRAY)
                }
            }
        };

        let mut entries = Vec::with_capacity(terrain.bands.len());
        for band in &terrain.bands {
            entries.push((band.threshold, band.category.as_str(), color_of(&band.category)?));
        }
        let mut preset = TerrainPreset::from_entries(entries)?;

        let polar = match &terrain.polar {
            Some(polar) => {
                let category = preset
                    .registry
                    .ensure(&polar.category, color_of(&polar.category)?);
                Some(PolarOverride::new(polar.cutoff_deg, category)?)
            }
            None => None,
        };

        let noise = &config.noise;
        Ok(Self {
            m: config.grid.m,
            n: config.grid.n,
            key_decimals: config.grid.key_decimals,
            output_decimals: config.grid.output_decimals,
            classify_threads: config.grid.classify_threads,
            noise: NoiseConfig {
                frequency: noise.frequency,
                octaves: noise.octaves,
                persistence: noise.persistence,
                seed: noise.seed,
                offset: noise.offset,
            },
            preset,
            polar,
            highlight: Rgba::from_hex(&terrain.highlight)?,
        })
    }
}
