//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";
const APP_DIR: &str = "hexworld";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere subdivision and dual construction.
    pub grid: GridConfig,
    /// Fractal noise driving elevations.
    pub noise: NoiseSettings,
    /// Elevation bands, polar override, and colors.
    pub terrain: TerrainConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Grid construction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// First Goldberg parameter (segments per icosahedron edge when `n = 0`).
    pub m: u32,
    /// Second Goldberg parameter; `0` for class-I grids.
    pub n: u32,
    /// Decimal places of the vertex identity key.
    pub key_decimals: u32,
    /// Decimal places kept in output boundaries and centroids (`None` = full).
    pub output_decimals: Option<u32>,
    /// Worker threads for classification (0 = one per CPU, 1 = sequential).
    pub classify_threads: usize,
}

/// Fractal noise settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseSettings {
    /// Base frequency of the first octave.
    pub frequency: f64,
    /// Number of octaves.
    pub octaves: u32,
    /// Amplitude ratio between octaves, in (0, 1).
    pub persistence: f64,
    /// Noise seed; a random one is generated and logged when absent.
    pub seed: Option<u32>,
    /// Domain offset added to every coordinate.
    pub offset: f64,
}

/// One elevation band. The last band must omit `threshold`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BandConfig {
    /// Exclusive lower bound; `None` for the catch-all band.
    pub threshold: Option<f64>,
    /// Category name.
    pub category: String,
}

/// Latitude override for polar cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolarConfig {
    /// Cells with `|latitude|` above this many degrees get `category`.
    pub cutoff_deg: f64,
    /// Category name for polar cells.
    pub category: String,
}

/// Display color of a category, as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaletteEntry {
    /// Category name.
    pub category: String,
    /// Hex color string.
    pub color: String,
}

/// Terrain classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Bands in descending threshold order.
    pub bands: Vec<BandConfig>,
    /// Optional polar override.
    pub polar: Option<PolarConfig>,
    /// Category colors.
    pub palette: Vec<PaletteEntry>,
    /// Color used for the hovered cell.
    pub highlight: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            m: 24,
            n: 0,
            key_decimals: 6,
            output_decimals: Some(3),
            classify_threads: 0,
        }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            frequency: 0.5,
            octaves: 8,
            persistence: 0.6,
            seed: None,
            offset: 0.0,
        }
    }
}

impl Default for PolarConfig {
    fn default() -> Self {
        Self {
            cutoff_deg: 66.5,
            category: "ice".to_string(),
        }
    }
}

const DEFAULT_BANDS: [(Option<f64>, &str, &str); 10] = [
    (Some(0.6), "ice", "#E3F2FDFF"),
    (Some(0.55), "land5", "#1C0D13FF"),
    (Some(0.45), "land4", "#362211FF"),
    (Some(0.35), "land3", "#576348FF"),
    (Some(0.25), "land2", "#6E876EFF"),
    (Some(0.1), "land1", "#558747FF"),
    (Some(0.05), "water1", "#436DC5FF"),
    (Some(0.0), "water2", "#2031A8FF"),
    (Some(-0.05), "water3", "#090A59FF"),
    (None, "water4", "#0A0B46FF"),
];

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS
                .iter()
                .map(|&(threshold, category, _)| BandConfig {
                    threshold,
                    category: category.to_string(),
                })
                .collect(),
            polar: None,
            palette: DEFAULT_BANDS
                .iter()
                .map(|&(_, category, color)| PaletteEntry {
                    category: category.to_string(),
                    color: color.to_string(),
                })
                .collect(),
            highlight: "#F44336FF".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl TerrainConfig {
    /// Configured color for `category`, if any.
    pub fn color_of(&self, category: &str) -> Option<&str> {
        self.palette
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.color.as_str())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Default per-user config directory (`<os config dir>/hexworld`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
