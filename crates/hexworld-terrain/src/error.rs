//! Terrain configuration errors.

/// Errors raised while validating terrain inputs. All are detected before any
/// noise is sampled.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum TerrainError {
    /// Frequency, octave count, persistence, or seed out of range.
    #[error("invalid noise config: {0}")]
    InvalidNoiseConfig(String),

    /// Threshold table is empty, unordered, or lacks a single trailing fallback.
    #[error("invalid threshold table: {0}")]
    InvalidThresholdTable(String),

    /// A category name that is not registered.
    #[error("unknown terrain category: {0}")]
    UnknownCategory(String),

    /// Polar cutoff latitude outside `[0, 90]` degrees.
    #[error("invalid polar cutoff {0}°, expected a latitude in [0, 90]")]
    InvalidPolarCutoff(f64),

    /// A category registration failed.
    #[error(transparent)]
    Registry(#[from] crate::CategoryRegistryError),

    /// A color string that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}
