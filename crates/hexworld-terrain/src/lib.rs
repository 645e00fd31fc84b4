//! Terrain classification for geodesic grid cells: multi-octave noise,
//! category registry, elevation threshold tables, and the per-cell classifier.

mod category;
mod classifier;
mod error;
mod noise_field;
mod preset;
mod threshold;

pub use category::{CategoryDef, CategoryId, CategoryRegistry, CategoryRegistryError, Rgba};
pub use classifier::{PolarOverride, TerrainCell, TerrainClassifier};
pub use error::TerrainError;
pub use noise_field::{MAX_SAMPLING_EXTENT, NoiseConfig, NoiseField};
pub use preset::TerrainPreset;
pub use threshold::{Band, ThresholdTable};
