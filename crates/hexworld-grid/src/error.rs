//! Grid error types.

use hexworld_geodesic::{CellId, GeodesicError};
use hexworld_terrain::TerrainError;

/// Errors from building or querying a grid.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum GridError {
    /// Tessellation or dual construction failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),

    /// Noise, category, or threshold configuration was rejected.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// A cell id outside the grid was addressed.
    #[error("no cell {0} in this grid")]
    UnknownCell(CellId),
}
