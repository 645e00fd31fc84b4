//! Errors raised while building a geodesic grid.

/// Failures of sphere tessellation or dual construction.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GeodesicError {
    /// The subdivision parameters describe a mesh with no faces.
    #[error("invalid subdivision ({m}, {n}): at least one parameter must be positive")]
    InvalidSubdivision {
        /// First Goldberg parameter.
        m: u32,
        /// Second Goldberg parameter.
        n: u32,
    },

    /// The triangle mesh is not a closed 2-manifold around some vertex.
    ///
    /// Never produced for meshes returned by [`crate::tessellate`]; it signals a
    /// broken mesh contract rather than bad user input.
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),
}
