//! Geodesic sphere geometry: icosahedral tessellation, the pentagon/hexagon dual
//! grid built from it, and the facet layout used by rendering consumers.

mod dual;
mod error;
mod facet;
mod geo;
mod key;
mod tessellator;

pub use dual::{CellId, DEFAULT_OUTPUT_DECIMALS, DualCell, DualGraphBuilder};
pub use error::GeodesicError;
pub use facet::{
    HEXAGON_FACETS, PENTAGON_COUNT, PENTAGON_FACETS, face_for_facet, facet_count, facets_for_face,
};
pub use geo::{GeoCoord, latitude_deg, lon_lat_to_unit};
pub use key::{
    DEFAULT_KEY_DECIMALS, MAX_KEY_DECIMALS, MAX_OUTPUT_DECIMALS, VertexKey, round_decimals,
};
pub use tessellator::{Triangle, TriangleMesh, tessellate};
