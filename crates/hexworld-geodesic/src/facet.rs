//! Facet layout of a rendered Goldberg polyhedron.
//!
//! Renderers triangulate each cell into facets: a pentagon into 3, a hexagon
//! into 4. Faces are numbered with the 12 pentagons first, then the hexagons,
//! so the owning face of a facet follows from its index alone.

use std::ops::Range;

/// Number of pentagonal cells on any icosahedral Goldberg grid.
pub const PENTAGON_COUNT: usize = 12;

/// Facets per pentagonal face.
pub const PENTAGON_FACETS: usize = 3;

/// Facets per hexagonal face.
pub const HEXAGON_FACETS: usize = 4;

const PENTAGON_SPAN: usize = PENTAGON_COUNT * PENTAGON_FACETS;

/// Face number owning the facet at index `facet`.
pub const fn face_for_facet(facet: usize) -> usize {
    if facet < PENTAGON_SPAN {
        facet / PENTAGON_FACETS
    } else {
        (facet - PENTAGON_SPAN) / HEXAGON_FACETS + PENTAGON_COUNT
    }
}

/// Facet indices making up face number `face`.
pub fn facets_for_face(face: usize) -> Range<usize> {
    if face < PENTAGON_COUNT {
        let start = face * PENTAGON_FACETS;
        start..start + PENTAGON_FACETS
    } else {
        let start = PENTAGON_SPAN + (face - PENTAGON_COUNT) * HEXAGON_FACETS;
        start..start + HEXAGON_FACETS
    }
}

/// Total facets of a grid with `cell_count` faces (at least 12).
pub const fn facet_count(cell_count: usize) -> usize {
    PENTAGON_SPAN + cell_count.saturating_sub(PENTAGON_COUNT) * HEXAGON_FACETS
}
