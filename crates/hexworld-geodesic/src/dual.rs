//! Dual graph construction: one polygon cell per tessellation vertex.
//!
//! Triangles are grouped into fans by the canonical key of each vertex, every
//! fan is walked in rotational order to form the cell boundary, and cells that
//! share a triangle become neighbors.

use glam::DVec3;
use hashbrown::HashMap;
use tracing::debug;

use crate::key::{DEFAULT_KEY_DECIMALS, VertexKey, round_decimals};
use crate::{GeodesicError, TriangleMesh};

/// Decimal places kept in cell boundary points and centroids by default.
pub const DEFAULT_OUTPUT_DECIMALS: u32 = 3;

/// Identifier of a dual cell, assigned in vertex discovery order.
///
/// Stable for one generation run; carries no other meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    /// The id as an index into the cell collection.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A pentagon or hexagon of the dual grid.
///
/// `C` is the terrain category type assigned after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct DualCell<C> {
    /// Discovery-order identifier.
    pub id: CellId,
    /// Closed ring of triangle centroids, counter-clockwise seen from outside.
    /// The first point is repeated as the last.
    pub boundary: Vec<DVec3>,
    /// Centroid of `boundary`, on the unit sphere before output rounding.
    pub centroid: DVec3,
    /// Sorted ids of the cells sharing an edge with this one.
    pub neighbors: Vec<CellId>,
    /// Terrain category, `None` until classified.
    pub category: Option<C>,
    /// Pointer-hover state owned by the interaction layer.
    pub hovered: bool,
}

impl<C> DualCell<C> {
    /// Number of polygon sides.
    pub fn sides(&self) -> usize {
        self.boundary.len().saturating_sub(1)
    }

    /// Returns `true` for the twelve five-sided cells.
    pub fn is_pentagon(&self) -> bool {
        self.sides() == 5
    }

    /// Distinct boundary points, without the closing repeat.
    pub fn corners(&self) -> &[DVec3] {
        &self.boundary[..self.sides()]
    }
}

/// Builds the dual polygon grid of a triangle mesh.
#[derive(Clone, Copy, Debug)]
pub struct DualGraphBuilder {
    key_decimals: u32,
    output_decimals: Option<u32>,
}

impl Default for DualGraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_DECIMALS, Some(DEFAULT_OUTPUT_DECIMALS))
    }
}

/// Scratch state of one build: vertex keys per triangle and triangle fans per vertex.
struct Fans {
    /// Canonical key of every distinct vertex, in discovery order.
    centers: Vec<VertexKey>,
    slot_of: HashMap<VertexKey, usize>,
    /// Triangles touching each vertex, in discovery order.
    members: Vec<Vec<usize>>,
    /// Key ring of every triangle.
    rings: Vec<[VertexKey; 3]>,
}

impl DualGraphBuilder {
    /// Create a builder.
    ///
    /// `key_decimals` sets the vertex identity tolerance (see [`VertexKey`]).
    /// `output_decimals` rounds boundary points and centroids for stable
    /// output; `None` keeps full precision.
    pub fn new(key_decimals: u32, output_decimals: Option<u32>) -> Self {
        Self {
            key_decimals,
            output_decimals,
        }
    }

    /// Build one cell per distinct vertex of `mesh`.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesicError::MalformedMesh`] if a triangle collapses under
    /// the key tolerance or a vertex fan is not a single closed disc.
    pub fn build<C>(&self, mesh: &TriangleMesh) -> Result<Vec<DualCell<C>>, GeodesicError> {
        let fans = self.group(mesh)?;
        debug!(
            triangles = mesh.len(),
            vertices = fans.centers.len(),
            "grouped triangle fans"
        );

        let centroids: Vec<DVec3> = mesh
            .triangles
            .iter()
            .map(|t| t.centroid().normalize())
            .collect();

        let mut cells = Vec::with_capacity(fans.centers.len());
        for slot in 0..fans.centers.len() {
            let ordered = fans.ordered(slot)?;
            let ring: Vec<DVec3> = ordered.iter().map(|&t| centroids[t]).collect();
            let centroid = polygon_centroid(&ring);

            let mut boundary: Vec<DVec3> = ring.into_iter().map(|p| self.round(p)).collect();
            boundary.push(boundary[0]);

            cells.push(DualCell {
                id: CellId(slot as u32),
                boundary,
                centroid: self.round(centroid),
                neighbors: fans.neighbors(slot),
                category: None,
                hovered: false,
            });
        }

        debug!(cells = cells.len(), "built dual cells");
        Ok(cells)
    }

    fn group(&self, mesh: &TriangleMesh) -> Result<Fans, GeodesicError> {
        let mut fans = Fans {
            centers: Vec::with_capacity(mesh.expected_vertex_count()),
            slot_of: HashMap::with_capacity(mesh.expected_vertex_count()),
            members: Vec::with_capacity(mesh.expected_vertex_count()),
            rings: Vec::with_capacity(mesh.len()),
        };

        for (index, triangle) in mesh.triangles.iter().enumerate() {
            let ring = triangle
                .vertices
                .map(|v| VertexKey::quantize(v, self.key_decimals));
            if ring[0] == ring[1] || ring[1] == ring[2] || ring[0] == ring[2] {
                return Err(GeodesicError::MalformedMesh(format!(
                    "triangle {index} collapses at key precision {}",
                    self.key_decimals
                )));
            }

            for key in ring {
                let slot = *fans.slot_of.entry(key).or_insert_with(|| {
                    fans.centers.push(key);
                    fans.members.push(Vec::with_capacity(6));
                    fans.centers.len() - 1
                });
                let members = &mut fans.members[slot];
                if !members.contains(&index) {
                    members.push(index);
                }
            }
            fans.rings.push(ring);
        }

        Ok(fans)
    }

    fn round(&self, p: DVec3) -> DVec3 {
        match self.output_decimals {
            Some(decimals) => round_decimals(p, decimals),
            None => p,
        }
    }
}

impl Fans {
    /// Vertex preceding `center` in the ring of `triangle`.
    fn pivot(&self, triangle: usize, center: VertexKey) -> VertexKey {
        let ring = &self.rings[triangle];
        let pos = ring.iter().position(|k| *k == center).unwrap_or(0);
        ring[(pos + 2) % 3]
    }

    /// Fan of `slot` in rotational order.
    ///
    /// Starting from the first triangle, each step crosses the edge between
    /// the center and the vertex preceding it in the last placed triangle.
    fn ordered(&self, slot: usize) -> Result<Vec<usize>, GeodesicError> {
        let center = self.centers[slot];
        let fan = &self.members[slot];
        if fan.len() < 3 {
            return Err(GeodesicError::MalformedMesh(format!(
                "vertex {center} touches only {} triangles",
                fan.len()
            )));
        }

        let mut ordered = Vec::with_capacity(fan.len());
        ordered.push(fan[0]);
        while ordered.len() < fan.len() {
            let last = ordered[ordered.len() - 1];
            let pivot = self.pivot(last, center);
            let mut candidates = self.members[self.slot_of[&pivot]]
                .iter()
                .copied()
                .filter(|t| fan.contains(t) && !ordered.contains(t));

            let Some(next) = candidates.next() else {
                return Err(GeodesicError::MalformedMesh(format!(
                    "fan of vertex {center} breaks after {} of {} triangles",
                    ordered.len(),
                    fan.len()
                )));
            };
            if candidates.next().is_some() {
                return Err(GeodesicError::MalformedMesh(format!(
                    "edge {center}-{pivot} is shared by more than two triangles"
                )));
            }
            ordered.push(next);
        }

        let closing = self.pivot(ordered[ordered.len() - 1], center);
        if !self.rings[ordered[0]].contains(&closing) {
            return Err(GeodesicError::MalformedMesh(format!(
                "fan of vertex {center} does not close"
            )));
        }
        Ok(ordered)
    }

    /// Cells touched by the triangles of `slot`'s fan, excluding itself.
    fn neighbors(&self, slot: usize) -> Vec<CellId> {
        let mut neighbors: Vec<CellId> = self.members[slot]
            .iter()
            .flat_map(|&t| self.rings[t])
            .map(|key| self.slot_of[&key])
            .filter(|&other| other != slot)
            .map(|other| CellId(other as u32))
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}

/// Area-weighted centroid of a planar-ish polygon ring, projected to the unit sphere.
fn polygon_centroid(ring: &[DVec3]) -> DVec3 {
    let origin = ring.iter().copied().sum::<DVec3>() / ring.len() as f64;
    let axis = origin.normalize_or_zero();

    let mut weighted = DVec3::ZERO;
    let mut total = 0.0;
    for (i, &a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        let area = (a - origin).cross(b - origin).dot(axis) * 0.5;
        weighted += (origin + a + b) / 3.0 * area;
        total += area;
    }

    let centroid = if total.abs() > f64::EPSILON {
        weighted / total
    } else {
        origin
    };
    centroid.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Triangle, tessellate};

    type Cell = DualCell<u8>;

    fn build(m: u32, n: u32) -> Vec<Cell> {
        let mesh = tessellate(m, n).unwrap();
        DualGraphBuilder::default().build(&mesh).unwrap()
    }

    #[test]
    fn test_cell_counts() {
        assert_eq!(build(1, 0).len(), 12);
        assert_eq!(build(2, 0).len(), 42);
        assert_eq!(build(5, 0).len(), 252);
        assert_eq!(build(1, 1).len(), 32);
        assert_eq!(build(2, 1).len(), 72);
    }

    #[test]
    fn test_degree_invariant() {
        for (m, n) in [(1, 0), (2, 0), (3, 0), (8, 0), (1, 1), (2, 1), (3, 2)] {
            let cells = build(m, n);
            let pentagons = cells.iter().filter(|c| c.neighbors.len() == 5).count();
            let hexagons = cells.iter().filter(|c| c.neighbors.len() == 6).count();
            assert_eq!(pentagons, 12, "pentagons for ({m}, {n})");
            assert_eq!(pentagons + hexagons, cells.len(), "odd degree in ({m}, {n})");
        }
    }

    #[test]
    fn test_adjacency_symmetric() {
        let cells = build(4, 1);
        for cell in &cells {
            assert!(!cell.neighbors.contains(&cell.id));
            for n in &cell.neighbors {
                assert!(
                    cells[n.index()].neighbors.contains(&cell.id),
                    "{} lists {} but not vice versa",
                    cell.id,
                    n
                );
            }
        }
    }

    #[test]
    fn test_boundary_closed_and_sized() {
        for cell in build(3, 0) {
            assert_eq!(cell.boundary.first(), cell.boundary.last());
            assert_eq!(cell.sides(), cell.neighbors.len());
            assert_eq!(cell.corners().len(), cell.sides());
        }
    }

    #[test]
    fn test_boundary_counter_clockwise_from_outside() {
        let mesh = tessellate(6, 0).unwrap();
        let cells: Vec<Cell> = DualGraphBuilder::new(DEFAULT_KEY_DECIMALS, None)
            .build(&mesh)
            .unwrap();
        for cell in &cells {
            let corners = cell.corners();
            for i in 0..corners.len() {
                let a = corners[i];
                let b = corners[(i + 1) % corners.len()];
                let c = corners[(i + 2) % corners.len()];
                let turn = (b - a).cross(c - b).dot(cell.centroid);
                assert!(turn > 0.0, "cell {} turns clockwise at corner {i}", cell.id);
            }
        }
    }

    #[test]
    fn test_centroid_inside_cell() {
        let mesh = tessellate(4, 0).unwrap();
        let cells: Vec<Cell> = DualGraphBuilder::new(DEFAULT_KEY_DECIMALS, None)
            .build(&mesh)
            .unwrap();
        for cell in &cells {
            assert!((cell.centroid.length() - 1.0).abs() < 1e-9);
            let corners = cell.corners();
            for i in 0..corners.len() {
                let a = corners[i];
                let b = corners[(i + 1) % corners.len()];
                assert!((b - a).cross(cell.centroid - a).dot(cell.centroid) > 0.0);
            }
        }
    }

    #[test]
    fn test_output_rounding() {
        for cell in build(2, 0) {
            for p in cell.boundary.iter().chain(std::iter::once(&cell.centroid)) {
                for v in p.to_array() {
                    let scaled = v * 1000.0;
                    assert!((scaled - scaled.round()).abs() < 1e-6, "{v} not rounded");
                }
            }
        }
    }

    #[test]
    fn test_excessive_output_precision_keeps_boundaries_closed() {
        let mesh = tessellate(2, 0).unwrap();
        let cells: Vec<Cell> = DualGraphBuilder::new(DEFAULT_KEY_DECIMALS, Some(400))
            .build(&mesh)
            .unwrap();
        for cell in &cells {
            assert!(cell.centroid.is_finite(), "cell {} centroid", cell.id);
            assert!(cell.boundary.iter().all(|p| p.is_finite()));
            assert_eq!(cell.boundary.first(), cell.boundary.last());
        }
    }

    #[test]
    fn test_deterministic_order() {
        assert_eq!(build(3, 1), build(3, 1));
    }

    #[test]
    fn test_coarse_keys_detected_as_malformed() {
        // One decimal cannot separate neighboring vertices of a dense mesh.
        let mesh = tessellate(20, 0).unwrap();
        let result = DualGraphBuilder::new(1, None).build::<u8>(&mesh);
        assert!(matches!(result, Err(GeodesicError::MalformedMesh(_))));
    }

    #[test]
    fn test_open_fan_rejected() {
        // Remove one triangle: the three vertices around the hole lose a
        // closed fan.
        let mut mesh = tessellate(2, 0).unwrap();
        mesh.triangles.remove(0);
        let result = DualGraphBuilder::default().build::<u8>(&mesh);
        assert!(matches!(result, Err(GeodesicError::MalformedMesh(_))));
    }

    #[test]
    fn test_duplicated_edge_rejected() {
        // A flap glued onto an existing edge leaves that edge shared by three
        // triangles and its apex with a one-triangle fan.
        let mut mesh = tessellate(2, 0).unwrap();
        let [a, b, _] = mesh.triangles[0].vertices;
        mesh.triangles.push(Triangle {
            vertices: [b, a, (a + b).normalize()],
        });
        let result = DualGraphBuilder::default().build::<u8>(&mesh);
        assert!(matches!(result, Err(GeodesicError::MalformedMesh(_))));
    }
}
