//! Icosahedral Goldberg/geodesic tessellation of the unit sphere.
//!
//! The `(m, n)` triangular lattice is laid over each of the 20 icosahedron
//! faces with the face corners at lattice points `(0, 0)`, `(m, n)` and
//! `(-n, m + n)`. Every lattice triangle whose centroid falls inside a face is
//! emitted by that face; triangles whose centroid sits exactly on a shared edge
//! are emitted by the lower-indexed face only. Lattice points beyond the face
//! are expressed through the neighbor face unfolded across the crossed edge.
//!
//! Positions are built from integer barycentric weights summed in a fixed
//! corner order, so a vertex shared by several faces is bit-identical no
//! matter which face produced it.

use glam::DVec3;
use tracing::debug;

use crate::GeodesicError;

/// One face of a tessellated sphere.
///
/// Vertices are counter-clockwise seen from outside the sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    /// Ring of the three corner points on the unit sphere.
    pub vertices: [DVec3; 3],
}

impl Triangle {
    /// Arithmetic mean of the corners (inside the sphere, not normalized).
    pub fn centroid(&self) -> DVec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    /// Unnormalized face normal following the winding order.
    pub fn normal(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a)
    }
}

/// A closed triangle mesh on the unit sphere.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    /// Faces in generation order.
    pub triangles: Vec<Triangle>,
    m: u32,
    n: u32,
}

impl TriangleMesh {
    /// The Goldberg parameters this mesh was generated with.
    pub fn frequency(&self) -> (u32, u32) {
        (self.m, self.n)
    }

    /// Triangulation number `T = m² + mn + n²`.
    pub fn triangulation_number(&self) -> u64 {
        triangulation_number(self.m, self.n)
    }

    /// Number of distinct vertices a well-formed mesh has: `10T + 2`.
    pub fn expected_vertex_count(&self) -> usize {
        (10 * self.triangulation_number() + 2) as usize
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Tessellate the unit sphere with Goldberg parameters `(m, n)`.
///
/// `n = 0` is the common class-I subdivision with `m` segments per icosahedron
/// edge. The result has `20T` faces and `10T + 2` vertices, of which exactly 12
/// have degree 5 and the rest degree 6.
///
/// # Errors
///
/// Returns [`GeodesicError::InvalidSubdivision`] when both parameters are zero.
pub fn tessellate(m: u32, n: u32) -> Result<TriangleMesh, GeodesicError> {
    if m == 0 && n == 0 {
        return Err(GeodesicError::InvalidSubdivision { m, n });
    }

    let ico = Icosahedron::new();
    let lattice = Lattice::new(m, n);
    let t = lattice.t;
    let mut triangles = Vec::with_capacity((20 * t) as usize);

    let (mi, ni) = (i64::from(m), i64::from(n));
    for face in 0..ico.faces.len() {
        for i in (-ni - 1)..=mi {
            for j in -1..=(mi + ni) {
                // Up triangle and down triangle anchored at lattice point (i, j),
                // each with its centroid scaled by 3.
                let candidates = [
                    ([3 * i + 1, 3 * j + 1], [[i, j], [i + 1, j], [i, j + 1]]),
                    ([3 * i + 2, 3 * j + 2], [[i + 1, j], [i + 1, j + 1], [i, j + 1]]),
                ];
                for (centroid, corners) in candidates {
                    if !lattice.owns(&ico, face, centroid) {
                        continue;
                    }
                    let mut vertices = [DVec3::ZERO; 3];
                    for (slot, corner) in vertices.iter_mut().zip(corners) {
                        *slot = ico.lattice_point(&lattice, face, corner)?;
                    }
                    triangles.push(Triangle { vertices });
                }
            }
        }
    }

    debug!(m, n, triangles = triangles.len(), "tessellated sphere");
    Ok(TriangleMesh { triangles, m, n })
}

fn triangulation_number(m: u32, n: u32) -> u64 {
    let (m, n) = (u64::from(m), u64::from(n));
    m * m + m * n + n * n
}

/// The `(m, n)` lattice expressed in barycentric weights of a face.
struct Lattice {
    m: i64,
    n: i64,
    t: i64,
}

impl Lattice {
    fn new(m: u32, n: u32) -> Self {
        Self {
            m: i64::from(m),
            n: i64::from(n),
            t: triangulation_number(m, n) as i64,
        }
    }

    /// Barycentric weights `(w0, w1, w2)` of lattice point `p`, scaled so that
    /// they sum to `scale * T`.
    fn weights(&self, p: [i64; 2], scale: i64) -> [i64; 3] {
        let [x, y] = p;
        let w1 = (self.m + self.n) * x + self.n * y;
        let w2 = self.m * y - self.n * x;
        [scale * self.t - w1 - w2, w1, w2]
    }

    /// Whether `face` emits the lattice triangle with the given 3x-scaled centroid.
    fn owns(&self, ico: &Icosahedron, face: usize, centroid: [i64; 2]) -> bool {
        let w = self.weights(centroid, 3);
        if w.iter().any(|&v| v < 0) {
            return false;
        }
        // A centroid can touch at most one edge; the face across it shares the triangle.
        match w.iter().position(|&v| v == 0) {
            Some(corner) => face < ico.across[face][corner].face,
            None => true,
        }
    }
}

/// The face on the other side of the edge opposite one corner.
#[derive(Clone, Copy, Debug, Default)]
struct Across {
    face: usize,
    vertex: usize,
}

struct Icosahedron {
    vertices: [DVec3; 12],
    faces: Vec<[usize; 3]>,
    across: Vec<[Across; 3]>,
}

impl Icosahedron {
    /// Regular icosahedron with vertices at both poles and two rings of five
    /// at latitude `±atan(1/2)`, the lower ring rotated by 36°.
    fn new() -> Self {
        let ring_lat = libm::atan(0.5);
        let mut vertices = [DVec3::ZERO; 12];
        vertices[0] = DVec3::Z;
        vertices[11] = DVec3::NEG_Z;
        for k in 0..5 {
            let upper_lon = (72.0 * k as f64).to_radians();
            let lower_lon = (72.0 * k as f64 + 36.0).to_radians();
            vertices[1 + k] = ring_point(upper_lon, ring_lat);
            vertices[6 + k] = ring_point(lower_lon, -ring_lat);
        }

        let upper = |k: usize| 1 + k % 5;
        let lower = |k: usize| 6 + k % 5;
        let mut faces = Vec::with_capacity(20);
        for k in 0..5 {
            faces.push([0, upper(k), upper(k + 1)]);
            faces.push([upper(k), lower(k), upper(k + 1)]);
            faces.push([upper(k + 1), lower(k), lower(k + 1)]);
            faces.push([11, lower(k + 1), lower(k)]);
        }
        for face in &mut faces {
            let [a, b, c] = (*face).map(|v| vertices[v]);
            if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
                face.swap(1, 2);
            }
        }

        let across = faces
            .iter()
            .enumerate()
            .map(|(fi, face)| {
                let mut row = [Across::default(); 3];
                for (corner, entry) in row.iter_mut().enumerate() {
                    let edge = [face[(corner + 1) % 3], face[(corner + 2) % 3]];
                    for (gi, other) in faces.iter().enumerate() {
                        if gi != fi && edge.iter().all(|v| other.contains(v)) {
                            let vertex = other
                                .iter()
                                .copied()
                                .find(|v| !edge.contains(v))
                                .unwrap_or(other[0]);
                            *entry = Across { face: gi, vertex };
                        }
                    }
                }
                row
            })
            .collect();

        Self {
            vertices,
            faces,
            across,
        }
    }

    /// Unit-sphere position of lattice point `p` seen from `face`.
    fn lattice_point(
        &self,
        lattice: &Lattice,
        face: usize,
        p: [i64; 2],
    ) -> Result<DVec3, GeodesicError> {
        let corners = self.faces[face];
        let w = lattice.weights(p, 1);

        let mut terms = match w.iter().position(|&v| v < 0) {
            None => [
                (corners[0], w[0]),
                (corners[1], w[1]),
                (corners[2], w[2]),
            ],
            Some(k) => {
                // Unfold across the edge opposite corner k: that corner equals
                // the sum of the edge corners minus the neighbor's far vertex.
                let far = self.across[face][k].vertex;
                let (a, b) = ((k + 1) % 3, (k + 2) % 3);
                [
                    (far, -w[k]),
                    (corners[a], w[a] + w[k]),
                    (corners[b], w[b] + w[k]),
                ]
            }
        };
        if terms.iter().any(|&(_, weight)| weight < 0) {
            return Err(GeodesicError::MalformedMesh(format!(
                "lattice point {p:?} of face {face} lies outside its unfolded neighborhood"
            )));
        }

        terms.sort_unstable_by_key(|&(vertex, _)| vertex);
        let sum = terms
            .iter()
            .filter(|&&(_, weight)| weight != 0)
            .fold(DVec3::ZERO, |acc, &(vertex, weight)| {
                acc + self.vertices[vertex] * weight as f64
            });
        Ok(sum.normalize())
    }
}

fn ring_point(lon: f64, lat: f64) -> DVec3 {
    let r = libm::cos(lat);
    DVec3::new(r * libm::cos(lon), r * libm::sin(lon), libm::sin(lat))
}
