//! `Mesh` struct and the plane/mesh isocontouring routine that produces cuts.

use crate::errors::{GeometryError, MeshError};
use crate::float_types::{EPSILON, Real, SUPER_VERTEX_OFFSET};
use crate::mesh::vertex::Vertex;
use hashbrown::{HashMap, HashSet};
use nalgebra::{Point3, Unit, Vector3};
use std::sync::OnceLock;

pub mod vertex;

/// The static 3D level geometry, immutable after load.
///
/// Built once per level from an OBJ file (or a shape constructor) and read
/// by the plane controller on every cut recomputation.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<[u32; 3]>,

    /// Lazily calculated AABB that spans `vertices`.
    local_aabb: OnceLock<(Point3<Real>, Point3<Real>)>,
}

impl Mesh {
    /// Build a mesh from vertex and face arrays, validating that every face
    /// index triple references a valid vertex.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        if faces.is_empty() {
            return Err(MeshError::Empty);
        }
        let len = vertices.len();
        for (face_idx, face) in faces.iter().enumerate() {
            for &index in face {
                if index as usize >= len {
                    return Err(MeshError::FaceIndexOutOfBounds {
                        face: face_idx,
                        index,
                        len,
                    });
                }
            }
        }
        Ok(Mesh {
            vertices,
            faces,
            local_aabb: OnceLock::new(),
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Axis-aligned bounding box of the mesh as `(mins, maxs)`.
    pub fn local_aabb(&self) -> (Point3<Real>, Point3<Real>) {
        *self.local_aabb.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(Real::MIN, Real::MIN, Real::MIN);
            for v in &self.vertices {
                mins = mins.inf(&v.pos);
                maxs = maxs.sup(&v.pos);
            }
            (mins, maxs)
        })
    }

    /// An axis-aligned cuboid centered at the origin with the given extents,
    /// 8 vertices and 12 triangles. Used by the prototype level and tests.
    pub fn cuboid(width: Real, depth: Real, height: Real) -> Self {
        let (hw, hd, hh) = (width * 0.5, depth * 0.5, height * 0.5);
        let corners = [
            (-hw, -hd, -hh),
            (hw, -hd, -hh),
            (hw, hd, -hh),
            (-hw, hd, -hh),
            (-hw, -hd, hh),
            (hw, -hd, hh),
            (hw, hd, hh),
            (-hw, hd, hh),
        ];
        let vertices = corners
            .iter()
            .map(|&(x, y, z)| Vertex::from_position(Point3::new(x, y, z)))
            .collect();
        let faces = vec![
            // bottom / top
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            // -y / +y
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            // -x / +x
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        // Indices are hardcoded against the 8 corners above.
        Mesh::new(vertices, faces).unwrap()
    }

    /// Compute the isocontour of the mesh against the plane through `origin`
    /// with the given `normal`: the set of edges where the plane crosses the
    /// mesh surface, each edge a pair of 3D points lying exactly on the plane.
    ///
    /// The routine evaluates a signed-distance scalar field over every vertex
    /// plus two synthetic "super-vertices" anchored at
    /// `origin ± normal * SUPER_VERTEX_OFFSET`, then marches the faces at
    /// isovalue 0. The super-vertex scalars live in a per-call scratch buffer;
    /// they pin the field's extremes on both sides of the plane and never
    /// contribute contour points.
    ///
    /// A plane that misses the mesh bounds yields an empty contour, which is a
    /// valid result (the player is "off the edge" of the level). A degenerate
    /// normal is rejected before any field evaluation.
    pub fn intersect_plane(
        &self,
        origin: Point3<Real>,
        normal: Vector3<Real>,
    ) -> Result<Vec<[Point3<Real>; 2]>, GeometryError> {
        let n = Unit::try_new(normal, EPSILON).ok_or(GeometryError::DegenerateNormal)?;

        // Cheap reject: the plane does not reach the mesh bounds.
        let (mins, maxs) = self.local_aabb();
        let mut lo = Real::MAX;
        let mut hi = Real::MIN;
        for &x in &[mins.x, maxs.x] {
            for &y in &[mins.y, maxs.y] {
                for &z in &[mins.z, maxs.z] {
                    let s = (Point3::new(x, y, z) - origin).dot(&n);
                    lo = lo.min(s);
                    hi = hi.max(s);
                }
            }
        }
        if lo > EPSILON || hi < -EPSILON {
            return Ok(Vec::new());
        }

        // Per-call scratch field: one scalar per mesh vertex, plus the two
        // super-vertex anchors appended at the end. Nothing survives the call.
        let mut field: Vec<Real> = Vec::with_capacity(self.vertices.len() + 2);
        field.extend(self.vertices.iter().map(|v| (v.pos - origin).dot(&n)));
        field.push(SUPER_VERTEX_OFFSET);
        field.push(-SUPER_VERTEX_OFFSET);
        debug_assert!(
            field.iter().any(|&s| s >= 0.0) && field.iter().any(|&s| s <= 0.0),
            "scalar field must span the isovalue"
        );

        let side = |s: Real| -> i8 {
            if s > EPSILON {
                1
            } else if s < -EPSILON {
                -1
            } else {
                0
            }
        };

        // One interpolated crossing per mesh edge, keyed canonically so the
        // two faces sharing an edge land on bitwise-identical contour points.
        let mut crossings: HashMap<(u32, u32), Point3<Real>> = HashMap::new();
        // Mesh edges lying exactly in the plane are shared by two faces but
        // must be emitted once.
        let mut coplanar_edges: HashSet<(u32, u32)> = HashSet::new();
        let mut segments: Vec<[Point3<Real>; 2]> = Vec::new();

        for face in &self.faces {
            let s = [
                field[face[0] as usize],
                field[face[1] as usize],
                field[face[2] as usize],
            ];
            let sides = [side(s[0]), side(s[1]), side(s[2])];
            if sides == [0, 0, 0] {
                // The whole face lies in the plane; its boundary edges are
                // picked up through the neighboring faces.
                continue;
            }

            let mut points: Vec<Point3<Real>> = Vec::with_capacity(2);
            let mut on_plane: Vec<u32> = Vec::with_capacity(2);
            for k in 0..3 {
                if sides[k] == 0 {
                    on_plane.push(face[k]);
                    push_unique(&mut points, self.vertices[face[k] as usize].pos);
                }
            }
            for (a, b) in [(0usize, 1usize), (1, 2), (2, 0)] {
                if sides[a] as i16 * sides[b] as i16 >= 0 {
                    continue;
                }
                let (ia, ib) = (face[a], face[b]);
                let key = if ia < ib { (ia, ib) } else { (ib, ia) };
                let p = *crossings.entry(key).or_insert_with(|| {
                    let sa = field[ia as usize];
                    let sb = field[ib as usize];
                    let t = sa / (sa - sb);
                    self.vertices[ia as usize]
                        .interpolate(&self.vertices[ib as usize], t)
                        .pos
                });
                push_unique(&mut points, p);
            }

            if points.len() != 2 {
                // Grazing contact at a single vertex, or no crossing at all.
                continue;
            }
            if on_plane.len() == 2 {
                let key = if on_plane[0] < on_plane[1] {
                    (on_plane[0], on_plane[1])
                } else {
                    (on_plane[1], on_plane[0])
                };
                if !coplanar_edges.insert(key) {
                    continue;
                }
            }
            segments.push([points[0], points[1]]);
        }

        Ok(segments)
    }
}

/// Append `p` unless an equal point (within tolerance) is already present.
fn push_unique(points: &mut Vec<Point3<Real>>, p: Point3<Real>) {
    if points.iter().all(|q| (p - q).norm_squared() > EPSILON) {
        points.push(p);
    }
}
