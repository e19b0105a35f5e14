//! Wavefront OBJ import for level meshes.

use crate::errors::MeshError;
use crate::float_types::Real;
use crate::mesh::{Mesh, vertex::Vertex};
use hashbrown::HashMap;
use nalgebra::{Point2, Point3, Vector3};
use obj::{IndexTuple, ObjData};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a triangulated mesh from a Wavefront OBJ file, applying a uniform
/// `scale` to every position. Faces with more than three corners are
/// fan-triangulated; positions, normals and texture coordinates are gathered
/// per unique OBJ index tuple.
///
/// A missing or malformed file is fatal for the level that requested it.
pub fn load_obj(path: impl AsRef<Path>, scale: Real) -> Result<Mesh, MeshError> {
    let file = File::open(path)?;
    let data = ObjData::load_buf(BufReader::new(file))?;

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();
    // OBJ indexes positions/uvs/normals independently; collapse each distinct
    // index tuple to one mesh vertex.
    let mut remap: HashMap<(usize, Option<usize>, Option<usize>), u32> = HashMap::new();

    // The obj parser does not bounds-check face indices against the data
    // tables, so a malformed file must fail here rather than panic.
    let mut resolve = |tuple: &IndexTuple| -> Result<u32, MeshError> {
        let key = (tuple.0, tuple.1, tuple.2);
        if let Some(&index) = remap.get(&key) {
            return Ok(index);
        }

        let p = data
            .position
            .get(tuple.0)
            .ok_or(MeshError::ObjIndexOutOfBounds {
                index: tuple.0,
                len: data.position.len(),
            })?;
        let pos = Point3::new(p[0] as Real, p[1] as Real, p[2] as Real) * scale;
        let uv = match tuple.1 {
            Some(i) => {
                let t = data
                    .texture
                    .get(i)
                    .ok_or(MeshError::ObjIndexOutOfBounds {
                        index: i,
                        len: data.texture.len(),
                    })?;
                Point2::new(t[0] as Real, t[1] as Real)
            },
            None => Point2::origin(),
        };
        let normal = match tuple.2 {
            Some(i) => {
                let n = data.normal.get(i).ok_or(MeshError::ObjIndexOutOfBounds {
                    index: i,
                    len: data.normal.len(),
                })?;
                Vector3::new(n[0] as Real, n[1] as Real, n[2] as Real)
            },
            None => Vector3::zeros(),
        };

        let index = vertices.len() as u32;
        vertices.push(Vertex::new(pos, normal, uv));
        remap.insert(key, index);
        Ok(index)
    };

    for object in &data.objects {
        for group in &object.groups {
            for poly in &group.polys {
                if poly.0.len() < 3 {
                    continue;
                }
                let anchor = resolve(&poly.0[0])?;
                for window in poly.0[1..].windows(2) {
                    let b = resolve(&window[0])?;
                    let c = resolve(&window[1])?;
                    faces.push([anchor, b, c]);
                }
            }
        }
    }

    Mesh::new(vertices, faces)
}
