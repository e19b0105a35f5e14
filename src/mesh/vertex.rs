//! Struct and functions for working with the `Vertex`s a level [`Mesh`](crate::mesh::Mesh) is built from.

use crate::float_types::Real;
use nalgebra::{Point2, Point3, Vector3};

/// A vertex of the level mesh, holding position, normal and texture coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub uv: Point2<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non-unit) normal; copied verbatim
    /// * `uv`     – texture coordinate
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>, uv: Point2<Real>) -> Self {
        Vertex { pos, normal, uv }
    }

    /// A vertex with a zero normal and zero uv, for meshes built from bare positions.
    pub const fn from_position(pos: Point3<Real>) -> Self {
        Vertex {
            pos,
            normal: Vector3::new(0.0, 0.0, 0.0),
            uv: Point2::new(0.0, 0.0),
        }
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Normals and uvs are linearly interpolated as well.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        let new_uv = self.uv + (other.uv - self.uv) * t;
        Vertex::new(new_pos, new_normal, new_uv)
    }
}
