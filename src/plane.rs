//! The cutting plane: a unit normal and an origin, plus the 2D basis used to
//! move between the plane's local frame and world space.

use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

/// World "up": cuts are taken through a level whose vertical axis is Z, and
/// plane rotation is confined to the horizontal plane around this axis.
pub fn world_up() -> Vector3<Real> {
    Vector3::z()
}

/// The conceptual cutting plane. The normal is kept unit length at all times;
/// it is renormalized after every rotation step to counter floating-point
/// drift.
#[derive(Debug, Clone, PartialEq)]
pub struct CutPlane {
    origin: Point3<Real>,
    normal: Unit<Vector3<Real>>,
}

impl CutPlane {
    /// Create a plane through `origin`. Rejects a degenerate normal.
    pub fn new(origin: Point3<Real>, normal: Vector3<Real>) -> Result<Self, GeometryError> {
        let normal = Unit::try_new(normal, EPSILON).ok_or(GeometryError::DegenerateNormal)?;
        Ok(CutPlane { origin, normal })
    }

    pub const fn origin(&self) -> Point3<Real> {
        self.origin
    }

    pub fn normal(&self) -> Vector3<Real> {
        self.normal.into_inner()
    }

    pub const fn set_origin(&mut self, origin: Point3<Real>) {
        self.origin = origin;
    }

    /// Store `normalize(normal)` as the new plane normal. Does *not* recompute
    /// the cut; recomputation is caller-driven (see the gameplay state
    /// machine). A zero-length normal is rejected and the stored normal is
    /// left untouched.
    pub fn set_normal(&mut self, normal: Vector3<Real>) -> Result<(), GeometryError> {
        self.normal = Unit::try_new(normal, EPSILON).ok_or(GeometryError::DegenerateNormal)?;
        Ok(())
    }

    /// Rotate the normal around the world Z axis by `radians`
    /// (counter-clockwise for positive values in the XY projection). Only the
    /// normal's x/y components rotate; z is untouched. The result is
    /// renormalized.
    pub fn rotate(&mut self, radians: Real) {
        let n = self.normal.into_inner();
        let (sin, cos) = radians.sin_cos();
        let rotated = Vector3::new(n.x * cos - n.y * sin, n.x * sin + n.y * cos, n.z);
        if let Some(unit) = Unit::try_new(rotated, EPSILON) {
            self.normal = unit;
        }
    }

    /// The plane's "right" basis vector: `normalize(normal × world_up)`.
    /// Horizontal 2D motion along the cut maps to this direction in 3D.
    pub fn basis_right(&self) -> Vector3<Real> {
        let right = self.normal.cross(&world_up());
        // A vertical normal would make the basis degenerate; levels never
        // author one, but fall back to +X rather than return NaN.
        Unit::try_new(right, EPSILON)
            .map(|u| u.into_inner())
            .unwrap_or_else(Vector3::x)
    }

    /// The plane's "up" basis vector, which is world up.
    pub fn basis_up(&self) -> Vector3<Real> {
        world_up()
    }

    /// Project a world-space point into the plane's local 2D frame
    /// (dot against the right/up basis, relative to the plane origin).
    pub fn project(&self, point: &Point3<Real>) -> Point2<Real> {
        let d = point - self.origin;
        Point2::new(d.dot(&self.basis_right()), d.dot(&self.basis_up()))
    }

    /// Map a 2D displacement in the plane's local frame back into a 3D world
    /// displacement: `d.x * basis_right + (0, 0, d.y)`.
    pub fn unproject(&self, displacement: Vector2<Real>) -> Vector3<Real> {
        self.basis_right() * displacement.x + world_up() * displacement.y
    }

    /// Signed angle of the plane normal against world +X, in radians.
    /// Used by the render boundary to orient billboards with the cut.
    pub fn global_angle(&self) -> Real {
        let n = self.normal;
        let dot = n.x;
        let det = -n.y;
        det.atan2(dot)
    }
}
