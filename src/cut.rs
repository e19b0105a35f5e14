//! The `Cut` (2D cross-section polygons) and the `PlaneController` that
//! rotates the plane and regenerates cuts through the level mesh.

use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::model::GameModel;
use geo::{LineString, Orient, Polygon as GeoPolygon, orient::Direction};
use log::debug;
use nalgebra::{Point2, Point3, Vector3};

/// The ordered collection of closed 2D polygons produced by intersecting the
/// cutting plane with the level mesh, expressed in the plane's local frame.
///
/// A cut is recomputed wholesale on every plane-normal change and never
/// partially patched. An empty cut is a valid value: the plane missed the
/// mesh and there is no ground under the player.
#[derive(Debug, Clone, Default)]
pub struct Cut {
    polygons: Vec<GeoPolygon<Real>>,
}

impl Cut {
    pub const fn empty() -> Self {
        Cut {
            polygons: Vec::new(),
        }
    }

    pub const fn from_polygons(polygons: Vec<GeoPolygon<Real>>) -> Self {
        Cut { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn polygons(&self) -> &[GeoPolygon<Real>] {
        &self.polygons
    }

    /// Exterior-ring points of each polygon, ready to hand to the physics
    /// boundary as collider vertices. The closing duplicate point of each
    /// ring is dropped.
    pub fn collider_points(&self) -> impl Iterator<Item = Vec<Point2<Real>>> + '_ {
        self.polygons.iter().map(|poly| {
            let ring = poly.exterior();
            let count = ring.0.len().saturating_sub(1);
            ring.0[..count]
                .iter()
                .map(|c| Point2::new(c.x, c.y))
                .collect()
        })
    }
}

/// Thicken one projected contour segment into a rectangle of the given
/// `width` so the 1D line gains area usable as solid physics geometry.
///
/// Returns `None` for near-zero-length segments; those are filtered out here
/// rather than handed to the physics world as degenerate colliders.
pub fn extrude_segment(
    p0: Point2<Real>,
    p1: Point2<Real>,
    width: Real,
) -> Option<GeoPolygon<Real>> {
    let dir = p1 - p0;
    let len = dir.norm();
    if len <= EPSILON {
        return None;
    }
    let half = width * 0.5 / len;
    let (ox, oy) = (-dir.y * half, dir.x * half);
    let ring = vec![
        (p0.x - ox, p0.y - oy),
        (p1.x - ox, p1.y - oy),
        (p1.x + ox, p1.y + oy),
        (p0.x + ox, p0.y + oy),
        (p0.x - ox, p0.y - oy),
    ];
    let poly = GeoPolygon::new(LineString::from(ring), vec![]);
    Some(poly.orient(Direction::Default))
}

/// Owns plane movement: rotation, relocation to the player, and regeneration
/// of cuts through the level mesh. All plane state itself lives in the
/// [`GameModel`]; the controller mutates it and nothing else.
#[derive(Debug, Clone)]
pub struct PlaneController {
    /// How much to extrude each contour segment, in world units. A fixed
    /// width regardless of level scale, as in the debug cuts.
    extrusion_width: Real,
}

impl PlaneController {
    pub const fn new(extrusion_width: Real) -> Self {
        PlaneController { extrusion_width }
    }

    /// Set the plane origin and normal. The normal is normalized before it is
    /// stored; a degenerate normal is rejected and the model left untouched.
    pub fn set_plane(
        &self,
        model: &mut GameModel,
        origin: Point3<Real>,
        normal: Vector3<Real>,
    ) -> Result<(), GeometryError> {
        model.plane_mut().set_normal(normal)?;
        model.plane_mut().set_origin(origin);
        Ok(())
    }

    /// Rotate the plane normal around the world up axis by `radians`.
    /// Does not recompute the cut.
    pub fn rotate_norm(&self, model: &mut GameModel, radians: Real) {
        model.plane_mut().rotate(radians);
    }

    /// Move the plane's origin to the player's current 3D location, so the
    /// next cut is computed around where the player actually stands.
    pub fn move_plane_to_player(&self, model: &mut GameModel) {
        let loc = model.player_3d();
        model.plane_mut().set_origin(loc);
    }

    /// Intersect the mesh with the current plane, project every returned 3D
    /// segment onto the plane basis, extrude each into a thin polygon, and
    /// store the collected polygons as the model's new cut.
    ///
    /// An empty intersection stores an empty cut; that is a valid state, not
    /// an error.
    pub fn calculate_cut(&self, model: &mut GameModel, mesh: &Mesh) -> Result<(), GeometryError> {
        let plane = model.plane().clone();
        let segments = mesh.intersect_plane(plane.origin(), plane.normal())?;

        let mut polygons = Vec::with_capacity(segments.len());
        let mut skipped = 0usize;
        for [a, b] in segments {
            let a2 = plane.project(&a);
            let b2 = plane.project(&b);
            match extrude_segment(a2, b2, self.extrusion_width) {
                Some(poly) => polygons.push(poly),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("cut: skipped {skipped} degenerate contour segments");
        }
        debug!("cut rebuilt with {} polygons", polygons.len());

        model.set_cut(Cut::from_polygons(polygons));
        Ok(())
    }

    /// Replace the cut with an axis-aligned square of edge length `size`
    /// centered at the 2D origin. Debugging with real cuts is hard; this
    /// gives a predictable room to stand in.
    pub fn debug_cut(&self, model: &mut GameModel, size: Real) {
        let h = size * 0.5;
        let corners = [
            Point2::new(-h, -h),
            Point2::new(h, -h),
            Point2::new(h, h),
            Point2::new(-h, h),
        ];
        let polygons = (0..4)
            .filter_map(|i| {
                extrude_segment(corners[i], corners[(i + 1) % 4], self.extrusion_width)
            })
            .collect();
        model.set_cut(Cut::from_polygons(polygons));
    }
}
