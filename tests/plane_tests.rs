use approx::assert_relative_eq;
use nalgebra::{Point3, Vector2, Vector3};
use pivot::errors::GeometryError;
use pivot::float_types::{FRAC_PI_2, Real};
use pivot::plane::CutPlane;

fn plane_with_normal(normal: Vector3<Real>) -> CutPlane {
    CutPlane::new(Point3::origin(), normal).unwrap()
}

// P1: the stored normal stays unit length through arbitrary rotation
// sequences and through set_normal with non-unit input.
#[test]
fn normal_stays_unit_under_rotation() {
    let mut plane = plane_with_normal(Vector3::new(3.0, 4.0, 0.0));
    assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = 1e-5);

    for i in 0..1000 {
        plane.rotate(0.013 * (i % 7) as Real);
        assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = 1e-5);
    }

    plane.set_normal(Vector3::new(0.2, -7.0, 0.0)).unwrap();
    assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = 1e-5);
}

// Scenario C: (-1, 0, 0) rotated by +π/2 lands on (0, -1, 0).
#[test]
fn quarter_turn_rotation() {
    let mut plane = plane_with_normal(Vector3::new(-1.0, 0.0, 0.0));
    plane.rotate(FRAC_PI_2);
    let n = plane.normal();
    assert_relative_eq!(n.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(n.y, -1.0, epsilon = 1e-9);
    assert_relative_eq!(n.z, 0.0, epsilon = 1e-9);
}

#[test]
fn rotation_leaves_z_untouched() {
    let mut plane = plane_with_normal(Vector3::new(1.0, 0.0, 0.3).normalize());
    let z_before = plane.normal().z;
    plane.rotate(1.1);
    // x/y rotate in the horizontal plane; z only moves by renormalization.
    assert_relative_eq!(plane.normal().z, z_before, epsilon = 1e-9);
}

#[test]
fn basis_right_is_normal_cross_up() {
    let plane = plane_with_normal(Vector3::new(-1.0, 0.0, 0.0));
    let right = plane.basis_right();
    assert_relative_eq!(right.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(right.y, 1.0, epsilon = 1e-9);

    let plane = plane_with_normal(Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(plane.basis_right().y, -1.0, epsilon = 1e-9);
}

// P4: a displacement confined to the plane survives the 2D round trip.
#[test]
fn project_unproject_round_trip() {
    let plane = CutPlane::new(
        Point3::new(1.0, -2.0, 0.5),
        Vector3::new(1.0, 1.0, 0.0),
    )
    .unwrap();

    let d2 = Vector2::new(2.5, -1.25);
    let d3 = plane.unproject(d2);
    // Confined to the plane by construction.
    assert_relative_eq!(d3.dot(&plane.normal()), 0.0, epsilon = 1e-9);

    let projected = plane.project(&(plane.origin() + d3));
    assert_relative_eq!(projected.x, d2.x, epsilon = 1e-9);
    assert_relative_eq!(projected.y, d2.y, epsilon = 1e-9);

    let back = plane.unproject(projected.coords);
    assert_relative_eq!((back - d3).norm(), 0.0, epsilon = 1e-9);
}

#[test]
fn zero_normal_is_rejected_and_state_kept() {
    let mut plane = plane_with_normal(Vector3::new(0.0, 1.0, 0.0));
    let err = plane.set_normal(Vector3::zeros()).unwrap_err();
    assert_eq!(err, GeometryError::DegenerateNormal);
    assert_relative_eq!(plane.normal().y, 1.0, epsilon = 1e-12);

    assert!(CutPlane::new(Point3::origin(), Vector3::zeros()).is_err());
}

#[test]
fn global_angle_tracks_the_normal() {
    let plane = plane_with_normal(Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(plane.global_angle(), 0.0, epsilon = 1e-9);

    let plane = plane_with_normal(Vector3::new(0.0, 1.0, 0.0));
    assert_relative_eq!(plane.global_angle(), -FRAC_PI_2, epsilon = 1e-9);
}
