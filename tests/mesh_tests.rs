use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use pivot::errors::{GeometryError, MeshError};
use pivot::float_types::Real;
use pivot::mesh::{Mesh, vertex::Vertex};

fn unit_cube() -> Mesh {
    Mesh::cuboid(1.0, 1.0, 1.0)
}

fn segment_length_sum(segments: &[[Point3<Real>; 2]]) -> Real {
    segments.iter().map(|[a, b]| (b - a).norm()).sum()
}

#[test]
fn cuboid_has_expected_counts() {
    let cube = unit_cube();
    assert_eq!(cube.vertices().len(), 8);
    assert_eq!(cube.faces().len(), 12);
    let (mins, maxs) = cube.local_aabb();
    assert_relative_eq!(mins.x, -0.5, epsilon = 1e-12);
    assert_relative_eq!(maxs.z, 0.5, epsilon = 1e-12);
}

// Scenario A: plane x=0 through a unit cube yields a square cross-section in
// the y-z plane. Each of the four crossed faces is two triangles, so the
// square's perimeter arrives as 8 segments summing to 4.0.
#[test]
fn cube_cross_section_is_a_square() {
    let cube = unit_cube();
    let segments = cube
        .intersect_plane(Point3::origin(), Vector3::new(1.0, 0.0, 0.0))
        .unwrap();

    assert_eq!(segments.len(), 8);
    assert_relative_eq!(segment_length_sum(&segments), 4.0, epsilon = 1e-9);
    for [a, b] in &segments {
        // Every contour point lies exactly on the plane and inside the cube.
        for p in [a, b] {
            assert!(p.x.abs() < 1e-9);
            assert!(p.y.abs() <= 0.5 + 1e-9);
            assert!(p.z.abs() <= 0.5 + 1e-9);
        }
    }
}

// Scenario B: a plane whose origin sits outside the cube misses entirely.
#[test]
fn plane_outside_mesh_yields_empty_contour() {
    let cube = unit_cube();
    let segments = cube
        .intersect_plane(Point3::new(10.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0))
        .unwrap();
    assert!(segments.is_empty());
}

// P3: translating the origin far along the normal direction empties the cut,
// for an oblique normal as well.
#[test]
fn far_translated_plane_misses() {
    let cube = unit_cube();
    let normal = Vector3::new(1.0, 1.0, 0.0);
    let origin = Point3::origin() + normal.normalize() * 100.0;
    let segments = cube.intersect_plane(origin, normal).unwrap();
    assert!(segments.is_empty());
}

// P2: the contour is a function of the plane, not of the normal's sign.
#[test]
fn contour_is_sign_symmetric() {
    let cube = unit_cube();
    let normal = Vector3::new(1.0, 0.4, 0.0);
    let a = cube.intersect_plane(Point3::origin(), normal).unwrap();
    let b = cube.intersect_plane(Point3::origin(), -normal).unwrap();

    assert_eq!(a.len(), b.len());
    let points_b: Vec<Point3<Real>> = b.iter().flatten().copied().collect();
    for p in a.iter().flatten() {
        let closest = points_b
            .iter()
            .map(|q| (p - q).norm())
            .fold(Real::MAX, Real::min);
        assert!(closest < 1e-9, "point {p:?} has no counterpart");
    }
}

#[test]
fn offset_plane_interpolates_on_the_plane() {
    let cube = unit_cube();
    let origin = Point3::new(0.25, 0.0, 0.0);
    let segments = cube
        .intersect_plane(origin, Vector3::new(1.0, 0.0, 0.0))
        .unwrap();
    assert!(!segments.is_empty());
    for p in segments.iter().flatten() {
        assert_relative_eq!(p.x, 0.25, epsilon = 1e-9);
    }
}

#[test]
fn degenerate_normal_is_rejected() {
    let cube = unit_cube();
    let result = cube.intersect_plane(Point3::origin(), Vector3::zeros());
    assert_eq!(result.unwrap_err(), GeometryError::DegenerateNormal);
}

#[test]
fn face_indices_are_validated() {
    let vertices = vec![
        Vertex::from_position(Point3::origin()),
        Vertex::from_position(Point3::new(1.0, 0.0, 0.0)),
    ];
    let err = Mesh::new(vertices, vec![[0, 1, 9]]).unwrap_err();
    assert!(matches!(
        err,
        MeshError::FaceIndexOutOfBounds { index: 9, .. }
    ));

    assert!(matches!(Mesh::new(Vec::new(), Vec::new()), Err(MeshError::Empty)));
}

#[test]
fn obj_round_trip_through_loader() {
    let dir = std::env::temp_dir().join("pivot_obj_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("quad.obj");
    // Two triangles forming a unit quad in the x-z plane.
    std::fs::write(
        &path,
        "v 0 0 0\nv 1 0 0\nv 1 0 1\nv 0 0 1\nf 1 2 3\nf 1 3 4\n",
    )
    .unwrap();

    let mesh = pivot::io::load_obj(&path, 2.0).unwrap();
    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.faces().len(), 2);
    let (mins, maxs) = mesh.local_aabb();
    assert_relative_eq!(maxs.x - mins.x, 2.0, epsilon = 1e-9);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn obj_loader_fails_on_missing_file() {
    let err = pivot::io::load_obj("/nonexistent/definitely_missing.obj", 1.0).unwrap_err();
    assert!(matches!(err, MeshError::Io(_)));
}

// A face index past the file's own vertex table is a load error, not a panic.
#[test]
fn obj_loader_rejects_out_of_range_indices() {
    let dir = std::env::temp_dir().join("pivot_obj_bad_index");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.obj");
    std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").unwrap();

    let err = pivot::io::load_obj(&path, 1.0).unwrap_err();
    assert!(matches!(
        err,
        MeshError::ObjIndexOutOfBounds { index: 8, .. }
    ));

    let _ = std::fs::remove_file(&path);
}
