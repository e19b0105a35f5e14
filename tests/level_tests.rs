use approx::assert_relative_eq;
use pivot::errors::LevelError;
use pivot::level::Level;
use std::fs;

#[test]
fn level_loads_mesh_and_scaled_locations() {
    let dir = std::env::temp_dir().join("pivot_level_test");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("room.obj"),
        "v -1 -1 -1\nv 1 -1 -1\nv 1 1 -1\nv -1 1 -1\nf 1 2 3\nf 1 3 4\n",
    )
    .unwrap();
    fs::write(
        dir.join("room.json"),
        r#"{
            "name": "room",
            "mesh": "room.obj",
            "scale": 0.1,
            "player_start": [1.0, 2.0, 3.0],
            "start_normal": [-1.0, 0.0, 0.0],
            "exit": [0.0, 10.0, 0.0],
            "collectibles": [{ "name": "key", "position": [5.0, 0.0, 0.0] }]
        }"#,
    )
    .unwrap();

    let level = Level::load(dir.join("room.json")).unwrap();
    assert_eq!(level.name, "room");
    assert_eq!(level.mesh.faces().len(), 2);
    // Scale applies to the mesh and every location alike.
    assert_relative_eq!(level.player_start.x, 0.1, epsilon = 1e-9);
    assert_relative_eq!(level.exit.position.y, 1.0, epsilon = 1e-9);
    assert_eq!(level.collectibles.len(), 1);
    assert_relative_eq!(level.collectibles[0].position().x, 0.5, epsilon = 1e-9);
    let (mins, _) = level.mesh.local_aabb();
    assert_relative_eq!(mins.x, -0.1, epsilon = 1e-9);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_mesh_is_fatal_for_the_level() {
    let dir = std::env::temp_dir().join("pivot_level_missing_mesh");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("broken.json"),
        r#"{
            "name": "broken",
            "mesh": "no_such.obj",
            "player_start": [0, 0, 0],
            "start_normal": [-1, 0, 0],
            "exit": [0, 0, 0]
        }"#,
    )
    .unwrap();

    let err = Level::load(dir.join("broken.json")).unwrap_err();
    assert!(matches!(err, LevelError::Mesh(_)));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_metadata_is_rejected() {
    let dir = std::env::temp_dir().join("pivot_level_bad_json");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("bad.json"), "{ not json").unwrap();

    assert!(matches!(
        Level::load(dir.join("bad.json")).unwrap_err(),
        LevelError::Json(_)
    ));

    let _ = fs::remove_dir_all(&dir);
}
