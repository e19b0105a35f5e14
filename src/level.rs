//! Level metadata: which mesh to cut, where the player starts, where the
//! exit and collectibles sit. Loaded from a small JSON file next to the mesh.

use crate::errors::LevelError;
use crate::float_types::Real;
use crate::io::load_obj;
use crate::mesh::Mesh;
use crate::model::{Collectible, GameItem};
use log::info;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CollectibleData {
    name: String,
    position: [Real; 3],
}

/// On-disk level schema. Positions are in mesh-file units; `scale` is applied
/// uniformly to the mesh and every location at load time.
#[derive(Debug, Deserialize)]
struct LevelData {
    name: String,
    mesh: String,
    #[serde(default = "default_scale")]
    scale: Real,
    player_start: [Real; 3],
    start_normal: [Real; 3],
    exit: [Real; 3],
    #[serde(default)]
    collectibles: Vec<CollectibleData>,
}

const fn default_scale() -> Real {
    1.0
}

/// A loaded level: the immutable mesh plus the default data the game model
/// starts from (and restarts from on reset).
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub mesh: Mesh,
    pub player_start: Point3<Real>,
    pub start_normal: Vector3<Real>,
    pub exit: GameItem,
    pub collectibles: Vec<Collectible>,
}

impl Level {
    /// Load level metadata from `path` and the mesh it references (resolved
    /// relative to the level file). A missing or unparseable mesh is fatal:
    /// the level cannot start without geometry.
    pub fn load(path: impl AsRef<Path>) -> Result<Level, LevelError> {
        let path = path.as_ref();
        let data: LevelData = serde_json::from_str(&fs::read_to_string(path)?)?;

        let mesh_path = match path.parent() {
            Some(dir) => dir.join(&data.mesh),
            None => Path::new(&data.mesh).to_path_buf(),
        };
        let mesh = load_obj(&mesh_path, data.scale)?;
        info!(
            "level '{}': mesh {} ({} vertices, {} faces)",
            data.name,
            mesh_path.display(),
            mesh.vertices().len(),
            mesh.faces().len()
        );

        let s = data.scale;
        let scaled = |p: [Real; 3]| Point3::new(p[0] * s, p[1] * s, p[2] * s);
        Ok(Level {
            name: data.name,
            mesh,
            player_start: scaled(data.player_start),
            start_normal: Vector3::new(
                data.start_normal[0],
                data.start_normal[1],
                data.start_normal[2],
            ),
            exit: GameItem::new("exit", scaled(data.exit)),
            collectibles: data
                .collectibles
                .into_iter()
                .map(|c| Collectible::new(c.name, scaled(c.position)))
                .collect(),
        })
    }

    /// The hardcoded gameplay-prototype level: a hollow cuboid room around
    /// the origin, one key, one exit. Used by the demo binary and tests.
    pub fn prototype() -> Level {
        Level {
            name: "prototype".to_string(),
            mesh: Mesh::cuboid(8.0, 8.0, 4.0),
            player_start: Point3::origin(),
            start_normal: Vector3::new(-1.0, 0.0, 0.0),
            exit: GameItem::new("exit", Point3::new(0.0, 3.0, 1.0)),
            collectibles: vec![Collectible::new("key", Point3::new(0.0, 2.0, 0.0))],
        }
    }
}
