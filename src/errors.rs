//! Error taxonomy for the cut pipeline.
//!
//! Mesh and level load failures are fatal for the level that requested them.
//! A plane that misses the mesh is *not* an error: it yields an empty
//! [`crate::cut::Cut`] and the game treats it as "no ground under the cut".

use thiserror::Error;

/// Failures while loading or validating level geometry.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse OBJ data: {0}")]
    Parse(#[from] obj::ObjError),
    /// A level cannot start without geometry.
    #[error("mesh contains no faces")]
    Empty,
    #[error("face {face} references vertex {index}, but the mesh has {len} vertices")]
    FaceIndexOutOfBounds { face: usize, index: u32, len: usize },
    /// An OBJ face index pointing past the file's own data tables.
    #[error("OBJ face references entry {index}, but the file defines {len}")]
    ObjIndexOutOfBounds { index: usize, len: usize },
}

/// Geometric input rejected before it can poison downstream math.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A zero-length plane normal; rejected at the call site rather than
    /// propagated as NaN through the intersection routine.
    #[error("plane normal is degenerate (zero length)")]
    DegenerateNormal,
}

/// Failures while loading level metadata.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("level start plane normal is degenerate")]
    Geometry(#[from] GeometryError),
}
