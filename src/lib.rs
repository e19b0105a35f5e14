//! Core pipeline for a cut-plane platformer: the player rotates a cutting
//! plane through a static 3D level mesh, and the intersection of that plane
//! with the mesh becomes the 2D platformer level they walk on.
//!
//! The pipeline runs in three stages:
//! 1. [`mesh::Mesh::intersect_plane`] extracts the isocontour of the level
//!    mesh against the current plane as a set of 3D segments.
//! 2. [`cut::PlaneController::calculate_cut`] projects those segments into
//!    the plane's own 2D frame and extrudes each one into a thin solid
//!    polygon, producing a [`cut::Cut`].
//! 3. [`gameplay::GameplayController`] rebuilds the 2D physics world and
//!    scene nodes from the new cut whenever a rotation gesture ends, and
//!    keeps the player's 3D world location in sync with their 2D motion
//!    along the plane basis in between.
//!
//! # Features
//! - **f64**: use f64 as Real (default)
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod cut;
pub mod errors;
pub mod float_types;
pub mod gameplay;
pub mod io;
pub mod level;
pub mod mesh;
pub mod model;
pub mod physics;
pub mod plane;
pub mod scene;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use cut::{Cut, PlaneController};
pub use gameplay::GameplayController;
pub use mesh::Mesh;
pub use plane::CutPlane;
