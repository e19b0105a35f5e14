//! Import of level geometry from external formats.

pub mod obj;

pub use obj::load_obj;
