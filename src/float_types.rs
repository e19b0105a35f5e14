// Re-export rapier for the appropriate float size
#[cfg(feature = "f64")]
pub use rapier2d_f64 as rapier2d;

#[cfg(feature = "f32")]
pub use rapier2d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Tolerance used across the crate for sign classification and degeneracy
/// checks. Anything closer to zero than this is treated as "on the plane".
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Tolerance used across the crate for sign classification and degeneracy
/// checks. Anything closer to zero than this is treated as "on the plane".
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-9;

/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

/// Distance from the plane origin at which the two synthetic "super-vertices"
/// are anchored during isocontouring. Must exceed the extent of any level
/// mesh so the scalar field is guaranteed to span both signs of the plane.
pub const SUPER_VERTEX_OFFSET: Real = 100_000.0;
