//! Startup configuration. One explicit struct handed to the game at launch;
//! nothing in the pipeline branches on mutable globals.

use crate::float_types::{FRAC_PI_2, Real};
use serde::{Deserialize, Serialize};

/// Which top-level scene set to load at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneSelect {
    /// Menus plus gameplay, the shipping configuration.
    #[default]
    FullGame,
    /// Gameplay only with a debug cut, for physics tuning.
    PhysicsDemo,
}

/// Tunables for the cut pipeline and the player body, passed once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Downward gravity in the 2D cut world, world units / s².
    pub gravity: Real,
    /// Width each contour segment is extruded to, in world units. Fixed
    /// regardless of level scale for now; see DESIGN.md.
    pub extrusion_width: Real,
    /// Plane rotation speed while the rotate input is held, radians / s.
    pub rotate_speed: Real,
    /// Horizontal run speed, world units / s.
    pub move_speed: Real,
    /// Vertical jump speed, world units / s.
    pub jump_speed: Real,
    /// Clamp on horizontal speed.
    pub max_horizontal_speed: Real,
    /// Clamp on fall speed.
    pub max_vertical_speed: Real,
    /// Player capsule: half the distance between the cap centers.
    pub player_half_height: Real,
    /// Player capsule radius.
    pub player_radius: Real,
    /// Friction for the player and cut colliders.
    pub friction: Real,
    /// Player body density.
    pub density: Real,
    /// 3D distance at which collectibles and the exit trigger.
    pub pickup_radius: Real,
    pub scene: SceneSelect,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            gravity: 9.8,
            extrusion_width: 0.05,
            rotate_speed: FRAC_PI_2,
            move_speed: 3.0,
            jump_speed: 6.0,
            max_horizontal_speed: 8.0,
            max_vertical_speed: 20.0,
            player_half_height: 0.25,
            player_radius: 0.15,
            friction: 0.4,
            density: 1.0,
            pickup_radius: 0.5,
            scene: SceneSelect::default(),
        }
    }
}
