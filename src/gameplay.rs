//! Per-frame orchestration of the cut pipeline: the rotation state machine,
//! physics world rebuilds, and 3D/2D player reconciliation.
//!
//! Cut recomputation (mesh isocontouring plus a physics world rebuild) is far
//! too expensive to run every frame, so it is gated to run exactly once, at
//! the end of a rotation gesture, and rotation itself is only permitted from
//! a grounded stance. While the plane is stable, ordinary 2D simulation runs
//! and each frame's 2D displacement is folded back into the player's 3D
//! world location through the plane basis, so the next rotation pivots around
//! where the player truly stands.

use crate::config::{GameConfig, SceneSelect};
use crate::cut::PlaneController;
use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use crate::level::Level;
use crate::mesh::Mesh;
use crate::model::GameModel;
use crate::physics::{ContactEvent, PhysicsWorld};
use crate::scene::SceneGraph;
use log::{debug, error, info};
use nalgebra::Point2;

/// Edge length of the square room used by the physics demo scene.
const DEBUG_CUT_SIZE: Real = 4.0;

/// Whether the plane is currently being rotated. While `Rotating`, physics
/// simulation is paused; the world is rebuilt on the transition back to
/// `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    Stable,
    Rotating,
}

/// The logical input signals the pipeline consumes each frame. How they were
/// derived (keyboard, touch joystick, gesture) is not its concern.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// Player's body is in contact with a supporting surface. Rotation is
    /// only permitted while this holds.
    pub is_grounded: bool,
    /// Discrete rotate keys.
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Analog rotation rate in [-1, 1] from joystick-style input. Honors the
    /// same grounded gate as the discrete keys.
    pub continuous_rotate: Real,
    /// Horizontal run input in [-1, 1].
    pub move_direction: Real,
    pub jump: bool,
}

impl InputState {
    /// Net rotation steer in [-1, 1]; positive is counter-clockwise. Discrete
    /// and analog inputs combined never exceed the configured rotate speed.
    fn rotation_steer(&self) -> Real {
        let discrete = (self.rotate_left as i8 - self.rotate_right as i8) as Real;
        (discrete + self.continuous_rotate).clamp(-1.0, 1.0)
    }
}

/// Drives the level play loop: owns the model, mesh, plane controller,
/// physics world and the scene handle, and runs the update pass once per
/// animation frame.
pub struct GameplayController<S: SceneGraph> {
    model: GameModel,
    mesh: Mesh,
    planes: PlaneController,
    physics: PhysicsWorld,
    scene: S,

    state: RotationState,
    rotate_speed: Real,
    pickup_radius: Real,
    /// Player-vs-cut contacts currently alive, maintained from the physics
    /// event queue.
    ground_contacts: usize,
}

impl<S: SceneGraph> GameplayController<S> {
    /// Build the game world for a loaded level and compute its first cut.
    pub fn new(level: Level, config: &GameConfig, scene: S) -> Result<Self, GeometryError> {
        let model = GameModel::new(
            level.player_start,
            level.start_normal,
            level.exit,
            level.collectibles,
        )?;
        let mut physics = PhysicsWorld::new(config);
        physics.spawn_player(Point2::origin());

        let mut controller = GameplayController {
            model,
            mesh: level.mesh,
            planes: PlaneController::new(config.extrusion_width),
            physics,
            scene,
            state: RotationState::Stable,
            rotate_speed: config.rotate_speed,
            pickup_radius: config.pickup_radius,
            ground_contacts: 0,
        };

        match config.scene {
            SceneSelect::FullGame => controller.rebuild_world()?,
            SceneSelect::PhysicsDemo => {
                controller
                    .planes
                    .debug_cut(&mut controller.model, DEBUG_CUT_SIZE);
                controller.rebuild_colliders_and_nodes();
            },
        }
        Ok(controller)
    }

    /// One frame of the core gameplay loop.
    pub fn update(&mut self, dt: Real, input: InputState) {
        let steer = input.rotation_steer();
        let rotating_input = steer.abs() > EPSILON;

        match self.state {
            RotationState::Stable => {
                // The geometry under the player's feet is about to disappear
                // and reappear, so rotation only starts from the ground.
                if rotating_input && input.is_grounded {
                    self.state = RotationState::Rotating;
                    self.planes
                        .rotate_norm(&mut self.model, steer * self.rotate_speed * dt);
                } else {
                    self.step_stable(dt, input);
                }
            },
            RotationState::Rotating => {
                if rotating_input {
                    // No cut recompute and no physics rebuild per frame; the
                    // normal just keeps turning until the gesture ends.
                    self.planes
                        .rotate_norm(&mut self.model, steer * self.rotate_speed * dt);
                } else {
                    self.finish_rotation();
                    self.state = RotationState::Stable;
                }
            },
        }
    }

    /// Ordinary simulation while the plane is stable.
    fn step_stable(&mut self, dt: Real, input: InputState) {
        if input.jump && input.is_grounded {
            self.physics.jump();
        }
        self.physics.move_player(input.move_direction.clamp(-1.0, 1.0));

        let before = self.physics.player_position();
        let events = self.physics.step(dt);
        let after = self.physics.player_position();

        // Fold the frame's 2D displacement back into the 3D world location
        // through the plane basis. The 2D position and the 3D location are
        // two views of the same logical player position.
        self.model.apply_2d_displacement(after - before);
        self.scene.set_player_position(after);

        self.process_contacts(&events);
        self.update_items();
    }

    /// Rebuild sequence run on the `Rotating -> Stable` transition.
    fn finish_rotation(&mut self) {
        self.physics.clear_cut_colliders();
        self.ground_contacts = 0;

        // The cut's local frame is centered at zero; the player is
        // conceptually at the plane origin in 2D.
        self.physics.reset_player(Point2::origin());
        self.planes.move_plane_to_player(&mut self.model);

        if let Err(e) = self.rebuild_world() {
            // Unreachable while the model holds a unit normal.
            error!("cut recomputation failed: {e}");
        }
        debug!(
            "rotation finished; plane normal {:?}",
            self.model.plane().normal()
        );
    }

    /// Recompute the cut from the current plane, then regenerate colliders
    /// and scene nodes from it.
    fn rebuild_world(&mut self) -> Result<(), GeometryError> {
        self.planes.calculate_cut(&mut self.model, &self.mesh)?;
        if self.model.cut().is_empty() {
            // Valid state: the plane missed the mesh and the player is in
            // empty space. Fall-through handling belongs to the rules layer.
            info!("plane missed the level mesh; no ground under the cut");
        }
        self.rebuild_colliders_and_nodes();
        Ok(())
    }

    fn rebuild_colliders_and_nodes(&mut self) {
        self.physics.rebuild_cut(self.model.cut());
        self.scene.clear_cut_nodes();
        for polygon in self.model.cut().polygons() {
            self.scene.add_cut_node(polygon);
        }
        self.scene.set_player_position(self.physics.player_position());
    }

    /// Track player-vs-cut contacts from the frame's event queue.
    fn process_contacts(&mut self, events: &[ContactEvent]) {
        for event in events {
            match *event {
                ContactEvent::Begin(a, b) => {
                    if self.physics.is_player_collider(a) || self.physics.is_player_collider(b) {
                        self.ground_contacts += 1;
                    }
                },
                ContactEvent::End(a, b) => {
                    if self.physics.is_player_collider(a) || self.physics.is_player_collider(b) {
                        self.ground_contacts = self.ground_contacts.saturating_sub(1);
                    }
                },
            }
        }
    }

    /// Collectible pickup and exit detection against the player's 3D location.
    fn update_items(&mut self) {
        let player = self.model.player_3d();
        let normal = self.model.plane().normal();
        let radius = self.pickup_radius;

        let mut picked: Vec<usize> = Vec::new();
        for (i, c) in self.model.collectibles().iter().enumerate() {
            let visible = c.can_be_seen(player, normal);
            if visible && (c.position() - player).norm() <= radius {
                picked.push(i);
            } else {
                self.scene.set_collectible_visible(i, visible);
            }
        }
        for i in picked {
            let c = &mut self.model.collectibles_mut()[i];
            c.set_collected(true);
            info!("collected {}", c.name());
            self.scene.set_collectible_visible(i, false);
        }

        if !self.model.reached_exit()
            && (self.model.exit().position - player).norm() <= radius
        {
            info!("player reached the exit");
            self.model.set_reached_exit(true);
        }
    }

    /// Restart the level from its saved start state.
    pub fn reset(&mut self) -> Result<(), GeometryError> {
        self.model.reset();
        self.physics.reset_player(Point2::origin());
        self.ground_contacts = 0;
        self.state = RotationState::Stable;
        self.rebuild_world()
    }

    pub const fn state(&self) -> RotationState {
        self.state
    }

    pub const fn model(&self) -> &GameModel {
        &self.model
    }

    pub const fn model_mut(&mut self) -> &mut GameModel {
        &mut self.model
    }

    pub const fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub const fn scene(&self) -> &S {
        &self.scene
    }

    /// Grounded as observed by the physics event queue. The input boundary's
    /// `is_grounded` flag is the authority for gameplay decisions; this view
    /// exists for debugging the two against each other.
    pub const fn physics_grounded(&self) -> bool {
        self.ground_contacts > 0
    }
}
