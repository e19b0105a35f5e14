//! Thin owner of the 2D physics world the player platforms in.
//!
//! Static colliders are derived from the current [`Cut`] and rebuilt wholesale
//! whenever the plane finishes rotating. Contact begin/end pairs are surfaced
//! as an explicit per-frame event queue rather than re-entrant listeners; the
//! gameplay orchestrator drains them synchronously after each step.

use crate::config::GameConfig;
use crate::cut::Cut;
use crate::float_types::Real;
use crate::float_types::rapier2d::prelude::*;
use log::{error, warn};
use nalgebra::{Point2, Vector2};
use std::sync::Mutex;

/// How a collider participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Cut geometry: never moves.
    Static,
    /// The player body.
    Dynamic,
}

/// The only things the cut pipeline needs from a collider: its shape and
/// whether it moves. Implemented by the polygon and capsule variants below;
/// the full physics surface stays behind [`PhysicsWorld`].
pub trait Collider {
    fn body_kind(&self) -> BodyKind;
    /// `None` when the shape would be degenerate.
    fn shape(&self) -> Option<SharedShape>;
}

/// A static convex collider built from one cut polygon.
#[derive(Debug, Clone)]
pub struct PolygonCollider {
    points: Vec<Point2<Real>>,
}

impl PolygonCollider {
    pub const fn new(points: Vec<Point2<Real>>) -> Self {
        PolygonCollider { points }
    }
}

impl Collider for PolygonCollider {
    fn body_kind(&self) -> BodyKind {
        BodyKind::Static
    }

    fn shape(&self) -> Option<SharedShape> {
        if self.points.len() < 3 {
            return None;
        }
        SharedShape::convex_hull(&self.points)
    }
}

/// The player's capsule.
#[derive(Debug, Clone, Copy)]
pub struct CapsuleCollider {
    pub half_height: Real,
    pub radius: Real,
}

impl Collider for CapsuleCollider {
    fn body_kind(&self) -> BodyKind {
        BodyKind::Dynamic
    }

    fn shape(&self) -> Option<SharedShape> {
        if self.radius <= 0.0 {
            return None;
        }
        Some(SharedShape::capsule(
            Point2::new(0.0, -self.half_height),
            Point2::new(0.0, self.half_height),
            self.radius,
        ))
    }
}

/// One contact transition observed during a physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Begin(ColliderHandle, ColliderHandle),
    End(ColliderHandle, ColliderHandle),
}

/// Buffers rapier collision events during a step; drained afterwards.
#[derive(Default)]
struct EventQueue {
    events: Mutex<Vec<ContactEvent>>,
}

impl EventHandler for EventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let mapped = match event {
            CollisionEvent::Started(a, b, _) => ContactEvent::Begin(a, b),
            CollisionEvent::Stopped(a, b, _) => ContactEvent::End(a, b),
        };
        if let Ok(mut queue) = self.events.lock() {
            queue.push(mapped);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Owns the rapier world for the current cut: start, stop, clear, update.
pub struct PhysicsWorld {
    gravity: Vector2<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    events: EventQueue,

    player: Option<RigidBodyHandle>,
    player_collider: Option<ColliderHandle>,
    cut_colliders: Vec<ColliderHandle>,

    // Player tuning, copied from GameConfig at startup.
    move_speed: Real,
    jump_speed: Real,
    max_horizontal_speed: Real,
    max_vertical_speed: Real,
    friction: Real,
    density: Real,
    player_half_height: Real,
    player_radius: Real,
}

impl PhysicsWorld {
    pub fn new(config: &GameConfig) -> Self {
        PhysicsWorld {
            gravity: Vector2::new(0.0, -config.gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            events: EventQueue::default(),
            player: None,
            player_collider: None,
            cut_colliders: Vec::new(),
            move_speed: config.move_speed,
            jump_speed: config.jump_speed,
            max_horizontal_speed: config.max_horizontal_speed,
            max_vertical_speed: config.max_vertical_speed,
            friction: config.friction,
            density: config.density,
            player_half_height: config.player_half_height,
            player_radius: config.player_radius,
        }
    }

    /// Create (or re-create) the player's capsule body at `pos`.
    pub fn spawn_player(&mut self, pos: Point2<Real>) -> RigidBodyHandle {
        if let Some(handle) = self.player.take() {
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
            self.player_collider = None;
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(Vector2::new(pos.x, pos.y))
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);
        let capsule = CapsuleCollider {
            half_height: self.player_half_height,
            radius: self.player_radius,
        };
        match self.insert_collider(&capsule, Some(handle)) {
            Some(collider_handle) => self.player_collider = Some(collider_handle),
            None => error!("player capsule has a non-positive radius; body has no collider"),
        }

        self.player = Some(handle);
        handle
    }

    /// Build and insert one collider, optionally attached to a body.
    /// Returns `None` when the shape is degenerate.
    fn insert_collider(
        &mut self,
        spec: &dyn Collider,
        parent: Option<RigidBodyHandle>,
    ) -> Option<ColliderHandle> {
        let shape = spec.shape()?;
        let mut builder = ColliderBuilder::new(shape).friction(self.friction);
        if spec.body_kind() == BodyKind::Dynamic {
            builder = builder
                .density(self.density)
                .active_events(ActiveEvents::COLLISION_EVENTS);
        }
        Some(match parent {
            Some(body) => self
                .colliders
                .insert_with_parent(builder, body, &mut self.bodies),
            None => self.colliders.insert(builder),
        })
    }

    /// Drop every cut-derived static collider. The player body survives.
    pub fn clear_cut_colliders(&mut self) {
        for handle in self.cut_colliders.drain(..) {
            self.colliders
                .remove(handle, &mut self.islands, &mut self.bodies, false);
        }
    }

    /// Replace the cut colliders with one static convex collider per cut
    /// polygon. Degenerate polygons (fewer than 3 distinct vertices, or a
    /// hull the backend rejects) are skipped rather than allowed to poison
    /// world initialization.
    pub fn rebuild_cut(&mut self, cut: &Cut) {
        self.clear_cut_colliders();
        for points in cut.collider_points() {
            match self.insert_collider(&PolygonCollider::new(points), None) {
                Some(handle) => self.cut_colliders.push(handle),
                None => warn!("skipping degenerate cut polygon"),
            }
        }
    }

    pub fn cut_collider_count(&self) -> usize {
        self.cut_colliders.len()
    }

    /// Teleport the player body and zero its velocity.
    pub fn reset_player(&mut self, pos: Point2<Real>) {
        if let Some(body) = self.player.and_then(|h| self.bodies.get_mut(h)) {
            body.set_translation(Vector2::new(pos.x, pos.y), true);
            body.set_linvel(Vector2::zeros(), true);
        }
    }

    pub fn player_position(&self) -> Point2<Real> {
        self.player
            .and_then(|h| self.bodies.get(h))
            .map(|body| Point2::from(*body.translation()))
            .unwrap_or_else(Point2::origin)
    }

    pub fn player_velocity(&self) -> Vector2<Real> {
        self.player
            .and_then(|h| self.bodies.get(h))
            .map(|body| *body.linvel())
            .unwrap_or_else(Vector2::zeros)
    }

    pub fn is_player_collider(&self, handle: ColliderHandle) -> bool {
        self.player_collider == Some(handle)
    }

    /// Drive the player's horizontal velocity; `direction` in [-1, 1].
    pub fn move_player(&mut self, direction: Real) {
        if let Some(body) = self.player.and_then(|h| self.bodies.get_mut(h)) {
            let vy = body.linvel().y;
            let vx = (direction * self.move_speed)
                .clamp(-self.max_horizontal_speed, self.max_horizontal_speed);
            body.set_linvel(Vector2::new(vx, vy), true);
        }
    }

    /// Launch the player upward. Grounded gating is the caller's concern.
    pub fn jump(&mut self) {
        if let Some(body) = self.player.and_then(|h| self.bodies.get_mut(h)) {
            let vx = body.linvel().x;
            body.set_linvel(Vector2::new(vx, self.jump_speed), true);
        }
    }

    /// Step the simulation by `dt` and return the frame's contact events.
    pub fn step(&mut self, dt: Real) -> Vec<ContactEvent> {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.events,
        );
        self.clamp_player_velocity();

        match self.events.events.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }

    // Terminal-velocity clamps on the player body.
    fn clamp_player_velocity(&mut self) {
        let (max_h, max_v) = (self.max_horizontal_speed, self.max_vertical_speed);
        if let Some(body) = self.player.and_then(|h| self.bodies.get_mut(h)) {
            let v = *body.linvel();
            let clamped = Vector2::new(v.x.clamp(-max_h, max_h), v.y.clamp(-max_v, max_v));
            if clamped != v {
                body.set_linvel(clamped, false);
            }
        }
    }
}
