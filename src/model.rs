//! Per-level mutable game state: plane, cut, player location, collectibles.

use crate::cut::Cut;
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::plane::CutPlane;
use nalgebra::{Point3, Vector2, Vector3};

/// Distance from the cutting plane within which items are considered part of
/// the current cut and drawn/interactable.
pub const VISIBLE_DIST: Real = 0.5;

/// A named item placed in the 3D level (the exit door, collectibles, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct GameItem {
    pub name: String,
    pub position: Point3<Real>,
}

impl GameItem {
    pub fn new(name: impl Into<String>, position: Point3<Real>) -> Self {
        GameItem {
            name: name.into(),
            position,
        }
    }

    /// Whether the item sits close enough to the current cutting plane to be
    /// part of the cut the player can see.
    pub fn can_be_seen(&self, player_pos: Point3<Real>, plane_normal: Vector3<Real>) -> bool {
        let dist = (self.position - player_pos).dot(&plane_normal);
        dist.abs() <= VISIBLE_DIST
    }
}

/// A pickup in the level. Never destroyed, only flagged as collected.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    item: GameItem,
    collected: bool,
}

impl Collectible {
    pub fn new(name: impl Into<String>, position: Point3<Real>) -> Self {
        Collectible {
            item: GameItem::new(name, position),
            collected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub const fn position(&self) -> Point3<Real> {
        self.item.position
    }

    pub const fn collected(&self) -> bool {
        self.collected
    }

    pub const fn set_collected(&mut self, collected: bool) {
        self.collected = collected;
    }

    /// A collected item is gone from every cut; otherwise visibility follows
    /// the plane-distance rule of [`GameItem::can_be_seen`].
    pub fn can_be_seen(&self, player_pos: Point3<Real>, plane_normal: Vector3<Real>) -> bool {
        !self.collected && self.item.can_be_seen(player_pos, plane_normal)
    }
}

/// Holds the per-level mutable state: the current plane, the cut computed
/// from it, the player's 3D world location, collectibles and the exit.
///
/// The pairing invariant "the stored cut was computed from the stored plane"
/// is maintained by the gameplay state machine, which only leaves its
/// rotating state through a full cut recomputation.
#[derive(Debug, Clone)]
pub struct GameModel {
    plane: CutPlane,
    cut: Cut,
    player_3d: Point3<Real>,
    exit: GameItem,
    collectibles: Vec<Collectible>,
    reached_exit: bool,

    // Respawn data, used by reset().
    start_location: Point3<Real>,
    start_normal: Vector3<Real>,
}

impl GameModel {
    pub fn new(
        start_location: Point3<Real>,
        start_normal: Vector3<Real>,
        exit: GameItem,
        collectibles: Vec<Collectible>,
    ) -> Result<Self, GeometryError> {
        let plane = CutPlane::new(start_location, start_normal)?;
        Ok(GameModel {
            plane,
            cut: Cut::empty(),
            player_3d: start_location,
            exit,
            collectibles,
            reached_exit: false,
            start_location,
            start_normal,
        })
    }

    pub const fn plane(&self) -> &CutPlane {
        &self.plane
    }

    pub const fn plane_mut(&mut self) -> &mut CutPlane {
        &mut self.plane
    }

    pub const fn cut(&self) -> &Cut {
        &self.cut
    }

    pub fn set_cut(&mut self, cut: Cut) {
        self.cut = cut;
    }

    pub const fn player_3d(&self) -> Point3<Real> {
        self.player_3d
    }

    pub const fn set_player_3d(&mut self, loc: Point3<Real>) {
        self.player_3d = loc;
    }

    /// Accumulate a frame's 2D physics displacement into the player's 3D
    /// world location through the plane basis:
    /// `loc += d.x * basis_right + (0, 0, d.y)`.
    pub fn apply_2d_displacement(&mut self, displacement: Vector2<Real>) {
        self.player_3d += self.plane.unproject(displacement);
    }

    pub const fn exit(&self) -> &GameItem {
        &self.exit
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn collectibles_mut(&mut self) -> &mut [Collectible] {
        &mut self.collectibles
    }

    pub const fn reached_exit(&self) -> bool {
        self.reached_exit
    }

    pub const fn set_reached_exit(&mut self, reached: bool) {
        self.reached_exit = reached;
    }

    /// Restore the level's start state so it can be played again.
    pub fn reset(&mut self) {
        self.player_3d = self.start_location;
        self.plane = CutPlane::new(self.start_location, self.start_normal)
            .unwrap_or_else(|_| self.plane.clone());
        self.cut = Cut::empty();
        self.reached_exit = false;
        for c in &mut self.collectibles {
            c.set_collected(false);
        }
    }
}
