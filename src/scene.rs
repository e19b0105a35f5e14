//! Scene-graph boundary. The cut pipeline only needs to create nodes for cut
//! polygons and move/hide a handful of sprites, so the rendering side is
//! abstracted behind two small capability traits rather than a full scene
//! hierarchy.

use crate::float_types::Real;
use geo::Polygon as GeoPolygon;
use nalgebra::Point2;

/// Something the renderer can place and hide.
pub trait Drawable {
    fn set_position(&mut self, position: Point2<Real>);
    fn set_visible(&mut self, visible: bool);
}

/// The visual side of the cut world. Implemented by the real renderer; the
/// pipeline constructs nodes and never sees anything else of it.
pub trait SceneGraph {
    /// Add a visual node for one cut polygon.
    fn add_cut_node(&mut self, polygon: &GeoPolygon<Real>);
    /// Remove every node created from the previous cut.
    fn clear_cut_nodes(&mut self);
    /// Move the player sprite to its 2D physics position.
    fn set_player_position(&mut self, position: Point2<Real>);
    /// Show or hide the sprite of collectible `index` as cuts change.
    fn set_collectible_visible(&mut self, index: usize, visible: bool);
}

/// A sprite stub: position and visibility only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteNode {
    pub position: Point2<Real>,
    pub visible: bool,
}

impl Default for SpriteNode {
    fn default() -> Self {
        SpriteNode {
            position: Point2::origin(),
            visible: true,
        }
    }
}

impl Drawable for SpriteNode {
    fn set_position(&mut self, position: Point2<Real>) {
        self.position = position;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Headless scene graph used by tests and the demo binary: tracks node counts
/// and sprite state, draws nothing.
#[derive(Debug, Clone, Default)]
pub struct NullScene {
    cut_nodes: usize,
    player: SpriteNode,
    collectibles: Vec<SpriteNode>,
}

impl NullScene {
    pub fn with_collectibles(count: usize) -> Self {
        NullScene {
            cut_nodes: 0,
            player: SpriteNode::default(),
            collectibles: vec![SpriteNode::default(); count],
        }
    }

    pub const fn cut_node_count(&self) -> usize {
        self.cut_nodes
    }

    pub const fn player(&self) -> &SpriteNode {
        &self.player
    }

    pub fn collectible(&self, index: usize) -> Option<&SpriteNode> {
        self.collectibles.get(index)
    }
}

impl SceneGraph for NullScene {
    fn add_cut_node(&mut self, _polygon: &GeoPolygon<Real>) {
        self.cut_nodes += 1;
    }

    fn clear_cut_nodes(&mut self) {
        self.cut_nodes = 0;
    }

    fn set_player_position(&mut self, position: Point2<Real>) {
        self.player.set_position(position);
    }

    fn set_collectible_visible(&mut self, index: usize, visible: bool) {
        if let Some(node) = self.collectibles.get_mut(index) {
            node.set_visible(visible);
        }
    }
}
