//! Static circular obstacles.

use crate::math::{Radius, Vec2};
use crate::physics::Circle;

/// An immutable obstacle. Spawner anchors are assigned once after the
/// wall set is final.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    position: Vec2,
    radius: Radius,
    anchors: Vec<Vec2>,
}

impl Wall {
    /// Create a wall with no anchors.
    #[must_use]
    pub const fn new(position: Vec2, radius: Radius) -> Self {
        Self {
            position,
            radius,
            anchors: Vec::new(),
        }
    }

    /// Center.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> Radius {
        self.radius
    }

    /// Collision circle.
    #[must_use]
    pub const fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius.get())
    }

    /// Spawner positions next to this wall.
    #[must_use]
    pub fn anchors(&self) -> &[Vec2] {
        &self.anchors
    }

    /// Replace the anchor list.
    pub fn set_anchors(&mut self, anchors: Vec<Vec2>) {
        self.anchors = anchors;
    }
}
