//! Spawner anchor placement on the open sides of walls.

use crate::entity::Wall;
use crate::math::{Bounds, Direction, Vec2};

/// How far from a wall a side is probed for neighbours.
pub const ANCHOR_CHECK_DISTANCE: f32 = 80.0;

/// Upper bound on anchors per wall.
pub const MAX_ANCHORS_PER_WALL: usize = 4;

/// Clearance between a wall's edge and its anchors.
pub const ANCHOR_GAP: f32 = 10.0;

const SIDES: [Direction; 4] = [
    Direction::UP,
    Direction::DOWN,
    Direction::LEFT,
    Direction::RIGHT,
];

/// Give every wall anchors on each side not crowded by another wall.
///
/// A side is blocked when another wall's center lies within
/// `0.8 × ANCHOR_CHECK_DISTANCE` of the probe point. Anchors outside the
/// stage are dropped.
pub fn assign_open_side_anchors(walls: &mut [Wall], stage: &Bounds) {
    let centers: Vec<Vec2> = walls.iter().map(Wall::position).collect();
    let blocked_radius = 0.8 * ANCHOR_CHECK_DISTANCE;
    let blocked_sq = blocked_radius * blocked_radius;

    for (index, wall) in walls.iter_mut().enumerate() {
        let position = wall.position();
        let offset = wall.radius().get() + ANCHOR_GAP;
        let anchors = SIDES
            .iter()
            .filter(|side| {
                let probe = position + side.vector() * ANCHOR_CHECK_DISTANCE;
                !centers
                    .iter()
                    .enumerate()
                    .any(|(other, center)| other != index && center.distance_squared(probe) < blocked_sq)
            })
            .map(|side| position + side.vector() * offset)
            .filter(|anchor| stage.contains(*anchor))
            .take(MAX_ANCHORS_PER_WALL)
            .collect();
        wall.set_anchors(anchors);
    }
}
