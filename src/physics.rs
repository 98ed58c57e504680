//! Circle collision, movement integration and overlap resolution.

use crate::math::{Bounds, Direction, EPSILON, Vec2};
use crate::time::DeltaTime;

/// A positioned circle used for every collision test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center.
    pub center: Vec2,
    /// Radius.
    pub radius: f32,
}

impl Circle {
    /// Create a circle.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies within the circle (inclusive).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Two circles intersect iff squared center distance ≤ squared sum of radii.
#[must_use]
pub fn intersects(a: Circle, b: Circle) -> bool {
    let sum = a.radius + b.radius;
    a.center.distance_squared(b.center) <= sum * sum
}

/// Integrate `position` and clamp it to `bounds`.
#[must_use]
pub fn advance(
    position: Vec2,
    direction: Direction,
    speed: f32,
    dt: DeltaTime,
    bounds: &Bounds,
) -> Vec2 {
    bounds.clamp(advance_unclamped(position, direction, speed, dt))
}

/// Integrate `position` without bounds; projectiles expire instead.
#[must_use]
pub fn advance_unclamped(position: Vec2, direction: Direction, speed: f32, dt: DeltaTime) -> Vec2 {
    position + direction.vector() * (speed * dt.seconds())
}

/// Push `moving` out of `obstacle` by the exact penetration depth.
///
/// Returns `None` when the circles do not overlap (touching counts as
/// clear). Coincident centers are separated along `fallback`.
#[must_use]
pub fn push_out(moving: Circle, obstacle: Circle, fallback: Direction) -> Option<Vec2> {
    let min_distance = moving.radius + obstacle.radius;
    let delta = moving.center - obstacle.center;
    let distance_sq = delta.length_squared();
    if distance_sq >= min_distance * min_distance {
        return None;
    }
    let distance = distance_sq.sqrt();
    let normal = if distance <= EPSILON {
        fallback.vector()
    } else {
        delta * (1.0 / distance)
    };
    Some(moving.center + normal * (min_distance - distance))
}

/// Slide `moving` out of every wall it overlaps, one wall at a time.
///
/// Only the normal component is corrected, so tangential motion made this
/// frame survives. Coincident centers push along +x.
#[must_use]
pub fn slide_out(moving: Circle, walls: impl IntoIterator<Item = Circle>) -> Vec2 {
    let mut center = moving.center;
    for wall in walls {
        let current = Circle::new(center, moving.radius);
        if let Some(corrected) = push_out(current, wall, Direction::RIGHT) {
            center = corrected;
        }
    }
    center
}
