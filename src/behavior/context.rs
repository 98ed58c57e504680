//! The read-only world view handed to a behavior.

use crate::combat::HitPoints;
use crate::entity::{EntityId, EntityKind, Projectile};
use crate::math::{Bounds, Direction, Vec2};
use crate::time::DeltaTime;

/// Position summary of one non-player entity, refreshed as the tick's
/// entity pass moves each of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    /// Id.
    pub id: EntityId,
    /// Kind.
    pub kind: EntityKind,
    /// Position.
    pub position: Vec2,
    /// Radius.
    pub radius: f32,
    /// Not yet dead.
    pub alive: bool,
}

/// Everything one entity may look at while deciding, built fresh for every
/// entity on every tick.
#[derive(Debug, Clone, Copy)]
pub struct EntityContext<'a> {
    /// Index of the deciding entity in `siblings`.
    pub self_index: usize,
    /// Own position.
    pub position: Vec2,
    /// Own facing.
    pub rotation: Direction,
    /// Own radius.
    pub radius: f32,
    /// Own hit points.
    pub hit_points: HitPoints,
    /// Player position.
    pub player_position: Vec2,
    /// Live projectiles.
    pub projectiles: &'a [Projectile],
    /// All non-player entities, including the deciding one.
    pub siblings: &'a [EntityView],
    /// Frame delta.
    pub delta_time: DeltaTime,
    /// Stage bounds.
    pub stage: Bounds,
}

impl EntityContext<'_> {
    /// Living siblings other than the deciding entity.
    pub fn others(&self) -> impl Iterator<Item = &EntityView> {
        self.siblings
            .iter()
            .enumerate()
            .filter(move |(index, view)| *index != self.self_index && view.alive)
            .map(|(_, view)| view)
    }
}
