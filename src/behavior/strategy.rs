//! Single-purpose decision units that behaviors are assembled from.

use std::fmt::Debug;

use crate::behavior::EntityContext;
use crate::entity::{EntityKind, ProjectileOwner};
use crate::math::{Direction, Vec2};
use crate::time::Cooldown;

/// Picks the point an entity moves toward.
pub trait TargetStrategy: Debug {
    /// Point to pursue this tick.
    fn target(&self, ctx: &EntityContext<'_>) -> Vec2;
}

/// A direction plus a multiplier on the behavior's base speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Where to go.
    pub direction: Direction,
    /// Factor applied to base speed.
    pub speed_scale: f32,
}

/// Decides whether incoming fire must be avoided.
pub trait DodgeStrategy: Debug {
    /// Evasive steering, or `None` when nothing threatens.
    fn dodge(&self, ctx: &EntityContext<'_>) -> Option<Steering>;
}

/// Decides whether the entity should flee.
pub trait RunawayStrategy: Debug {
    /// Flight direction, or `None` when the entity is healthy enough.
    fn runaway(&self, ctx: &EntityContext<'_>) -> Option<Direction>;
}

/// Decides whether to act (fire) this tick.
///
/// Implementations own the tick-and-consume of `cooldown`, so answering
/// `true` always spends it.
pub trait ActionStrategy: Debug {
    /// Whether to act now.
    fn should_act(&self, ctx: &EntityContext<'_>, cooldown: &mut Cooldown) -> bool;
}

/// Always chase the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerTarget;

impl TargetStrategy for PlayerTarget {
    fn target(&self, ctx: &EntityContext<'_>) -> Vec2 {
        ctx.player_position
    }
}

/// Head for a fixed point, such as a safehouse.
#[derive(Debug, Clone, Copy)]
pub struct PointTarget {
    /// Destination.
    pub point: Vec2,
}

impl TargetStrategy for PointTarget {
    fn target(&self, _ctx: &EntityContext<'_>) -> Vec2 {
        self.point
    }
}

/// Chase the nearest living entity of `kind` within `threshold`, otherwise
/// the player.
#[derive(Debug, Clone, Copy)]
pub struct NearestKindTarget {
    /// Kind to hunt.
    pub kind: EntityKind,
    /// Maximum distance at which a sibling is preferred over the player.
    pub threshold: f32,
}

impl TargetStrategy for NearestKindTarget {
    fn target(&self, ctx: &EntityContext<'_>) -> Vec2 {
        let nearest = ctx
            .others()
            .filter(|view| view.kind == self.kind)
            .map(|view| (view.position.distance_squared(ctx.position), view.position))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        match nearest {
            Some((distance_sq, position)) if distance_sq <= self.threshold * self.threshold => {
                position
            }
            _ => ctx.player_position,
        }
    }
}

/// Sidestep the nearest projectile of a given owner.
///
/// Steering is perpendicular to the line toward the projectile; speed is
/// scaled from 1 at the edge of `threshold` up to `multiplier` at contact.
#[derive(Debug, Clone, Copy)]
pub struct NearestProjectileDodge {
    /// Owner filter; [`ProjectileOwner::All`] watches everything.
    pub owner: ProjectileOwner,
    /// Detection radius.
    pub threshold: f32,
    /// Speed factor at zero distance.
    pub multiplier: f32,
}

impl NearestProjectileDodge {
    /// Default speed factor at zero distance.
    pub const DEFAULT_MULTIPLIER: f32 = 1.5;
}

impl DodgeStrategy for NearestProjectileDodge {
    fn dodge(&self, ctx: &EntityContext<'_>) -> Option<Steering> {
        let threshold_sq = self.threshold * self.threshold;
        let (distance_sq, delta) = ctx
            .projectiles
            .iter()
            .filter(|p| self.owner.matches(p.owner()))
            .map(|p| {
                let delta = p.position() - ctx.position;
                (delta.length_squared(), delta)
            })
            .filter(|(distance_sq, _)| *distance_sq <= threshold_sq)
            .min_by(|a, b| a.0.total_cmp(&b.0))?;

        let direction = Direction::from_vector(delta.perpendicular())
            .unwrap_or_else(|| ctx.rotation.perpendicular());
        let closeness = if threshold_sq > 0.0 {
            1.0 - distance_sq / threshold_sq
        } else {
            1.0
        };
        Some(Steering {
            direction,
            speed_scale: closeness.mul_add(self.multiplier - 1.0, 1.0),
        })
    }
}

/// Below a hit point threshold, flee toward a safehouse and away from the
/// player, blending both unit vectors by weight.
#[derive(Debug, Clone, Copy)]
pub struct SafehouseRunaway {
    /// Flee while hit points are strictly below this.
    pub hp_threshold: u32,
    /// Where to flee to.
    pub safehouse: Vec2,
    /// Weight of the pull toward the safehouse.
    pub safehouse_weight: f32,
    /// Weight of the push away from the player.
    pub avoid_player_weight: f32,
}

impl RunawayStrategy for SafehouseRunaway {
    fn runaway(&self, ctx: &EntityContext<'_>) -> Option<Direction> {
        if ctx.hit_points.value() >= self.hp_threshold {
            return None;
        }
        let toward = (self.safehouse - ctx.position)
            .normalized()
            .unwrap_or(Vec2::ZERO);
        let away = (ctx.position - ctx.player_position)
            .normalized()
            .unwrap_or(Vec2::ZERO);
        Direction::from_vector(toward * self.safehouse_weight + away * self.avoid_player_weight)
    }
}

/// Fire whenever the cooldown allows and the player is within `range`.
#[derive(Debug, Clone, Copy)]
pub struct RangeShoot {
    /// Engagement distance.
    pub range: f32,
}

impl ActionStrategy for RangeShoot {
    fn should_act(&self, ctx: &EntityContext<'_>, cooldown: &mut Cooldown) -> bool {
        cooldown.tick(ctx.delta_time);
        if !cooldown.consume_if_ready() {
            return false;
        }
        ctx.position.distance_squared(ctx.player_position) <= self.range * self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::EntityView;
    use crate::combat::{Damage, HitPoints};
    use crate::entity::{EntityId, Projectile};
    use crate::math::Bounds;
    use crate::time::DeltaTime;

    fn ctx<'a>(
        position: Vec2,
        projectiles: &'a [Projectile],
        siblings: &'a [EntityView],
    ) -> EntityContext<'a> {
        EntityContext {
            self_index: 0,
            position,
            rotation: Direction::RIGHT,
            radius: 5.0,
            hit_points: HitPoints::new(10),
            player_position: Vec2::new(100.0, 0.0),
            projectiles,
            siblings,
            delta_time: DeltaTime::new(0.1).unwrap(),
            stage: Bounds::new(-500.0, -500.0, 500.0, 500.0).unwrap(),
        }
    }

    fn view(id: u64, kind: EntityKind, position: Vec2) -> EntityView {
        EntityView {
            id: EntityId::new(id),
            kind,
            position,
            radius: 5.0,
            alive: true,
        }
    }

    fn projectile(position: Vec2, owner: ProjectileOwner) -> Projectile {
        Projectile::new(position, Direction::LEFT, 100.0, 1.0, Damage::new(1), 1.0, owner).unwrap()
    }

    #[test]
    fn test_nearest_kind_within_threshold() {
        let siblings = [
            view(1, EntityKind::Zombie, Vec2::ZERO),
            view(2, EntityKind::Healthy, Vec2::new(0.0, 30.0)),
            view(3, EntityKind::Healthy, Vec2::new(0.0, 20.0)),
        ];
        let strategy = NearestKindTarget {
            kind: EntityKind::Healthy,
            threshold: 50.0,
        };
        assert_eq!(strategy.target(&ctx(Vec2::ZERO, &[], &siblings)), Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_nearest_kind_falls_back_to_player() {
        let siblings = [
            view(1, EntityKind::Zombie, Vec2::ZERO),
            view(2, EntityKind::Healthy, Vec2::new(0.0, 300.0)),
        ];
        let strategy = NearestKindTarget {
            kind: EntityKind::Healthy,
            threshold: 50.0,
        };
        assert_eq!(strategy.target(&ctx(Vec2::ZERO, &[], &siblings)), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_nearest_kind_skips_dead() {
        let mut dead = view(2, EntityKind::Healthy, Vec2::new(0.0, 10.0));
        dead.alive = false;
        let siblings = [view(1, EntityKind::Zombie, Vec2::ZERO), dead];
        let strategy = NearestKindTarget {
            kind: EntityKind::Healthy,
            threshold: 50.0,
        };
        assert_eq!(strategy.target(&ctx(Vec2::ZERO, &[], &siblings)), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_dodge_is_perpendicular_and_scaled() {
        let projectiles = [projectile(Vec2::new(10.0, 0.0), ProjectileOwner::Player)];
        let dodge = NearestProjectileDodge {
            owner: ProjectileOwner::Player,
            threshold: 20.0,
            multiplier: 2.0,
        };
        let steering = dodge.dodge(&ctx(Vec2::ZERO, &projectiles, &[])).unwrap();
        assert!(steering.direction.vector().dot(Vec2::new(1.0, 0.0)).abs() < 1e-5);
        // distance 10 of 20: closeness 0.75, so 1 + 0.75 * (2 - 1)
        assert!((steering.speed_scale - 1.75).abs() < 1e-5);
    }

    #[test]
    fn test_dodge_ignores_other_owners_and_far_shots() {
        let projectiles = [
            projectile(Vec2::new(10.0, 0.0), ProjectileOwner::Enemy),
            projectile(Vec2::new(80.0, 0.0), ProjectileOwner::Player),
        ];
        let dodge = NearestProjectileDodge {
            owner: ProjectileOwner::Player,
            threshold: 20.0,
            multiplier: 2.0,
        };
        assert!(dodge.dodge(&ctx(Vec2::ZERO, &projectiles, &[])).is_none());
    }

    #[test]
    fn test_runaway_only_below_threshold() {
        let runaway = SafehouseRunaway {
            hp_threshold: 5,
            safehouse: Vec2::new(-100.0, 0.0),
            safehouse_weight: 0.5,
            avoid_player_weight: 0.5,
        };
        let mut c = ctx(Vec2::ZERO, &[], &[]);
        assert!(runaway.runaway(&c).is_none());
        c.hit_points = HitPoints::new(2);
        let direction = runaway.runaway(&c).unwrap();
        assert!(direction.vector().x < -0.99);
    }

    #[test]
    fn test_range_shoot_consumes_cooldown() {
        let shoot = RangeShoot { range: 150.0 };
        let mut cooldown = Cooldown::new(1.0).unwrap();
        let c = ctx(Vec2::ZERO, &[], &[]);
        assert!(shoot.should_act(&c, &mut cooldown));
        assert!(!shoot.should_act(&c, &mut cooldown));
        assert!(!cooldown.is_ready());
    }

    #[test]
    fn test_range_shoot_out_of_range_still_spends() {
        let shoot = RangeShoot { range: 50.0 };
        let mut cooldown = Cooldown::new(1.0).unwrap();
        assert!(!shoot.should_act(&ctx(Vec2::ZERO, &[], &[]), &mut cooldown));
        assert!(!cooldown.is_ready());
    }
}
