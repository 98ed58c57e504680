//! Behaviors assembled from strategies.

use std::fmt::Debug;

use crate::behavior::{
    ActionStrategy, DodgeStrategy, EntityContext, RunawayStrategy, TargetStrategy,
};
use crate::math::{Direction, Vec2};
use crate::time::Cooldown;

/// A movement intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Where to go.
    pub direction: Direction,
    /// How fast, in units per second.
    pub speed: f32,
}

/// An entity's per-tick decision policy.
pub trait Behavior: Debug {
    /// Movement for this tick, or `None` to stand still.
    fn decide_movement(&mut self, ctx: &EntityContext<'_>) -> Option<Movement>;

    /// Whether to act (fire) this tick.
    fn decide_action(&mut self, _ctx: &EntityContext<'_>) -> bool {
        false
    }
}

/// Cycles through waypoints in order, wrapping around.
#[derive(Debug, Clone)]
pub struct Patrol {
    waypoints: Vec<Vec2>,
    current: usize,
}

impl Patrol {
    /// Within this distance a waypoint counts as reached.
    pub const ARRIVAL_DISTANCE: f32 = 2.0;

    /// Create a patrol route.
    #[must_use]
    pub const fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            current: 0,
        }
    }

    /// Index of the waypoint being approached.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Direction to the current waypoint. Reaching it advances the route
    /// and idles for the tick.
    fn heading(&mut self, position: Vec2) -> Option<Direction> {
        let waypoint = *self.waypoints.get(self.current)?;
        let delta = waypoint - position;
        if delta.length_squared() < Self::ARRIVAL_DISTANCE * Self::ARRIVAL_DISTANCE {
            self.current = (self.current + 1) % self.waypoints.len();
            return None;
        }
        Direction::from_vector(delta)
    }
}

/// Primary movement of a composed behavior.
#[derive(Debug)]
pub enum Locomotion {
    /// Pursue whatever the target strategy resolves.
    Seek(Box<dyn TargetStrategy>),
    /// Walk a waypoint loop.
    Patrol(Patrol),
}

/// A behavior built from optional dodge, runaway and action strategies on
/// top of a primary [`Locomotion`].
#[derive(Debug)]
pub struct ComposedBehavior {
    speed: f32,
    locomotion: Locomotion,
    dodge: Option<Box<dyn DodgeStrategy>>,
    runaway: Option<Box<dyn RunawayStrategy>>,
    runaway_multiplier: f32,
    action: Option<(Box<dyn ActionStrategy>, Cooldown)>,
}

impl ComposedBehavior {
    /// Default speed factor while fleeing.
    pub const DEFAULT_RUNAWAY_MULTIPLIER: f32 = 2.0;

    /// Pursue `target` at `speed`.
    #[must_use]
    pub fn seek(speed: f32, target: impl TargetStrategy + 'static) -> Self {
        Self::with_locomotion(speed, Locomotion::Seek(Box::new(target)))
    }

    /// Patrol `waypoints` at `speed`.
    #[must_use]
    pub const fn patrol(speed: f32, waypoints: Vec<Vec2>) -> Self {
        Self::with_locomotion(speed, Locomotion::Patrol(Patrol::new(waypoints)))
    }

    const fn with_locomotion(speed: f32, locomotion: Locomotion) -> Self {
        Self {
            speed,
            locomotion,
            dodge: None,
            runaway: None,
            runaway_multiplier: Self::DEFAULT_RUNAWAY_MULTIPLIER,
            action: None,
        }
    }

    /// Attach a dodge strategy.
    #[must_use]
    pub fn with_dodge(mut self, dodge: impl DodgeStrategy + 'static) -> Self {
        self.dodge = Some(Box::new(dodge));
        self
    }

    /// Attach a runaway strategy, fleeing at `speed × multiplier`.
    #[must_use]
    pub fn with_runaway(mut self, runaway: impl RunawayStrategy + 'static, multiplier: f32) -> Self {
        self.runaway = Some(Box::new(runaway));
        self.runaway_multiplier = multiplier;
        self
    }

    /// Attach an action strategy gated by `cooldown`.
    #[must_use]
    pub fn with_action(mut self, action: impl ActionStrategy + 'static, cooldown: Cooldown) -> Self {
        self.action = Some((Box::new(action), cooldown));
        self
    }

    /// Base speed.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }
}

impl Behavior for ComposedBehavior {
    fn decide_movement(&mut self, ctx: &EntityContext<'_>) -> Option<Movement> {
        if let Some(steering) = self.dodge.as_ref().and_then(|d| d.dodge(ctx)) {
            return Some(Movement {
                direction: steering.direction,
                speed: self.speed * steering.speed_scale,
            });
        }

        if let Some(direction) = self.runaway.as_ref().and_then(|r| r.runaway(ctx)) {
            return Some(Movement {
                direction,
                speed: self.speed * self.runaway_multiplier,
            });
        }

        let direction = match &mut self.locomotion {
            Locomotion::Seek(target) => Direction::between(ctx.position, target.target(ctx)),
            Locomotion::Patrol(patrol) => patrol.heading(ctx.position),
        }?;
        Some(Movement {
            direction,
            speed: self.speed,
        })
    }

    fn decide_action(&mut self, ctx: &EntityContext<'_>) -> bool {
        match self.action.as_mut() {
            Some((action, cooldown)) => action.should_act(ctx, cooldown),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{NearestProjectileDodge, PlayerTarget, RangeShoot, SafehouseRunaway};
    use crate::combat::{Damage, HitPoints};
    use crate::entity::{Projectile, ProjectileOwner};
    use crate::math::Bounds;
    use crate::time::DeltaTime;

    fn ctx(position: Vec2, hit_points: u32, projectiles: &[Projectile]) -> EntityContext<'_> {
        EntityContext {
            self_index: 0,
            position,
            rotation: Direction::RIGHT,
            radius: 5.0,
            hit_points: HitPoints::new(hit_points),
            player_position: Vec2::new(100.0, 0.0),
            projectiles,
            siblings: &[],
            delta_time: DeltaTime::new(0.1).unwrap(),
            stage: Bounds::new(-500.0, -500.0, 500.0, 500.0).unwrap(),
        }
    }

    fn chaser() -> ComposedBehavior {
        ComposedBehavior::seek(10.0, PlayerTarget)
            .with_dodge(NearestProjectileDodge {
                owner: ProjectileOwner::Player,
                threshold: 30.0,
                multiplier: 1.5,
            })
            .with_runaway(
                SafehouseRunaway {
                    hp_threshold: 5,
                    safehouse: Vec2::new(-100.0, 0.0),
                    safehouse_weight: 1.0,
                    avoid_player_weight: 0.0,
                },
                2.0,
            )
    }

    #[test]
    fn test_seek_moves_toward_target() {
        let mut behavior = chaser();
        let movement = behavior.decide_movement(&ctx(Vec2::ZERO, 10, &[])).unwrap();
        assert!(movement.direction.vector().x > 0.99);
        assert!((movement.speed - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_runaway_beats_seek() {
        let mut behavior = chaser();
        let movement = behavior.decide_movement(&ctx(Vec2::ZERO, 2, &[])).unwrap();
        assert!(movement.direction.vector().x < -0.99);
        assert!((movement.speed - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_dodge_beats_runaway() {
        let shots = [Projectile::new(
            Vec2::new(0.0, 10.0),
            Direction::UP,
            100.0,
            1.0,
            Damage::new(1),
            1.0,
            ProjectileOwner::Player,
        )
        .unwrap()];
        let mut behavior = chaser();
        let movement = behavior.decide_movement(&ctx(Vec2::ZERO, 2, &shots)).unwrap();
        assert!(movement.direction.vector().y.abs() < 1e-5);
        assert!(movement.speed > 10.0);
    }

    #[test]
    fn test_patrol_advances_and_wraps() {
        let mut behavior = ComposedBehavior::patrol(
            5.0,
            vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)],
        );
        // Standing on the first waypoint advances the route and idles.
        assert!(behavior.decide_movement(&ctx(Vec2::ZERO, 10, &[])).is_none());
        let movement = behavior.decide_movement(&ctx(Vec2::ZERO, 10, &[])).unwrap();
        assert!(movement.direction.vector().x > 0.99);
        assert!(behavior
            .decide_movement(&ctx(Vec2::new(10.0, 0.5), 10, &[]))
            .is_none());
        let back = behavior
            .decide_movement(&ctx(Vec2::new(10.0, 0.0), 10, &[]))
            .unwrap();
        assert!(back.direction.vector().x < -0.99);
    }

    #[test]
    fn test_empty_patrol_stands_still() {
        let mut behavior = ComposedBehavior::patrol(5.0, Vec::new());
        assert!(behavior.decide_movement(&ctx(Vec2::ZERO, 10, &[])).is_none());
    }

    #[test]
    fn test_action_without_strategy_is_false() {
        let mut behavior = chaser();
        assert!(!behavior.decide_action(&ctx(Vec2::ZERO, 10, &[])));
    }

    #[test]
    fn test_action_uses_owned_cooldown() {
        let mut behavior = ComposedBehavior::seek(10.0, PlayerTarget)
            .with_action(RangeShoot { range: 500.0 }, Cooldown::new(1.0).unwrap());
        let c = ctx(Vec2::ZERO, 10, &[]);
        assert!(behavior.decide_action(&c));
        assert!(!behavior.decide_action(&c));
    }
}
