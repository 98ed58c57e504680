//! Composable decision making for non-player entities.
//!
//! A [`Behavior`] answers two questions every tick: where to move and
//! whether to act. [`ComposedBehavior`] builds one from interchangeable
//! strategies with a fixed precedence:
//!
//! 1. dodge the nearest projectile
//! 2. run away when badly hurt
//! 3. primary locomotion (seek a target or patrol waypoints)
//!
//! Strategies only read an [`EntityContext`], so each can be exercised
//! without constructing an entity.

mod composer;
mod context;
mod strategy;

pub use composer::{Behavior, ComposedBehavior, Locomotion, Movement, Patrol};
pub use context::{EntityContext, EntityView};
pub use strategy::{
    ActionStrategy, DodgeStrategy, NearestKindTarget, NearestProjectileDodge, PlayerTarget,
    PointTarget, RangeShoot, RunawayStrategy, SafehouseRunaway, Steering, TargetStrategy,
};
