//! Projectiles and their owner tags.

use serde::Serialize;

use crate::combat::Damage;
use crate::error::ConfigError;
use crate::math::{Bounds, Direction, Vec2};
use crate::physics::{self, Circle};
use crate::time::DeltaTime;

/// Who fired a projectile, which decides what it can hurt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileOwner {
    /// Fired by the player; damages non-player entities.
    Player,
    /// Fired by an enemy; damages the player.
    Enemy,
    /// Harmless; only walls stop it.
    None,
    /// Damages anything. As a filter it matches every owner.
    All,
}

impl ProjectileOwner {
    /// Whether a projectile owned by `owner` passes this filter.
    #[must_use]
    pub fn matches(self, owner: Self) -> bool {
        self == Self::All || self == owner
    }
}

/// A moving, short-lived damage carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    position: Vec2,
    direction: Direction,
    speed: f32,
    radius: f32,
    damage: Damage,
    lifetime: f32,
    owner: ProjectileOwner,
    expired: bool,
}

impl Projectile {
    /// Create a projectile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] when speed, radius or lifetime
    /// is not strictly positive.
    pub fn new(
        position: Vec2,
        direction: Direction,
        speed: f32,
        radius: f32,
        damage: Damage,
        lifetime: f32,
        owner: ProjectileOwner,
    ) -> Result<Self, ConfigError> {
        Ok(Self::launched(
            position,
            direction,
            ConfigError::require_positive("projectile speed", speed)?,
            ConfigError::require_positive("projectile radius", radius)?,
            damage,
            ConfigError::require_positive("projectile lifetime", lifetime)?,
            owner,
        ))
    }

    /// Build from parameters a [`ShotSpec`](crate::ShotSpec) already checked.
    pub(crate) const fn launched(
        position: Vec2,
        direction: Direction,
        speed: f32,
        radius: f32,
        damage: Damage,
        lifetime: f32,
        owner: ProjectileOwner,
    ) -> Self {
        Self {
            position,
            direction,
            speed,
            radius,
            damage,
            lifetime,
            owner,
            expired: false,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Damage dealt on hit.
    #[must_use]
    pub const fn damage(&self) -> Damage {
        self.damage
    }

    /// Seconds left to live.
    #[must_use]
    pub const fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Owner tag.
    #[must_use]
    pub const fn owner(&self) -> ProjectileOwner {
        self.owner
    }

    /// Collision circle.
    #[must_use]
    pub const fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Move and age by one frame.
    pub fn tick(&mut self, dt: DeltaTime) {
        self.position = physics::advance_unclamped(self.position, self.direction, self.speed, dt);
        self.lifetime -= dt.seconds();
    }

    /// Mark for removal regardless of lifetime.
    pub const fn expire(&mut self) {
        self.expired = true;
    }

    /// Timed out, force-expired, or outside `stage`.
    #[must_use]
    pub fn is_expired(&self, stage: &Bounds) -> bool {
        self.expired || self.lifetime <= 0.0 || !stage.contains(self.position)
    }
}
