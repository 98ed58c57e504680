//! Actors and obstacles that live in a session.
//!
//! - [`Player`] driven by commands
//! - [`NonPlayerEntity`], one struct for every AI kind, tagged by [`EntityKind`]
//! - [`Projectile`], [`Wall`], [`PlayerArea`] and [`TargetArea`]
//! - [`EntityTemplate`] factories used by spawners and death triggers

mod area;
mod death_trigger;
mod factory;
mod npc;
mod player;
mod projectile;
mod wall;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

pub use area::{PlayerArea, PlayerAreaOutcome, TargetArea};
pub use death_trigger::{DeathTrigger, SpawnRequest};
pub use factory::{
    BossTemplate, DodgeParams, EntityTemplate, HealthyTemplate, InfectedParams, NpcStats,
    RunawayParams, ShooterTemplate, ZombieTemplate,
};
pub use npc::{NonPlayerEntity, NpcEvent, RotationPolicy};
pub use player::{AIM_RADIUS, Player};
pub use projectile::{Projectile, ProjectileOwner};
pub use wall::Wall;

/// Session-unique identifier of a non-player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source owned by a session.
#[derive(Debug, Clone, Default)]
#[allow(missing_copy_implementations)]
pub struct EntityIds {
    next: u64,
}

impl EntityIds {
    /// Hand out the next id.
    pub const fn allocate(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

/// What a non-player entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Melee chaser.
    Zombie,
    /// Ranged enemy that flees when hurt.
    Shooter,
    /// Civilian heading for safety.
    Healthy,
    /// A Healthy that touched a Zombie.
    Infected,
    /// Patrolling ranged enemy.
    Boss,
}

impl EntityKind {
    /// Counts toward the enemy aggregate.
    #[must_use]
    pub const fn is_enemy(self) -> bool {
        matches!(self, Self::Zombie | Self::Shooter)
    }

    /// Contact with the player does no damage.
    #[must_use]
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zombie => "zombie",
            Self::Shooter => "shooter",
            Self::Healthy => "healthy",
            Self::Infected => "infected",
            Self::Boss => "boss",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity kinds a spawner may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnObjectType {
    /// Spawn zombies.
    Zombie,
    /// Spawn healthy civilians.
    Healthy,
    /// Spawn shooters.
    Shooter,
}

impl FromStr for SpawnObjectType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zombie" => Ok(Self::Zombie),
            "healthy" => Ok(Self::Healthy),
            "shooter" => Ok(Self::Shooter),
            _ => Err(ConfigError::InvalidSpawnObjectType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = EntityIds::default();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(b > a);
        assert_eq!(a.to_string(), "#1");
    }

    #[test]
    fn test_spawn_object_type_parse() {
        assert_eq!("Zombie".parse::<SpawnObjectType>().unwrap(), SpawnObjectType::Zombie);
        assert_eq!("shooter".parse::<SpawnObjectType>().unwrap(), SpawnObjectType::Shooter);
        let err = "dragon".parse::<SpawnObjectType>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidSpawnObjectType("dragon".into()));
    }

    #[test]
    fn test_kind_flags() {
        assert!(EntityKind::Zombie.is_enemy());
        assert!(!EntityKind::Infected.is_enemy());
        assert!(EntityKind::Healthy.is_passive());
        assert!(!EntityKind::Infected.is_passive());
    }
}
