//! Facts a tick reports to its caller.

use serde::Serialize;

use crate::entity::{EntityId, EntityKind};

/// Something that happened during a tick.
///
/// Events are returned by value from [`GameSession::tick`] and are never
/// kept by the session afterwards.
///
/// [`GameSession::tick`]: crate::GameSession::tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A non-player entity fired.
    EnemyFired {
        /// Shooter.
        id: EntityId,
        /// Projectiles added.
        projectiles: usize,
    },
    /// A death trigger queued new entities for the end of the tick.
    EntitySpawnRequested {
        /// Entity that died.
        id: EntityId,
        /// Kind requested.
        kind: EntityKind,
        /// Entities requested.
        count: usize,
    },
    /// A Healthy touched a Zombie and turned.
    HealthyInfected {
        /// The newly infected entity.
        id: EntityId,
    },
    /// A Healthy reached the player area.
    HealthySaved {
        /// The saved entity.
        id: EntityId,
    },
    /// The player came back at the player area.
    PlayerRespawned {
        /// Total respawns so far.
        respawns: u32,
    },
    /// A bomb went off.
    BombDetonated {
        /// Bomb name.
        identifier: String,
        /// Bombs left, including the one now cooling down.
        remaining: usize,
    },
    /// The round timer crossed a whole second.
    TimerUpdated {
        /// Seconds left.
        remaining: u32,
    },
    /// The round timer ran out.
    TimeIsUp,
    /// The goal was met for the first time.
    TargetGoalReached {
        /// Goal description.
        description: String,
    },
    /// The player finished the level.
    LevelCompleted,
}

impl DomainEvent {
    /// Snake-case event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EnemyFired { .. } => "enemy_fired",
            Self::EntitySpawnRequested { .. } => "entity_spawn_requested",
            Self::HealthyInfected { .. } => "healthy_infected",
            Self::HealthySaved { .. } => "healthy_saved",
            Self::PlayerRespawned { .. } => "player_respawned",
            Self::BombDetonated { .. } => "bomb_detonated",
            Self::TimerUpdated { .. } => "timer_updated",
            Self::TimeIsUp => "time_is_up",
            Self::TargetGoalReached { .. } => "target_goal_reached",
            Self::LevelCompleted => "level_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_tag() {
        let event = DomainEvent::HealthyInfected {
            id: EntityId::new(4),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"healthy_infected","id":4}"#);
        assert_eq!(event.name(), "healthy_infected");
    }

    #[test]
    fn test_unit_variant_serializes() {
        let json = serde_json::to_string(&DomainEvent::TimeIsUp).unwrap();
        assert_eq!(json, r#"{"event":"time_is_up"}"#);
    }
}
