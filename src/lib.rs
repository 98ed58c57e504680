// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Swarm: a deterministic fixed-step simulation kernel for top-down arena
//! survival games.
//!
//! The crate advances a player, AI-driven non-player entities, projectiles
//! and static walls once per tick, and reports what happened as plain
//! events and snapshots. Rendering, input devices and persistence are left
//! to the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  GameSession (tick pipeline, events)        │
//! ├──────────────┬──────────────┬───────────────┤
//! │  Spawners    │  Goal        │  Map gen      │
//! ├──────────────┴──────────────┴───────────────┤
//! │  Entities (player, NPCs, projectiles, ...)  │
//! ├─────────────────────────────────────────────┤
//! │  Behaviors & strategies │ Weapons           │
//! ├─────────────────────────────────────────────┤
//! │  Physics │ Math │ Time │ Combat primitives  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Identical seeds and identical command sequences produce bit-identical
//! snapshots.

pub mod behavior;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod goal;
pub mod mapgen;
pub mod math;
pub mod physics;
pub mod session;
pub mod spawner;
pub mod time;
pub mod weapon;

pub use combat::{Bomb, Damage, HitPoints};
pub use config::LevelConfig;
pub use entity::{
    EntityId, EntityKind, EntityTemplate, NonPlayerEntity, Player, PlayerArea, Projectile,
    ProjectileOwner, TargetArea, Wall,
};
pub use error::{ConfigError, SessionError};
pub use goal::{Aggregates, ComparisonOperator, Counter, Goal};
pub use math::{Bounds, Direction, Radius, Vec2};
pub use session::{DomainEvent, GameSession, SessionBuilder, Snapshot};
pub use spawner::Spawner;
pub use time::{Cooldown, DeltaTime, RoundTimer};
pub use weapon::{FireMode, FirePattern, PlayerWeapon, ShotSpec, Weapon};
