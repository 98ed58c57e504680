//! Read-only views of a session for renderers and tooling.

use serde::Serialize;

use crate::entity::{EntityId, EntityKind, ProjectileOwner};
use crate::goal::Aggregates;
use crate::math::{Bounds, Vec2};
use crate::session::GameSession;

/// Player pose and health.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPose {
    /// Center.
    pub position: Vec2,
    /// Facing angle in radians.
    pub rotation: f32,
    /// Body radius.
    pub radius: f32,
    /// Current hit points.
    pub hit_points: u32,
    /// Maximum hit points.
    pub max_hit_points: u32,
}

/// One projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectilePose {
    /// Center.
    pub position: Vec2,
    /// Radius.
    pub radius: f32,
    /// Who fired it.
    pub owner: ProjectileOwner,
}

/// One non-player entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityPose {
    /// Id.
    pub id: EntityId,
    /// Kind.
    pub kind: EntityKind,
    /// Center.
    pub position: Vec2,
    /// Facing angle in radians.
    pub rotation: f32,
    /// Body radius.
    pub radius: f32,
    /// Current hit points.
    pub hit_points: u32,
}

/// A wall or area circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CirclePose {
    /// Center.
    pub position: Vec2,
    /// Radius.
    pub radius: f32,
}

/// An area circle and whether the player may enter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaPose {
    /// Center.
    pub position: Vec2,
    /// Radius.
    pub radius: f32,
    /// Open to the player.
    pub open: bool,
}

/// Heads-up display data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    /// Counters also readable by goals.
    #[serde(flatten)]
    pub aggregates: Aggregates,
    /// Player hit points.
    pub hit_points: u32,
    /// Round timer, formatted `NNNs`.
    pub timer: String,
    /// Equipped weapon, if any.
    pub weapon_name: Option<String>,
    /// Rounds in the magazine.
    pub current_ammo: u32,
    /// Magazine size.
    pub max_ammo: u32,
    /// Reserve rounds.
    pub ammo_stock: u32,
    /// Goal text.
    pub goal_description: String,
}

/// Session state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Flags {
    /// Ticks are ignored until resumed.
    pub paused: bool,
    /// The round timer ran out.
    pub time_up: bool,
    /// The player reached the open exit.
    pub level_completed: bool,
    /// The goal has been met.
    pub goal_reached: bool,
    /// The population overran and the session stopped.
    pub interrupted: bool,
    /// A bomb is cooling down.
    pub bomb_active: bool,
}

impl Flags {
    /// Whether no further tick can change the world.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.time_up || self.level_completed || self.interrupted
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Ticks advanced so far.
    pub tick: u64,
    /// Arena.
    pub stage: Bounds,
    /// Player.
    pub player: PlayerPose,
    /// Current aim point.
    pub aim: Vec2,
    /// Live projectiles.
    pub projectiles: Vec<ProjectilePose>,
    /// Non-player entities in update order.
    pub entities: Vec<EntityPose>,
    /// Walls.
    pub walls: Vec<CirclePose>,
    /// Player area.
    pub player_area: Option<AreaPose>,
    /// Level exit.
    pub target_area: Option<AreaPose>,
    /// HUD.
    pub hud: Hud,
    /// Flags.
    pub flags: Flags,
}

impl GameSession {
    /// Take a complete read-only view of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        let weapon = player.weapon();
        Snapshot {
            tick: self.ticks,
            stage: self.stage,
            player: PlayerPose {
                position: player.position(),
                rotation: player.rotation().angle(),
                radius: player.radius().get(),
                hit_points: player.hit_points().value(),
                max_hit_points: player.max_hit_points().value(),
            },
            aim: self.aim,
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectilePose {
                    position: p.position(),
                    radius: p.radius(),
                    owner: p.owner(),
                })
                .collect(),
            entities: self
                .npcs
                .iter()
                .map(|npc| EntityPose {
                    id: npc.id(),
                    kind: npc.kind(),
                    position: npc.position(),
                    rotation: npc.rotation().angle(),
                    radius: npc.radius().get(),
                    hit_points: npc.hit_points().value(),
                })
                .collect(),
            walls: self
                .walls
                .iter()
                .map(|wall| CirclePose {
                    position: wall.position(),
                    radius: wall.radius().get(),
                })
                .collect(),
            player_area: self.player_area.as_ref().map(|area| AreaPose {
                position: area.position(),
                radius: area.radius().get(),
                open: true,
            }),
            target_area: self.target_area.as_ref().map(|area| AreaPose {
                position: area.position(),
                radius: area.radius().get(),
                open: area.is_open(),
            }),
            hud: Hud {
                aggregates: self.aggregates(),
                hit_points: player.hit_points().value(),
                timer: self.timer.to_string(),
                weapon_name: weapon.map(|w| w.name().to_string()),
                current_ammo: weapon.map_or(0, |w| w.current_ammo()),
                max_ammo: weapon.map_or(0, |w| w.max_ammo()),
                ammo_stock: player.ammo_stock(),
                goal_description: self.goal.description().to_string(),
            },
            flags: self.flags(),
        }
    }
}
