//! Validated recipes that build fully wired non-player entities.
//!
//! A template is plain data. Spawners and death triggers clone it and call
//! [`EntityTemplate::spawn`] with a fresh id and position.

use crate::behavior::{
    ComposedBehavior, NearestKindTarget, NearestProjectileDodge, PlayerTarget, PointTarget,
    RangeShoot, SafehouseRunaway,
};
use crate::combat::HitPoints;
use crate::entity::{
    DeathTrigger, EntityId, EntityKind, NonPlayerEntity, ProjectileOwner, RotationPolicy,
};
use crate::math::{Radius, Vec2};
use crate::time::Cooldown;
use crate::weapon::Weapon;

/// Stats shared by every kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcStats {
    /// Starting hit points.
    pub hit_points: HitPoints,
    /// Body radius.
    pub radius: Radius,
    /// Base speed.
    pub speed: f32,
}

/// Projectile avoidance tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DodgeParams {
    /// Detection radius.
    pub threshold: f32,
    /// Speed factor at zero distance.
    pub multiplier: f32,
}

/// Flight tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunawayParams {
    /// Flee below this many hit points.
    pub hp_threshold: u32,
    /// Flight destination.
    pub safehouse: Vec2,
    /// Pull toward the safehouse.
    pub safehouse_weight: f32,
    /// Push away from the player.
    pub avoid_player_weight: f32,
    /// Speed factor while fleeing.
    pub speed_multiplier: f32,
}

/// Stats a Healthy switches to once infected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfectedParams {
    /// Chase speed.
    pub speed: f32,
    /// Range at which other Healthy are preferred over the player.
    pub target_threshold: f32,
    /// Projectile detection radius.
    pub dodge_threshold: f32,
}

/// Hunts Healthy nearby, otherwise the player; dodges player fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZombieTemplate {
    /// Base stats.
    pub stats: NpcStats,
    /// Range at which a Healthy is preferred over the player.
    pub target_threshold: f32,
    /// Dodge tuning.
    pub dodge: DodgeParams,
}

/// Walks to a safehouse dodging everything; turns when touched by a Zombie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthyTemplate {
    /// Base stats.
    pub stats: NpcStats,
    /// Destination.
    pub safehouse: Vec2,
    /// Dodge tuning.
    pub dodge: DodgeParams,
    /// Post-infection tuning.
    pub infected: InfectedParams,
}

/// Ranged enemy that chases the player and flees to a safehouse when hurt.
#[derive(Debug, Clone)]
pub struct ShooterTemplate {
    /// Base stats.
    pub stats: NpcStats,
    /// Engagement distance.
    pub shoot_range: f32,
    /// Decision cooldown between shots.
    pub action_cooldown: Cooldown,
    /// Dodge tuning.
    pub dodge: DodgeParams,
    /// Flight tuning.
    pub runaway: RunawayParams,
    /// Weapon handed to each spawned shooter.
    pub weapon: Weapon,
    /// Spawns on death.
    pub on_death: Option<DeathTrigger>,
}

/// Patrolling ranged enemy.
#[derive(Debug, Clone)]
pub struct BossTemplate {
    /// Base stats.
    pub stats: NpcStats,
    /// Patrol loop; the boss starts at the first point.
    pub waypoints: Vec<Vec2>,
    /// Engagement distance.
    pub shoot_range: f32,
    /// Decision cooldown between shots.
    pub action_cooldown: Cooldown,
    /// Optional dodge tuning.
    pub dodge: Option<DodgeParams>,
    /// Weapon.
    pub weapon: Weapon,
    /// Spawns on death.
    pub on_death: Option<DeathTrigger>,
}

/// Any buildable kind.
#[derive(Debug, Clone)]
pub enum EntityTemplate {
    /// Zombie recipe.
    Zombie(ZombieTemplate),
    /// Healthy recipe.
    Healthy(HealthyTemplate),
    /// Shooter recipe.
    Shooter(ShooterTemplate),
    /// Boss recipe.
    Boss(BossTemplate),
}

impl EntityTemplate {
    /// Kind the template produces.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Zombie(_) => EntityKind::Zombie,
            Self::Healthy(_) => EntityKind::Healthy,
            Self::Shooter(_) => EntityKind::Shooter,
            Self::Boss(_) => EntityKind::Boss,
        }
    }

    /// Build an entity at `position`.
    #[must_use]
    pub fn spawn(&self, id: EntityId, position: Vec2) -> NonPlayerEntity {
        match self {
            Self::Zombie(t) => spawn_zombie(t, id, position),
            Self::Healthy(t) => spawn_healthy(t, id, position),
            Self::Shooter(t) => spawn_shooter(t, id, position),
            Self::Boss(t) => spawn_boss(t, id, position),
        }
    }
}

fn dodge(owner: ProjectileOwner, params: DodgeParams) -> NearestProjectileDodge {
    NearestProjectileDodge {
        owner,
        threshold: params.threshold,
        multiplier: params.multiplier,
    }
}

fn spawn_zombie(t: &ZombieTemplate, id: EntityId, position: Vec2) -> NonPlayerEntity {
    let behavior = ComposedBehavior::seek(
        t.stats.speed,
        NearestKindTarget {
            kind: EntityKind::Healthy,
            threshold: t.target_threshold,
        },
    )
    .with_dodge(dodge(ProjectileOwner::Player, t.dodge));
    NonPlayerEntity::new(
        id,
        EntityKind::Zombie,
        position,
        t.stats.radius,
        t.stats.hit_points,
        Box::new(behavior),
    )
}

fn spawn_healthy(t: &HealthyTemplate, id: EntityId, position: Vec2) -> NonPlayerEntity {
    let behavior = ComposedBehavior::seek(t.stats.speed, PointTarget { point: t.safehouse })
        .with_dodge(dodge(ProjectileOwner::All, t.dodge));
    let infected = ComposedBehavior::seek(
        t.infected.speed,
        NearestKindTarget {
            kind: EntityKind::Healthy,
            threshold: t.infected.target_threshold,
        },
    )
    .with_dodge(dodge(
        ProjectileOwner::Player,
        DodgeParams {
            threshold: t.infected.dodge_threshold,
            multiplier: t.dodge.multiplier,
        },
    ));
    NonPlayerEntity::new(
        id,
        EntityKind::Healthy,
        position,
        t.stats.radius,
        t.stats.hit_points,
        Box::new(behavior),
    )
    .with_infected_behavior(Box::new(infected))
}

fn spawn_shooter(t: &ShooterTemplate, id: EntityId, position: Vec2) -> NonPlayerEntity {
    let runaway = SafehouseRunaway {
        hp_threshold: t.runaway.hp_threshold,
        safehouse: t.runaway.safehouse,
        safehouse_weight: t.runaway.safehouse_weight,
        avoid_player_weight: t.runaway.avoid_player_weight,
    };
    let behavior = ComposedBehavior::seek(t.stats.speed, PlayerTarget)
        .with_dodge(dodge(ProjectileOwner::Player, t.dodge))
        .with_runaway(runaway, t.runaway.speed_multiplier)
        .with_action(
            RangeShoot {
                range: t.shoot_range,
            },
            t.action_cooldown,
        );
    let entity = NonPlayerEntity::new(
        id,
        EntityKind::Shooter,
        position,
        t.stats.radius,
        t.stats.hit_points,
        Box::new(behavior),
    )
    .with_weapon(t.weapon)
    .with_rotation_policy(RotationPolicy::FacePlayer);
    match &t.on_death {
        Some(trigger) => entity.with_death_trigger(trigger.clone()),
        None => entity,
    }
}

fn spawn_boss(t: &BossTemplate, id: EntityId, position: Vec2) -> NonPlayerEntity {
    let mut behavior = ComposedBehavior::patrol(t.stats.speed, t.waypoints.clone()).with_action(
        RangeShoot {
            range: t.shoot_range,
        },
        t.action_cooldown,
    );
    if let Some(params) = t.dodge {
        behavior = behavior.with_dodge(dodge(ProjectileOwner::Player, params));
    }
    let entity = NonPlayerEntity::new(
        id,
        EntityKind::Boss,
        position,
        t.stats.radius,
        t.stats.hit_points,
        Box::new(behavior),
    )
    .with_weapon(t.weapon)
    .with_rotation_policy(RotationPolicy::FacePlayer);
    match &t.on_death {
        Some(trigger) => entity.with_death_trigger(trigger.clone()),
        None => entity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Damage;
    use crate::weapon::{FirePattern, ShotSpec};

    fn stats() -> NpcStats {
        NpcStats {
            hit_points: HitPoints::new(4),
            radius: Radius::new(8.0).unwrap(),
            speed: 40.0,
        }
    }

    fn zombie() -> ZombieTemplate {
        ZombieTemplate {
            stats: stats(),
            target_threshold: 80.0,
            dodge: DodgeParams {
                threshold: 80.0,
                multiplier: 1.5,
            },
        }
    }

    fn weapon() -> Weapon {
        let shot = ShotSpec::new(Damage::new(1), 200.0, 3.0, 1.5).unwrap();
        Weapon::with_rate(FirePattern::SingleShot(shot), 1.0, ProjectileOwner::Enemy).unwrap()
    }

    #[test]
    fn test_spawn_zombie() {
        let template = EntityTemplate::Zombie(zombie());
        let npc = template.spawn(EntityId::new(7), Vec2::new(3.0, 4.0));
        assert_eq!(npc.kind(), EntityKind::Zombie);
        assert_eq!(npc.id(), EntityId::new(7));
        assert_eq!(npc.hit_points().value(), 4);
        assert_eq!(template.kind(), EntityKind::Zombie);
    }

    #[test]
    fn test_spawn_shooter_carries_trigger() {
        let template = EntityTemplate::Shooter(ShooterTemplate {
            stats: stats(),
            shoot_range: 600.0,
            action_cooldown: Cooldown::new(1.0).unwrap(),
            dodge: DodgeParams {
                threshold: 150.0,
                multiplier: 1.5,
            },
            runaway: RunawayParams {
                hp_threshold: 2,
                safehouse: Vec2::new(100.0, 100.0),
                safehouse_weight: 0.5,
                avoid_player_weight: 0.5,
                speed_multiplier: 2.0,
            },
            weapon: weapon(),
            on_death: Some(DeathTrigger::new(4, 30.0, EntityTemplate::Zombie(zombie()))),
        });
        let mut npc = template.spawn(EntityId::new(1), Vec2::ZERO);
        assert_eq!(npc.kind(), EntityKind::Shooter);
        npc.die();
        assert!(npc.on_death().is_some());
    }

    #[test]
    fn test_spawn_boss() {
        let template = EntityTemplate::Boss(BossTemplate {
            stats: stats(),
            waypoints: vec![Vec2::ZERO, Vec2::new(50.0, 0.0)],
            shoot_range: 300.0,
            action_cooldown: Cooldown::new(0.5).unwrap(),
            dodge: None,
            weapon: weapon(),
            on_death: None,
        });
        let npc = template.spawn(EntityId::new(1), Vec2::ZERO);
        assert_eq!(npc.kind(), EntityKind::Boss);
        assert!(npc.deals_contact_damage());
    }
}
