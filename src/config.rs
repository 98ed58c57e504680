//! Level configuration.
//!
//! The value tree derives [`serde::Deserialize`] so a host can load it from
//! JSON. Nothing here is trusted: every numeric range, enum string and
//! required sub-section is checked by [`LevelConfig::validate`] and again
//! when a [`GameSession`](crate::GameSession) is built from it.

use serde::{Deserialize, Serialize};

use crate::combat::{Bomb, Damage, HitPoints};
use crate::entity::{
    BossTemplate, DeathTrigger, DodgeParams, EntityTemplate, HealthyTemplate, InfectedParams,
    NpcStats, ProjectileOwner, RunawayParams, ShooterTemplate, SpawnObjectType, ZombieTemplate,
};
use crate::error::ConfigError;
use crate::goal::Goal;
use crate::math::{Bounds, Radius, Vec2};
use crate::spawner::SpawnerBehaviour;
use crate::time::{Cooldown, RoundTimer};
use crate::weapon::{DEFAULT_PROJECTILE_LIFETIME, FireMode, FirePattern, PlayerWeapon, ShotSpec, Weapon};

/// Default hard cap on simultaneous non-player entities.
pub const DEFAULT_POPULATION_CAP: usize = 666;
/// Default round length.
pub const DEFAULT_ROUND_LENGTH_SECONDS: u32 = RoundTimer::DEFAULT.seconds();
/// Default player hit points.
pub const DEFAULT_PLAYER_HIT_POINTS: i64 = 10;
/// Default engagement range for ranged enemies.
pub const DEFAULT_SHOOT_RANGE: f32 = 600.0;
/// Default projectile detection radius.
pub const DEFAULT_DODGE_THRESHOLD: f32 = 150.0;
/// Default hit points below which a shooter flees.
pub const DEFAULT_RUNAWAY_THRESHOLD: u32 = 9;
/// Default weight of both runaway vectors.
pub const DEFAULT_RUNAWAY_WEIGHT: f32 = 0.5;
/// Zombie thresholds default to this many body radii.
pub const ZOMBIE_THRESHOLD_RADII: f32 = 10.0;
/// Default radius of the ring a death trigger spawns on.
pub const DEFAULT_MINION_SPAWN_RADIUS: f32 = 40.0;

/// A point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    /// X.
    pub x: f32,
    /// Y.
    pub y: f32,
}

impl From<PointConfig> for Vec2 {
    fn from(point: PointConfig) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Stage rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl StageConfig {
    /// Validated bounds.
    ///
    /// # Errors
    ///
    /// Fails on an empty or inverted rectangle.
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::new(self.left, self.top, self.right, self.bottom)
    }
}

/// A circle: areas and explicit walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    /// Center x.
    pub x: f32,
    /// Center y.
    pub y: f32,
    /// Radius.
    pub radius: f32,
}

impl AreaConfig {
    /// Center.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Validated radius.
    ///
    /// # Errors
    ///
    /// Fails when the radius is not positive.
    pub fn radius(&self) -> Result<Radius, ConfigError> {
        Radius::new(self.radius)
    }
}

/// Player body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Body radius.
    pub radius: f32,
    /// Movement speed used by hosts that do not pass their own.
    pub speed: f32,
    /// Maximum hit points.
    pub hit_points: i64,
    /// Start position; the player area center, else the stage center.
    pub position: Option<PointConfig>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            speed: 200.0,
            hit_points: DEFAULT_PLAYER_HIT_POINTS,
            position: None,
        }
    }
}

/// Extra shots fanned around the facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadConfig {
    /// Projectiles per shot.
    pub count: u32,
    /// Total fan angle in degrees.
    pub arc_degrees: f32,
}

fn default_weapon_name() -> String {
    "Pistol".to_string()
}

fn default_fire_mode() -> String {
    "automatic".to_string()
}

const fn default_max_ammo() -> u32 {
    30
}

/// Weapon stats, used by the player and by ranged enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Display name.
    #[serde(default = "default_weapon_name")]
    pub name: String,
    /// Damage per projectile.
    pub damage: i64,
    /// Projectile speed.
    pub projectile_speed: f32,
    /// Projectile radius.
    pub projectile_radius: f32,
    /// Shots per second.
    pub rate_per_second: f32,
    /// Projectile lifetime; 1.5 s when absent.
    #[serde(default)]
    pub projectile_lifetime_seconds: Option<f32>,
    /// `automatic` or `semi_automatic`.
    #[serde(default = "default_fire_mode")]
    pub fire_mode: String,
    /// Magazine size.
    #[serde(default = "default_max_ammo")]
    pub max_ammo: u32,
    /// Turns each shot into a fan.
    #[serde(default)]
    pub spread: Option<SpreadConfig>,
}

impl WeaponConfig {
    /// Build a cooldown-gated weapon stamping `owner` on its projectiles.
    ///
    /// # Errors
    ///
    /// Fails on non-positive damage, speed, radius, rate or lifetime.
    pub fn weapon(&self, owner: ProjectileOwner) -> Result<Weapon, ConfigError> {
        let shot = ShotSpec::new(
            Damage::from_signed(self.damage)?,
            self.projectile_speed,
            self.projectile_radius,
            self.projectile_lifetime_seconds
                .unwrap_or(DEFAULT_PROJECTILE_LIFETIME),
        )?;
        let pattern = match self.spread {
            Some(spread) if spread.count > 1 => FirePattern::Spread {
                shot,
                count: spread.count,
                arc: ConfigError::require_non_negative("spread arc", spread.arc_degrees)?
                    .to_radians(),
            },
            _ => FirePattern::SingleShot(shot),
        };
        Weapon::with_rate(pattern, self.rate_per_second, owner)
    }

    /// Build the player's weapon.
    ///
    /// # Errors
    ///
    /// As [`WeaponConfig::weapon`], plus an unknown fire mode.
    pub fn player_weapon(&self) -> Result<PlayerWeapon, ConfigError> {
        let mode: FireMode = self.fire_mode.parse()?;
        Ok(PlayerWeapon::new(
            self.name.clone(),
            self.weapon(ProjectileOwner::Player)?,
            mode,
            self.max_ammo,
        ))
    }
}

/// Procedural wall field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallGeneratorConfig {
    /// Fixed seed; the session seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of Voronoi sites.
    pub seed_count: usize,
    /// Sampling grid spacing.
    pub cell_size: f32,
    /// Wall radius.
    pub wall_radius: f32,
    /// Chance to place a wall at a boundary sample.
    pub wall_density: f64,
    /// Regenerate when fewer walls are produced.
    #[serde(default)]
    pub min_wall_count: usize,
    /// Corridor half-width in wall radii.
    #[serde(default)]
    pub corridor_width_multiplier: Option<f32>,
}

/// Stats shared by every non-player kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpcConfig {
    /// Starting hit points.
    pub hit_points: i64,
    /// Body radius.
    pub radius: f32,
    /// Speed.
    pub speed: f32,
    /// Range at which a preferred target beats the player.
    #[serde(default)]
    pub target_threshold: Option<f32>,
    /// Projectile detection radius.
    #[serde(default)]
    pub dodge_threshold: Option<f32>,
    /// Dodge speed factor at zero distance.
    #[serde(default)]
    pub dodge_speed_multiplier: Option<f32>,
}

impl NpcConfig {
    fn stats(&self) -> Result<NpcStats, ConfigError> {
        Ok(NpcStats {
            hit_points: HitPoints::from_signed(self.hit_points)?,
            radius: Radius::new(self.radius)?,
            speed: ConfigError::require_non_negative("speed", self.speed)?,
        })
    }

    fn dodge(&self, default_threshold: f32) -> Result<DodgeParams, ConfigError> {
        Ok(DodgeParams {
            threshold: ConfigError::require_non_negative(
                "dodge threshold",
                self.dodge_threshold.unwrap_or(default_threshold),
            )?,
            multiplier: ConfigError::require_positive(
                "dodge speed multiplier",
                self.dodge_speed_multiplier
                    .unwrap_or(crate::behavior::NearestProjectileDodge::DEFAULT_MULTIPLIER),
            )?,
        })
    }

    /// Zombie recipe. Thresholds default to ten body radii.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range stats.
    pub fn zombie_template(&self) -> Result<ZombieTemplate, ConfigError> {
        let stats = self.stats()?;
        let default_threshold = stats.radius.get() * ZOMBIE_THRESHOLD_RADII;
        Ok(ZombieTemplate {
            stats,
            target_threshold: ConfigError::require_non_negative(
                "zombie target threshold",
                self.target_threshold.unwrap_or(default_threshold),
            )?,
            dodge: self.dodge(default_threshold)?,
        })
    }
}

/// Civilian stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthyConfig {
    /// Base stats.
    #[serde(flatten)]
    pub entity: NpcConfig,
    /// Speed once infected; the base speed when absent.
    #[serde(default)]
    pub infected_speed: Option<f32>,
    /// Infected target threshold; the base target threshold when absent.
    #[serde(default)]
    pub infected_target_threshold: Option<f32>,
    /// Infected dodge threshold; the base dodge threshold when absent.
    #[serde(default)]
    pub infected_dodge_threshold: Option<f32>,
}

impl HealthyConfig {
    /// Healthy recipe heading for `safehouse`.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range stats.
    pub fn template(&self, safehouse: Vec2) -> Result<HealthyTemplate, ConfigError> {
        let stats = self.entity.stats()?;
        let dodge = self.entity.dodge(DEFAULT_DODGE_THRESHOLD)?;
        let target_threshold = self
            .entity
            .target_threshold
            .unwrap_or(stats.radius.get() * ZOMBIE_THRESHOLD_RADII);
        Ok(HealthyTemplate {
            stats,
            safehouse,
            dodge,
            infected: InfectedParams {
                speed: ConfigError::require_non_negative(
                    "infected speed",
                    self.infected_speed.unwrap_or(stats.speed),
                )?,
                target_threshold: ConfigError::require_non_negative(
                    "infected target threshold",
                    self.infected_target_threshold.unwrap_or(target_threshold),
                )?,
                dodge_threshold: ConfigError::require_non_negative(
                    "infected dodge threshold",
                    self.infected_dodge_threshold.unwrap_or(dodge.threshold),
                )?,
            },
        })
    }
}

/// Flight tuning for shooters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunawayConfig {
    /// Flee below this many hit points.
    pub threshold: Option<u32>,
    /// Pull toward the safehouse.
    pub safehouse_weight: Option<f32>,
    /// Push away from the player.
    pub avoid_player_weight: Option<f32>,
    /// Speed factor while fleeing.
    pub speed_multiplier: Option<f32>,
}

/// What a ranged enemy leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OnDeathConfig {
    /// Zombies spawned.
    pub count: u32,
    /// Ring radius; 40 when absent.
    #[serde(default)]
    pub radius: Option<f32>,
    /// Zombie stats; the level's zombie section when absent.
    #[serde(default)]
    pub zombie: Option<NpcConfig>,
}

impl OnDeathConfig {
    fn trigger(&self, fallback: Option<&NpcConfig>, owner: &str) -> Result<Option<DeathTrigger>, ConfigError> {
        if self.count == 0 {
            return Ok(None);
        }
        let zombie = self
            .zombie
            .as_ref()
            .or(fallback)
            .ok_or_else(|| ConfigError::Missing(format!("{owner}.on_death.zombie (or a level zombie section)")))?;
        let radius = ConfigError::require_non_negative(
            "death trigger radius",
            self.radius.unwrap_or(DEFAULT_MINION_SPAWN_RADIUS),
        )?;
        Ok(Some(DeathTrigger::new(
            self.count,
            radius,
            EntityTemplate::Zombie(zombie.zombie_template()?),
        )))
    }
}

const fn default_action_cooldown() -> f32 {
    1.0
}

/// Ranged enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterConfig {
    /// Base stats.
    #[serde(flatten)]
    pub entity: NpcConfig,
    /// Engagement distance; 600 when absent.
    #[serde(default)]
    pub shoot_range: Option<f32>,
    /// Seconds between shoot decisions.
    #[serde(default = "default_action_cooldown")]
    pub action_cooldown: f32,
    /// Required flight tuning.
    #[serde(default)]
    pub runaway: Option<RunawayConfig>,
    /// Required weapon.
    #[serde(default)]
    pub weapon: Option<WeaponConfig>,
    /// Zombies left behind on death.
    #[serde(default)]
    pub on_death: Option<OnDeathConfig>,
}

impl ShooterConfig {
    /// Shooter recipe fleeing toward `safehouse`.
    ///
    /// # Errors
    ///
    /// Fails when the weapon or runaway section is missing, or on
    /// out-of-range values.
    pub fn template(&self, safehouse: Vec2, zombie: Option<&NpcConfig>) -> Result<ShooterTemplate, ConfigError> {
        let weapon = self
            .weapon
            .as_ref()
            .ok_or_else(|| ConfigError::Missing("shooter.weapon".into()))?;
        let runaway = self
            .runaway
            .ok_or_else(|| ConfigError::Missing("shooter.runaway".into()))?;
        let stats = self.entity.stats()?;
        let offset = 2.0 * stats.radius.get();
        Ok(ShooterTemplate {
            stats,
            shoot_range: ConfigError::require_positive(
                "shoot range",
                self.shoot_range.unwrap_or(DEFAULT_SHOOT_RANGE),
            )?,
            action_cooldown: Cooldown::new(self.action_cooldown)?,
            dodge: self.entity.dodge(DEFAULT_DODGE_THRESHOLD)?,
            runaway: RunawayParams {
                hp_threshold: runaway.threshold.unwrap_or(DEFAULT_RUNAWAY_THRESHOLD),
                safehouse: Vec2::new(safehouse.x + offset, safehouse.y - offset),
                safehouse_weight: runaway.safehouse_weight.unwrap_or(DEFAULT_RUNAWAY_WEIGHT),
                avoid_player_weight: runaway
                    .avoid_player_weight
                    .unwrap_or(DEFAULT_RUNAWAY_WEIGHT),
                speed_multiplier: ConfigError::require_positive(
                    "runaway speed multiplier",
                    runaway
                        .speed_multiplier
                        .unwrap_or(crate::behavior::ComposedBehavior::DEFAULT_RUNAWAY_MULTIPLIER),
                )?,
            },
            weapon: weapon.weapon(ProjectileOwner::Enemy)?,
            on_death: self
                .on_death
                .map(|on_death| on_death.trigger(zombie, "shooter"))
                .transpose()?
                .flatten(),
        })
    }
}

/// Patrolling boss, spawned once at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossConfig {
    /// Base stats.
    #[serde(flatten)]
    pub entity: NpcConfig,
    /// Patrol loop; the boss starts at the first point.
    pub waypoints: Vec<PointConfig>,
    /// Engagement distance; 600 when absent.
    #[serde(default)]
    pub shoot_range: Option<f32>,
    /// Seconds between shoot decisions.
    #[serde(default = "default_action_cooldown")]
    pub action_cooldown: f32,
    /// Required weapon.
    #[serde(default)]
    pub weapon: Option<WeaponConfig>,
    /// Zombies left behind on death.
    #[serde(default)]
    pub on_death: Option<OnDeathConfig>,
}

impl BossConfig {
    /// Boss recipe.
    ///
    /// # Errors
    ///
    /// Fails without waypoints or weapon, or on out-of-range values.
    pub fn template(&self, zombie: Option<&NpcConfig>) -> Result<BossTemplate, ConfigError> {
        if self.waypoints.is_empty() {
            return Err(ConfigError::Missing("boss.waypoints".into()));
        }
        let weapon = self
            .weapon
            .as_ref()
            .ok_or_else(|| ConfigError::Missing("boss.weapon".into()))?;
        let dodge = match self.entity.dodge_threshold {
            Some(_) => Some(self.entity.dodge(DEFAULT_DODGE_THRESHOLD)?),
            None => None,
        };
        Ok(BossTemplate {
            stats: self.entity.stats()?,
            waypoints: self.waypoints.iter().copied().map(Vec2::from).collect(),
            shoot_range: ConfigError::require_positive(
                "shoot range",
                self.shoot_range.unwrap_or(DEFAULT_SHOOT_RANGE),
            )?,
            action_cooldown: Cooldown::new(self.action_cooldown)?,
            dodge,
            weapon: weapon.weapon(ProjectileOwner::Enemy)?,
            on_death: self
                .on_death
                .map(|on_death| on_death.trigger(zombie, "boss"))
                .transpose()?
                .flatten(),
        })
    }
}

fn default_behaviour_type() -> String {
    "fixed_position".to_string()
}

const fn one() -> usize {
    1
}

/// A spawner, or several sharing the same settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// `zombie`, `healthy` or `shooter`.
    pub spawn_object_type: String,
    /// Placement behaviour; only `fixed_position` exists.
    #[serde(default = "default_behaviour_type")]
    pub behaviour_type: String,
    /// Seconds between spawns.
    pub cooldown_seconds: f32,
    /// Entities released together.
    #[serde(default = "one")]
    pub batch_size: usize,
    /// Fixed position; drawn from open wall anchors when absent.
    #[serde(default)]
    pub position: Option<PointConfig>,
    /// How many spawners this entry creates.
    #[serde(default = "one")]
    pub number: usize,
}

impl SpawnerConfig {
    /// Parsed spawn object type.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type.
    pub fn object_type(&self) -> Result<SpawnObjectType, ConfigError> {
        self.spawn_object_type.parse()
    }

    /// Parsed behaviour.
    ///
    /// # Errors
    ///
    /// Fails on an unknown behaviour.
    pub fn behaviour(&self) -> Result<SpawnerBehaviour, ConfigError> {
        self.behaviour_type.parse()
    }
}

/// Win condition as written in a level file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Player-facing text.
    #[serde(default)]
    pub description: String,
    /// Counter name, e.g. `kills`.
    #[serde(alias = "property")]
    pub counter: String,
    /// One of `>=`, `>`, `<=`, `<`, `==`, `!=`.
    pub operator: String,
    /// Target value.
    pub target: i64,
}

impl GoalConfig {
    /// Parse into a [`Goal`].
    ///
    /// # Errors
    ///
    /// Fails on an unknown counter or operator.
    pub fn goal(&self) -> Result<Goal, ConfigError> {
        Goal::parse(self.description.clone(), &self.counter, &self.operator, self.target)
    }
}

/// One panic-button bomb.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    /// Name; `A-Bomb` when absent.
    pub identifier: Option<String>,
    /// Seconds the world stays frozen after detonation; 2 when absent.
    pub cooldown_seconds: Option<f32>,
}

impl BombConfig {
    /// Build the bomb.
    ///
    /// # Errors
    ///
    /// Fails on a non-positive cooldown.
    pub fn bomb(&self) -> Result<Bomb, ConfigError> {
        Bomb::new(
            self.identifier
                .clone()
                .unwrap_or_else(|| Bomb::DEFAULT_IDENTIFIER.to_string()),
            self.cooldown_seconds.unwrap_or(Bomb::DEFAULT_COOLDOWN),
        )
    }
}

const fn default_round_length() -> u32 {
    DEFAULT_ROUND_LENGTH_SECONDS
}

/// A complete level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Arena.
    pub stage: StageConfig,
    /// Player body.
    #[serde(default)]
    pub player: PlayerConfig,
    /// Player weapon; unarmed when absent.
    #[serde(default)]
    pub weapon: Option<WeaponConfig>,
    /// Respawn point and civilian safehouse.
    #[serde(default)]
    pub player_area: Option<AreaConfig>,
    /// Level exit.
    #[serde(default)]
    pub target_area: Option<AreaConfig>,
    /// Hand-placed walls.
    #[serde(default)]
    pub walls: Vec<AreaConfig>,
    /// Procedural walls, added to the hand-placed ones.
    #[serde(default)]
    pub wall_generator: Option<WallGeneratorConfig>,
    /// Zombie stats.
    #[serde(default)]
    pub zombie: Option<NpcConfig>,
    /// Civilian stats.
    #[serde(default)]
    pub healthy: Option<HealthyConfig>,
    /// Shooter stats.
    #[serde(default)]
    pub shooter: Option<ShooterConfig>,
    /// Boss, spawned at session start.
    #[serde(default)]
    pub boss: Option<BossConfig>,
    /// Spawners.
    #[serde(default)]
    pub spawners: Vec<SpawnerConfig>,
    /// Required win condition.
    #[serde(default)]
    pub goal: Option<GoalConfig>,
    /// Bomb stack; the last entry is used first.
    #[serde(default)]
    pub bombs: Vec<BombConfig>,
    /// Round length in seconds, capped at 999.
    #[serde(default = "default_round_length")]
    pub round_length_seconds: u32,
    /// Population cap; 666 when absent.
    #[serde(default)]
    pub population_cap: Option<usize>,
    /// Session seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl LevelConfig {
    /// Population cap in effect.
    #[must_use]
    pub fn population_cap(&self) -> usize {
        self.population_cap.unwrap_or(DEFAULT_POPULATION_CAP)
    }

    /// Parsed goal.
    ///
    /// # Errors
    ///
    /// Fails when the goal is missing or malformed.
    pub fn goal(&self) -> Result<Goal, ConfigError> {
        self.goal
            .as_ref()
            .ok_or_else(|| ConfigError::Missing("goal".into()))?
            .goal()
    }

    /// Template for a spawn object type, with the given safehouses.
    ///
    /// # Errors
    ///
    /// Fails when the kind's section is missing or invalid.
    pub fn template_for(
        &self,
        kind: SpawnObjectType,
        healthy_safehouse: Vec2,
        shooter_safehouse: Vec2,
    ) -> Result<EntityTemplate, ConfigError> {
        match kind {
            SpawnObjectType::Zombie => Ok(EntityTemplate::Zombie(
                self.zombie
                    .as_ref()
                    .ok_or_else(|| ConfigError::Missing("zombie".into()))?
                    .zombie_template()?,
            )),
            SpawnObjectType::Healthy => Ok(EntityTemplate::Healthy(
                self.healthy
                    .as_ref()
                    .ok_or_else(|| ConfigError::Missing("healthy".into()))?
                    .template(healthy_safehouse)?,
            )),
            SpawnObjectType::Shooter => Ok(EntityTemplate::Shooter(
                self.shooter
                    .as_ref()
                    .ok_or_else(|| ConfigError::Missing("shooter".into()))?
                    .template(shooter_safehouse, self.zombie.as_ref())?,
            )),
        }
    }

    /// Check everything that does not depend on randomness.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stage = self.stage.bounds()?;
        ConfigError::require_positive("player radius", self.player.radius)?;
        ConfigError::require_non_negative("player speed", self.player.speed)?;
        HitPoints::from_signed(self.player.hit_points)?;
        RoundTimer::new(self.round_length_seconds)?;
        if let Some(weapon) = &self.weapon {
            weapon.player_weapon()?;
        }
        for area in self.player_area.iter().chain(&self.target_area).chain(&self.walls) {
            area.radius()?;
        }
        if let Some(generator) = &self.wall_generator {
            ConfigError::require_positive("wall radius", generator.wall_radius)?;
            ConfigError::require_positive("wall cell size", generator.cell_size)?;
            if generator.seed_count == 0 {
                return Err(ConfigError::NotPositive {
                    field: "wall seed count",
                    value: 0.0,
                });
            }
            ConfigError::require_in_range("wall density", generator.wall_density, 0.0, 1.0)?;
        }
        let center = stage.center();
        for spawner in &self.spawners {
            spawner.behaviour()?;
            self.template_for(spawner.object_type()?, center, center)?;
            ConfigError::require_positive("spawner cooldown", spawner.cooldown_seconds)?;
            if spawner.batch_size == 0 {
                return Err(ConfigError::NotPositive {
                    field: "spawner batch size",
                    value: 0.0,
                });
            }
        }
        if let Some(boss) = &self.boss {
            boss.template(self.zombie.as_ref())?;
        }
        for bomb in &self.bombs {
            bomb.bomb()?;
        }
        self.goal()?;
        Ok(())
    }
}
