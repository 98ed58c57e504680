//! Weapons: cooldown-gated fire patterns and the ammo-fed player weapon.

use std::str::FromStr;

use crate::combat::Damage;
use crate::entity::{Projectile, ProjectileOwner};
use crate::error::ConfigError;
use crate::math::{Direction, Vec2};
use crate::time::{Cooldown, DeltaTime};

/// Projectile lifetime used when a level does not specify one.
pub const DEFAULT_PROJECTILE_LIFETIME: f32 = 1.5;

/// Parameters of one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    damage: Damage,
    speed: f32,
    radius: f32,
    lifetime: f32,
}

impl ShotSpec {
    /// Validate projectile parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] when speed, radius or lifetime is
    /// not strictly positive.
    pub fn new(damage: Damage, speed: f32, radius: f32, lifetime: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            damage,
            speed: ConfigError::require_positive("projectile speed", speed)?,
            radius: ConfigError::require_positive("projectile radius", radius)?,
            lifetime: ConfigError::require_positive("projectile lifetime", lifetime)?,
        })
    }

    fn launch(&self, origin: Vec2, direction: Direction, owner: ProjectileOwner) -> Projectile {
        Projectile::launched(
            origin,
            direction,
            self.speed,
            self.radius,
            self.damage,
            self.lifetime,
            owner,
        )
    }
}

/// How a weapon turns one trigger pull into projectiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FirePattern {
    /// Produces nothing.
    NoFire,
    /// One projectile along the facing.
    SingleShot(ShotSpec),
    /// `count` projectiles fanned evenly across `arc` radians.
    Spread {
        /// Projectile parameters.
        shot: ShotSpec,
        /// Number of projectiles.
        count: u32,
        /// Total fan width in radians.
        arc: f32,
    },
}

impl FirePattern {
    /// Produce this pattern's projectiles.
    #[must_use]
    pub fn fire(&self, origin: Vec2, facing: Direction, owner: ProjectileOwner) -> Vec<Projectile> {
        match *self {
            Self::NoFire => Vec::new(),
            Self::SingleShot(shot) => vec![shot.launch(origin, facing, owner)],
            Self::Spread { shot, count, arc } => {
                if count <= 1 {
                    return vec![shot.launch(origin, facing, owner)];
                }
                #[allow(clippy::cast_precision_loss)]
                let step = arc / (count - 1) as f32;
                (0..count)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let offset = (-arc).mul_add(0.5, step * i as f32);
                        shot.launch(origin, facing.rotated(offset), owner)
                    })
                    .collect()
            }
        }
    }
}

/// A fire pattern behind a cooldown, stamped with an owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pattern: FirePattern,
    cooldown: Cooldown,
    owner: ProjectileOwner,
}

impl Weapon {
    /// Create a weapon.
    #[must_use]
    pub const fn new(pattern: FirePattern, cooldown: Cooldown, owner: ProjectileOwner) -> Self {
        Self {
            pattern,
            cooldown,
            owner,
        }
    }

    /// Weapon that can fire `rate_per_second` times per second.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] unless the rate is positive.
    pub fn with_rate(
        pattern: FirePattern,
        rate_per_second: f32,
        owner: ProjectileOwner,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(pattern, Cooldown::from_rate(rate_per_second)?, owner))
    }

    /// Owner tag stamped on projectiles.
    #[must_use]
    pub const fn owner(&self) -> ProjectileOwner {
        self.owner
    }

    /// Whether the next `try_fire` can succeed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown.is_ready()
    }

    /// Count the cooldown down.
    pub fn tick(&mut self, dt: DeltaTime) {
        self.cooldown.tick(dt);
    }

    /// Fire if the cooldown allows; `None` otherwise.
    pub fn try_fire(&mut self, origin: Vec2, facing: Direction) -> Option<Vec<Projectile>> {
        if !self.cooldown.consume_if_ready() {
            return None;
        }
        Some(self.pattern.fire(origin, facing, self.owner))
    }
}

/// Trigger behaviour of a player weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    /// Fires every frame the trigger is held.
    Automatic,
    /// Fires once per trigger press.
    SemiAutomatic,
}

impl FromStr for FireMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "automatic" | "auto" => Ok(Self::Automatic),
            "semiautomatic" | "semi" => Ok(Self::SemiAutomatic),
            _ => Err(ConfigError::InvalidFireMode(s.to_string())),
        }
    }
}

/// A named weapon with a magazine.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWeapon {
    name: String,
    weapon: Weapon,
    mode: FireMode,
    current_ammo: u32,
    max_ammo: u32,
}

impl PlayerWeapon {
    /// Create a weapon with a full magazine.
    #[must_use]
    pub fn new(name: impl Into<String>, weapon: Weapon, mode: FireMode, max_ammo: u32) -> Self {
        Self {
            name: name.into(),
            weapon,
            mode,
            current_ammo: max_ammo,
            max_ammo,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trigger mode.
    #[must_use]
    pub const fn mode(&self) -> FireMode {
        self.mode
    }

    /// Rounds in the magazine.
    #[must_use]
    pub const fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    /// Magazine size.
    #[must_use]
    pub const fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    /// Whether this trigger state should attempt a shot.
    #[must_use]
    pub const fn wants_fire(&self, pressed: bool, held: bool) -> bool {
        match self.mode {
            FireMode::Automatic => held,
            FireMode::SemiAutomatic => pressed,
        }
    }

    /// Count the cooldown down.
    pub fn tick(&mut self, dt: DeltaTime) {
        self.weapon.tick(dt);
    }

    /// Fire one round. Refused with an empty magazine regardless of the
    /// cooldown.
    pub fn try_fire(&mut self, origin: Vec2, facing: Direction) -> Option<Vec<Projectile>> {
        if self.current_ammo == 0 {
            return None;
        }
        let projectiles = self.weapon.try_fire(origin, facing)?;
        self.current_ammo -= 1;
        Some(projectiles)
    }

    /// Refill from `stock`; returns how many rounds were moved.
    pub fn reload(&mut self, stock: u32) -> u32 {
        let moved = (self.max_ammo - self.current_ammo).min(stock);
        self.current_ammo += moved;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot() -> ShotSpec {
        ShotSpec::new(Damage::new(2), 100.0, 2.0, DEFAULT_PROJECTILE_LIFETIME).unwrap()
    }

    fn dt(s: f32) -> DeltaTime {
        DeltaTime::new(s).unwrap()
    }

    #[test]
    fn test_shot_spec_validation() {
        assert!(ShotSpec::new(Damage::new(1), 0.0, 1.0, 1.0).is_err());
        assert!(ShotSpec::new(Damage::new(1), 1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_try_fire_respects_cooldown() {
        let mut weapon =
            Weapon::with_rate(FirePattern::SingleShot(shot()), 2.0, ProjectileOwner::Enemy).unwrap();
        let first = weapon.try_fire(Vec2::ZERO, Direction::RIGHT).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].owner(), ProjectileOwner::Enemy);
        assert!(weapon.try_fire(Vec2::ZERO, Direction::RIGHT).is_none());
        weapon.tick(dt(0.25));
        assert!(weapon.try_fire(Vec2::ZERO, Direction::RIGHT).is_none());
        weapon.tick(dt(0.25));
        assert!(weapon.try_fire(Vec2::ZERO, Direction::RIGHT).is_some());
        assert!(weapon.try_fire(Vec2::ZERO, Direction::RIGHT).is_none());
    }

    #[test]
    fn test_spread_fans_out() {
        let pattern = FirePattern::Spread {
            shot: shot(),
            count: 3,
            arc: std::f32::consts::FRAC_PI_2,
        };
        let projectiles = pattern.fire(Vec2::ZERO, Direction::RIGHT, ProjectileOwner::Player);
        assert_eq!(projectiles.len(), 3);
        assert!(projectiles[0].direction().vector().y < 0.0);
        assert!(projectiles[1].direction().vector().y.abs() < 1e-5);
        assert!(projectiles[2].direction().vector().y > 0.0);
    }

    #[test]
    fn test_no_fire_pattern() {
        assert!(FirePattern::NoFire
            .fire(Vec2::ZERO, Direction::RIGHT, ProjectileOwner::None)
            .is_empty());
    }

    #[test]
    fn test_player_weapon_refuses_when_empty() {
        let weapon =
            Weapon::with_rate(FirePattern::SingleShot(shot()), 100.0, ProjectileOwner::Player).unwrap();
        let mut gun = PlayerWeapon::new("Pistol", weapon, FireMode::SemiAutomatic, 1);
        assert!(gun.try_fire(Vec2::ZERO, Direction::RIGHT).is_some());
        assert_eq!(gun.current_ammo(), 0);
        gun.tick(dt(1.0));
        assert!(gun.try_fire(Vec2::ZERO, Direction::RIGHT).is_none());
    }

    #[test]
    fn test_reload_moves_minimum() {
        let weapon =
            Weapon::with_rate(FirePattern::SingleShot(shot()), 100.0, ProjectileOwner::Player).unwrap();
        let mut gun = PlayerWeapon::new("Rifle", weapon, FireMode::Automatic, 10);
        for _ in 0..4 {
            gun.tick(dt(1.0));
            gun.try_fire(Vec2::ZERO, Direction::RIGHT).unwrap();
        }
        assert_eq!(gun.reload(2), 2);
        assert_eq!(gun.current_ammo(), 8);
        assert_eq!(gun.reload(50), 2);
        assert_eq!(gun.current_ammo(), 10);
    }

    #[test]
    fn test_fire_mode_trigger_semantics() {
        let weapon =
            Weapon::with_rate(FirePattern::SingleShot(shot()), 1.0, ProjectileOwner::Player).unwrap();
        let auto = PlayerWeapon::new("Auto", weapon, FireMode::Automatic, 5);
        let semi = PlayerWeapon::new("Semi", weapon, FireMode::SemiAutomatic, 5);
        assert!(auto.wants_fire(false, true));
        assert!(!auto.wants_fire(true, false));
        assert!(semi.wants_fire(true, false));
        assert!(!semi.wants_fire(false, true));
    }

    #[test]
    fn test_fire_mode_parse() {
        assert_eq!("semi_automatic".parse::<FireMode>().unwrap(), FireMode::SemiAutomatic);
        assert_eq!("Automatic".parse::<FireMode>().unwrap(), FireMode::Automatic);
        assert!("burst".parse::<FireMode>().is_err());
    }
}
