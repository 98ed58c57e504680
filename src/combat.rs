//! Hit points, damage and the bomb panic button.

use serde::Serialize;

use crate::error::ConfigError;
use crate::time::{Cooldown, DeltaTime};

/// Amount of hit points removed by one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Damage(u32);

impl Damage {
    /// Damage of `amount` points.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Validate a signed amount from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Negative`] for negative amounts.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_signed(amount: i64) -> Result<Self, ConfigError> {
        u32::try_from(amount)
            .map(Self)
            .map_err(|_| ConfigError::Negative {
                field: "damage",
                value: amount as f64,
            })
    }

    /// Points of damage.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.0
    }
}

/// Non-negative hit points. An entity is dead exactly when this is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct HitPoints(u32);

impl HitPoints {
    /// Hit points of `value`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Validate a signed value from configuration; zero is rejected because
    /// a spawned entity must start alive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] for values below one.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_signed(value: i64) -> Result<Self, ConfigError> {
        match u32::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v)),
            _ => Err(ConfigError::NotPositive {
                field: "hit points",
                value: value as f64,
            }),
        }
    }

    /// Current value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether the value is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtract damage, saturating at zero.
    #[must_use]
    pub const fn take(self, damage: Damage) -> Self {
        Self(self.0.saturating_sub(damage.0))
    }

    /// Add `amount`, not exceeding `max`.
    #[must_use]
    pub fn heal(self, amount: u32, max: Self) -> Self {
        Self(self.0.saturating_add(amount).min(max.0.max(self.0)))
    }
}

/// A single-use screen-clearing bomb.
///
/// Detonation kills everything; the cooldown then holds the world still
/// until it elapses.
#[derive(Debug, Clone, PartialEq)]
pub struct Bomb {
    identifier: String,
    cooldown: Cooldown,
}

impl Bomb {
    /// Default identifier.
    pub const DEFAULT_IDENTIFIER: &'static str = "A-Bomb";
    /// Default suspension length in seconds.
    pub const DEFAULT_COOLDOWN: f32 = 2.0;

    /// Create a bomb.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] unless `cooldown_seconds > 0`.
    pub fn new(identifier: impl Into<String>, cooldown_seconds: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            identifier: identifier.into(),
            cooldown: Cooldown::new(cooldown_seconds)?,
        })
    }

    /// Name shown on the HUD.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Arm the suspension countdown.
    pub const fn detonate(&mut self) {
        self.cooldown.start();
    }

    /// Count the suspension down.
    pub fn tick(&mut self, dt: DeltaTime) {
        self.cooldown.tick(dt);
    }

    /// Whether the suspension has elapsed.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.cooldown.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_saturates() {
        let hp = HitPoints::new(3).take(Damage::new(10));
        assert!(hp.is_zero());
        assert_eq!(HitPoints::new(10).take(Damage::new(4)).value(), 6);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let max = HitPoints::new(10);
        assert_eq!(HitPoints::new(9).heal(5, max).value(), 10);
        assert_eq!(HitPoints::new(3).heal(1, max).value(), 4);
    }

    #[test]
    fn test_from_signed_rejects_negative() {
        assert!(HitPoints::from_signed(-1).is_err());
        assert!(HitPoints::from_signed(0).is_err());
        assert!(Damage::from_signed(-3).is_err());
        assert_eq!(Damage::from_signed(0).unwrap().amount(), 0);
    }

    #[test]
    fn test_bomb_cycle() {
        let mut bomb = Bomb::new(Bomb::DEFAULT_IDENTIFIER, 1.0).unwrap();
        assert!(bomb.is_spent());
        bomb.detonate();
        assert!(!bomb.is_spent());
        bomb.tick(DeltaTime::new(1.0).unwrap());
        assert!(bomb.is_spent());
    }
}
