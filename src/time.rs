//! Time primitives: frame delta, cooldowns and the round timer.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

/// Remaining time at or below this counts as elapsed.
const READY_TOLERANCE: f32 = 1e-6;

/// Largest value a [`RoundTimer`] can hold.
pub const MAX_ROUND_SECONDS: u32 = 999;

/// A strictly positive frame delta in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaTime(f32);

impl DeltaTime {
    /// Validate a frame delta.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] for zero, negative or non-finite values.
    pub fn new(seconds: f32) -> Result<Self, ConfigError> {
        ConfigError::require_positive("delta time", seconds).map(Self)
    }

    /// Seconds in this frame.
    #[must_use]
    pub const fn seconds(self) -> f32 {
        self.0
    }
}

/// A countdown that gates repeated actions.
///
/// A fresh cooldown is ready. [`start`](Self::start) arms it for one full
/// period; [`tick`](Self::tick) counts down and never goes below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    period: f32,
    remaining: f32,
}

impl Cooldown {
    /// Create a ready cooldown with the given period.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] unless `period > 0`.
    pub fn new(period: f32) -> Result<Self, ConfigError> {
        let period = ConfigError::require_positive("cooldown period", period)?;
        Ok(Self {
            period,
            remaining: 0.0,
        })
    }

    /// Cooldown for something that happens `rate` times per second.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] unless `rate > 0`.
    pub fn from_rate(rate: f32) -> Result<Self, ConfigError> {
        let rate = ConfigError::require_positive("rate per second", rate)?;
        Self::new(1.0 / rate)
    }

    /// Period in seconds.
    #[must_use]
    pub const fn period(&self) -> f32 {
        self.period
    }

    /// Seconds until ready.
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether the cooldown has elapsed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.remaining <= READY_TOLERANCE
    }

    /// Arm the cooldown for a full period.
    pub const fn start(&mut self) {
        self.remaining = self.period;
    }

    /// Count down by one frame.
    pub fn tick(&mut self, dt: DeltaTime) {
        self.remaining = (self.remaining - dt.seconds()).max(0.0);
    }

    /// If ready, restart and return `true`; otherwise return `false`.
    pub fn consume_if_ready(&mut self) -> bool {
        if self.is_ready() {
            self.start();
            true
        } else {
            false
        }
    }
}

/// Whole-second round countdown of at most [`MAX_ROUND_SECONDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundTimer {
    seconds: u32,
}

impl RoundTimer {
    /// Two minutes.
    pub const DEFAULT: Self = Self { seconds: 120 };

    /// Create a timer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] above [`MAX_ROUND_SECONDS`].
    pub fn new(seconds: u32) -> Result<Self, ConfigError> {
        if seconds > MAX_ROUND_SECONDS {
            return Err(ConfigError::OutOfRange {
                field: "round length seconds",
                value: f64::from(seconds),
                min: 0.0,
                max: f64::from(MAX_ROUND_SECONDS),
            });
        }
        Ok(Self { seconds })
    }

    /// Seconds left.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Count down by `seconds`, stopping at zero.
    pub const fn tick(&mut self, seconds: u32) {
        self.seconds = self.seconds.saturating_sub(seconds);
    }

    /// Whether the round is over.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.seconds == 0
    }
}

impl fmt::Display for RoundTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}s", self.seconds)
    }
}
