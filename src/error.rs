//! Error types for level construction and session execution.

use thiserror::Error;

/// A level configuration value that cannot be turned into a valid session.
///
/// Every variant is raised before any entity exists: construction either
/// succeeds completely or fails with one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value that must not be negative was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A value fell outside its allowed range.
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// A sub-configuration required by an enabled feature is absent.
    #[error("missing required configuration: {0}")]
    Missing(String),
    /// A goal comparison operator string was not recognised.
    #[error("unsupported comparison operator `{0}` (expected one of >=, >, <=, <, ==, !=)")]
    UnsupportedOperator(String),
    /// A goal counter name was not recognised.
    #[error("unknown goal counter `{0}`")]
    UnknownCounter(String),
    /// A spawner named an entity type that does not exist.
    #[error("invalid spawn object type `{0}` (expected zombie, healthy or shooter)")]
    InvalidSpawnObjectType(String),
    /// A spawner named a behaviour that does not exist.
    #[error("invalid spawner behaviour type `{0}` (expected fixed_position)")]
    InvalidSpawnerBehaviour(String),
    /// A weapon fire mode string was not recognised.
    #[error("invalid fire mode `{0}` (expected automatic or semi_automatic)")]
    InvalidFireMode(String),
    /// Stage bounds are empty or inverted.
    #[error("invalid bounds: left={left} top={top} right={right} bottom={bottom}")]
    InvalidBounds {
        /// Left edge.
        left: f32,
        /// Top edge.
        top: f32,
        /// Right edge.
        right: f32,
        /// Bottom edge.
        bottom: f32,
    },
}

impl ConfigError {
    /// Check that `value` is strictly positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] otherwise.
    pub fn require_positive(field: &'static str, value: f32) -> Result<f32, Self> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NotPositive {
                field,
                value: f64::from(value),
            })
        }
    }

    /// Check that `value` is finite and not negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Negative`] otherwise.
    pub fn require_non_negative(field: &'static str, value: f32) -> Result<f32, Self> {
        if value >= 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(Self::Negative {
                field,
                value: f64::from(value),
            })
        }
    }
}

impl ConfigError {
    /// Check that `value` lies in `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] otherwise, NaN included.
    pub fn require_in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, Self> {
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(Self::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}

/// Failure while building or advancing a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The level configuration is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// More spawners were requested than open wall anchors exist.
    #[error("no available spawner positions left: {requested} requested, {available} available")]
    SpawnerPositionsExhausted {
        /// Spawners that needed a position.
        requested: usize,
        /// Anchor positions the level generated.
        available: usize,
    },
    /// The non-player population would exceed the hard cap.
    #[error("population overrun: {population} entities exceeds cap of {cap}")]
    Overrun {
        /// Population the tick tried to reach.
        population: usize,
        /// Configured cap.
        cap: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(ConfigError::require_positive("radius", 1.5).is_ok());
        assert!(ConfigError::require_positive("radius", 0.0).is_err());
        assert!(ConfigError::require_positive("radius", f32::NAN).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(ConfigError::require_non_negative("cooldown", 0.0).is_ok());
        let err = ConfigError::require_non_negative("cooldown", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "cooldown must not be negative, got -1");
    }

    #[test]
    fn test_require_in_range() {
        assert!(ConfigError::require_in_range("wall density", 1.0, 0.0, 1.0).is_ok());
        assert!(ConfigError::require_in_range("wall density", f64::NAN, 0.0, 1.0).is_err());
        let err = ConfigError::require_in_range("wall density", 1.5, 0.0, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "wall density must be within 0..=1, got 1.5");
    }

    #[test]
    fn test_session_error_wraps_config() {
        let err: SessionError = ConfigError::Missing("shooter.weapon".into()).into();
        assert_eq!(
            err.to_string(),
            "missing required configuration: shooter.weapon"
        );
    }

    #[test]
    fn test_overrun_display() {
        let err = SessionError::Overrun {
            population: 670,
            cap: 666,
        };
        assert!(err.to_string().contains("670"));
    }
}
