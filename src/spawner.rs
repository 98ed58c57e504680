//! Cooldown-gated entity spawners that release their output in batches.

use std::fmt;
use std::str::FromStr;

use crate::entity::{EntityId, EntityIds, EntityTemplate, NonPlayerEntity};
use crate::error::ConfigError;
use crate::math::Vec2;
use crate::time::DeltaTime;

/// Slack on the cooldown comparison so accumulated float error does not
/// delay a spawn by a whole tick.
const READY_TOLERANCE: f32 = 1e-4;

/// Where a spawner places its entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerBehaviour {
    /// Always at the spawner's own position.
    FixedPosition,
}

impl FromStr for SpawnerBehaviour {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "fixedposition" => Ok(Self::FixedPosition),
            _ => Err(ConfigError::InvalidSpawnerBehaviour(s.to_string())),
        }
    }
}

/// Builds one entity given its id and position.
pub type EntityFactory = Box<dyn Fn(EntityId, Vec2) -> NonPlayerEntity>;

/// A fixed-position spawner.
///
/// Produces one entity per elapsed cooldown and holds them back until
/// `batch_size` are ready, then hands them all over at once.
pub struct Spawner {
    position: Vec2,
    behaviour: SpawnerBehaviour,
    cooldown: f32,
    elapsed: f32,
    batch_size: usize,
    buffer: Vec<NonPlayerEntity>,
    factory: EntityFactory,
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("position", &self.position)
            .field("behaviour", &self.behaviour)
            .field("cooldown", &self.cooldown)
            .field("elapsed", &self.elapsed)
            .field("batch_size", &self.batch_size)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl Spawner {
    /// Create a spawner around an arbitrary factory.
    ///
    /// # Errors
    ///
    /// Fails when `cooldown` is not positive or `batch_size` is zero.
    pub fn new(
        position: Vec2,
        cooldown: f32,
        batch_size: usize,
        factory: EntityFactory,
    ) -> Result<Self, ConfigError> {
        let cooldown = ConfigError::require_positive("spawner cooldown", cooldown)?;
        if batch_size == 0 {
            return Err(ConfigError::NotPositive {
                field: "spawner batch size",
                value: 0.0,
            });
        }
        Ok(Self {
            position,
            behaviour: SpawnerBehaviour::FixedPosition,
            cooldown,
            elapsed: 0.0,
            batch_size,
            buffer: Vec::new(),
            factory,
        })
    }

    /// Create a spawner that stamps out copies of `template`.
    ///
    /// # Errors
    ///
    /// See [`Spawner::new`].
    pub fn from_template(
        position: Vec2,
        cooldown: f32,
        batch_size: usize,
        template: EntityTemplate,
    ) -> Result<Self, ConfigError> {
        Self::new(
            position,
            cooldown,
            batch_size,
            Box::new(move |id, at| template.spawn(id, at)),
        )
    }

    /// Spawn position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Placement behaviour.
    #[must_use]
    pub const fn behaviour(&self) -> SpawnerBehaviour {
        self.behaviour
    }

    /// Seconds between spawns.
    #[must_use]
    pub const fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Entities released together.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Entities produced but not yet released.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Advance the spawner. Returns a full batch when one is ready.
    ///
    /// Nothing happens at all, not even time accumulation, while
    /// `population` has reached `cap`.
    pub fn tick(
        &mut self,
        dt: DeltaTime,
        population: usize,
        cap: usize,
        ids: &mut EntityIds,
    ) -> Option<Vec<NonPlayerEntity>> {
        if population >= cap {
            return None;
        }

        self.elapsed += dt.seconds();
        if self.elapsed + READY_TOLERANCE < self.cooldown {
            return None;
        }
        self.elapsed = (self.elapsed - self.cooldown).max(0.0);

        let entity = (self.factory)(ids.allocate(), self.position);
        self.buffer.push(entity);

        if self.buffer.len() < self.batch_size {
            return None;
        }
        log::debug!(
            "spawner at ({:.1}, {:.1}) released {} entities",
            self.position.x,
            self.position.y,
            self.buffer.len()
        );
        Some(std::mem::take(&mut self.buffer))
    }
}
