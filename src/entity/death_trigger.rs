//! Side effects fired when an entity dies.

use std::f32::consts::TAU;

use crate::entity::EntityTemplate;
use crate::math::Vec2;

/// Entities requested by a death trigger, not yet materialized.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    /// Where each new entity appears.
    pub positions: Vec<Vec2>,
    /// What to build at each position.
    pub template: EntityTemplate,
}

/// Spawns `count` entities evenly on a circle around the death point.
#[derive(Debug, Clone)]
pub struct DeathTrigger {
    count: u32,
    radius: f32,
    template: Box<EntityTemplate>,
}

impl DeathTrigger {
    /// Create a trigger.
    #[must_use]
    pub fn new(count: u32, radius: f32, template: EntityTemplate) -> Self {
        Self {
            count,
            radius,
            template: Box::new(template),
        }
    }

    /// Number of entities spawned.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Build the spawn request for a death at `origin`.
    #[must_use]
    pub fn fire(&self, origin: Vec2) -> SpawnRequest {
        #[allow(clippy::cast_precision_loss)]
        let positions = (0..self.count)
            .map(|i| {
                let angle = TAU * i as f32 / self.count as f32;
                origin + Vec2::from_angle(angle) * self.radius
            })
            .collect();
        SpawnRequest {
            positions,
            template: (*self.template).clone(),
        }
    }
}
