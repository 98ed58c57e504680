//! A single representation for every AI-driven entity kind.

use std::f32::consts::PI;

use crate::behavior::{Behavior, EntityContext, EntityView};
use crate::combat::{Damage, HitPoints};
use crate::entity::{DeathTrigger, EntityId, EntityKind, Projectile, SpawnRequest};
use crate::math::{Direction, Radius, Vec2};
use crate::physics::{self, Circle};
use crate::weapon::Weapon;

/// How an entity's facing changes each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationPolicy {
    /// Turn at a constant rate.
    Spin {
        /// Angular speed.
        radians_per_second: f32,
    },
    /// Always look at the player.
    FacePlayer,
    /// Never turn.
    Fixed,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self::Spin {
            radians_per_second: PI,
        }
    }
}

/// Something an entity did during its update that the session must act on.
#[derive(Debug)]
pub enum NpcEvent {
    /// Projectiles to add to the world.
    Fired(Vec<Projectile>),
    /// A Healthy touched a Zombie and turned.
    Infected,
    /// The death trigger asks for new entities.
    SpawnRequested(SpawnRequest),
}

/// A non-player entity: kind tag, injected behavior, optional weapon and
/// optional death trigger.
#[derive(Debug)]
pub struct NonPlayerEntity {
    id: EntityId,
    kind: EntityKind,
    position: Vec2,
    last_position: Vec2,
    rotation: Direction,
    radius: Radius,
    hit_points: HitPoints,
    max_hit_points: HitPoints,
    behavior: Box<dyn Behavior>,
    infected_behavior: Option<Box<dyn Behavior>>,
    weapon: Option<Weapon>,
    death_trigger: Option<DeathTrigger>,
    rotation_policy: RotationPolicy,
    death_handled: bool,
}

impl NonPlayerEntity {
    /// Create an entity with a spinning facing and no weapon.
    #[must_use]
    pub fn new(
        id: EntityId,
        kind: EntityKind,
        position: Vec2,
        radius: Radius,
        hit_points: HitPoints,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            last_position: position,
            rotation: Direction::RIGHT,
            radius,
            hit_points,
            max_hit_points: hit_points,
            behavior,
            infected_behavior: None,
            weapon: None,
            death_trigger: None,
            rotation_policy: RotationPolicy::default(),
            death_handled: false,
        }
    }

    /// Arm the entity.
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Attach a death trigger.
    #[must_use]
    pub fn with_death_trigger(mut self, trigger: DeathTrigger) -> Self {
        self.death_trigger = Some(trigger);
        self
    }

    /// Replace the rotation policy.
    #[must_use]
    pub fn with_rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.rotation_policy = policy;
        self
    }

    /// Behavior to switch to on infection.
    #[must_use]
    pub fn with_infected_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.infected_behavior = Some(behavior);
        self
    }

    /// Id.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Position before the last movement.
    #[must_use]
    pub const fn last_position(&self) -> Vec2 {
        self.last_position
    }

    /// Facing.
    #[must_use]
    pub const fn rotation(&self) -> Direction {
        self.rotation
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> Radius {
        self.radius
    }

    /// Hit points.
    #[must_use]
    pub const fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    /// Dead iff hit points are zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hit_points.is_zero()
    }

    /// Whether touching the player hurts it.
    #[must_use]
    pub const fn deals_contact_damage(&self) -> bool {
        !self.kind.is_passive()
    }

    /// Collision circle.
    #[must_use]
    pub const fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius.get())
    }

    /// Summary used by other entities' contexts.
    #[must_use]
    pub const fn view(&self) -> EntityView {
        EntityView {
            id: self.id,
            kind: self.kind,
            position: self.position,
            radius: self.radius.get(),
            alive: !self.is_dead(),
        }
    }

    /// Apply damage, saturating at zero.
    pub const fn take_damage(&mut self, damage: Damage) {
        self.hit_points = self.hit_points.take(damage);
    }

    /// Heal up to the spawn value.
    pub fn heal(&mut self, amount: u32) {
        self.hit_points = self.hit_points.heal(amount, self.max_hit_points);
    }

    /// Drop to zero hit points.
    pub const fn die(&mut self) {
        self.hit_points = HitPoints::new(0);
    }

    /// Undo the last movement.
    pub const fn revert_last_movement(&mut self) {
        self.position = self.last_position;
    }

    /// Teleport to `position`. A later revert returns here.
    pub const fn place(&mut self, position: Vec2) {
        self.position = position;
        self.last_position = position;
    }

    /// Run one decision step: move, resolve sibling overlap, turn, and
    /// possibly fire. Returns what happened for the session to apply.
    pub fn update(&mut self, ctx: &EntityContext<'_>) -> Vec<NpcEvent> {
        let mut events = Vec::new();

        if let Some(movement) = self.behavior.decide_movement(ctx) {
            let next = physics::advance(
                self.position,
                movement.direction,
                movement.speed,
                ctx.delta_time,
                &ctx.stage,
            );
            let next = self.resolve_overlaps(next, ctx, &mut events);
            self.last_position = self.position;
            self.position = ctx.stage.clamp(next);
        }

        self.update_rotation(ctx);

        if let Some(weapon) = self.weapon.as_mut() {
            weapon.tick(ctx.delta_time);
            if self.behavior.decide_action(ctx) {
                if let Some(projectiles) = weapon.try_fire(self.position, self.rotation) {
                    if !projectiles.is_empty() {
                        events.push(NpcEvent::Fired(projectiles));
                    }
                }
            }
        }

        events
    }

    /// Fire the death trigger the first time this is called on a dead
    /// entity.
    pub fn on_death(&mut self) -> Option<NpcEvent> {
        if !self.is_dead() || self.death_handled {
            return None;
        }
        self.death_handled = true;
        self.death_trigger
            .as_ref()
            .map(|trigger| NpcEvent::SpawnRequested(trigger.fire(self.position)))
    }

    fn resolve_overlaps(
        &mut self,
        mut next: Vec2,
        ctx: &EntityContext<'_>,
        events: &mut Vec<NpcEvent>,
    ) -> Vec2 {
        for other in ctx.others() {
            let moving = Circle::new(next, self.radius.get());
            let obstacle = Circle::new(other.position, other.radius);
            if self.kind == EntityKind::Healthy
                && other.kind == EntityKind::Zombie
                && physics::intersects(moving, obstacle)
            {
                self.become_infected();
                events.push(NpcEvent::Infected);
                continue;
            }
            if let Some(pushed) = physics::push_out(moving, obstacle, self.rotation) {
                next = pushed;
            }
        }
        next
    }

    fn become_infected(&mut self) {
        self.kind = EntityKind::Infected;
        if let Some(behavior) = self.infected_behavior.take() {
            self.behavior = behavior;
        }
    }

    fn update_rotation(&mut self, ctx: &EntityContext<'_>) {
        match self.rotation_policy {
            RotationPolicy::Spin { radians_per_second } => {
                self.rotation = self
                    .rotation
                    .rotated(radians_per_second * ctx.delta_time.seconds());
            }
            RotationPolicy::FacePlayer => {
                if let Some(direction) = Direction::between(self.position, ctx.player_position) {
                    self.rotation = direction;
                }
            }
            RotationPolicy::Fixed => {}
        }
    }
}
