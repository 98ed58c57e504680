//! The player-controlled actor.

use crate::combat::{Damage, HitPoints};
use crate::entity::Projectile;
use crate::math::{Bounds, Direction, Radius, Vec2};
use crate::physics::{self, Circle};
use crate::time::DeltaTime;
use crate::weapon::PlayerWeapon;

/// Distance from the player at which a full-magnitude polar aim lands.
pub const AIM_RADIUS: f32 = 200.0;

/// The player.
#[derive(Debug, Clone)]
pub struct Player {
    position: Vec2,
    last_position: Vec2,
    radius: Radius,
    heading: Option<Direction>,
    speed: f32,
    rotation: Direction,
    hit_points: HitPoints,
    max_hit_points: HitPoints,
    weapon: Option<PlayerWeapon>,
    ammo_stock: u32,
}

impl Player {
    /// Create a standing player facing +x.
    #[must_use]
    pub const fn new(position: Vec2, radius: Radius, max_hit_points: HitPoints) -> Self {
        Self {
            position,
            last_position: position,
            radius,
            heading: None,
            speed: 0.0,
            rotation: Direction::RIGHT,
            hit_points: max_hit_points,
            max_hit_points,
            weapon: None,
            ammo_stock: 0,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Position before the last movement.
    #[must_use]
    pub const fn last_position(&self) -> Vec2 {
        self.last_position
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> Radius {
        self.radius
    }

    /// Collision circle.
    #[must_use]
    pub const fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius.get())
    }

    /// Facing.
    #[must_use]
    pub const fn rotation(&self) -> Direction {
        self.rotation
    }

    /// Hit points.
    #[must_use]
    pub const fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max_hit_points(&self) -> HitPoints {
        self.max_hit_points
    }

    /// Dead iff hit points are zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hit_points.is_zero()
    }

    /// Equipped weapon.
    #[must_use]
    pub const fn weapon(&self) -> Option<&PlayerWeapon> {
        self.weapon.as_ref()
    }

    /// Reserve ammunition outside the magazine.
    #[must_use]
    pub const fn ammo_stock(&self) -> u32 {
        self.ammo_stock
    }

    /// Equip a weapon; the reserve is refilled to one magazine.
    pub fn set_weapon(&mut self, weapon: PlayerWeapon) {
        self.ammo_stock = weapon.max_ammo();
        self.weapon = Some(weapon);
    }

    /// Set movement intent. `None` stops the player.
    pub const fn set_movement(&mut self, heading: Option<Direction>, speed: f32) {
        self.heading = heading;
        self.speed = speed;
    }

    /// Face `direction`.
    pub const fn face(&mut self, direction: Direction) {
        self.rotation = direction;
    }

    /// Tick the weapon and integrate movement, clamped to the stage.
    pub fn tick(&mut self, dt: DeltaTime, stage: &Bounds) {
        if let Some(weapon) = self.weapon.as_mut() {
            weapon.tick(dt);
        }
        self.last_position = self.position;
        if let Some(heading) = self.heading {
            if self.speed > 0.0 {
                self.position = physics::advance(self.position, heading, self.speed, dt, stage);
            }
        }
    }

    /// Push out of every overlapping wall, keeping tangential motion, and
    /// stay on the stage.
    pub fn slide_along(&mut self, walls: impl IntoIterator<Item = Circle>, stage: &Bounds) {
        self.position = stage.clamp(physics::slide_out(self.circle(), walls));
    }

    /// Undo the last movement.
    pub const fn revert_last_movement(&mut self) {
        self.position = self.last_position;
    }

    /// Apply damage, saturating at zero.
    pub const fn take_damage(&mut self, damage: Damage) {
        self.hit_points = self.hit_points.take(damage);
    }

    /// Heal, capped at max. No effect at full health.
    pub fn heal(&mut self, amount: u32) {
        self.hit_points = self.hit_points.heal(amount, self.max_hit_points);
    }

    /// Drop to zero hit points.
    pub const fn die(&mut self) {
        self.hit_points = HitPoints::new(0);
    }

    /// Restore full health at `position`.
    pub const fn respawn(&mut self, position: Vec2) {
        self.position = position;
        self.last_position = position;
        self.hit_points = self.max_hit_points;
    }

    /// Add reserve ammunition while the reserve is below one magazine.
    pub fn add_ammo(&mut self, amount: u32) {
        let Some(weapon) = self.weapon.as_ref() else {
            return;
        };
        if amount > 0 && self.ammo_stock < weapon.max_ammo() {
            self.ammo_stock = (self.ammo_stock + amount).min(weapon.max_ammo());
        }
    }

    /// Move reserve rounds into the magazine.
    pub fn reload(&mut self) {
        if let Some(weapon) = self.weapon.as_mut() {
            let moved = weapon.reload(self.ammo_stock);
            self.ammo_stock -= moved;
        }
    }

    /// Fire if the trigger state and weapon allow it.
    pub fn try_fire(&mut self, pressed: bool, held: bool) -> Option<Vec<Projectile>> {
        let weapon = self.weapon.as_mut()?;
        if !weapon.wants_fire(pressed, held) {
            return None;
        }
        weapon.try_fire(self.position, self.rotation)
    }
}
