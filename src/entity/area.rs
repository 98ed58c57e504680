//! The player's base and the level exit.

use crate::entity::{EntityId, EntityKind, NonPlayerEntity, Player, Projectile, ProjectileOwner};
use crate::math::{Radius, Vec2};
use crate::physics::Circle;

/// Heal-per-tick inside the player area and for a boss at the exit.
const AREA_HEAL: u32 = 1;

/// What the player area did this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerAreaOutcome {
    /// The player was dead and came back.
    pub respawned: bool,
    /// Healthy entities that reached safety and left the world.
    pub saved: Vec<EntityId>,
}

/// The player's base: respawn point, healing, and Healthy safehouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerArea {
    position: Vec2,
    radius: Radius,
    respawns: u32,
}

impl PlayerArea {
    /// Create an area.
    #[must_use]
    pub const fn new(position: Vec2, radius: Radius) -> Self {
        Self {
            position,
            radius,
            respawns: 0,
        }
    }

    /// Center.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> Radius {
        self.radius
    }

    /// Times the player has respawned here.
    #[must_use]
    pub const fn respawns(&self) -> u32 {
        self.respawns
    }

    fn shape(&self) -> Circle {
        Circle::new(self.position, self.radius.get())
    }

    /// Apply the area's effects for one tick.
    ///
    /// Non-infected Healthy inside are removed from `npcs` and reported as
    /// saved. Other entities inside are pushed back out.
    pub fn tick(
        &mut self,
        player: &mut Player,
        npcs: &mut Vec<NonPlayerEntity>,
        projectiles: &mut [Projectile],
    ) -> PlayerAreaOutcome {
        let shape = self.shape();
        let mut outcome = PlayerAreaOutcome::default();

        if player.is_dead() {
            player.respawn(self.position);
            self.respawns += 1;
            outcome.respawned = true;
        }

        if shape.contains(player.position()) {
            player.heal(AREA_HEAL);
            player.add_ammo(1);
        }

        for projectile in projectiles.iter_mut() {
            if shape.contains(projectile.position()) {
                projectile.expire();
            }
        }

        npcs.retain(|npc| {
            let saved = npc.kind() == EntityKind::Healthy
                && !npc.is_dead()
                && shape.contains(npc.position());
            if saved {
                outcome.saved.push(npc.id());
            }
            !saved
        });

        for npc in npcs.iter_mut() {
            if shape.contains(npc.position()) {
                npc.revert_last_movement();
            }
        }

        outcome
    }
}

/// The level exit, closed until the goal is met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetArea {
    position: Vec2,
    radius: Radius,
    open: bool,
}

impl TargetArea {
    /// Create a closed exit.
    #[must_use]
    pub const fn new(position: Vec2, radius: Radius) -> Self {
        Self {
            position,
            radius,
            open: false,
        }
    }

    /// Center.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> Radius {
        self.radius
    }

    /// Whether the player may enter.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Let the player in.
    pub const fn open_to_player(&mut self) {
        self.open = true;
    }

    /// Apply the area's effects for one tick. Returns `true` when the
    /// living player stands inside the open exit.
    pub fn tick(
        &mut self,
        player: &mut Player,
        npcs: &mut [NonPlayerEntity],
        projectiles: &mut [Projectile],
    ) -> bool {
        let shape = Circle::new(self.position, self.radius.get());

        if !self.open && shape.contains(player.position()) {
            player.revert_last_movement();
        }
        let reached = self.open && !player.is_dead() && shape.contains(player.position());

        for projectile in projectiles.iter_mut() {
            if projectile.owner() != ProjectileOwner::Enemy && shape.contains(projectile.position()) {
                projectile.expire();
            }
        }

        for npc in npcs.iter_mut() {
            if npc.kind() == EntityKind::Boss && shape.contains(npc.position()) {
                npc.heal(AREA_HEAL);
            }
        }

        reached
    }
}
