//! The stages of one tick, in order.

use crate::behavior::{EntityContext, EntityView};
use crate::combat::Damage;
use crate::entity::{
    EntityId, EntityKind, NonPlayerEntity, NpcEvent, Projectile, ProjectileOwner, SpawnRequest,
    Wall,
};
use crate::error::SessionError;
use crate::math::{Bounds, Direction};
use crate::physics::{self, Circle};
use crate::session::{DomainEvent, GameSession};
use crate::time::DeltaTime;

/// Damage an entity deals by touching the player.
const CONTACT_DAMAGE: Damage = Damage::new(1);

impl GameSession {
    pub(super) fn tick_bomb(&mut self, dt: DeltaTime) {
        match self.bombs.last_mut() {
            Some(bomb) => {
                bomb.tick(dt);
                if bomb.is_spent() {
                    self.bombs.pop();
                    self.bomb_active = false;
                }
            }
            None => self.bomb_active = false,
        }
    }

    /// Returns `false` when the round ran out this tick.
    pub(super) fn advance_timer(&mut self, dt: DeltaTime) -> bool {
        self.timer_accumulator += dt.seconds();
        while self.timer_accumulator >= 1.0 {
            self.timer_accumulator -= 1.0;
            self.timer.tick(1);
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
            if self.timer.is_expired() {
                self.time_up = true;
                log::info!("time is up after {} s", self.elapsed_seconds);
                self.events.push(DomainEvent::TimeIsUp);
                return false;
            }
            self.events.push(DomainEvent::TimerUpdated {
                remaining: self.timer.seconds(),
            });
        }
        true
    }

    pub(super) fn advance_player(&mut self, dt: DeltaTime) {
        if self.player.is_dead() {
            return;
        }
        self.player.tick(dt, &self.stage);
        self.player
            .slide_along(self.walls.iter().map(Wall::circle), &self.stage);
    }

    pub(super) fn advance_npcs(&mut self, dt: DeltaTime) {
        let mut views: Vec<EntityView> = self.npcs.iter().map(NonPlayerEntity::view).collect();
        let player_position = self.player.position();

        for index in 0..self.npcs.len() {
            let npc = &mut self.npcs[index];
            if npc.is_dead() {
                if let Some(event) = npc.on_death() {
                    let id = npc.id();
                    Self::record_npc_event(
                        id,
                        event,
                        &mut self.events,
                        &mut self.projectiles,
                        &mut self.pending_spawns,
                        &mut self.tally.infected,
                    );
                }
                continue;
            }

            let ctx = EntityContext {
                self_index: index,
                position: npc.position(),
                rotation: npc.rotation(),
                radius: npc.radius().get(),
                hit_points: npc.hit_points(),
                player_position,
                projectiles: &self.projectiles,
                siblings: &views,
                delta_time: dt,
                stage: self.stage,
            };
            let produced = npc.update(&ctx);

            let id = npc.id();
            for event in produced {
                Self::record_npc_event(
                    id,
                    event,
                    &mut self.events,
                    &mut self.projectiles,
                    &mut self.pending_spawns,
                    &mut self.tally.infected,
                );
            }

            let body = npc.circle();
            if self
                .walls
                .iter()
                .any(|wall| physics::intersects(body, wall.circle()))
            {
                let before = Circle::new(npc.last_position(), body.radius);
                if penetrates_wall(before, &self.walls) {
                    settle(npc, &self.walls, &self.stage);
                } else {
                    npc.revert_last_movement();
                }
            }

            if npc.deals_contact_damage()
                && !self.player.is_dead()
                && physics::intersects(npc.circle(), self.player.circle())
            {
                self.player.take_damage(CONTACT_DAMAGE);
            }

            views[index] = npc.view();
        }

        self.npcs.retain(|npc| !npc.is_dead());
    }

    fn record_npc_event(
        id: EntityId,
        event: NpcEvent,
        events: &mut Vec<DomainEvent>,
        projectiles: &mut Vec<Projectile>,
        pending_spawns: &mut Vec<SpawnRequest>,
        infected: &mut u32,
    ) {
        match event {
            NpcEvent::Fired(fired) => {
                events.push(DomainEvent::EnemyFired {
                    id,
                    projectiles: fired.len(),
                });
                projectiles.extend(fired);
            }
            NpcEvent::Infected => {
                *infected += 1;
                events.push(DomainEvent::HealthyInfected { id });
            }
            NpcEvent::SpawnRequested(request) => {
                events.push(DomainEvent::EntitySpawnRequested {
                    id,
                    kind: request.template.kind(),
                    count: request.positions.len(),
                });
                pending_spawns.push(request);
            }
        }
    }

    pub(super) fn advance_projectiles(&mut self, dt: DeltaTime) {
        let stage = self.stage;
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain_mut(|projectile| {
            projectile.tick(dt);
            if projectile.is_expired(&stage) {
                return false;
            }
            !self.resolve_projectile_hit(projectile)
        });
        self.projectiles = projectiles;
    }

    /// Returns `true` when the projectile was absorbed.
    fn resolve_projectile_hit(&mut self, projectile: &Projectile) -> bool {
        let body = projectile.circle();
        if self
            .walls
            .iter()
            .any(|wall| physics::intersects(body, wall.circle()))
        {
            return true;
        }
        match projectile.owner() {
            ProjectileOwner::Player => self.hit_npc(projectile),
            ProjectileOwner::Enemy => self.hit_player(projectile),
            ProjectileOwner::All => self.hit_npc(projectile) || self.hit_player(projectile),
            ProjectileOwner::None => false,
        }
    }

    fn hit_npc(&mut self, projectile: &Projectile) -> bool {
        let body = projectile.circle();
        let Some(npc) = self
            .npcs
            .iter_mut()
            .find(|npc| !npc.is_dead() && physics::intersects(body, npc.circle()))
        else {
            return false;
        };
        npc.take_damage(projectile.damage());
        if npc.is_dead() {
            if npc.kind() == EntityKind::Healthy {
                self.tally.casualties += 1;
            } else {
                self.tally.kills += 1;
            }
        }
        true
    }

    fn hit_player(&mut self, projectile: &Projectile) -> bool {
        if self.player.is_dead() || !physics::intersects(projectile.circle(), self.player.circle()) {
            return false;
        }
        self.player.take_damage(projectile.damage());
        true
    }

    pub(super) fn apply_areas(&mut self) {
        if let Some(area) = self.player_area.as_mut() {
            let outcome = area.tick(&mut self.player, &mut self.npcs, &mut self.projectiles);
            if outcome.respawned {
                self.tally.respawns += 1;
                self.events.push(DomainEvent::PlayerRespawned {
                    respawns: self.tally.respawns,
                });
            }
            for id in outcome.saved {
                self.tally.salvations += 1;
                self.events.push(DomainEvent::HealthySaved { id });
            }
        }

        if let Some(area) = self.target_area.as_mut() {
            let reached = area.tick(&mut self.player, &mut self.npcs, &mut self.projectiles);
            if reached && !self.level_completed {
                self.level_completed = true;
                log::info!("level completed after {} ticks", self.ticks);
                self.events.push(DomainEvent::LevelCompleted);
            }
        }

        let stage = self.stage;
        self.projectiles.retain(|p| !p.is_expired(&stage));
    }

    pub(super) fn run_spawners(&mut self, dt: DeltaTime) -> Result<(), SessionError> {
        let cap = self.population_cap;
        for spawner in &mut self.spawners {
            let population = living(&self.npcs);
            let Some(batch) = spawner.tick(dt, population, cap, &mut self.ids) else {
                continue;
            };
            let room = cap.saturating_sub(population);
            for mut npc in batch.into_iter().take(room) {
                settle(&mut npc, &self.walls, &self.stage);
                self.npcs.push(npc);
            }
        }

        for request in std::mem::take(&mut self.pending_spawns) {
            let population = living(&self.npcs) + request.positions.len();
            if population > cap {
                return Err(SessionError::Overrun { population, cap });
            }
            for position in request.positions {
                let id = self.ids.allocate();
                let mut npc = request.template.spawn(id, self.stage.clamp(position));
                settle(&mut npc, &self.walls, &self.stage);
                self.npcs.push(npc);
            }
        }
        Ok(())
    }

    pub(super) fn evaluate_goal(&mut self) {
        if self.goal_reached || !self.goal.evaluate(&self.aggregates()) {
            return;
        }
        self.goal_reached = true;
        log::info!("goal reached: {}", self.goal);
        self.events.push(DomainEvent::TargetGoalReached {
            description: self.goal.description().to_string(),
        });
        match self.target_area.as_mut() {
            Some(area) => area.open_to_player(),
            None => {
                if !self.level_completed {
                    self.level_completed = true;
                    self.events.push(DomainEvent::LevelCompleted);
                }
            }
        }
    }
}

/// Entities still alive; the dead linger one tick before removal.
fn living(npcs: &[NonPlayerEntity]) -> usize {
    npcs.iter().filter(|npc| !npc.is_dead()).count()
}

/// Whether `body` overlaps a wall by more than touching.
fn penetrates_wall(body: Circle, walls: &[Wall]) -> bool {
    walls
        .iter()
        .any(|wall| physics::push_out(body, wall.circle(), Direction::RIGHT).is_some())
}

/// Slide an entity clear of every wall and pin it there.
fn settle(npc: &mut NonPlayerEntity, walls: &[Wall], stage: &Bounds) {
    if !penetrates_wall(npc.circle(), walls) {
        return;
    }
    let clear = physics::slide_out(npc.circle(), walls.iter().map(Wall::circle));
    npc.place(stage.clamp(clear));
}
