//! The session aggregate: owns the world and advances it one tick at a time.
//!
//! A [`GameSession`] is built from a [`LevelConfig`](crate::LevelConfig)
//! with [`GameSession::from_config`], or assembled piece by piece with a
//! [`SessionBuilder`]. Hosts drive it with commands between ticks and read
//! it back through [`GameSession::snapshot`].
//!
//! # Tick order
//!
//! Every tick runs the same fixed pipeline so that identical seeds and
//! identical inputs give identical worlds:
//!
//! 1. gate (paused or terminal sessions do nothing)
//! 2. bomb suspension
//! 3. round timer
//! 4. player
//! 5. non-player entities, then removal of the dead
//! 6. projectiles
//! 7. areas
//! 8. spawners, then death-trigger spawns
//! 9. goal

mod events;
mod pipeline;
mod setup;
mod snapshot;

pub use events::DomainEvent;
pub use setup::SessionBuilder;
pub use snapshot::{AreaPose, CirclePose, EntityPose, Flags, Hud, PlayerPose, ProjectilePose, Snapshot};

use rand_chacha::ChaCha8Rng;

use crate::combat::Bomb;
use crate::entity::{
    AIM_RADIUS, EntityId, EntityIds, EntityKind, NonPlayerEntity, Player, PlayerArea, Projectile,
    SpawnRequest, TargetArea, Wall,
};
use crate::error::SessionError;
use crate::goal::{Aggregates, Goal};
use crate::math::{Bounds, Direction, Vec2};
use crate::spawner::Spawner;
use crate::time::{DeltaTime, RoundTimer};

/// Counters the session accumulates over a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    kills: u32,
    casualties: u32,
    salvations: u32,
    infected: u32,
    respawns: u32,
}

/// The simulation aggregate root.
#[derive(Debug)]
pub struct GameSession {
    stage: Bounds,
    player: Player,
    aim: Vec2,
    npcs: Vec<NonPlayerEntity>,
    projectiles: Vec<Projectile>,
    walls: Vec<Wall>,
    bombs: Vec<Bomb>,
    bomb_active: bool,
    player_area: Option<PlayerArea>,
    target_area: Option<TargetArea>,
    spawners: Vec<Spawner>,
    pending_spawns: Vec<SpawnRequest>,
    goal: Goal,
    timer: RoundTimer,
    timer_accumulator: f32,
    elapsed_seconds: u32,
    population_cap: usize,
    tally: Tally,
    ids: EntityIds,
    rng: ChaCha8Rng,
    seed: u64,
    wall_seed: Option<u64>,
    paused: bool,
    time_up: bool,
    level_completed: bool,
    goal_reached: bool,
    interrupted: bool,
    events: Vec<DomainEvent>,
    ticks: u64,
}

impl GameSession {
    /// Advance the world by `dt` and return what happened.
    ///
    /// Paused and finished sessions return no events and change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Overrun`] when death-trigger spawns would
    /// push the population past the cap. The session is left as it was at
    /// that point; callers normally go through [`GameSession::step`],
    /// which interrupts the session instead.
    pub fn tick(&mut self, dt: DeltaTime) -> Result<Vec<DomainEvent>, SessionError> {
        if self.is_gated() {
            return Ok(Vec::new());
        }
        self.ticks += 1;

        if self.bomb_active {
            self.tick_bomb(dt);
            return Ok(self.drain_events());
        }
        if self.advance_timer(dt) {
            self.advance_player(dt);
            self.advance_npcs(dt);
            self.advance_projectiles(dt);
            self.apply_areas();
            self.run_spawners(dt)?;
            self.evaluate_goal();
        }
        Ok(self.drain_events())
    }

    /// Like [`GameSession::tick`], but an overrun interrupts the session
    /// instead of being returned.
    pub fn step(&mut self, dt: DeltaTime) -> Vec<DomainEvent> {
        match self.tick(dt) {
            Ok(events) => events,
            Err(error) => {
                log::warn!("interrupting session: {error}");
                self.interrupt();
                self.drain_events()
            }
        }
    }

    fn drain_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    const fn is_gated(&self) -> bool {
        self.paused || self.time_up || self.level_completed || self.interrupted
    }

    /// Set movement intent. A zero vector stops the player.
    pub fn apply_input(&mut self, input: Vec2, speed: f32) {
        self.player
            .set_movement(Direction::from_vector(input), speed.max(0.0));
    }

    /// Aim at a world point.
    pub fn rotate_towards(&mut self, point: Vec2) {
        self.aim = point;
        if let Some(direction) = Direction::between(self.player.position(), point) {
            self.player.face(direction);
        }
    }

    /// Aim by angle, with `magnitude` in `[0, 1]` scaling the aim point's
    /// distance out to [`AIM_RADIUS`].
    pub fn rotate_towards_polar(&mut self, radians: f32, magnitude: f32) {
        let direction = Direction::from_angle(radians);
        self.player.face(direction);
        self.aim =
            self.player.position() + direction.vector() * (AIM_RADIUS * magnitude.clamp(0.0, 1.0));
    }

    /// Pull or hold the trigger. Returns the number of projectiles fired.
    pub fn fire(&mut self, pressed: bool, held: bool) -> usize {
        if self.is_gated() || self.bomb_active || self.player.is_dead() {
            return 0;
        }
        let Some(projectiles) = self.player.try_fire(pressed, held) else {
            return 0;
        };
        let fired = projectiles.len();
        self.projectiles.extend(projectiles);
        fired
    }

    /// Refill the magazine from the reserve.
    pub fn reload(&mut self) {
        self.player.reload();
    }

    /// Detonate the top bomb: every entity and the player die and the
    /// world holds still for the bomb's cooldown. Returns whether a bomb
    /// went off. The [`DomainEvent::BombDetonated`] event is returned by
    /// the next tick.
    pub fn drop_bomb(&mut self) -> bool {
        if self.is_gated() || self.bomb_active {
            return false;
        }
        let Some(bomb) = self.bombs.last_mut() else {
            return false;
        };
        bomb.detonate();
        let identifier = bomb.identifier().to_string();
        for npc in &mut self.npcs {
            npc.die();
        }
        self.player.die();
        self.bomb_active = true;
        log::info!("{identifier} detonated");
        self.events.push(DomainEvent::BombDetonated {
            identifier,
            remaining: self.bombs.len(),
        });
        true
    }

    /// Stop advancing until [`GameSession::resume`].
    pub const fn pause(&mut self) {
        self.paused = true;
    }

    /// Undo [`GameSession::pause`].
    pub const fn resume(&mut self) {
        self.paused = false;
    }

    /// Stop the session for good.
    pub const fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Allocate an id for an entity built outside the session.
    pub const fn next_entity_id(&mut self) -> EntityId {
        self.ids.allocate()
    }

    /// Add an entity unless the population is at the cap.
    pub fn add_non_player_entity(&mut self, npc: NonPlayerEntity) -> bool {
        if self.npcs.len() >= self.population_cap {
            log::debug!("population cap {} reached, refusing {}", self.population_cap, npc.kind());
            return false;
        }
        self.npcs.push(npc);
        true
    }

    /// Add a projectile to the world.
    pub fn add_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Session counters as goals see them.
    #[must_use]
    pub fn aggregates(&self) -> Aggregates {
        let living = || self.npcs.iter().filter(|npc| !npc.is_dead());
        let count = |predicate: fn(&NonPlayerEntity) -> bool| {
            u32::try_from(living().filter(|npc| predicate(npc)).count()).unwrap_or(u32::MAX)
        };
        let enemy_count = count(|npc| npc.kind().is_enemy());
        Aggregates {
            kills: self.tally.kills,
            casualties: self.tally.casualties,
            salvations: self.tally.salvations,
            infected: self.tally.infected,
            respawns: self.tally.respawns,
            enemy_count,
            shooter_count: count(|npc| npc.kind() == EntityKind::Shooter),
            healthy_count: count(|npc| npc.kind() == EntityKind::Healthy),
            infected_count: count(|npc| npc.kind() == EntityKind::Infected),
            enemy_overall_population: enemy_count.saturating_add(self.tally.kills),
            bomb_count: u32::try_from(self.bombs.len()).unwrap_or(u32::MAX),
            time_remaining: self.timer.seconds(),
            time_elapsed: self.elapsed_seconds,
        }
    }

    /// Session flags.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        Flags {
            paused: self.paused,
            time_up: self.time_up,
            level_completed: self.level_completed,
            goal_reached: self.goal_reached,
            interrupted: self.interrupted,
            bomb_active: self.bomb_active,
        }
    }

    /// Arena.
    #[must_use]
    pub const fn stage(&self) -> Bounds {
        self.stage
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Living and not yet removed non-player entities, in update order.
    #[must_use]
    pub fn non_player_entities(&self) -> &[NonPlayerEntity] {
        &self.npcs
    }

    /// Live projectiles.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Walls.
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Spawners.
    #[must_use]
    pub fn spawners(&self) -> &[Spawner] {
        &self.spawners
    }

    /// Win condition.
    #[must_use]
    pub const fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Player area, if the level has one.
    #[must_use]
    pub const fn player_area(&self) -> Option<&PlayerArea> {
        self.player_area.as_ref()
    }

    /// Level exit, if the level has one.
    #[must_use]
    pub const fn target_area(&self) -> Option<&TargetArea> {
        self.target_area.as_ref()
    }

    /// Round timer.
    #[must_use]
    pub const fn timer(&self) -> RoundTimer {
        self.timer
    }

    /// Population cap.
    #[must_use]
    pub const fn population_cap(&self) -> usize {
        self.population_cap
    }

    /// Seed of the session RNG.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed the wall generator used, if walls were generated.
    #[must_use]
    pub const fn wall_seed(&self) -> Option<u64> {
        self.wall_seed
    }

    /// Ticks advanced so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether a bomb is holding the world still.
    #[must_use]
    pub const fn is_bomb_active(&self) -> bool {
        self.bomb_active
    }

    /// Whether the session will never advance again.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.time_up || self.level_completed || self.interrupted
    }
}
