//! A simple scripted player for headless runs.

use super::CliError;
use serde::Serialize;
use swarm::{Aggregates, DeltaTime, EntityKind, GameSession, LevelConfig, NonPlayerEntity, Vec2};

/// Preferred distance to the nearest hostile.
const ENGAGE_DISTANCE: f32 = 250.0;
/// Back off when a hostile is closer than this.
const RETREAT_DISTANCE: f32 = 120.0;

/// How a headless run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum Outcome {
    /// Player reached the exit, or the goal ended the level.
    Completed,
    /// Round timer ran out.
    TimeUp,
    /// Population overran the cap.
    Interrupted,
    /// Tick limit hit first.
    TickLimit,
}

impl Outcome {
    /// Short label.
    pub(super) const fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::TimeUp => "time_up",
            Self::Interrupted => "interrupted",
            Self::TickLimit => "tick_limit",
        }
    }
}

/// Result of one headless run.
#[derive(Debug, Clone, Serialize)]
pub(super) struct RunReport {
    /// Session seed.
    pub(super) seed: u64,
    /// Seed the wall generator used.
    pub(super) wall_seed: Option<u64>,
    /// Ticks advanced.
    pub(super) ticks: u64,
    /// How it ended.
    pub(super) outcome: Outcome,
    /// Whether the goal was met.
    pub(super) goal_reached: bool,
    /// Final counters.
    pub(super) aggregates: Aggregates,
    /// Events emitted over the run.
    pub(super) events: u64,
    /// Projectiles the player fired.
    pub(super) shots_fired: u64,
}

/// Drive one session to a terminal state or the tick limit.
pub(super) fn play(
    session: &mut GameSession,
    speed: f32,
    max_ticks: u64,
    dt: DeltaTime,
) -> RunReport {
    let mut events = 0_u64;
    let mut shots_fired = 0_u64;

    while session.ticks() < max_ticks && !session.is_finished() {
        shots_fired += steer(session, speed) as u64;
        let emitted = session.step(dt);
        for event in &emitted {
            log::trace!("tick {}: {}", session.ticks(), event.name());
        }
        events += emitted.len() as u64;
    }

    let flags = session.flags();
    let outcome = if flags.level_completed {
        Outcome::Completed
    } else if flags.time_up {
        Outcome::TimeUp
    } else if flags.interrupted {
        Outcome::Interrupted
    } else {
        Outcome::TickLimit
    };

    RunReport {
        seed: session.seed(),
        wall_seed: session.wall_seed(),
        ticks: session.ticks(),
        outcome,
        goal_reached: flags.goal_reached,
        aggregates: session.aggregates(),
        events,
        shots_fired,
    }
}

/// Build a session from a level and play it.
pub(super) fn run_level(
    level: &LevelConfig,
    seed: Option<u64>,
    max_ticks: u64,
    dt: DeltaTime,
) -> Result<RunReport, CliError> {
    let mut session = GameSession::from_config(level, seed)?;
    Ok(play(&mut session, level.player.speed, max_ticks, dt))
}

/// Choose movement and aim for this tick, and pull the trigger.
/// Returns the number of projectiles fired.
fn steer(session: &mut GameSession, speed: f32) -> usize {
    let me = session.player().position();

    let exit = session
        .target_area()
        .filter(|_| session.flags().goal_reached)
        .map(swarm::TargetArea::position);
    if let Some(exit) = exit {
        session.apply_input(exit - me, speed);
        return 0;
    }

    let nearest = session
        .non_player_entities()
        .iter()
        .filter(|npc| !npc.is_dead() && npc.kind() != EntityKind::Healthy)
        .map(NonPlayerEntity::position)
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

    let Some(target) = nearest else {
        let home = session.stage().center();
        session.apply_input(home - me, speed);
        return 0;
    };

    let distance = target.distance(me);
    let heading = if distance > ENGAGE_DISTANCE {
        target - me
    } else if distance < RETREAT_DISTANCE {
        me - target
    } else {
        Vec2::ZERO
    };
    session.apply_input(heading, speed);
    session.rotate_towards(target);

    if session
        .player()
        .weapon()
        .is_some_and(|weapon| weapon.current_ammo() == 0)
    {
        session.reload();
    }
    session.fire(true, true)
}
