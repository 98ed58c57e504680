//! End-to-end tick scenarios on hand-built sessions.
//!
//! Run with: cargo test --test session_scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use swarm::behavior::{ComposedBehavior, PlayerTarget};
use swarm::entity::{DeathTrigger, DodgeParams, NpcStats, ZombieTemplate};
use swarm::mapgen::assign_open_side_anchors;
use swarm::{
    Bomb, Bounds, Damage, DeltaTime, Direction, DomainEvent, EntityId, EntityKind, EntityTemplate,
    GameSession, Goal, HitPoints, NonPlayerEntity, Player, Projectile, ProjectileOwner, Radius,
    RoundTimer, SessionBuilder, SessionError, Spawner, TargetArea, Vec2, Wall,
};

fn stage() -> Bounds {
    Bounds::new(0.0, 0.0, 1000.0, 1000.0).unwrap()
}

fn player_at(x: f32, y: f32) -> Player {
    Player::new(Vec2::new(x, y), Radius::new(10.0).unwrap(), HitPoints::new(10))
}

fn goal(counter: &str, operator: &str, target: i64) -> Goal {
    Goal::parse("test goal", counter, operator, target).unwrap()
}

fn builder(player: Player) -> SessionBuilder {
    SessionBuilder::new(stage(), player, goal("kills", ">=", 1_000)).seed(1)
}

fn dt(seconds: f32) -> DeltaTime {
    DeltaTime::new(seconds).unwrap()
}

fn npc(session: &mut GameSession, kind: EntityKind, x: f32, y: f32, hp: u32, speed: f32) -> EntityId {
    let id = session.next_entity_id();
    let entity = NonPlayerEntity::new(
        id,
        kind,
        Vec2::new(x, y),
        Radius::new(10.0).unwrap(),
        HitPoints::new(hp),
        Box::new(ComposedBehavior::seek(speed, PlayerTarget)),
    );
    assert!(session.add_non_player_entity(entity));
    id
}

fn bullet(x: f32, y: f32, damage: u32, owner: ProjectileOwner) -> Projectile {
    Projectile::new(
        Vec2::new(x, y),
        Direction::RIGHT,
        1.0,
        2.0,
        Damage::new(damage),
        1.0,
        owner,
    )
    .unwrap()
}

fn zombie_template() -> ZombieTemplate {
    ZombieTemplate {
        stats: NpcStats {
            hit_points: HitPoints::new(3),
            radius: Radius::new(10.0).unwrap(),
            speed: 0.0,
        },
        target_threshold: 100.0,
        dodge: DodgeParams {
            threshold: 150.0,
            multiplier: 1.5,
        },
    }
}

#[test]
fn test_player_inside_wall_is_pushed_out() {
    let mut session = builder(player_at(100.0, 100.0))
        .wall(Wall::new(Vec2::new(105.0, 100.0), Radius::new(20.0).unwrap()))
        .build();

    session.step(dt(0.016));

    let distance = session.player().position().distance(Vec2::new(105.0, 100.0));
    assert!(distance >= 30.0 - 1e-3, "player still inside wall: {distance}");
}

#[test]
fn test_spawner_releases_full_batch_on_eighth_tick() {
    let template = EntityTemplate::Zombie(zombie_template());
    let spawner = Spawner::from_template(Vec2::new(800.0, 800.0), 1.0, 3, template).unwrap();
    let mut session = builder(player_at(100.0, 100.0)).spawner(spawner).build();

    for tick in 1..=7 {
        session.step(dt(0.4));
        assert!(
            session.non_player_entities().is_empty(),
            "entities appeared early on tick {tick}"
        );
    }
    session.step(dt(0.4));
    assert_eq!(session.non_player_entities().len(), 3);
    assert_eq!(session.spawners()[0].buffered(), 0);
}

#[test]
fn test_enemy_projectile_damages_player() {
    let mut session = builder(player_at(500.0, 500.0)).build();
    session.add_projectile(bullet(500.0, 500.0, 3, ProjectileOwner::Enemy));

    session.step(dt(0.016));

    assert_eq!(session.player().hit_points().value(), 7);
    assert!(session.projectiles().is_empty());
}

#[test]
fn test_player_projectile_on_healthy_is_a_casualty() {
    let mut session = builder(player_at(100.0, 100.0)).build();
    npc(&mut session, EntityKind::Healthy, 500.0, 500.0, 1, 0.0);
    session.add_projectile(bullet(500.0, 500.0, 5, ProjectileOwner::Player));

    session.step(dt(0.016));
    let aggregates = session.aggregates();
    assert_eq!(aggregates.casualties, 1);
    assert_eq!(aggregates.kills, 0);
    // Dead entities stay one more tick.
    assert_eq!(session.non_player_entities().len(), 1);
    assert!(session.non_player_entities()[0].is_dead());

    session.step(dt(0.016));
    assert!(session.non_player_entities().is_empty());
}

#[test]
fn test_player_projectile_on_hostile_is_a_kill() {
    let mut session = builder(player_at(100.0, 100.0)).build();
    npc(&mut session, EntityKind::Zombie, 500.0, 500.0, 2, 0.0);
    session.add_projectile(bullet(500.0, 500.0, 5, ProjectileOwner::Player));

    session.step(dt(0.016));

    let aggregates = session.aggregates();
    assert_eq!(aggregates.kills, 1);
    assert_eq!(aggregates.casualties, 0);
    assert_eq!(aggregates.enemy_count, 0);
    assert_eq!(aggregates.enemy_overall_population, 1);
}

#[test]
fn test_wall_absorbs_projectile_before_entities() {
    let mut session = builder(player_at(100.0, 100.0))
        .wall(Wall::new(Vec2::new(500.0, 500.0), Radius::new(20.0).unwrap()))
        .build();
    npc(&mut session, EntityKind::Zombie, 520.0, 500.0, 2, 0.0);
    session.add_projectile(bullet(505.0, 500.0, 5, ProjectileOwner::Player));

    session.step(dt(0.016));

    assert!(session.projectiles().is_empty());
    assert_eq!(session.aggregates().kills, 0);
}

#[test]
fn test_hostile_contact_hurts_player_and_healthy_contact_does_not() {
    let mut session = builder(player_at(500.0, 500.0)).build();
    npc(&mut session, EntityKind::Healthy, 505.0, 500.0, 5, 0.0);
    session.step(dt(0.016));
    assert_eq!(session.player().hit_points().value(), 10);

    npc(&mut session, EntityKind::Zombie, 495.0, 500.0, 5, 0.0);
    session.step(dt(0.016));
    assert!(session.player().hit_points().value() < 10);
}

#[test]
fn test_healthy_touching_zombie_turns_infected() {
    let mut session = builder(player_at(100.0, 100.0)).build();
    let healthy = npc(&mut session, EntityKind::Healthy, 500.0, 500.0, 5, 20.0);
    npc(&mut session, EntityKind::Zombie, 490.0, 490.0, 5, 0.0);

    let events = session.step(dt(0.016));

    assert!(events.contains(&DomainEvent::HealthyInfected { id: healthy }));
    let aggregates = session.aggregates();
    assert_eq!(aggregates.infected, 1);
    assert_eq!(aggregates.infected_count, 1);
    assert_eq!(aggregates.healthy_count, 0);
}

#[test]
fn test_goal_reached_once_and_opens_exit() {
    let exit = TargetArea::new(Vec2::new(900.0, 900.0), Radius::new(40.0).unwrap());
    let mut session = SessionBuilder::new(stage(), player_at(100.0, 100.0), goal("kills", ">=", 1))
        .target_area(exit)
        .build();
    npc(&mut session, EntityKind::Zombie, 500.0, 500.0, 1, 0.0);
    session.add_projectile(bullet(500.0, 500.0, 1, ProjectileOwner::Player));

    let events = session.step(dt(0.016));
    let reached = events
        .iter()
        .filter(|e| matches!(e, DomainEvent::TargetGoalReached { .. }))
        .count();
    assert_eq!(reached, 1);
    assert!(session.target_area().unwrap().is_open());
    assert!(session.flags().goal_reached);
    assert!(!session.is_finished());

    for _ in 0..10 {
        let events = session.step(dt(0.016));
        assert!(!events
            .iter()
            .any(|e| matches!(e, DomainEvent::TargetGoalReached { .. })));
    }
}

#[test]
fn test_goal_without_exit_completes_level() {
    let mut session =
        SessionBuilder::new(stage(), player_at(100.0, 100.0), goal("kills", ">=", 0)).build();

    let events = session.step(dt(0.016));

    assert!(events.contains(&DomainEvent::LevelCompleted));
    assert!(session.is_finished());
    assert!(session.step(dt(0.016)).is_empty());
}

#[test]
fn test_bomb_kills_everything_and_suspends() {
    let mut session = builder(player_at(100.0, 100.0))
        .bomb(Bomb::new("Big One", 1.0).unwrap())
        .build();
    npc(&mut session, EntityKind::Zombie, 500.0, 500.0, 5, 0.0);
    npc(&mut session, EntityKind::Healthy, 600.0, 500.0, 5, 0.0);
    let timer_before = session.timer();

    assert!(session.drop_bomb());
    assert!(!session.drop_bomb());
    assert!(session.player().is_dead());
    assert!(session.non_player_entities().iter().all(NonPlayerEntity::is_dead));

    let events = session.step(dt(0.5));
    assert_eq!(
        events,
        vec![DomainEvent::BombDetonated {
            identifier: "Big One".into(),
            remaining: 1,
        }]
    );
    assert!(session.is_bomb_active());
    assert_eq!(session.aggregates().bomb_count, 1);

    session.step(dt(0.5));
    assert!(!session.is_bomb_active());
    assert_eq!(session.aggregates().bomb_count, 0);
    assert_eq!(session.timer(), timer_before);

    session.step(dt(0.016));
    assert!(session.non_player_entities().is_empty());
    let aggregates = session.aggregates();
    assert_eq!(aggregates.kills, 0);
    assert_eq!(aggregates.casualties, 0);
}

#[test]
fn test_paused_session_does_not_advance() {
    let mut session = builder(player_at(100.0, 100.0)).build();
    session.apply_input(Vec2::new(1.0, 0.0), 100.0);
    session.pause();

    assert!(session.step(dt(1.0)).is_empty());
    assert_eq!(session.ticks(), 0);
    assert_eq!(session.player().position(), Vec2::new(100.0, 100.0));

    session.resume();
    session.step(dt(0.1));
    assert_eq!(session.ticks(), 1);
    assert!(session.player().position().x > 100.0);
}

#[test]
fn test_timer_counts_whole_seconds_then_stops() {
    let mut session = builder(player_at(100.0, 100.0)).round_length(RoundTimer::new(2).unwrap()).build();

    assert!(session.step(dt(0.5)).is_empty());
    assert_eq!(
        session.step(dt(0.5)),
        vec![DomainEvent::TimerUpdated { remaining: 1 }]
    );
    assert!(session.step(dt(0.5)).is_empty());
    assert_eq!(session.step(dt(0.5)), vec![DomainEvent::TimeIsUp]);

    assert!(session.flags().time_up);
    assert_eq!(session.aggregates().time_elapsed, 2);
    assert!(session.step(dt(0.5)).is_empty());
    assert_eq!(session.ticks(), 4);
}

#[test]
fn test_population_cap_refuses_new_entities() {
    let mut session = builder(player_at(100.0, 100.0)).population_cap(1).build();
    npc(&mut session, EntityKind::Zombie, 500.0, 500.0, 5, 0.0);

    let id = session.next_entity_id();
    let extra = EntityTemplate::Zombie(zombie_template()).spawn(id, Vec2::new(600.0, 600.0));
    assert!(!session.add_non_player_entity(extra));
    assert_eq!(session.non_player_entities().len(), 1);
}

fn overrun_session() -> GameSession {
    let mut session = builder(player_at(100.0, 100.0)).population_cap(2).build();
    let id = session.next_entity_id();
    let trigger = DeathTrigger::new(3, 30.0, EntityTemplate::Zombie(zombie_template()));
    let carrier = EntityTemplate::Zombie(zombie_template())
        .spawn(id, Vec2::new(500.0, 500.0))
        .with_death_trigger(trigger);
    assert!(session.add_non_player_entity(carrier));
    session.add_projectile(bullet(500.0, 500.0, 10, ProjectileOwner::Player));
    session
}

#[test]
fn test_death_trigger_overrun_is_reported_by_tick() {
    let mut session = overrun_session();

    session.tick(dt(0.016)).unwrap();
    let error = session.tick(dt(0.016)).unwrap_err();

    assert_eq!(
        error,
        SessionError::Overrun {
            population: 3,
            cap: 2,
        }
    );
}

#[test]
fn test_death_trigger_overrun_interrupts_step() {
    let mut session = overrun_session();

    session.step(dt(0.016));
    assert!(!session.flags().interrupted);
    session.step(dt(0.016));

    assert!(session.flags().interrupted);
    assert!(session.is_finished());
    assert!(session.step(dt(0.016)).is_empty());
}

#[test]
fn test_death_trigger_spawns_ring() {
    let mut session = builder(player_at(100.0, 100.0)).build();
    let id = session.next_entity_id();
    let trigger = DeathTrigger::new(4, 30.0, EntityTemplate::Zombie(zombie_template()));
    let carrier = EntityTemplate::Zombie(zombie_template())
        .spawn(id, Vec2::new(500.0, 500.0))
        .with_death_trigger(trigger);
    session.add_non_player_entity(carrier);
    session.add_projectile(bullet(500.0, 500.0, 10, ProjectileOwner::Player));

    session.step(dt(0.016));
    let events = session.step(dt(0.016));

    assert!(events.contains(&DomainEvent::EntitySpawnRequested {
        id,
        kind: EntityKind::Zombie,
        count: 4,
    }));
    assert_eq!(session.non_player_entities().len(), 4);
    for entity in session.non_player_entities() {
        let distance = entity.position().distance(Vec2::new(500.0, 500.0));
        assert!((distance - 30.0).abs() < 1e-3);
    }
}

fn wide_seeker(id: EntityId, at: Vec2) -> NonPlayerEntity {
    NonPlayerEntity::new(
        id,
        EntityKind::Zombie,
        at,
        Radius::new(12.0).unwrap(),
        HitPoints::new(3),
        Box::new(ComposedBehavior::seek(60.0, PlayerTarget)),
    )
}

fn assert_clear_of(entity: &NonPlayerEntity, wall: &Wall) {
    let distance = entity.position().distance(wall.position());
    let touching = entity.radius().get() + wall.radius().get();
    assert!(distance >= touching - 1e-3, "entity inside wall: {distance} < {touching}");
}

#[test]
fn test_entity_spawned_at_wall_anchor_walks_free() {
    let wall = Wall::new(Vec2::new(500.0, 500.0), Radius::new(20.0).unwrap());
    let mut anchored = vec![wall.clone()];
    assign_open_side_anchors(&mut anchored, &stage());
    let anchor = anchored[0]
        .anchors()
        .iter()
        .copied()
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .unwrap();

    let spawner = Spawner::new(anchor, 0.1, 1, Box::new(wide_seeker)).unwrap();
    let mut session = builder(player_at(100.0, 100.0))
        .wall(wall.clone())
        .spawner(spawner)
        .build();

    let dt = dt(1.0 / 60.0);
    while session.non_player_entities().is_empty() {
        session.step(dt);
        assert!(session.ticks() < 20, "spawner never released");
    }
    assert_clear_of(&session.non_player_entities()[0], &wall);

    for _ in 0..60 {
        session.step(dt);
    }
    let zombie = &session.non_player_entities()[0];
    assert!(zombie.position().distance(anchor) > 20.0, "zombie stuck at {:?}", zombie.position());
    assert_clear_of(zombie, &wall);
}

#[test]
fn test_entity_overlapping_wall_is_pushed_clear() {
    let wall = Wall::new(Vec2::new(500.0, 500.0), Radius::new(20.0).unwrap());
    let mut session = builder(player_at(100.0, 100.0)).wall(wall.clone()).build();
    let start = Vec2::new(470.0, 500.0);
    let id = session.next_entity_id();
    assert!(session.add_non_player_entity(wide_seeker(id, start)));

    for _ in 0..60 {
        session.step(dt(1.0 / 60.0));
    }

    let zombie = &session.non_player_entities()[0];
    assert!(zombie.position().distance(start) > 20.0);
    assert_clear_of(zombie, &wall);
}

#[test]
fn test_spawner_ignores_entities_killed_this_tick() {
    let template = EntityTemplate::Zombie(zombie_template());
    let spawner = Spawner::from_template(Vec2::new(800.0, 800.0), 0.1, 1, template).unwrap();
    let mut session = builder(player_at(100.0, 100.0))
        .population_cap(1)
        .spawner(spawner)
        .build();
    npc(&mut session, EntityKind::Zombie, 500.0, 500.0, 1, 0.0);
    session.add_projectile(bullet(500.0, 500.0, 5, ProjectileOwner::Player));

    session.step(dt(0.1));

    let living: Vec<_> = session
        .non_player_entities()
        .iter()
        .filter(|entity| !entity.is_dead())
        .collect();
    assert_eq!(living.len(), 1);
    assert_eq!(living[0].position(), Vec2::new(800.0, 800.0));
    assert_eq!(session.aggregates().kills, 1);
}

#[test]
fn test_overall_population_counts_hostiles_and_kills() {
    let mut session = builder(player_at(100.0, 100.0)).build();
    npc(&mut session, EntityKind::Zombie, 500.0, 500.0, 1, 0.0);
    npc(&mut session, EntityKind::Shooter, 700.0, 700.0, 5, 0.0);
    npc(&mut session, EntityKind::Healthy, 300.0, 800.0, 5, 0.0);
    session.add_projectile(bullet(500.0, 500.0, 5, ProjectileOwner::Player));

    session.step(dt(0.016));

    let aggregates = session.aggregates();
    assert_eq!(aggregates.kills, 1);
    assert_eq!(aggregates.enemy_count, 1);
    assert_eq!(aggregates.healthy_count, 1);
    assert_eq!(aggregates.enemy_overall_population, 2);
}
