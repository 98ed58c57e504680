//! Building sessions, from level files or by hand.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::{Bomb, HitPoints};
use crate::config::LevelConfig;
use crate::entity::{EntityIds, EntityTemplate, Player, PlayerArea, TargetArea, Wall};
use crate::error::{ConfigError, SessionError};
use crate::goal::Goal;
use crate::mapgen::{VoronoiParams, assign_open_side_anchors, generate_walls};
use crate::math::{Bounds, Radius, Vec2};
use crate::session::GameSession;
use crate::spawner::Spawner;
use crate::time::RoundTimer;

/// Assembles a [`GameSession`] piece by piece.
///
/// ```
/// use swarm::{Bounds, Goal, GameSession, HitPoints, Player, Radius, SessionBuilder, Vec2};
///
/// let stage = Bounds::new(0.0, 0.0, 400.0, 300.0).unwrap();
/// let player = Player::new(Vec2::new(200.0, 150.0), Radius::new(10.0).unwrap(), HitPoints::new(10));
/// let goal = Goal::parse("Survive", "time_remaining", "<=", 0).unwrap();
/// let session: GameSession = SessionBuilder::new(stage, player, goal).seed(7).build();
/// assert_eq!(session.seed(), 7);
/// ```
#[derive(Debug)]
pub struct SessionBuilder {
    stage: Bounds,
    player: Player,
    goal: Goal,
    walls: Vec<Wall>,
    bombs: Vec<Bomb>,
    player_area: Option<PlayerArea>,
    target_area: Option<TargetArea>,
    spawners: Vec<Spawner>,
    timer: RoundTimer,
    population_cap: usize,
    seed: Option<u64>,
}

impl SessionBuilder {
    /// Start with an empty arena.
    #[must_use]
    pub fn new(stage: Bounds, player: Player, goal: Goal) -> Self {
        Self {
            stage,
            player,
            goal,
            walls: Vec::new(),
            bombs: Vec::new(),
            player_area: None,
            target_area: None,
            spawners: Vec::new(),
            timer: RoundTimer::DEFAULT,
            population_cap: crate::config::DEFAULT_POPULATION_CAP,
            seed: None,
        }
    }

    /// Add a wall.
    #[must_use]
    pub fn wall(mut self, wall: Wall) -> Self {
        self.walls.push(wall);
        self
    }

    /// Push a bomb onto the stack.
    #[must_use]
    pub fn bomb(mut self, bomb: Bomb) -> Self {
        self.bombs.push(bomb);
        self
    }

    /// Set the player area.
    #[must_use]
    pub fn player_area(mut self, area: PlayerArea) -> Self {
        self.player_area = Some(area);
        self
    }

    /// Set the level exit.
    #[must_use]
    pub fn target_area(mut self, area: TargetArea) -> Self {
        self.target_area = Some(area);
        self
    }

    /// Add a spawner.
    #[must_use]
    pub fn spawner(mut self, spawner: Spawner) -> Self {
        self.spawners.push(spawner);
        self
    }

    /// Round length.
    #[must_use]
    pub fn round_length(mut self, timer: RoundTimer) -> Self {
        self.timer = timer;
        self
    }

    /// Population cap.
    #[must_use]
    pub fn population_cap(mut self, cap: usize) -> Self {
        self.population_cap = cap;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> GameSession {
        let seed = self
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        let aim = self.player.position();
        GameSession {
            stage: self.stage,
            player: self.player,
            aim,
            npcs: Vec::new(),
            projectiles: Vec::new(),
            walls: self.walls,
            bombs: self.bombs,
            bomb_active: false,
            player_area: self.player_area,
            target_area: self.target_area,
            spawners: self.spawners,
            pending_spawns: Vec::new(),
            goal: self.goal,
            timer: self.timer,
            timer_accumulator: 0.0,
            elapsed_seconds: 0,
            population_cap: self.population_cap,
            tally: super::Tally::default(),
            ids: EntityIds::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            wall_seed: None,
            paused: false,
            time_up: false,
            level_completed: false,
            goal_reached: false,
            interrupted: false,
            events: Vec::new(),
            ticks: 0,
        }
    }
}

impl GameSession {
    /// Build a session from a level.
    ///
    /// `seed` overrides the level's own seed; with neither, the session is
    /// seeded from entropy and [`GameSession::seed`] reports the value so
    /// the run can be replayed.
    ///
    /// # Errors
    ///
    /// Fails on any configuration problem, or when spawners need more
    /// positions than the walls offer.
    pub fn from_config(config: &LevelConfig, seed: Option<u64>) -> Result<Self, SessionError> {
        config.validate()?;
        let stage = config.stage.bounds()?;

        let player_area = config
            .player_area
            .map(|area| Ok::<_, ConfigError>(PlayerArea::new(area.center(), area.radius()?)))
            .transpose()?;
        let target_area = config
            .target_area
            .map(|area| Ok::<_, ConfigError>(TargetArea::new(area.center(), area.radius()?)))
            .transpose()?;

        let start = config
            .player
            .position
            .map(Vec2::from)
            .or_else(|| player_area.as_ref().map(PlayerArea::position))
            .unwrap_or_else(|| stage.center());
        let mut player = Player::new(
            start,
            Radius::new(config.player.radius)?,
            HitPoints::from_signed(config.player.hit_points)?,
        );
        if let Some(weapon) = &config.weapon {
            player.set_weapon(weapon.player_weapon()?);
        }

        let mut builder = SessionBuilder::new(stage, player, config.goal()?)
            .round_length(RoundTimer::new(config.round_length_seconds)?)
            .population_cap(config.population_cap());
        if let Some(seed) = seed.or(config.seed) {
            builder = builder.seed(seed);
        }
        if let Some(area) = player_area {
            builder = builder.player_area(area);
        }
        if let Some(area) = target_area {
            builder = builder.target_area(area);
        }
        for bomb in &config.bombs {
            builder = builder.bomb(bomb.bomb()?);
        }
        for wall in &config.walls {
            builder = builder.wall(Wall::new(wall.center(), wall.radius()?));
        }
        let mut session = builder.build();

        session.build_walls(config)?;
        session.place_spawners(config)?;
        session.spawn_boss(config)?;

        log::info!(
            "session ready: seed {}, {} walls, {} spawners, {} entities",
            session.seed,
            session.walls.len(),
            session.spawners.len(),
            session.npcs.len()
        );
        Ok(session)
    }

    fn build_walls(&mut self, config: &LevelConfig) -> Result<(), SessionError> {
        if let Some(generator) = &config.wall_generator {
            let start = self
                .player_area
                .as_ref()
                .map_or_else(|| self.stage.top_left(), PlayerArea::position);
            let end = self
                .target_area
                .as_ref()
                .map_or_else(|| self.stage.bottom_right(), TargetArea::position);
            let generated = generate_walls(&VoronoiParams {
                start,
                end,
                stage: self.stage,
                seed_count: generator.seed_count,
                cell_size: generator.cell_size,
                wall_radius: Radius::new(generator.wall_radius)?,
                wall_density: generator.wall_density,
                min_wall_count: generator.min_wall_count,
                seed: Some(generator.seed.unwrap_or(self.seed)),
                corridor_width_multiplier: generator.corridor_width_multiplier,
            })?;
            log::debug!(
                "generated {} walls from seed {} in {} attempt(s)",
                generated.walls.len(),
                generated.seed,
                generated.attempts
            );
            self.wall_seed = Some(generated.seed);
            self.walls.extend(generated.walls);
        }
        assign_open_side_anchors(&mut self.walls, &self.stage);
        Ok(())
    }

    fn random_corner(&mut self, left: bool) -> Vec2 {
        let top = self.rng.gen_bool(0.5);
        match (left, top) {
            (true, true) => self.stage.top_left(),
            (true, false) => self.stage.bottom_left(),
            (false, true) => self.stage.top_right(),
            (false, false) => self.stage.bottom_right(),
        }
    }

    fn place_spawners(&mut self, config: &LevelConfig) -> Result<(), SessionError> {
        if config.spawners.is_empty() {
            return Ok(());
        }
        let healthy_safehouse = match &self.player_area {
            Some(area) => area.position(),
            None => self.random_corner(true),
        };
        let shooter_safehouse = match &self.target_area {
            Some(area) => area.position(),
            None => self.random_corner(false),
        };

        let mut anchors: Vec<Vec2> = self
            .walls
            .iter()
            .flat_map(|wall| wall.anchors().iter().copied())
            .collect();
        let available = anchors.len();
        let requested: usize = config
            .spawners
            .iter()
            .filter(|spawner| spawner.position.is_none())
            .map(|spawner| spawner.number)
            .sum();

        for spawner in &config.spawners {
            spawner.behaviour()?;
            let template =
                config.template_for(spawner.object_type()?, healthy_safehouse, shooter_safehouse)?;
            for _ in 0..spawner.number {
                let position = match spawner.position {
                    Some(point) => Vec2::from(point),
                    None => {
                        if anchors.is_empty() {
                            return Err(SessionError::SpawnerPositionsExhausted {
                                requested,
                                available,
                            });
                        }
                        let index = self.rng.gen_range(0..anchors.len());
                        anchors.swap_remove(index)
                    }
                };
                self.spawners.push(Spawner::from_template(
                    position,
                    spawner.cooldown_seconds,
                    spawner.batch_size,
                    template.clone(),
                )?);
            }
        }
        Ok(())
    }

    fn spawn_boss(&mut self, config: &LevelConfig) -> Result<(), SessionError> {
        let Some(boss) = &config.boss else {
            return Ok(());
        };
        let template = boss.template(config.zombie.as_ref())?;
        let start = template
            .waypoints
            .first()
            .copied()
            .ok_or_else(|| ConfigError::Missing("boss.waypoints".into()))?;
        let id = self.ids.allocate();
        self.npcs
            .push(EntityTemplate::Boss(template).spawn(id, self.stage.clamp(start)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AreaConfig, GoalConfig, NpcConfig, PlayerConfig, PointConfig, SpawnerConfig, StageConfig,
        WallGeneratorConfig,
    };

    fn level() -> LevelConfig {
        LevelConfig {
            stage: StageConfig {
                left: 0.0,
                top: 0.0,
                right: 1000.0,
                bottom: 800.0,
            },
            player: PlayerConfig::default(),
            weapon: None,
            player_area: Some(AreaConfig {
                x: 100.0,
                y: 100.0,
                radius: 40.0,
            }),
            target_area: Some(AreaConfig {
                x: 900.0,
                y: 700.0,
                radius: 40.0,
            }),
            walls: vec![AreaConfig {
                x: 500.0,
                y: 200.0,
                radius: 12.0,
            }],
            wall_generator: None,
            zombie: Some(NpcConfig {
                hit_points: 2,
                radius: 8.0,
                speed: 50.0,
                target_threshold: None,
                dodge_threshold: None,
                dodge_speed_multiplier: None,
            }),
            healthy: None,
            shooter: None,
            boss: None,
            spawners: vec![SpawnerConfig {
                spawn_object_type: "zombie".into(),
                behaviour_type: "fixed_position".into(),
                cooldown_seconds: 1.0,
                batch_size: 1,
                position: None,
                number: 2,
            }],
            goal: Some(GoalConfig {
                description: "Kill".into(),
                counter: "kills".into(),
                operator: ">=".into(),
                target: 3,
            }),
            bombs: Vec::new(),
            round_length_seconds: 60,
            population_cap: None,
            seed: None,
        }
    }

    #[test]
    fn test_player_starts_in_player_area() {
        let session = GameSession::from_config(&level(), Some(3)).unwrap();
        assert_eq!(session.player().position(), Vec2::new(100.0, 100.0));
        assert_eq!(session.seed(), 3);
        assert_eq!(session.spawners().len(), 2);
    }

    #[test]
    fn test_spawners_take_distinct_anchors() {
        let session = GameSession::from_config(&level(), Some(3)).unwrap();
        let anchors = session.walls()[0].anchors();
        let a = session.spawners()[0].position();
        let b = session.spawners()[1].position();
        assert_ne!(a, b);
        assert!(anchors.contains(&a) && anchors.contains(&b));
    }

    #[test]
    fn test_spawner_positions_exhausted() {
        let mut config = level();
        config.spawners[0].number = 5;
        assert_eq!(
            GameSession::from_config(&config, Some(3)).unwrap_err(),
            SessionError::SpawnerPositionsExhausted {
                requested: 5,
                available: 4
            }
        );
    }

    #[test]
    fn test_fixed_position_spawner_needs_no_walls() {
        let mut config = level();
        config.walls.clear();
        config.spawners[0].position = Some(PointConfig { x: 50.0, y: 50.0 });
        let session = GameSession::from_config(&config, Some(3)).unwrap();
        assert!(
            session
                .spawners()
                .iter()
                .all(|s| s.position() == Vec2::new(50.0, 50.0))
        );
    }

    #[test]
    fn test_generated_walls_replay_from_seed() {
        let mut config = level();
        config.spawners.clear();
        config.wall_generator = Some(WallGeneratorConfig {
            seed: None,
            seed_count: 10,
            cell_size: 25.0,
            wall_radius: 10.0,
            wall_density: 0.3,
            min_wall_count: 5,
            corridor_width_multiplier: None,
        });
        let a = GameSession::from_config(&config, Some(11)).unwrap();
        let b = GameSession::from_config(&config, Some(11)).unwrap();
        assert_eq!(a.walls(), b.walls());
        assert_eq!(a.wall_seed(), Some(11));
        assert!(a.walls().len() > 1);
    }

    #[test]
    fn test_invalid_level_fails_before_building() {
        let mut config = level();
        config.goal = None;
        assert!(matches!(
            GameSession::from_config(&config, Some(1)),
            Err(SessionError::Config(ConfigError::Missing(_)))
        ));
    }
}
