//! Level goals: a named session counter compared against a target.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// A session quantity a goal can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    /// Hostile entities killed by the player.
    Kills,
    /// Non-infected Healthy killed by the player.
    Casualties,
    /// Healthy that reached the player area.
    Salvations,
    /// Healthy turned by Zombies.
    Infected,
    /// Times the player came back.
    Respawns,
    /// Living Zombies and Shooters.
    EnemyCount,
    /// Living Shooters.
    ShooterCount,
    /// Living non-infected Healthy.
    HealthyCount,
    /// Living Infected.
    InfectedCount,
    /// Living Zombies and Shooters plus kills so far.
    EnemyOverallPopulation,
    /// Bombs left.
    BombCount,
    /// Seconds left on the round timer.
    TimeRemaining,
    /// Whole seconds played.
    TimeElapsed,
}

impl Counter {
    /// Every counter, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Kills,
        Self::Casualties,
        Self::Salvations,
        Self::Infected,
        Self::Respawns,
        Self::EnemyCount,
        Self::ShooterCount,
        Self::HealthyCount,
        Self::InfectedCount,
        Self::EnemyOverallPopulation,
        Self::BombCount,
        Self::TimeRemaining,
        Self::TimeElapsed,
    ];

    /// Canonical snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kills => "kills",
            Self::Casualties => "casualties",
            Self::Salvations => "salvations",
            Self::Infected => "infected",
            Self::Respawns => "respawns",
            Self::EnemyCount => "enemy_count",
            Self::ShooterCount => "shooter_count",
            Self::HealthyCount => "healthy_count",
            Self::InfectedCount => "infected_count",
            Self::EnemyOverallPopulation => "enemy_overall_population",
            Self::BombCount => "bomb_count",
            Self::TimeRemaining => "time_remaining",
            Self::TimeElapsed => "time_elapsed",
        }
    }

    /// Read this counter from a set of aggregates.
    #[must_use]
    pub const fn read(self, aggregates: &Aggregates) -> u32 {
        match self {
            Self::Kills => aggregates.kills,
            Self::Casualties => aggregates.casualties,
            Self::Salvations => aggregates.salvations,
            Self::Infected => aggregates.infected,
            Self::Respawns => aggregates.respawns,
            Self::EnemyCount => aggregates.enemy_count,
            Self::ShooterCount => aggregates.shooter_count,
            Self::HealthyCount => aggregates.healthy_count,
            Self::InfectedCount => aggregates.infected_count,
            Self::EnemyOverallPopulation => aggregates.enemy_overall_population,
            Self::BombCount => aggregates.bomb_count,
            Self::TimeRemaining => aggregates.time_remaining,
            Self::TimeElapsed => aggregates.time_elapsed,
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Counter {
    type Err = ConfigError;

    /// Case-insensitive; underscores are ignored, so `EnemyCount`,
    /// `enemy_count` and `ENEMYCOUNT` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|counter| counter.name().replace('_', "") == wanted)
            .ok_or_else(|| ConfigError::UnknownCounter(s.to_string()))
    }
}

/// Comparison between a counter and a goal's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOperator {
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `<`
    Less,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl ComparisonOperator {
    /// Apply the operator as `left OP right`.
    #[must_use]
    pub const fn compare(self, left: i64, right: i64) -> bool {
        match self {
            Self::GreaterOrEqual => left >= right,
            Self::Greater => left > right,
            Self::LessOrEqual => left <= right,
            Self::Less => left < right,
            Self::Equal => left == right,
            Self::NotEqual => left != right,
        }
    }

    /// Operator symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::Less => "<",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">=" => Ok(Self::GreaterOrEqual),
            ">" => Ok(Self::Greater),
            "<=" => Ok(Self::LessOrEqual),
            "<" => Ok(Self::Less),
            "==" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            other => Err(ConfigError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Session counters as seen by goals and the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// See [`Counter::Kills`].
    pub kills: u32,
    /// See [`Counter::Casualties`].
    pub casualties: u32,
    /// See [`Counter::Salvations`].
    pub salvations: u32,
    /// See [`Counter::Infected`].
    pub infected: u32,
    /// See [`Counter::Respawns`].
    pub respawns: u32,
    /// See [`Counter::EnemyCount`].
    pub enemy_count: u32,
    /// See [`Counter::ShooterCount`].
    pub shooter_count: u32,
    /// See [`Counter::HealthyCount`].
    pub healthy_count: u32,
    /// See [`Counter::InfectedCount`].
    pub infected_count: u32,
    /// See [`Counter::EnemyOverallPopulation`].
    pub enemy_overall_population: u32,
    /// See [`Counter::BombCount`].
    pub bomb_count: u32,
    /// See [`Counter::TimeRemaining`].
    pub time_remaining: u32,
    /// See [`Counter::TimeElapsed`].
    pub time_elapsed: u32,
}

/// An immutable win condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    description: String,
    counter: Counter,
    operator: ComparisonOperator,
    target: i64,
}

impl Goal {
    /// Create a goal from already parsed parts.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        counter: Counter,
        operator: ComparisonOperator,
        target: i64,
    ) -> Self {
        Self {
            description: description.into(),
            counter,
            operator,
            target,
        }
    }

    /// Parse a goal from its configuration strings.
    ///
    /// # Errors
    ///
    /// Fails on an unknown counter or operator.
    pub fn parse(
        description: impl Into<String>,
        counter: &str,
        operator: &str,
        target: i64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(description, counter.parse()?, operator.parse()?, target))
    }

    /// Player-facing text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tested counter.
    #[must_use]
    pub const fn counter(&self) -> Counter {
        self.counter
    }

    /// Comparison.
    #[must_use]
    pub const fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    /// Target value.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// Whether the goal holds for `aggregates`.
    #[must_use]
    pub fn evaluate(&self, aggregates: &Aggregates) -> bool {
        let value = i64::from(self.counter.read(aggregates));
        self.operator.compare(value, self.target)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} {})",
            self.description, self.counter, self.operator, self.target
        )
    }
}
