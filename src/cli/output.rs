//! Output formatting utilities for CLI.

use super::autopilot::{Outcome, RunReport};
use serde::Serialize;
use std::fmt::Write;

/// Format a single run as human-readable text.
pub(super) fn format_report_text(report: &RunReport, goal: &str) -> String {
    let mut output = String::new();
    let a = &report.aggregates;

    let _ = writeln!(output, "Run Result (seed: {})", report.seed);
    if let Some(wall_seed) = report.wall_seed {
        let _ = writeln!(output, "  Wall seed: {wall_seed}");
    }
    let _ = writeln!(output, "  Outcome: {}", report.outcome.label());
    let _ = writeln!(
        output,
        "  Goal: {goal} [{}]",
        if report.goal_reached { "reached" } else { "open" }
    );
    let _ = writeln!(output, "  Ticks: {}", report.ticks);
    let _ = writeln!(output, "  Events: {}", report.events);
    let _ = writeln!(output, "  Shots fired: {}", report.shots_fired);
    output.push('\n');
    let _ = writeln!(output, "  Kills:       {}", a.kills);
    let _ = writeln!(output, "  Casualties:  {}", a.casualties);
    let _ = writeln!(output, "  Salvations:  {}", a.salvations);
    let _ = writeln!(output, "  Infected:    {}", a.infected);
    let _ = writeln!(output, "  Respawns:    {}", a.respawns);
    let _ = writeln!(output, "  Enemies:     {}", a.enemy_count);
    let _ = writeln!(output, "  Time left:   {:03}s", a.time_remaining);

    output
}

/// Aggregated results over many runs.
#[derive(Debug, Default)]
pub(super) struct SoakStats {
    /// Runs finished.
    pub(super) runs: u64,
    /// Runs per outcome, in [`OUTCOMES`] order.
    outcomes: [u64; 4],
    /// Runs where the goal was met.
    goals_reached: u64,
    /// Runs that failed to build.
    pub(super) failures: u64,
    total_ticks: u64,
    total_kills: u64,
    total_casualties: u64,
    total_salvations: u64,
    total_respawns: u64,
}

/// Outcomes in reporting order.
const OUTCOMES: [Outcome; 4] = [
    Outcome::Completed,
    Outcome::TimeUp,
    Outcome::Interrupted,
    Outcome::TickLimit,
];

const fn outcome_index(outcome: Outcome) -> usize {
    match outcome {
        Outcome::Completed => 0,
        Outcome::TimeUp => 1,
        Outcome::Interrupted => 2,
        Outcome::TickLimit => 3,
    }
}

impl SoakStats {
    /// Add one run.
    pub(super) fn add_report(&mut self, report: &RunReport) {
        self.runs += 1;
        self.outcomes[outcome_index(report.outcome)] += 1;
        if report.goal_reached {
            self.goals_reached += 1;
        }
        let a = &report.aggregates;
        self.total_ticks += report.ticks;
        self.total_kills += u64::from(a.kills);
        self.total_casualties += u64::from(a.casualties);
        self.total_salvations += u64::from(a.salvations);
        self.total_respawns += u64::from(a.respawns);
    }

    /// Count a run that could not be built.
    pub(super) const fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge another thread's stats.
    pub(super) fn merge(&mut self, other: &Self) {
        self.runs += other.runs;
        for (mine, theirs) in self.outcomes.iter_mut().zip(other.outcomes) {
            *mine += theirs;
        }
        self.goals_reached += other.goals_reached;
        self.failures += other.failures;
        self.total_ticks += other.total_ticks;
        self.total_kills += other.total_kills;
        self.total_casualties += other.total_casualties;
        self.total_salvations += other.total_salvations;
        self.total_respawns += other.total_respawns;
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self, total: u64) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            total as f64 / self.runs as f64
        }
    }

    fn rate(&self, count: u64) -> f64 {
        self.mean(count) * 100.0
    }
}

/// JSON-serializable soak result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSoakResult {
    /// Runs finished.
    runs: u64,
    /// Runs that failed to build.
    failures: u64,
    /// Runs per outcome label.
    outcomes: Vec<JsonOutcome>,
    /// Share of runs where the goal was met, in percent.
    goal_rate: f64,
    /// Mean ticks per run.
    mean_ticks: f64,
    /// Mean kills per run.
    mean_kills: f64,
    /// Mean casualties per run.
    mean_casualties: f64,
    /// Mean salvations per run.
    mean_salvations: f64,
    /// Mean respawns per run.
    mean_respawns: f64,
}

/// One outcome row.
#[derive(Debug, Serialize)]
struct JsonOutcome {
    outcome: Outcome,
    count: u64,
}

impl JsonSoakResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &SoakStats) -> Self {
        Self {
            runs: stats.runs,
            failures: stats.failures,
            outcomes: OUTCOMES
                .iter()
                .map(|&outcome| JsonOutcome {
                    outcome,
                    count: stats.outcomes[outcome_index(outcome)],
                })
                .collect(),
            goal_rate: stats.rate(stats.goals_reached),
            mean_ticks: stats.mean(stats.total_ticks),
            mean_kills: stats.mean(stats.total_kills),
            mean_casualties: stats.mean(stats.total_casualties),
            mean_salvations: stats.mean(stats.total_salvations),
            mean_respawns: stats.mean(stats.total_respawns),
        }
    }
}

/// Format soak results as human-readable text.
pub(super) fn format_soak_text(stats: &SoakStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Soak Results ({} runs)", stats.runs);
    if stats.failures > 0 {
        let _ = writeln!(output, "  Failed to build: {}", stats.failures);
    }
    output.push('\n');

    let _ = writeln!(output, "  {:<14} {:>8} {:>8}", "Outcome", "Runs", "Rate");
    let _ = writeln!(output, "  {}", "-".repeat(32));
    for outcome in OUTCOMES {
        let count = stats.outcomes[outcome_index(outcome)];
        let _ = writeln!(
            output,
            "  {:<14} {:>8} {:>7.1}%",
            outcome.label(),
            count,
            stats.rate(count)
        );
    }
    output.push('\n');

    let _ = writeln!(output, "  Goal reached:    {:.1}%", stats.rate(stats.goals_reached));
    let _ = writeln!(output, "  Mean ticks:      {:.1}", stats.mean(stats.total_ticks));
    let _ = writeln!(output, "  Mean kills:      {:.2}", stats.mean(stats.total_kills));
    let _ = writeln!(output, "  Mean casualties: {:.2}", stats.mean(stats.total_casualties));
    let _ = writeln!(output, "  Mean salvations: {:.2}", stats.mean(stats.total_salvations));
    let _ = writeln!(output, "  Mean respawns:   {:.2}", stats.mean(stats.total_respawns));

    output
}

/// Format soak results as CSV.
pub(super) fn format_soak_csv(stats: &SoakStats) -> String {
    let mut output = String::from("outcome,runs,rate\n");
    for outcome in OUTCOMES {
        let count = stats.outcomes[outcome_index(outcome)];
        let _ = writeln!(output, "{},{},{:.4}", outcome.label(), count, stats.rate(count));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm::Aggregates;

    fn report(outcome: Outcome, kills: u32) -> RunReport {
        RunReport {
            seed: 1,
            wall_seed: None,
            ticks: 100,
            outcome,
            goal_reached: outcome == Outcome::Completed,
            aggregates: Aggregates {
                kills,
                ..Aggregates::default()
            },
            events: 0,
            shots_fired: 0,
        }
    }

    #[test]
    fn test_soak_stats_merge() {
        let mut a = SoakStats::default();
        a.add_report(&report(Outcome::Completed, 4));
        let mut b = SoakStats::default();
        b.add_report(&report(Outcome::TimeUp, 2));
        b.add_failure();

        a.merge(&b);
        assert_eq!(a.runs, 2);
        assert_eq!(a.failures, 1);
        assert_eq!(a.outcomes, [1, 1, 0, 0]);
        assert!((a.mean(a.total_kills) - 3.0).abs() < 1e-9);
        assert!((a.rate(a.goals_reached) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_soak_csv_lists_every_outcome() {
        let mut stats = SoakStats::default();
        stats.add_report(&report(Outcome::TickLimit, 0));
        let csv = format_soak_csv(&stats);
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.contains("tick_limit,1,100.0000"));
    }

    #[test]
    fn test_report_text_mentions_outcome() {
        let text = format_report_text(&report(Outcome::Completed, 7), "Kill things");
        assert!(text.contains("Outcome: completed"));
        assert!(text.contains("Kill things [reached]"));
        assert!(text.contains("Kills:       7"));
    }
}
