//! Level validation command implementation.

use super::{load_level, CliError};
use std::path::Path;
use swarm::GameSession;

/// Seed used to try a full build of the level.
const PROBE_SEED: u64 = 0;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the level file is unreadable or invalid.
pub(crate) fn execute(level: &Path) -> Result<(), CliError> {
    println!("Validating: {}", level.display());
    println!();

    let config = match load_level(level) {
        Ok(config) => {
            print_check("JSON parses", true);
            config
        }
        Err(e) => {
            print_check("JSON parses", false);
            return Err(e);
        }
    };

    let checked = config.validate();
    print_check("Sections and values", checked.is_ok());
    checked?;

    let built = GameSession::from_config(&config, Some(config.seed.unwrap_or(PROBE_SEED)));
    print_check("Session builds", built.is_ok());
    let session = built?;

    println!();
    println!("Summary:");
    println!("  Stage:       {:.0} x {:.0}", session.stage().width(), session.stage().height());
    println!("  Walls:       {}", session.walls().len());
    println!("  Spawners:    {}", session.spawners().len());
    println!("  Entities:    {}", session.non_player_entities().len());
    println!("  Bombs:       {}", session.aggregates().bomb_count);
    println!("  Round:       {}", session.timer());
    println!("  Goal:        {}", session.goal());
    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
