//! Run command implementation.

use super::autopilot::play;
use super::output::format_report_text;
use super::{load_level, CliError, OutputFormat};
use std::path::Path;
use swarm::{DeltaTime, GameSession};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the level cannot be loaded or built.
pub(crate) fn execute(
    level: &Path,
    seed: Option<u64>,
    ticks: u64,
    dt: f32,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = load_level(level)?;
    let dt = DeltaTime::new(dt)?;

    let mut session = GameSession::from_config(&config, seed)?;
    log::info!(
        "running {} with seed {} for at most {ticks} ticks",
        level.display(),
        session.seed()
    );
    let report = play(&mut session, config.player.speed, ticks, dt);

    match format {
        OutputFormat::Text => {
            print!("{}", format_report_text(&report, session.goal().description()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Snapshot => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
    }

    Ok(())
}
