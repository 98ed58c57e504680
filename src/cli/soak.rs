//! Soak command implementation.

use super::autopilot::run_level;
use super::output::{format_soak_csv, format_soak_text, JsonSoakResult, SoakStats};
use super::{entropy_seed, load_level, CliError, SoakFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use swarm::DeltaTime;

/// Fixed step used by soak runs.
const SOAK_DT: f32 = 1.0 / 60.0;

/// Execute the soak command.
///
/// # Errors
///
/// Returns an error if the level cannot be loaded.
pub(crate) fn execute(
    level: &Path,
    runs: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    ticks: u64,
    format: SoakFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = load_level(level)?;
    config.validate()?;
    let dt = DeltaTime::new(SOAK_DT)?;

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(entropy_seed);

    let pb = if progress {
        let pb = ProgressBar::new(runs);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let stats = (0..runs)
        .into_par_iter()
        .fold(SoakStats::default, |mut local, i| {
            let run_seed = base_seed.wrapping_add(i);
            match run_level(&config, Some(run_seed), ticks, dt) {
                Ok(report) => local.add_report(&report),
                Err(e) => {
                    log::warn!("run with seed {run_seed} failed: {e}");
                    local.add_failure();
                }
            }
            local
        })
        .reduce(SoakStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.set_position(stats.runs + stats.failures);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let runs_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.runs as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SoakFormat::Text => {
            println!();
            print!("{}", format_soak_text(&stats));
            println!();
            println!("Duration: {:.2}s ({:.0} runs/sec)", duration.as_secs_f64(), runs_per_sec);
        }
        SoakFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSoakResult::from_stats(&stats))?;
            println!("{json}");
        }
        SoakFormat::Csv => {
            print!("{}", format_soak_csv(&stats));
        }
    }

    Ok(())
}
