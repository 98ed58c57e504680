//! Swarm CLI - headless runs and soak tests of arena levels.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Swarm - a deterministic arena survival simulation
#[derive(Parser, Debug)]
#[command(name = "swarm")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one level headless with the built-in autopilot
    Run {
        /// Level file (JSON)
        #[arg(required = true)]
        level: std::path::PathBuf,

        /// Session seed (default: the level's seed, else random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum ticks (default: 7200)
        #[arg(short, long, default_value = "7200")]
        ticks: u64,

        /// Seconds per tick (default: 1/60)
        #[arg(long, default_value = "0.016666668")]
        dt: f32,

        /// Output format: text, json, or snapshot
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many seeded sessions of one level in parallel
    Soak {
        /// Level file (JSON)
        #[arg(required = true)]
        level: std::path::PathBuf,

        /// Number of sessions to run (default: 100)
        #[arg(short, long, default_value = "100")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum ticks per session (default: 7200)
        #[arg(short, long, default_value = "7200")]
        ticks: u64,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SoakFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Check a level file without running it
    Validate {
        /// Level file (JSON)
        #[arg(required = true)]
        level: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            level,
            seed,
            ticks,
            dt,
            format,
        } => cli::run::execute(&level, seed, ticks, dt, format),

        Commands::Soak {
            level,
            runs,
            seed,
            threads,
            ticks,
            format,
            progress,
        } => cli::soak::execute(&level, runs, seed, threads, ticks, format, progress),

        Commands::Validate { level } => cli::validate::execute(&level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
