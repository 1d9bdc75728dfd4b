//! Gridball CLI - Command-line interface for running and viewing matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Gridball - a deterministic grid-soccer environment
#[derive(Parser, Debug)]
#[command(name = "gridball")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single random-policy match, printing the board each step
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum steps (default: 1000)
        #[arg(short, long, default_value = "1000")]
        max_steps: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress step-by-step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel episodes and aggregate statistics
    Rollout {
        /// Number of episodes to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        episodes: u64,

        /// Starting seed (increments for each episode)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum steps per episode (default: 1000)
        #[arg(short, long, default_value = "1000")]
        max_steps: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::RolloutFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Replay a recorded match
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: std::path::PathBuf,

        /// Step delay in milliseconds (default: 0)
        #[arg(long, default_value = "0")]
        delay: u64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            seed,
            max_steps,
            format,
            save,
            quiet,
        } => cli::play::execute(seed, max_steps, format, save, quiet),

        Commands::Rollout {
            episodes,
            seed,
            threads,
            max_steps,
            format,
            progress,
        } => cli::rollout::execute(episodes, seed, threads, max_steps, format, progress),

        Commands::Replay { recording, delay } => cli::replay::execute(recording, delay),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
