//! Rollout command implementation.

use super::{CliError, RolloutFormat};
use gridball::rollout::{run_batch, EpisodeConfig, RolloutStats};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Instant;

/// JSON projection of aggregated rollout statistics.
#[derive(Debug, Serialize)]
struct JsonRollout {
    episodes: u64,
    a_wins: u64,
    b_wins: u64,
    unfinished: u64,
    mean_steps: f64,
    episodes_per_sec: f64,
}

/// Execute the rollout command: mass parallel episodes.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub(crate) fn execute(
    episodes: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_steps: u32,
    format: RolloutFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Base seed
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let config = EpisodeConfig { max_steps };

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(episodes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} episodes ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = run_batch(base_seed, episodes, &config);

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.episodes);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let episodes_per_sec = if duration.as_secs_f64() > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let n = stats.episodes as f64;
        n / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        RolloutFormat::Text => {
            println!();
            print!("{}", format_text(&stats, base_seed));
            println!();
            println!(
                "Duration: {:.2}s ({episodes_per_sec:.0} episodes/sec)",
                duration.as_secs_f64()
            );
        }
        RolloutFormat::Json => {
            let json_result = JsonRollout {
                episodes: stats.episodes,
                a_wins: stats.a_wins,
                b_wins: stats.b_wins,
                unfinished: stats.unfinished,
                mean_steps: stats.mean_steps(),
                episodes_per_sec,
            };
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        RolloutFormat::Csv => {
            print!("{}", format_csv(&stats));
        }
    }

    Ok(())
}

/// Human-readable rollout summary.
fn format_text(stats: &RolloutStats, base_seed: u64) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Rollout: {} episodes from seed {base_seed}\n",
        stats.episodes
    ));
    output.push_str(&format!("  Agent A wins: {}\n", stats.a_wins));
    output.push_str(&format!("  Agent B wins: {}\n", stats.b_wins));
    output.push_str(&format!("  Unfinished:   {}\n", stats.unfinished));
    output.push_str(&format!("  Mean length:  {:.1} steps\n", stats.mean_steps()));
    output
}

/// CSV rollout summary (header + one row).
fn format_csv(stats: &RolloutStats) -> String {
    let mut output = String::new();
    output.push_str("episodes,a_wins,b_wins,unfinished,mean_steps\n");
    output.push_str(&format!(
        "{},{},{},{},{:.2}\n",
        stats.episodes,
        stats.a_wins,
        stats.b_wins,
        stats.unfinished,
        stats.mean_steps()
    ));
    output
}
