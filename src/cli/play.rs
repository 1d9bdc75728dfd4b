//! Play command implementation.

use super::{CliError, OutputFormat};
use gridball::render::render_board;
use gridball::replay::Recording;
use gridball::{Action, SoccerEnv};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;

/// JSON projection of a finished episode.
#[derive(Debug, Serialize)]
struct JsonEpisode {
    seed: u64,
    steps: u32,
    winner: Option<char>,
    reward_a: i32,
    reward_b: i32,
}

/// Execute the play command: one random-policy episode.
///
/// # Errors
///
/// Returns an error if saving the recording or serializing output fails.
pub(crate) fn execute(
    seed: Option<u64>,
    max_steps: u32,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    if !quiet {
        println!("Playing match with seed {seed}...");
        println!();
    }

    let mut env = SoccerEnv::from_seed(seed);
    let mut policy = ChaCha8Rng::seed_from_u64(seed);
    let mut recording = Recording::new(seed);

    if !quiet {
        println!("{}", render_board(env.state()));
    }

    let mut steps = 0u32;
    let mut rewards = [0i32, 0];
    let mut winner = None;

    while steps < max_steps {
        let actions = [draw_action(&mut policy), draw_action(&mut policy)];
        let codes = [actions[0].code(), actions[1].code()];
        recording.push_step(codes);

        let outcome = env.step(actions);
        steps += 1;

        if !quiet {
            println!("Step {steps}: actions [{}, {}]", codes[0], codes[1]);
            println!("{}", render_board(env.state()));
        }

        if outcome.done {
            rewards = outcome.rewards;
            winner = Some(if outcome.rewards[0] > 0 { 'A' } else { 'B' });
            break;
        }
    }

    // Save recording if requested
    if let Some(save_path) = save {
        recording
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if !quiet {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => match winner {
            Some(agent) => {
                println!("Agent {agent} scores after {steps} steps (rewards {rewards:?})");
            }
            None => println!("No goal within {steps} steps"),
        },
        OutputFormat::Json => {
            let json_result = JsonEpisode {
                seed,
                steps,
                winner,
                reward_a: rewards[0],
                reward_b: rewards[1],
            };
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Draw a uniformly random action for one agent.
fn draw_action(rng: &mut ChaCha8Rng) -> Action {
    Action::ALL[rng.gen_range(0..Action::ALL.len())]
}
