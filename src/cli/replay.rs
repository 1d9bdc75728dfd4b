//! Replay command implementation.

use super::CliError;
use gridball::render::render_board;
use gridball::replay::Recording;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Execute the replay command: re-run a recorded match.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or replayed.
pub(crate) fn execute(recording: PathBuf, delay_ms: u64) -> Result<(), CliError> {
    let recording = Recording::load(&recording)?;

    println!(
        "Replaying seed {} ({} steps recorded)",
        recording.seed,
        recording.actions.len()
    );
    println!();

    let mut env = recording.build_env();
    println!("{}", render_board(env.state()));

    for (step, &codes) in recording.actions.iter().enumerate() {
        if env.is_done() {
            return Err(CliError::new(format!(
                "recording continues past the terminal step (action {step})"
            )));
        }

        if delay_ms > 0 {
            thread::sleep(Duration::from_millis(delay_ms));
        }

        let outcome = env.step_codes(codes)?;
        println!("Step {}: actions [{}, {}]", step + 1, codes[0], codes[1]);
        println!("{}", render_board(env.state()));

        if outcome.done {
            let winner = if outcome.rewards[0] > 0 { 'A' } else { 'B' };
            println!("Agent {winner} scores (rewards {:?})", outcome.rewards);
        }
    }

    Ok(())
}
