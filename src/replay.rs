//! Match recording and replay.
//!
//! Because the environment is deterministic given its seed, a recording is
//! just the seed (or an explicit forced initial state) plus the per-step
//! action codes. Replaying rebuilds a freshly seeded engine and re-runs the
//! steps; no state deltas are stored.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::env::{ForcedState, SoccerEnv, StepOutcome};
use crate::error::EnvError;

/// Minimal recording of one episode: seed, optional forced start, actions.
///
/// A recording replays faithfully when the original episode ran on a
/// freshly constructed engine (one seed, one episode), which is how the
/// CLI and the episode runner operate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Engine seed.
    pub seed: u64,
    /// Forced initial state in wire order `[a_y, a_x, b_y, b_x, possession]`,
    /// if the episode did not use sampled initial conditions.
    pub forced: Option<[u8; 5]>,
    /// Per-step action code pairs.
    pub actions: Vec<[u8; 2]>,
}

impl Recording {
    /// Create an empty recording for a sampled-start episode.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            forced: None,
            actions: Vec::new(),
        }
    }

    /// Create an empty recording for a forced-start episode.
    #[must_use]
    pub const fn with_forced(seed: u64, slots: [u8; 5]) -> Self {
        Self {
            seed,
            forced: Some(slots),
            actions: Vec::new(),
        }
    }

    /// Append one step's action codes.
    pub fn push_step(&mut self, codes: [u8; 2]) {
        self.actions.push(codes);
    }

    /// Save the recording as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or the format is invalid.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        let recording = serde_json::from_reader(BufReader::new(file))?;
        Ok(recording)
    }

    /// Rebuild the engine this recording was made on.
    #[must_use]
    pub fn build_env(&self) -> SoccerEnv {
        let mut env = SoccerEnv::from_seed(self.seed);
        if let Some(slots) = self.forced {
            env.reset_forced(ForcedState::from_slots(slots));
        }
        env
    }

    /// Re-run the recorded episode, returning every step outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if an action code is invalid or the action list
    /// continues past the terminal step.
    pub fn replay(&self) -> Result<Vec<StepOutcome>, ReplayError> {
        let mut env = self.build_env();
        let mut outcomes = Vec::with_capacity(self.actions.len());
        for (step, &codes) in self.actions.iter().enumerate() {
            if env.is_done() {
                return Err(ReplayError::TrailingActions { step });
            }
            outcomes.push(env.step_codes(codes)?);
        }
        Ok(outcomes)
    }
}

/// Error type for recording operations.
#[derive(Debug)]
pub enum ReplayError {
    /// File I/O failed.
    Io(io::Error),
    /// The recording file is not valid JSON of the expected shape.
    Format(serde_json::Error),
    /// A recorded action code is outside `{0..=4}`.
    InvalidAction(u8),
    /// The action list continues past the terminal step.
    TrailingActions {
        /// Index of the first action beyond the terminal step.
        step: usize,
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "recording I/O failed: {e}"),
            ReplayError::Format(e) => write!(f, "invalid recording format: {e}"),
            ReplayError::InvalidAction(code) => {
                write!(f, "recorded action code {code} is invalid")
            }
            ReplayError::TrailingActions { step } => {
                write!(f, "recording continues past the terminal step (action {step})")
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(e) => Some(e),
            ReplayError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        ReplayError::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Format(e)
    }
}

impl From<EnvError> for ReplayError {
    fn from(e: EnvError) -> Self {
        match e {
            EnvError::InvalidAction(code) => ReplayError::InvalidAction(code),
        }
    }
}
