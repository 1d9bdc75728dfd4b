//! Episode runner for gridball matches.
//!
//! Provides a pure function interface: `(seed, config) -> EpisodeResult`.
//! Episodes run under a uniform-random policy, which is all this environment
//! needs for throughput measurements and rule smoke-testing; learning
//! algorithms live outside this crate.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::env::{Action, AgentId, SoccerEnv};

/// Seed salt separating the policy stream from the engine stream, so the
/// two sequences of draws stay independent for a given episode seed.
const POLICY_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Configuration for episode runs.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeConfig {
    /// Maximum steps before an episode is cut off unfinished.
    pub max_steps: u32,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self { max_steps: 1000 }
    }
}

/// Final result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeResult {
    /// The seed this episode ran with.
    pub seed: u64,
    /// Steps taken, including the terminal one.
    pub steps: u32,
    /// The scoring agent (None if the episode was cut off).
    pub winner: Option<AgentId>,
    /// Rewards returned by the final step.
    pub rewards: [i32; 2],
}

/// Run a complete episode under a uniform-random policy.
///
/// This is a pure function: the same seed and config always produce the
/// same `EpisodeResult`.
#[must_use]
pub fn run_episode(seed: u64, config: &EpisodeConfig) -> EpisodeResult {
    let mut env = SoccerEnv::from_seed(seed);
    let mut policy = ChaCha8Rng::seed_from_u64(seed ^ POLICY_SEED_SALT);

    let mut steps = 0u32;
    let mut rewards = [0i32, 0];
    let mut winner = None;

    while steps < config.max_steps {
        let actions = [random_action(&mut policy), random_action(&mut policy)];
        let outcome = env.step(actions);
        steps += 1;
        if outcome.done {
            rewards = outcome.rewards;
            winner = if outcome.rewards[0] > 0 {
                Some(AgentId::A)
            } else {
                Some(AgentId::B)
            };
            break;
        }
    }

    EpisodeResult {
        seed,
        steps,
        winner,
        rewards,
    }
}

/// Draw a uniformly random action.
fn random_action<R: Rng>(rng: &mut R) -> Action {
    Action::ALL[rng.gen_range(0..Action::ALL.len())]
}

/// Aggregate statistics over many episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloutStats {
    /// Episodes completed (finished or cut off).
    pub episodes: u64,
    /// Episodes won by agent A.
    pub a_wins: u64,
    /// Episodes won by agent B.
    pub b_wins: u64,
    /// Episodes cut off at the step limit.
    pub unfinished: u64,
    /// Total steps across all episodes.
    pub total_steps: u64,
}

impl RolloutStats {
    /// Fold one episode result into the stats.
    pub fn add_result(&mut self, result: &EpisodeResult) {
        self.episodes += 1;
        self.total_steps += u64::from(result.steps);
        match result.winner {
            Some(AgentId::A) => self.a_wins += 1,
            Some(AgentId::B) => self.b_wins += 1,
            None => self.unfinished += 1,
        }
    }

    /// Merge another stats accumulator into this one.
    pub fn merge(&mut self, other: &RolloutStats) {
        self.episodes += other.episodes;
        self.a_wins += other.a_wins;
        self.b_wins += other.b_wins;
        self.unfinished += other.unfinished;
        self.total_steps += other.total_steps;
    }

    /// Mean episode length in steps.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_steps(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }
}

/// Run `episodes` episodes in parallel, seeds `start_seed..start_seed + n`.
///
/// Uses a lock-free fold/reduce: each worker accumulates into its own
/// [`RolloutStats`], merged at the end.
#[must_use]
pub fn run_batch(start_seed: u64, episodes: u64, config: &EpisodeConfig) -> RolloutStats {
    (0..episodes)
        .into_par_iter()
        .fold(RolloutStats::default, |mut local, i| {
            let result = run_episode(start_seed.wrapping_add(i), config);
            local.add_result(&result);
            local
        })
        .reduce(RolloutStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_deterministic() {
        let config = EpisodeConfig::default();
        assert_eq!(run_episode(42, &config), run_episode(42, &config));
    }

    #[test]
    fn test_episode_respects_step_limit() {
        let config = EpisodeConfig { max_steps: 3 };
        let result = run_episode(42, &config);
        assert!(result.steps <= 3);
        if result.steps == 3 && result.winner.is_none() {
            assert_eq!(result.rewards, [0, 0]);
        }
    }

    #[test]
    fn test_finished_episode_has_winner_and_rewards() {
        // Long limit: a random-policy episode on a 2x4 pitch ends quickly
        let config = EpisodeConfig { max_steps: 100_000 };
        let result = run_episode(7, &config);
        assert!(result.winner.is_some());
        let total: i32 = result.rewards.iter().sum();
        assert_eq!(total, 0, "goal rewards are zero-sum");
    }

    #[test]
    fn test_batch_counts_consistent() {
        let config = EpisodeConfig::default();
        let stats = run_batch(0, 50, &config);
        assert_eq!(stats.episodes, 50);
        assert_eq!(stats.a_wins + stats.b_wins + stats.unfinished, 50);
        assert!(stats.mean_steps() >= 1.0);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let config = EpisodeConfig::default();
        let batch = run_batch(10, 20, &config);

        let mut sequential = RolloutStats::default();
        for i in 0..20 {
            sequential.add_result(&run_episode(10 + i, &config));
        }
        assert_eq!(batch, sequential);
    }
}
