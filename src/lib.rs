// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Gridball: a deterministic grid-soccer environment for RL experiments.
//!
//! This crate provides a discrete-time, two-agent soccer game on a 2x4
//! pitch, designed for:
//! - A reset/step interface producing observations, rewards, and a
//!   terminal flag from simultaneous actions
//! - Bit-exact deterministic execution from a seed
//! - Headless use, with rendering injected as an optional trace sink
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Episode Runner / Replay         │
//! ├─────────────────────────────────────┤
//! │        Match Engine (env)           │
//! ├─────────────────────────────────────┤
//! │   Pitch, Actions, Match State       │
//! └─────────────────────────────────────┘
//! ```

pub mod env;
pub mod error;
pub mod render;
pub mod replay;
pub mod rollout;

pub use error::{EnvError, EnvResult};

// Re-export key environment types at crate root for convenience
pub use env::{
    Action, AgentId, ForcedState, GOAL_REWARD, MatchState, MoveOrder, Observation, Position,
    SoccerEnv, StepOutcome,
};
