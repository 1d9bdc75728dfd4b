//! Environment core for gridball.
//!
//! Implements the match rules:
//! - A 2x4 pitch with one goal zone per side
//! - Two agents with exclusive ball possession
//! - Simultaneous actions resolved through a random per-step move order
//! - Movement clamping, collision resolution with possession transfer,
//!   and goal detection

mod action;
mod engine;
mod grid;
mod invariants;
mod state;

pub use action::Action;
pub use engine::{MoveOrder, SoccerEnv, StepOutcome};
pub use grid::{COLS, GoalZone, Position, ROWS};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use state::{AgentId, ForcedState, GOAL_REWARD, MatchState, Observation, RewardPair};
