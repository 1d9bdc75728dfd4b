//! Match invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger for states the engine itself produced; a
//! violation indicates a bug in the step logic, not a gameplay condition.
//! States installed through a forced reset are exempt by design (the engine
//! accepts out-of-range forced positions uncorrected).

use crate::env::grid::{GoalZone, COLS, ROWS};
use crate::env::state::MatchState;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all match invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &MatchState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (idx, pos) in state.positions.iter().enumerate() {
        if !pos.in_bounds() {
            violations.push(InvariantViolation {
                message: format!(
                    "Agent {idx} at ({}, {}) is outside the {ROWS}x{COLS} pitch",
                    pos.row, pos.col
                ),
            });
        }
    }

    // A terminal state only arises from the holder standing in a goal zone.
    if state.done {
        let holder = state.holder_position();
        if !GoalZone::A.contains(holder) && !GoalZone::B.contains(holder) {
            violations.push(InvariantViolation {
                message: format!(
                    "Match is done but holder at ({}, {}) is in neither goal",
                    holder.row, holder.col
                ),
            });
        }
    }

    violations
}

/// Assert all match invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &MatchState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Match invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &MatchState) {}
