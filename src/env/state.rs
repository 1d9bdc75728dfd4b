//! Match state and its read-only projections.

use crate::env::grid::Position;

/// Reward magnitude paid out on a goal.
pub const GOAL_REWARD: i32 = 100;

/// Rewards for one step, indexed by agent.
pub type RewardPair = [i32; 2];

/// One of the two agents on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    /// Agent A (index 0), defending the column-0 goal.
    A,
    /// Agent B (index 1), defending the column-3 goal.
    B,
}

impl AgentId {
    /// Index of this agent (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            AgentId::A => 0,
            AgentId::B => 1,
        }
    }

    /// The opposing agent.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            AgentId::A => AgentId::B,
            AgentId::B => AgentId::A,
        }
    }

    /// Decode a possession slot (0 selects A, anything else B).
    #[must_use]
    pub const fn from_slot(slot: u8) -> Self {
        if slot == 0 { AgentId::A } else { AgentId::B }
    }
}

/// Full state of a match: both agent positions, possession, terminal flag.
///
/// Mutated only by the engine. Once `done` is set, the state is frozen until
/// the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    /// Agent positions, indexed by [`AgentId::index`].
    pub positions: [Position; 2],
    /// Which agent currently holds the ball. There is no loose-ball state.
    pub possession: AgentId,
    /// Whether the match has ended.
    pub done: bool,
}

impl MatchState {
    /// Position of the given agent.
    #[must_use]
    pub const fn position(&self, agent: AgentId) -> Position {
        self.positions[agent.index()]
    }

    /// Position of the current ball holder.
    #[must_use]
    pub const fn holder_position(&self) -> Position {
        self.positions[self.possession.index()]
    }

    /// The observation projected from this state.
    #[must_use]
    pub const fn observation(&self) -> Observation {
        Observation {
            a: self.positions[0],
            b: self.positions[1],
            possession: self.possession,
        }
    }
}

/// Read-only projection of [`MatchState`] exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Agent A's position.
    pub a: Position,
    /// Agent B's position.
    pub b: Position,
    /// Which agent holds the ball.
    pub possession: AgentId,
}

impl Observation {
    /// Fixed-shape tensor view: three 2-element rows.
    ///
    /// The last row is `[possession, 0]`; the trailing zero is shape padding
    /// with no meaning, kept so consumers see uniform-width rows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_rows(self) -> [[u8; 2]; 3] {
        [
            [self.a.row, self.a.col],
            [self.b.row, self.b.col],
            [self.possession.index() as u8, 0],
        ]
    }
}

/// Explicit initial state for a deterministic reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedState {
    /// Agent A's position.
    pub a: Position,
    /// Agent B's position.
    pub b: Position,
    /// Initial ball holder.
    pub possession: AgentId,
}

impl ForcedState {
    /// Decode the five-slot wire tuple `[a_y, a_x, b_y, b_x, possession]`.
    ///
    /// The slot mapping is part of the wire contract and is not symmetric:
    /// A's `(row, col)` reads `(a_x, a_y)` while B's reads `(b_y, b_x)`.
    /// Out-of-range slot values are accepted uncorrected; the next step's
    /// clamping brings positions back onto the pitch.
    #[must_use]
    pub const fn from_slots(slots: [u8; 5]) -> Self {
        Self {
            a: Position::new(slots[1], slots[0]),
            b: Position::new(slots[2], slots[3]),
            possession: AgentId::from_slot(slots[4]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_index_and_other() {
        assert_eq!(AgentId::A.index(), 0);
        assert_eq!(AgentId::B.index(), 1);
        assert_eq!(AgentId::A.other(), AgentId::B);
        assert_eq!(AgentId::B.other(), AgentId::A);
    }

    #[test]
    fn test_observation_rows_shape() {
        let state = MatchState {
            positions: [Position::new(0, 1), Position::new(1, 2)],
            possession: AgentId::B,
            done: false,
        };
        let rows = state.observation().to_rows();
        assert_eq!(rows, [[0, 1], [1, 2], [1, 0]]);
    }

    #[test]
    fn test_forced_state_slot_mapping() {
        // Wire order [a_y, a_x, b_y, b_x, possession]:
        // A reads (a_x, a_y), B reads (b_y, b_x)
        let forced = ForcedState::from_slots([1, 0, 1, 1, 0]);
        assert_eq!(forced.a, Position::new(0, 1));
        assert_eq!(forced.b, Position::new(1, 1));
        assert_eq!(forced.possession, AgentId::A);
    }

    #[test]
    fn test_possession_slot_nonzero_selects_b() {
        assert_eq!(AgentId::from_slot(0), AgentId::A);
        assert_eq!(AgentId::from_slot(1), AgentId::B);
        assert_eq!(AgentId::from_slot(7), AgentId::B);
    }

    #[test]
    fn test_holder_position() {
        let state = MatchState {
            positions: [Position::new(0, 1), Position::new(1, 2)],
            possession: AgentId::B,
            done: false,
        };
        assert_eq!(state.holder_position(), Position::new(1, 2));
    }
}
