//! Agent actions and their displacement vectors.

use crate::error::EnvError;

/// One agent's action for a step.
///
/// The integer codes and `(row, col)` displacements form the wire contract
/// with the training scripts that drive this environment:
///
/// | code | action | displacement |
/// |------|--------|--------------|
/// | 0    | North  | `(0, 1)`     |
/// | 1    | East   | `(1, 0)`     |
/// | 2    | South  | `(0, -1)`    |
/// | 3    | West   | `(-1, 0)`    |
/// | 4    | Stay   | `(0, 0)`     |
///
/// The compass names do not match the displacement axes (North moves along
/// columns, East along rows). The mapping is kept literally for action-code
/// compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    /// Code 0: displacement `(0, 1)`.
    North = 0,
    /// Code 1: displacement `(1, 0)`.
    East = 1,
    /// Code 2: displacement `(0, -1)`.
    South = 2,
    /// Code 3: displacement `(-1, 0)`.
    West = 3,
    /// Code 4: no displacement.
    Stay = 4,
}

impl Action {
    /// All actions, indexed by code.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::East,
        Action::South,
        Action::West,
        Action::Stay,
    ];

    /// The integer code for this action.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode an integer action code.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidAction`] for codes outside `{0..=4}`.
    pub const fn from_code(code: u8) -> Result<Self, EnvError> {
        match code {
            0 => Ok(Action::North),
            1 => Ok(Action::East),
            2 => Ok(Action::South),
            3 => Ok(Action::West),
            4 => Ok(Action::Stay),
            _ => Err(EnvError::InvalidAction(code)),
        }
    }

    /// The `(row, col)` displacement this action attempts.
    #[must_use]
    pub const fn displacement(self) -> (i8, i8) {
        match self {
            Action::North => (0, 1),
            Action::East => (1, 0),
            Action::South => (0, -1),
            Action::West => (-1, 0),
            Action::Stay => (0, 0),
        }
    }
}
