//! Pitch geometry: cells, bounds, and goal zones.

/// Number of rows on the pitch.
pub const ROWS: u8 = 2;

/// Number of columns on the pitch.
pub const COLS: u8 = 4;

/// A cell on the 2x4 pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Row index (0..=1 for cells on the pitch).
    pub row: u8,
    /// Column index (0..=3 for cells on the pitch).
    pub col: u8,
}

impl Position {
    /// Create a new position.
    ///
    /// Values outside the pitch are accepted uncorrected; movement clamping
    /// brings them back in range on the next step.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check whether this position lies on the pitch.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Apply a `(row, col)` displacement, clamping each coordinate
    /// independently to the pitch bounds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offset_clamped(self, d_row: i8, d_col: i8) -> Self {
        let row = (i16::from(self.row) + i16::from(d_row)).clamp(0, i16::from(ROWS) - 1);
        let col = (i16::from(self.col) + i16::from(d_col)).clamp(0, i16::from(COLS) - 1);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }
}

/// The two cells constituting one team's goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalZone {
    cells: [Position; 2],
}

impl GoalZone {
    /// Agent A's own goal: column 0, both rows.
    pub const A: GoalZone = GoalZone {
        cells: [Position::new(0, 0), Position::new(1, 0)],
    };

    /// Agent B's own goal: column 3, both rows.
    pub const B: GoalZone = GoalZone {
        cells: [Position::new(0, 3), Position::new(1, 3)],
    };

    /// The cells of this goal zone.
    #[must_use]
    pub const fn cells(self) -> [Position; 2] {
        self.cells
    }

    /// Check whether a position lies inside this goal zone.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        (self.cells[0].row == pos.row && self.cells[0].col == pos.col)
            || (self.cells[1].row == pos.row && self.cells[1].col == pos.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamped_interior() {
        let pos = Position::new(0, 1);
        assert_eq!(pos.offset_clamped(1, 0), Position::new(1, 1));
        assert_eq!(pos.offset_clamped(0, 1), Position::new(0, 2));
        assert_eq!(pos.offset_clamped(0, -1), Position::new(0, 0));
    }

    #[test]
    fn test_offset_clamped_walls() {
        // Moving off each edge sticks to the wall
        assert_eq!(Position::new(0, 0).offset_clamped(-1, 0), Position::new(0, 0));
        assert_eq!(Position::new(0, 0).offset_clamped(0, -1), Position::new(0, 0));
        assert_eq!(Position::new(1, 3).offset_clamped(1, 0), Position::new(1, 3));
        assert_eq!(Position::new(1, 3).offset_clamped(0, 1), Position::new(1, 3));
    }

    #[test]
    fn test_offset_clamped_recovers_out_of_range() {
        // Out-of-range positions (from a forced reset) come back in range
        let pos = Position::new(7, 9);
        assert_eq!(pos.offset_clamped(0, 0), Position::new(1, 3));
    }

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(0, 0).in_bounds());
        assert!(Position::new(1, 3).in_bounds());
        assert!(!Position::new(2, 0).in_bounds());
        assert!(!Position::new(0, 4).in_bounds());
    }

    #[test]
    fn test_goal_zones() {
        assert!(GoalZone::A.contains(Position::new(0, 0)));
        assert!(GoalZone::A.contains(Position::new(1, 0)));
        assert!(!GoalZone::A.contains(Position::new(0, 1)));

        assert!(GoalZone::B.contains(Position::new(0, 3)));
        assert!(GoalZone::B.contains(Position::new(1, 3)));
        assert!(!GoalZone::B.contains(Position::new(1, 2)));
    }

    #[test]
    fn test_goal_zones_disjoint() {
        for cell in GoalZone::A.cells() {
            assert!(!GoalZone::B.contains(cell));
        }
    }
}
