//! ANSI board renderer and the trace sink capability.
//!
//! Pure presentation: rendering never touches match state and a sink can
//! neither fail nor block the engine.

use std::io::Write;

use crate::env::{AgentId, COLS, GoalZone, MatchState, Position, ROWS};

/// Reverse-video tints, one per occupant kind.
const GOAL_TINT: &str = "\x1b[7;32m"; // green
const AGENT_A_TINT: &str = "\x1b[7;31m"; // red
const AGENT_B_TINT: &str = "\x1b[7;34m"; // blue
const SHARED_TINT: &str = "\x1b[7;35m"; // magenta
const RESET: &str = "\x1b[0m";

/// Ball glyph, padded to one cell.
const BALL: &str = " ⚽ ";
/// An empty cell.
const EMPTY: &str = "   ";

/// Receives one rendered board per resolved step.
///
/// Implementations must not panic; the engine treats tracing as
/// fire-and-forget.
pub trait TraceSink {
    /// Consume one rendered board.
    fn emit(&mut self, board: &str);
}

/// A [`TraceSink`] writing boards to any [`Write`] target, ignoring I/O
/// errors so tracing can never fail the engine.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer as a trace sink.
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn emit(&mut self, board: &str) {
        let _ = writeln!(self.inner, "{board}");
    }
}

/// A [`TraceSink`] collecting rendered boards in memory, for tests and
/// headless consumers.
#[derive(Debug, Default)]
pub struct BufferSink {
    boards: Vec<String>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { boards: Vec::new() }
    }

    /// The boards collected so far.
    #[must_use]
    pub fn boards(&self) -> &[String] {
        &self.boards
    }
}

impl TraceSink for BufferSink {
    fn emit(&mut self, board: &str) {
        self.boards.push(board.to_string());
    }
}

/// Render the 2x4 board with ANSI tints.
///
/// Goal cells are tinted green, agent A red, agent B blue; the ball glyph is
/// drawn at the holder's cell, and a shared cell collapses to a single
/// magenta ball. Out-of-range positions (possible after a forced reset) are
/// simply not drawn.
#[must_use]
pub fn render_board(state: &MatchState) -> String {
    let mut cells: [[String; COLS as usize]; ROWS as usize] =
        std::array::from_fn(|_| std::array::from_fn(|_| EMPTY.to_string()));

    for pos in GoalZone::A.cells() {
        paint(&mut cells, pos, GOAL_TINT, " A ");
    }
    for pos in GoalZone::B.cells() {
        paint(&mut cells, pos, GOAL_TINT, " B ");
    }

    let a = state.position(AgentId::A);
    let b = state.position(AgentId::B);
    if a == b {
        paint(&mut cells, a, SHARED_TINT, BALL);
    } else {
        let (a_text, b_text) = match state.possession {
            AgentId::A => (BALL, EMPTY),
            AgentId::B => (EMPTY, BALL),
        };
        paint(&mut cells, a, AGENT_A_TINT, a_text);
        paint(&mut cells, b, AGENT_B_TINT, b_text);
    }

    let mut output = String::new();
    for row in &cells {
        for cell in row {
            output.push_str(cell);
        }
        output.push('\n');
    }
    output
}

/// Write a tinted cell, skipping positions off the board.
fn paint(
    cells: &mut [[String; COLS as usize]; ROWS as usize],
    pos: Position,
    tint: &str,
    text: &str,
) {
    if let Some(cell) = cells
        .get_mut(usize::from(pos.row))
        .and_then(|row| row.get_mut(usize::from(pos.col)))
    {
        *cell = format!("{tint}{text}{RESET}");
    }
}
