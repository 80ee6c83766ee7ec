//! Boundary with the display and input layer
//!
//! The engine never touches display state. A frontend renders a board with a
//! highlighted column and reports discrete input events; the game loop that
//! ties the two to [`compute_move`](crate::compute_move) lives with the
//! frontend.

use crate::board::{Board, COLS};

/// Discrete input reported by a frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Confirm,
    Quit,
}

/// A display-and-input collaborator
pub trait Frontend {
    /// Draws `board` with `cursor` highlighted
    fn render(&mut self, board: &Board, cursor: &ColumnCursor);

    /// Returns the next input event, or `None` if input is exhausted
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// The column currently highlighted for the human player
///
/// Columns are 0-indexed; frontends showing 1-indexed labels add one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnCursor {
    column: usize,
}

impl ColumnCursor {
    /// Creates a cursor on `column`, clamped to the board
    pub fn new(column: usize) -> Self {
        ColumnCursor {
            column: column.min(COLS - 1),
        }
    }

    /// Returns the highlighted column
    pub fn column(&self) -> usize {
        self.column
    }

    /// Moves one column left, stopping at the edge
    pub fn move_left(&mut self) {
        self.column = self.column.saturating_sub(1);
    }

    /// Moves one column right, stopping at the edge
    pub fn move_right(&mut self) {
        if self.column + 1 < COLS {
            self.column += 1;
        }
    }

    /// Applies a movement event; returns the column on `Confirm`
    pub fn handle(&mut self, event: InputEvent) -> Option<usize> {
        match event {
            InputEvent::MoveLeft => self.move_left(),
            InputEvent::MoveRight => self.move_right(),
            InputEvent::Confirm => return Some(self.column),
            InputEvent::Quit => {}
        }
        None
    }
}
