//! Connect Four board and rules
//!
//! The board is a 6×7 grid stored row-major with row 0 at the bottom:
//!
//! ```text
//! Row 5: . . . . . . .   <- Top (a column is legal iff this cell is empty)
//! Row 4: . . . . . . .
//! Row 3: . . . . . . .
//! Row 2: . . . . . . .
//! Row 1: . . . . . . .
//! Row 0: . . . . . . .   <- Bottom (pieces land here first)
//!        0 1 2 3 4 5 6
//! ```
//!
//! Every rule check is a pure function of a board value.

use std::fmt;

use crate::{Error, Result};

/// Number of rows on the board
pub const ROWS: usize = 6;

/// Number of columns on the board
pub const COLS: usize = 7;

/// Number of cells on the board
pub const CELLS: usize = ROWS * COLS;

/// Length of a winning line
const LINE: usize = 4;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The first side
    A,
    /// The second side
    B,
}

impl Player {
    /// Returns the opponent of this player
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "X"),
            Player::B => write!(f, "O"),
        }
    }
}

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    /// Returns the occupying player, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Returns true if nobody has played here
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A single placed piece, addressed by the cell it landed in
///
/// This is the unit the heuristic tables key on: two moves in the same column
/// at different heights are different actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    /// Row the piece landed in (0 = bottom)
    pub row: usize,
    /// Column the piece was dropped into (0-indexed)
    pub column: usize,
}

impl Action {
    /// Creates a new action for the given cell
    pub fn new(row: usize, column: usize) -> Self {
        Action { row, column }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Result of inspecting a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No line yet and at least one empty cell
    InProgress,
    /// The given player owns a line of four
    Win(Player),
    /// Every cell is occupied and nobody owns a line
    Tie,
}

impl Outcome {
    /// Returns true for `Win` and `Tie`
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Returns the winner, if any
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Connect Four position: the grid plus the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    turn: Player,
}

/// Direction vectors as (row, column) steps: horizontal, vertical, both diagonals
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Board {
    /// Creates an empty board with `first` to move
    pub fn new(first: Player) -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            turn: first,
        }
    }

    /// Builds a board from explicit cells (row 0 first) and the side to move
    ///
    /// No gravity check is made, which makes it convenient for constructing
    /// rule-check scenarios in tests.
    pub fn from_cells(cells: [[Cell; COLS]; ROWS], turn: Player) -> Self {
        Board { cells, turn }
    }

    /// Parses a board from text rows, top row first
    ///
    /// `X` is player A, `O` is player B, and `.` is empty. Rows may be fewer
    /// than six; missing top rows are empty.
    ///
    /// # Example
    ///
    /// ```
    /// use connect4_mcts::board::{Board, Outcome, Player};
    ///
    /// let board = Board::from_rows(&["XXXX..."], Player::B).unwrap();
    /// assert_eq!(board.check_outcome(), Outcome::Win(Player::A));
    /// ```
    pub fn from_rows(rows: &[&str], turn: Player) -> Result<Self> {
        if rows.len() > ROWS {
            return Err(Error::InvalidConfiguration(format!(
                "board has {} rows, expected at most {}",
                rows.len(),
                ROWS
            )));
        }

        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (i, text) in rows.iter().enumerate() {
            let row = rows.len() - 1 - i;
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != COLS {
                return Err(Error::InvalidConfiguration(format!(
                    "row {:?} has {} cells, expected {}",
                    text,
                    chars.len(),
                    COLS
                )));
            }
            for (column, ch) in chars.into_iter().enumerate() {
                cells[row][column] = match ch {
                    'X' | 'x' => Cell::Occupied(Player::A),
                    'O' | 'o' => Cell::Occupied(Player::B),
                    '.' | ' ' => Cell::Empty,
                    other => {
                        return Err(Error::InvalidConfiguration(format!(
                            "unexpected board character {:?}",
                            other
                        )))
                    }
                };
            }
        }

        Ok(Board { cells, turn })
    }

    /// Returns the side to move
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the cell at (row, column)
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Returns the cell an action refers to
    pub fn cell_at(&self, action: Action) -> Cell {
        self.cells[action.row][action.column]
    }

    /// Returns true if a piece can still be dropped into `column`
    pub fn is_column_legal(&self, column: usize) -> bool {
        column < COLS && self.cells[ROWS - 1][column].is_empty()
    }

    /// Returns all columns whose top cell is empty, left to right
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&c| self.is_column_legal(c)).collect()
    }

    /// Number of legal columns
    pub fn legal_column_count(&self) -> usize {
        (0..COLS).filter(|&c| self.is_column_legal(c)).count()
    }

    /// Returns the row a piece dropped in `column` would land in
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        if column >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][column].is_empty())
    }

    /// Drops the current player's piece into `column` and passes the turn
    ///
    /// On error the board is left unchanged.
    pub fn apply_move(&mut self, column: usize) -> Result<Action> {
        if column >= COLS {
            return Err(Error::InvalidColumn(column));
        }
        let row = self.drop_row(column).ok_or(Error::ColumnFull(column))?;

        self.cells[row][column] = Cell::Occupied(self.turn);
        self.turn = self.turn.other();
        Ok(Action::new(row, column))
    }

    /// Returns the board that results from dropping into `column`, or `None`
    /// if the column is full or out of range
    pub fn with_move(&self, column: usize) -> Option<(Board, Action)> {
        let mut next = *self;
        next.apply_move(column).ok().map(|action| (next, action))
    }

    /// Returns every board reachable in one move, left to right, with its action
    pub fn successors(&self) -> Vec<(Board, Action)> {
        (0..COLS).filter_map(|c| self.with_move(c)).collect()
    }

    /// Returns true if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.piece_count() == CELLS
    }

    /// Scans the whole board for a result
    ///
    /// A full board is only a tie after every line has been ruled out, since
    /// the last piece can complete a line and fill the board at once.
    pub fn check_outcome(&self) -> Outcome {
        if let Some(winner) = self.find_line() {
            return Outcome::Win(winner);
        }
        if self.is_full() {
            return Outcome::Tie;
        }
        Outcome::InProgress
    }

    /// Returns true if the board has a winner or is tied
    pub fn is_terminal(&self) -> bool {
        self.check_outcome().is_terminal()
    }

    /// Checks whether the piece at `action` completes a line of four
    ///
    /// Only the lines through that cell are examined, so this is the cheap
    /// check to run right after placing a piece.
    pub fn wins_at(&self, action: Action) -> bool {
        let player = match self.cell_at(action).player() {
            Some(player) => player,
            None => return false,
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.run_length(action, dr, dc, player)
                + self.run_length(action, -dr, -dc, player);
            count >= LINE
        })
    }

    /// Returns the single cell where `other` differs from this board
    ///
    /// Cells are scanned bottom row first, left to right. Returns `None` for
    /// identical boards.
    pub fn diff(&self, other: &Board) -> Option<Action> {
        for row in 0..ROWS {
            for column in 0..COLS {
                if self.cells[row][column] != other.cells[row][column] {
                    return Some(Action::new(row, column));
                }
            }
        }
        None
    }

    /// Returns true if both boards hold the same pieces, ignoring the turn
    pub fn same_cells(&self, other: &Board) -> bool {
        self.cells == other.cells
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    fn run_length(&self, from: Action, dr: isize, dc: isize, player: Player) -> usize {
        let mut count = 0;
        let mut row = from.row as isize + dr;
        let mut column = from.column as isize + dc;
        while (0..ROWS as isize).contains(&row)
            && (0..COLS as isize).contains(&column)
            && self.cells[row as usize][column as usize] == Cell::Occupied(player)
        {
            count += 1;
            row += dr;
            column += dc;
        }
        count
    }

    fn find_line(&self) -> Option<Player> {
        for row in 0..ROWS {
            for column in 0..COLS {
                let player = match self.cells[row][column].player() {
                    Some(player) => player,
                    None => continue,
                };
                for &(dr, dc) in &DIRECTIONS {
                    let end_row = row as isize + dr * (LINE as isize - 1);
                    let end_col = column as isize + dc * (LINE as isize - 1);
                    if !(0..ROWS as isize).contains(&end_row)
                        || !(0..COLS as isize).contains(&end_col)
                    {
                        continue;
                    }
                    let complete = (1..LINE as isize).all(|k| {
                        let r = (row as isize + dr * k) as usize;
                        let c = (column as isize + dc * k) as usize;
                        self.cells[r][c] == Cell::Occupied(player)
                    });
                    if complete {
                        return Some(player);
                    }
                }
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Player::A)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column numbers
        write!(f, " ")?;
        for column in 0..COLS {
            write!(f, " {}", column)?;
        }
        writeln!(f)?;

        for row in (0..ROWS).rev() {
            write!(f, "|")?;
            for column in 0..COLS {
                match self.cells[row][column] {
                    Cell::Empty => write!(f, " |")?,
                    Cell::Occupied(player) => write!(f, "{}|", player)?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "+")?;
        for _ in 0..COLS {
            write!(f, "-+")?;
        }
        writeln!(f)
    }
}
