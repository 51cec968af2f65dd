//! Ten-by-ten pawn majority: rule engine for a turn-based game platform.
//!
//! # Board Layout
//!
//! ```text
//!        col 0 1 2 3 4 5 6 7 8 9
//! row 0      . . . . . . . . . .
//! row 1      . . . . . . . . . .
//! row 2      . . . . . . . . . .
//! row 3      . . . . . . . . . .
//! row 4      . . . . X O . . . .
//! row 5      . . . . O X . . . .
//! row 6      . . . . . . . . . .
//! row 7      . . . . . . . . . .
//! row 8      . . . . . . . . . .
//! row 9      . . . . . . . . . .
//! ```
//!
//! Players alternate dropping a pawn on any empty cell. When the board is
//! full the player with more pawns wins; equal counts are a tie.
//!
//! # Move Encoding
//!
//! A move is the list of three state operations the platform applies:
//!
//! ```text
//! [ {"setTurn": {"turnIndex": 1}}            or {"endMatch": {"endMatchScores": [1, 0]}},
//!   {"set": {"key": "board", "value": [["", "X", ...], ...]}},
//!   {"set": {"key": "delta", "value": {"row": 0, "col": 1}}} ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod ops;
pub mod rules;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ops::{MatchOutcome, Move, Operation, SetValue};
pub use rules::{
    create_move, get_possible_moves, get_winner, initial_board, is_end, IllegalMove, MoveRequest,
};
pub use validate::{is_move_ok, is_move_ok_json, MatchState, MoveCheck};

/// Number of rows on the board.
pub const ROWS: usize = 10;

/// Number of columns on the board.
pub const COLS: usize = 10;

/// Move enumeration only visits rows and columns below this bound.
pub const ENUMERATION_BOUND: u8 = 3;

/// Opening pawns as `(row, col, player)`.
pub const INITIAL_BLOCK: [(u8, u8, Player); 4] = [
    (4, 4, Player::X),
    (4, 5, Player::O),
    (5, 4, Player::O),
    (5, 5, Player::X),
];

/// Player identifier.
///
/// The platform addresses players by turn index: 0 plays `X`, 1 plays `O`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert a platform turn index (0 or 1) to a player.
    #[inline]
    pub fn from_turn_index(turn_index: u8) -> Option<Player> {
        match turn_index {
            0 => Some(Player::X),
            1 => Some(Player::O),
            _ => None,
        }
    }

    /// The platform turn index of this player.
    #[inline]
    pub fn turn_index(self) -> u8 {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// The cell value of this player's pawn.
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Final scores for a match this player won, indexed by turn index.
    #[inline]
    pub fn winning_scores(self) -> [u8; 2] {
        match self {
            Player::X => [1, 0],
            Player::O => [0, 1],
        }
    }
}

/// One grid position's occupant.
///
/// Serialized as the platform's symbols: `""`, `"X"` or `"O"`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "X")]
    X,
    #[serde(rename = "O")]
    O,
}

impl Cell {
    /// The player owning this cell, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    /// The wire symbol for this cell.
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::X => "X",
            Cell::O => "O",
        }
    }
}

/// Position on the board, also the `delta` payload of a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Create a position from row and column.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }

    /// Check if this position lies on the board.
    #[inline]
    pub fn is_valid(self) -> bool {
        (self.row as usize) < ROWS && (self.col as usize) < COLS
    }

    /// Iterate over all positions in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..ROWS as u8).flat_map(|row| (0..COLS as u8).map(move |col| Pos::new(row, col)))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board state: a 10x10 grid of cells, row-major.
///
/// `Board` is a plain value. Every transition returns a new board and
/// leaves the caller's copy untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a board with every cell empty.
    #[inline]
    pub fn empty() -> Board {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Create the opening board: empty apart from the central 2x2 block.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for (row, col, player) in INITIAL_BLOCK {
            board.cells[row as usize][col as usize] = player.cell();
        }
        board
    }

    /// Create a board from raw rows.
    #[inline]
    pub fn from_cells(cells: [[Cell; COLS]; ROWS]) -> Board {
        Board { cells }
    }

    /// Get the raw rows.
    #[inline]
    pub fn cells(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Get the cell at a position. Returns None off the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.cells
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
    }

    /// Check if a cell is empty. Positions off the board are never empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Return a copy of this board with one cell replaced.
    ///
    /// Positions off the board leave the copy unchanged.
    #[must_use]
    pub fn with(&self, pos: Pos, cell: Cell) -> Board {
        let mut next = *self;
        if let Some(slot) = next
            .cells
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            *slot = cell;
        }
        next
    }

    /// Iterate over all cells with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        Pos::all().map(move |pos| (pos, self.cells[pos.row as usize][pos.col as usize]))
    }

    // ========== Pawn Counts & Outcome ==========

    /// Count the pawns a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        let cell = player.cell();
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Check if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Cell::Empty)
    }

    /// The player with strictly more pawns, or None on equal counts.
    ///
    /// This is a pure count over any board. Whether the match has ended is
    /// decided by [`Board::outcome`].
    pub fn majority(&self) -> Option<Player> {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        match x.cmp(&o) {
            std::cmp::Ordering::Greater => Some(Player::X),
            std::cmp::Ordering::Less => Some(Player::O),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Where this board sits in the match: still playing, won, or tied.
    ///
    /// Pawns are counted once the board is full.
    pub fn outcome(&self) -> MatchOutcome {
        if !self.is_full() {
            return MatchOutcome::InProgress;
        }
        match self.majority() {
            Some(player) => MatchOutcome::Won(player),
            None => MatchOutcome::Tie,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::X => "X",
                    Cell::O => "O",
                };
                f.write_str(symbol)?;
            }
        }
        Ok(())
    }
}
