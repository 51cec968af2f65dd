//! Rule engine: opening board, end detection, move construction and
//! move enumeration.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{Board, Cell, Move, Operation, Player, Pos, ENUMERATION_BOUND};

/// Why a move cannot be made.
#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display, derive_more::Error)]
pub enum IllegalMove {
    /// The target cell already holds a pawn.
    #[display("One can only make a move in an empty position: cell {row},{col} is occupied")]
    Occupied { row: u8, col: u8 },

    /// The board is full, so the match has ended. Reported before any
    /// problem with the target cell.
    #[display("Can only make a move if the game is not over")]
    GameOver,

    /// The target cell is off the board.
    #[display("Cell {row},{col} is outside the board")]
    OutOfBounds { row: u8, col: u8 },

    /// Turn index other than 0 or 1.
    #[display("Turn index must be 0 or 1, got {turn_index}")]
    BadTurnIndex { turn_index: u8 },
}

/// The opening board.
pub fn initial_board() -> Board {
    Board::initial()
}

/// True iff no cell is empty.
pub fn is_end(board: &Board) -> bool {
    board.is_full()
}

/// The player with more pawns on the board, or [`Cell::Empty`] on equal
/// counts.
pub fn get_winner(board: &Board) -> Cell {
    board.majority().map_or(Cell::Empty, Player::cell)
}

/// Build the move for the player with `turn_index_before_move` dropping a
/// pawn at `row`, `col`.
///
/// A missing board means the match has not started yet and the opening
/// board is used.
#[instrument(skip(board))]
pub fn create_move(
    board: Option<&Board>,
    row: u8,
    col: u8,
    turn_index_before_move: u8,
) -> Result<Move, IllegalMove> {
    let board = board.copied().unwrap_or_else(Board::initial);
    let Some(player) = Player::from_turn_index(turn_index_before_move) else {
        return reject(IllegalMove::BadTurnIndex {
            turn_index: turn_index_before_move,
        });
    };

    if board.outcome().is_over() {
        return reject(IllegalMove::GameOver);
    }
    let pos = Pos::new(row, col);
    if !pos.is_valid() {
        return reject(IllegalMove::OutOfBounds { row, col });
    }
    if !board.is_empty(pos) {
        return reject(IllegalMove::Occupied { row, col });
    }

    let after = board.with(pos, player.cell());
    let outcome = after.outcome();
    let first = match outcome.end_scores() {
        Some(end_match_scores) => {
            trace!(?outcome, "move ends the match");
            Operation::EndMatch { end_match_scores }
        }
        None => Operation::SetTurn {
            turn_index: player.opponent().turn_index(),
        },
    };

    Ok(Move::new(first, after, pos))
}

fn reject(err: IllegalMove) -> Result<Move, IllegalMove> {
    debug!(%err, "illegal move");
    Err(err)
}

/// Every legal move in the top-left 3x3 corner, row-major.
///
/// Only rows and columns below [`ENUMERATION_BOUND`] are tried even though
/// the board is 10x10. Callers relying on this list for a full set of legal
/// moves will miss the rest of the board.
#[instrument(skip(board))]
pub fn get_possible_moves(board: Option<&Board>, turn_index_before_move: u8) -> Vec<Move> {
    let mut moves = Vec::new();
    for row in 0..ENUMERATION_BOUND {
        for col in 0..ENUMERATION_BOUND {
            if let Ok(mov) = create_move(board, row, col, turn_index_before_move) {
                moves.push(mov);
            }
        }
    }
    trace!(count = moves.len(), "enumerated moves");
    moves
}

/// A request to place a pawn, as sent by the platform.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    #[serde(default)]
    pub board: Option<Board>,
    pub row: u8,
    pub col: u8,
    pub turn_index_before_move: u8,
}

impl MoveRequest {
    /// Build the requested move. See [`create_move`].
    pub fn create(&self) -> Result<Move, IllegalMove> {
        create_move(self.board.as_ref(), self.row, self.col, self.turn_index_before_move)
    }
}
