//! Move validation at the platform boundary.
//!
//! The platform hands over a candidate move it received from a player
//! along with the state before the move. Validation recomputes the move the
//! rules would produce and compares the two. It never fails: anything that
//! cannot be checked is an invalid move.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{create_move, Board, IllegalMove, Move, Operation, SetValue};

/// Public match state before a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MatchState {
    /// Absent until the first move is made.
    #[serde(default)]
    pub board: Option<Board>,
}

/// Inputs to [`is_move_ok`].
///
/// Turn index and state after the move are also sent by the platform but
/// every piece of state in this game is public, so they are not needed.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCheck {
    #[serde(rename = "move")]
    pub candidate: Vec<Operation>,
    pub turn_index_before_move: u8,
    #[serde(default)]
    pub state_before_move: MatchState,
}

impl MoveCheck {
    /// Check a move built by [`create_move`] against the state it was built
    /// from.
    pub fn new(candidate: &Move, turn_index_before_move: u8, board: Option<Board>) -> MoveCheck {
        MoveCheck {
            candidate: candidate.operations().to_vec(),
            turn_index_before_move,
            state_before_move: MatchState { board },
        }
    }
}

#[derive(Debug, derive_more::Display)]
enum Rejection {
    #[display("move has {_0} operations, expected at least 3")]
    TooShort(usize),
    #[display("third operation is not a delta")]
    NoDelta,
    #[display("{_0}")]
    Illegal(IllegalMove),
    #[display("move differs from the one the rules produce")]
    Mismatch,
}

/// True iff `check.candidate` is exactly the move the rules produce for the
/// cell named in its delta.
#[instrument(skip_all, fields(turn = check.turn_index_before_move))]
pub fn is_move_ok(check: &MoveCheck) -> bool {
    match verify(check) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "rejecting move");
            false
        }
    }
}

fn verify(check: &MoveCheck) -> Result<(), Rejection> {
    let delta = match check.candidate.get(2) {
        Some(Operation::Set(SetValue::Delta(pos))) => *pos,
        Some(_) => return Err(Rejection::NoDelta),
        None => return Err(Rejection::TooShort(check.candidate.len())),
    };

    let expected = create_move(
        check.state_before_move.board.as_ref(),
        delta.row,
        delta.col,
        check.turn_index_before_move,
    )
    .map_err(Rejection::Illegal)?;

    if expected == check.candidate[..] {
        Ok(())
    } else {
        Err(Rejection::Mismatch)
    }
}

/// [`is_move_ok`] for raw platform parameters:
/// `{ "move": [...], "turnIndexBeforeMove": 0, "stateBeforeMove": { "board": ... } }`.
///
/// Parameters that do not parse are an invalid move.
pub fn is_move_ok_json(params: &serde_json::Value) -> bool {
    match MoveCheck::deserialize(params) {
        Ok(check) => is_move_ok(&check),
        Err(err) => {
            debug!(%err, "rejecting unparseable move");
            false
        }
    }
}
