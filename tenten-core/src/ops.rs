//! State operations and the three-operation move.
//!
//! The platform owns match state and applies operations in order. A move
//! always has the same shape: a turn or end-of-match operation, the new
//! board, and the delta (the one cell that changed).

use serde::{Deserialize, Serialize, Serializer};

use crate::{Board, Player, Pos};

/// A single state-mutating instruction for the platform.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub enum Operation {
    /// Hand play to the player with this turn index.
    #[serde(rename_all = "camelCase")]
    SetTurn { turn_index: u8 },
    /// End the match with per-player scores, indexed by turn index.
    #[serde(rename_all = "camelCase")]
    EndMatch { end_match_scores: [u8; 2] },
    /// Store a value under a key in match state.
    Set(SetValue),
}

/// Keyed value carried by [`Operation::Set`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase", deny_unknown_fields)]
pub enum SetValue {
    Board(Board),
    Delta(Pos),
}

/// Where a board sits in the match.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MatchOutcome {
    InProgress,
    Won(Player),
    Tie,
}

impl MatchOutcome {
    /// Check if the match is over.
    #[inline]
    pub fn is_over(self) -> bool {
        self != MatchOutcome::InProgress
    }

    /// Final scores, or None while the match is in progress.
    pub fn end_scores(self) -> Option<[u8; 2]> {
        match self {
            MatchOutcome::InProgress => None,
            MatchOutcome::Won(player) => Some(player.winning_scores()),
            MatchOutcome::Tie => Some([0, 0]),
        }
    }
}

/// A move: `[turn-or-end, set board, set delta]`.
///
/// Built only by the rule engine, so the shape always holds. Candidate
/// moves from the platform arrive as plain operation lists and are checked
/// by [`crate::is_move_ok`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    first: Operation,
    board: Board,
    delta: Pos,
}

impl Move {
    pub(crate) fn new(first: Operation, board: Board, delta: Pos) -> Move {
        Move { first, board, delta }
    }

    /// The operation list sent to the platform.
    pub fn operations(&self) -> [Operation; 3] {
        [
            self.first,
            Operation::Set(SetValue::Board(self.board)),
            Operation::Set(SetValue::Delta(self.delta)),
        ]
    }

    /// The turn or end-of-match operation.
    #[inline]
    pub fn first(&self) -> &Operation {
        &self.first
    }

    /// The board after the move.
    #[inline]
    pub fn board_after(&self) -> &Board {
        &self.board
    }

    /// The cell that changed.
    #[inline]
    pub fn delta(&self) -> Pos {
        self.delta
    }

    /// Final scores if this move ends the match.
    pub fn end_scores(&self) -> Option<[u8; 2]> {
        match self.first {
            Operation::EndMatch { end_match_scores } => Some(end_match_scores),
            _ => None,
        }
    }

    /// Turn index of the next player if the match continues.
    pub fn next_turn(&self) -> Option<u8> {
        match self.first {
            Operation::SetTurn { turn_index } => Some(turn_index),
            _ => None,
        }
    }

    /// Check if this move ends the match.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.end_scores().is_some()
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.operations().serialize(serializer)
    }
}

impl PartialEq<[Operation]> for Move {
    fn eq(&self, other: &[Operation]) -> bool {
        self.operations().as_slice() == other
    }
}
