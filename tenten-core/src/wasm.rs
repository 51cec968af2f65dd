//! WASM bindings for tenten-core
//!
//! Exposes the rule engine to a JavaScript game platform. Boards and moves
//! cross the boundary in the platform's JSON shape.

use wasm_bindgen::prelude::*;

use crate::{rules, validate, Board, MoveCheck};

fn board_arg(board: JsValue) -> Result<Option<Board>, JsError> {
    Ok(serde_wasm_bindgen::from_value(board)?)
}

/// Opening board as a 10x10 array of "", "X" and "O".
#[wasm_bindgen(js_name = initialBoard)]
pub fn initial_board() -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(&rules::initial_board())?)
}

/// True if the board has no empty cell.
#[wasm_bindgen(js_name = isEnd)]
pub fn is_end(board: JsValue) -> Result<bool, JsError> {
    let board: Board = serde_wasm_bindgen::from_value(board)?;
    Ok(rules::is_end(&board))
}

/// "X" or "O" for the player with more pawns, "" on equal counts.
#[wasm_bindgen(js_name = getWinner)]
pub fn get_winner(board: JsValue) -> Result<String, JsError> {
    let board: Board = serde_wasm_bindgen::from_value(board)?;
    Ok(rules::get_winner(&board).symbol().to_string())
}

/// Legal moves in the top-left 3x3 corner. `board` may be undefined.
#[wasm_bindgen(js_name = getPossibleMoves)]
pub fn get_possible_moves(board: JsValue, turn_index_before_move: u8) -> Result<JsValue, JsError> {
    let board = board_arg(board)?;
    let moves = rules::get_possible_moves(board.as_ref(), turn_index_before_move);
    Ok(serde_wasm_bindgen::to_value(&moves)?)
}

/// Build the move for placing a pawn. Throws if the move is illegal.
#[wasm_bindgen(js_name = createMove)]
pub fn create_move(
    board: JsValue,
    row: u8,
    col: u8,
    turn_index_before_move: u8,
) -> Result<JsValue, JsError> {
    let board = board_arg(board)?;
    let mov = rules::create_move(board.as_ref(), row, col, turn_index_before_move)?;
    Ok(serde_wasm_bindgen::to_value(&mov)?)
}

/// Validate `{ move, turnIndexBeforeMove, stateBeforeMove }`. Never throws.
#[wasm_bindgen(js_name = isMoveOk)]
pub fn is_move_ok(params: JsValue) -> bool {
    serde_wasm_bindgen::from_value::<MoveCheck>(params)
        .map(|check| validate::is_move_ok(&check))
        .unwrap_or(false)
}
