//! Random full matches played through the public API, the way the platform
//! drives a match: build a move, validate it, apply its operations.

use rand::prelude::*;
use tenten_core::{
    create_move, get_possible_moves, get_winner, is_end, is_move_ok, Board, Cell, MoveCheck,
    Operation, Player, Pos, SetValue,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Match state as the platform keeps it.
struct Platform {
    board: Option<Board>,
    turn: u8,
    scores: Option<[u8; 2]>,
}

impl Platform {
    fn new() -> Self {
        Platform {
            board: None,
            turn: 0,
            scores: None,
        }
    }

    fn apply(&mut self, ops: &[Operation]) {
        for op in ops {
            match *op {
                Operation::SetTurn { turn_index } => self.turn = turn_index,
                Operation::EndMatch { end_match_scores } => self.scores = Some(end_match_scores),
                Operation::Set(SetValue::Board(board)) => self.board = Some(board),
                Operation::Set(SetValue::Delta(_)) => {}
            }
        }
    }
}

fn empty_cells(board: &Board) -> Vec<Pos> {
    board
        .iter()
        .filter(|(_, cell)| *cell == Cell::Empty)
        .map(|(pos, _)| pos)
        .collect()
}

#[test]
fn test_random_matches_run_to_a_tie() {
    init_tracing();
    let mut rng = rand::rng();

    for _ in 0..20 {
        let mut platform = Platform::new();
        let mut moves_played = 0;

        while platform.scores.is_none() {
            let board = platform.board.unwrap_or_else(Board::initial);
            let empties = empty_cells(&board);
            let pos = empties[rng.random_range(0..empties.len())];

            let mov = create_move(platform.board.as_ref(), pos.row, pos.col, platform.turn)
                .expect("empty cell on an unfinished board is legal");
            assert!(is_move_ok(&MoveCheck::new(&mov, platform.turn, platform.board)));

            let before = platform.turn;
            platform.apply(&mov.operations());
            moves_played += 1;

            if platform.scores.is_none() {
                assert_eq!(platform.turn, 1 - before, "turn must alternate");
            }
        }

        // 96 open cells split evenly between the two players.
        assert_eq!(moves_played, 96);
        let board = platform.board.expect("board set by first move");
        assert!(is_end(&board));
        assert_eq!(get_winner(&board), Cell::Empty);
        assert_eq!(platform.scores, Some([0, 0]));

        assert!(create_move(Some(&board), 0, 0, platform.turn).is_err());
        assert!(get_possible_moves(Some(&board), platform.turn).is_empty());
    }
}

#[test]
fn test_random_corner_play_exhausts_enumeration() {
    init_tracing();
    let mut rng = rand::rng();

    for _ in 0..20 {
        let mut platform = Platform::new();

        for expected in (1..=9).rev() {
            let moves = get_possible_moves(platform.board.as_ref(), platform.turn);
            assert_eq!(moves.len(), expected);
            let mov = moves.choose(&mut rng).expect("corner still has room");
            assert!(mov.delta().row < 3 && mov.delta().col < 3);
            platform.apply(&mov.operations());
        }

        // Corner full, rest of the board still open.
        assert!(get_possible_moves(platform.board.as_ref(), platform.turn).is_empty());
        assert!(platform.scores.is_none());
        assert!(create_move(platform.board.as_ref(), 9, 9, platform.turn).is_ok());
    }
}

#[test]
fn test_extra_move_decides_the_match() {
    init_tracing();
    let mut rng = rand::rng();

    // X moves twice in a row once, on one of its own turns. With the two X
    // pawns of the opening block that leaves 51 X against 49 O.
    for _ in 0..20 {
        let mut board = Board::initial();
        let mut turn = 0u8;
        let repeat_at = 2 * rng.random_range(0..45);
        let mut step = 0;

        let last = loop {
            let empties = empty_cells(&board);
            let pos = empties[rng.random_range(0..empties.len())];
            let mov = create_move(Some(&board), pos.row, pos.col, turn).expect("legal");
            board = *mov.board_after();
            if mov.is_terminal() {
                break mov;
            }
            if step != repeat_at {
                turn = 1 - turn;
            }
            step += 1;
        };

        assert_eq!(turn, 0);
        assert_eq!(board.count(Player::X), 51);
        assert_eq!(board.count(Player::O), 49);
        assert_eq!(last.end_scores(), Some([1, 0]));
        assert_eq!(get_winner(&board), Cell::X);
    }
}
