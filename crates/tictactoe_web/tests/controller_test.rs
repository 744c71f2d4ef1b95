//! End-to-end tests for the game controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tictactoe_engine::{
    Board, BoardInvariants, Cell, EngineError, GameStatus, IllegalMove, IllegalMoveReason,
    InvariantSet, Mark, MinimaxOpponent, Opponent, Position,
};
use tictactoe_web::{GameController, GameError};

/// Opponent that records how often it was asked and delegates to minimax.
#[derive(Debug, Default)]
struct CountingOpponent {
    calls: Arc<AtomicUsize>,
}

impl Opponent for CountingOpponent {
    fn select_move(&self, board: &Board, mark: Mark) -> Result<Position, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MinimaxOpponent.select_move(board, mark)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Opponent that always answers with an occupied cell.
struct BrokenOpponent;

impl Opponent for BrokenOpponent {
    fn select_move(&self, _board: &Board, _mark: Mark) -> Result<Position, EngineError> {
        Ok(Position::Center)
    }

    fn name(&self) -> &str {
        "broken"
    }
}

fn reason(err: GameError) -> IllegalMoveReason {
    match err {
        GameError::IllegalMove(IllegalMove { reason, .. }) => reason,
        GameError::Engine(e) => panic!("unexpected engine error: {e}"),
    }
}

#[test]
fn test_center_move_gets_corner_reply() {
    let controller = GameController::new();
    let outcome = controller.apply_human_move(4).unwrap();
    let board = outcome.snapshot.board();

    assert_eq!(board.count(Mark::X), 1);
    assert_eq!(board.count(Mark::O), 1);
    assert_eq!(board.get(Position::Center), Cell::Occupied(Mark::X));
    let reply = outcome.opponent_move.unwrap();
    assert!([0, 2, 6, 8].contains(&reply.to_index()));
    assert_eq!(board.get(reply), Cell::Occupied(Mark::O));
    assert_eq!(*outcome.snapshot.status(), GameStatus::InProgress);
}

#[test]
fn test_winning_human_move_skips_opponent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let start = Board::from_symbols(["X", "X", "", "O", "O", "", "", "", ""]).unwrap();
    let controller = GameController::from_parts(
        start,
        Box::new(CountingOpponent {
            calls: Arc::clone(&calls),
        }),
    );

    let outcome = controller.apply_human_move(2).unwrap();

    assert_eq!(*outcome.snapshot.status(), GameStatus::XWins);
    assert_eq!(outcome.opponent_move, None);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let expected = Board::from_symbols(["X", "X", "X", "O", "O", "", "", "", ""]).unwrap();
    assert_eq!(*outcome.snapshot.board(), expected);
}

#[test]
fn test_opponent_called_once_per_open_turn() {
    let calls = Arc::new(AtomicUsize::new(0));
    let controller = GameController::with_opponent(Box::new(CountingOpponent {
        calls: Arc::clone(&calls),
    }));
    controller.apply_human_move(4).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_rejected_moves_leave_board_identical() {
    let controller = GameController::new();
    controller.apply_human_move(4).unwrap();
    let before = controller.state();

    for (index, expected) in [
        (4, IllegalMoveReason::Occupied),
        (9, IllegalMoveReason::OutOfRange),
        (-3, IllegalMoveReason::OutOfRange),
    ] {
        let err = controller.apply_human_move(index).unwrap_err();
        assert_eq!(reason(err), expected);
        assert_eq!(controller.state(), before);
    }
}

#[test]
fn test_out_of_turn_when_board_expects_o() {
    let start = Board::from_symbols(["X", "", "", "", "", "", "", "", ""]).unwrap();
    let controller = GameController::from_parts(start, Box::new(MinimaxOpponent));
    let err = controller.apply_human_move(4).unwrap_err();
    assert_eq!(reason(err), IllegalMoveReason::OutOfTurn);
}

#[test]
fn test_moves_after_finish_are_rejected() {
    let start = Board::from_symbols(["X", "X", "", "O", "O", "", "", "", ""]).unwrap();
    let controller = GameController::from_parts(start, Box::new(MinimaxOpponent));
    controller.apply_human_move(2).unwrap();

    let err = controller.apply_human_move(8).unwrap_err();
    assert_eq!(reason(err), IllegalMoveReason::GameFinished);
}

#[test]
fn test_broken_opponent_is_internal_error_without_partial_change() {
    let controller = GameController::with_opponent(Box::new(BrokenOpponent));
    let before = controller.state();

    let err = controller.apply_human_move(4).unwrap_err();
    assert!(matches!(err, GameError::Engine(EngineError::NoLegalMove { .. })));
    assert_eq!(controller.state(), before);
}

#[test]
fn test_reset_after_game() {
    let controller = GameController::new();
    controller.apply_human_move(0).unwrap();
    controller.apply_human_move(8).unwrap();
    let snapshot = controller.reset();

    assert!(snapshot.board().cells().iter().all(|c| *c == Cell::Empty));
    assert_eq!(*snapshot.status(), GameStatus::InProgress);
    assert_eq!(*snapshot.turn(), Mark::X);
    assert_eq!(controller.state(), snapshot);
}

#[test]
fn test_human_cannot_beat_engine_through_controller() {
    // Greedy human: always the lowest free index.
    let controller = GameController::new();
    loop {
        let snapshot = controller.state();
        if snapshot.is_over() {
            assert_ne!(*snapshot.status(), GameStatus::XWins);
            break;
        }
        let index = snapshot.board().empty_positions()[0].to_index() as i64;
        controller.apply_human_move(index).unwrap();
    }
}

#[test]
fn test_concurrent_requests_keep_invariants() {
    let controller = Arc::new(GameController::new());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                for round in 0..25 {
                    if (worker + round) % 7 == 0 {
                        controller.reset();
                    } else {
                        let _ = controller.apply_human_move(((worker * 3 + round) % 9) as i64);
                    }
                    let snapshot = controller.state();
                    let board = snapshot.board();
                    assert!(BoardInvariants::check_all(board).is_ok());
                    // A human move is always answered within the same call.
                    if !snapshot.is_over() {
                        assert_eq!(board.count(Mark::X), board.count(Mark::O));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
