//! Fixed-depth minimax over simulate-and-undo on a single board.

use chess_core::{Board, Color, Move};
use log::warn;

use crate::evaluation::evaluate;

// Bound larger than any material swing the evaluator can produce.
pub const INFINITY: i32 = 1_000_000;

/// Every legal move of `color`, in board scan order then per-piece
/// generation order. Ties in the search resolve toward the front of this list.
pub fn enumerate_moves(board: &mut Board, color: Color) -> Vec<Move> {
    board.legal_moves_for(color)
}

/// Alpha-beta minimax scored from `perspective`'s side.
///
/// Leaves are depth 0 or positions where the side to move has no legal move;
/// both return the static material evaluation.
pub fn search(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    perspective: Color,
) -> i32 {
    if depth == 0 {
        return evaluate(board, perspective);
    }
    let side = board.side_to_move();
    let moves = enumerate_moves(board, side);
    if moves.is_empty() {
        return evaluate(board, perspective);
    }

    if maximizing {
        let mut max_eval = -INFINITY;
        for mv in moves {
            if !simulate(board, mv) {
                continue;
            }
            let eval = search(board, depth - 1, alpha, beta, false, perspective);
            retract(board);
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = INFINITY;
        for mv in moves {
            if !simulate(board, mv) {
                continue;
            }
            let eval = search(board, depth - 1, alpha, beta, true, perspective);
            retract(board);
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

/// Plain minimax without pruning. Same value as `search`, much slower.
pub fn minimax(board: &mut Board, depth: u8, maximizing: bool, perspective: Color) -> i32 {
    if depth == 0 {
        return evaluate(board, perspective);
    }
    let side = board.side_to_move();
    let moves = enumerate_moves(board, side);
    if moves.is_empty() {
        return evaluate(board, perspective);
    }

    let mut scores = Vec::with_capacity(moves.len());
    for mv in moves {
        if !simulate(board, mv) {
            continue;
        }
        scores.push(minimax(board, depth - 1, !maximizing, perspective));
        retract(board);
    }

    let best = if maximizing {
        scores.into_iter().max()
    } else {
        scores.into_iter().min()
    };
    best.unwrap_or_else(|| evaluate(board, perspective))
}

pub(crate) fn simulate(board: &mut Board, mv: Move) -> bool {
    match board.apply_move(mv, true) {
        Ok(()) => true,
        Err(err) => {
            warn!("skipping {}: {}", mv, err);
            false
        }
    }
}

pub(crate) fn retract(board: &mut Board) {
    if let Err(err) = board.undo_move() {
        warn!("search lost track of its history: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{BoardConfig, Piece, PieceType, Position};

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let mut board = Board::new();
        board.remove_piece(sq("d8"));
        assert_eq!(search(&mut board, 0, -INFINITY, INFINITY, true, Color::White), 9);
        assert_eq!(minimax(&mut board, 0, true, Color::Black), -9);
    }

    #[test]
    fn sees_the_recapture() {
        let mut board = Board::empty(BoardConfig::default());
        board.place_piece(sq("h1"), Piece::new(PieceType::King, Color::White));
        board.place_piece(sq("d1"), Piece::new(PieceType::Queen, Color::White));
        board.place_piece(sq("h8"), Piece::new(PieceType::King, Color::Black));
        board.place_piece(sq("d5"), Piece::new(PieceType::Pawn, Color::Black));
        board.place_piece(sq("e6"), Piece::new(PieceType::Pawn, Color::Black));

        board.apply_move(Move::new(sq("d1"), sq("d5")), true).unwrap();
        let after_capture = search(&mut board, 1, -INFINITY, INFINITY, false, Color::White);
        board.undo_move().unwrap();
        assert_eq!(after_capture, -1);
        assert_eq!(search(&mut board, 0, -INFINITY, INFINITY, true, Color::White), 7);
        assert!(board.history().is_empty());
    }

    #[test]
    fn enumerates_in_scan_order() {
        let mut board = Board::new();
        let moves = enumerate_moves(&mut board, Color::White);
        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0], Move::new(sq("a2"), sq("a3")));
        assert_eq!(moves[1], Move::new(sq("a2"), sq("a4")));
        assert_eq!(moves[16], Move::new(sq("b1"), sq("c3")));
        assert_eq!(moves[17], Move::new(sq("b1"), sq("a3")));
    }
}
