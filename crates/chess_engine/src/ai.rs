use std::time::Instant;

use chess_core::{Board, Color, Move};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::search::{enumerate_moves, retract, search, simulate, INFINITY};

pub const DEFAULT_DEPTH: u8 = 3;
const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 6;

/// Computer opponent playing one color with a fixed search depth.
#[derive(Clone, Debug)]
pub struct AiPlayer {
    color: Color,
    depth: u8,
    rng: StdRng,
}

impl AiPlayer {
    pub fn new(color: Color, depth: u8) -> Self {
        Self::with_rng(color, depth, StdRng::from_entropy())
    }

    /// Same as `new` but with a reproducible fallback choice.
    pub fn with_seed(color: Color, depth: u8, seed: u64) -> Self {
        Self::with_rng(color, depth, StdRng::seed_from_u64(seed))
    }

    fn with_rng(color: Color, depth: u8, rng: StdRng) -> Self {
        AiPlayer {
            color,
            depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
            rng,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Picks the move with the strictly highest minimax score; the earliest
    /// enumerated move wins ties. Returns `None` only when there is no legal
    /// move, which the caller should treat as the end of the game.
    pub fn choose_best_move(&mut self, board: &mut Board) -> Option<Move> {
        if board.side_to_move() != self.color {
            warn!(
                "AI ({:?}) asked to move while {:?} is on move",
                self.color,
                board.side_to_move()
            );
        }

        let start = Instant::now();
        let moves = enumerate_moves(board, self.color);
        debug!("AI ({:?}) possible moves: {}", self.color, moves.len());

        let mut best: Option<(Move, i32)> = None;
        // A root move can only replace the best by scoring strictly higher,
        // so the best score so far is a safe lower bound for the siblings.
        let mut alpha = -INFINITY;
        for &mv in &moves {
            if !simulate(board, mv) {
                continue;
            }
            let score = search(board, self.depth - 1, alpha, INFINITY, false, self.color);
            retract(board);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = score;
            }
        }

        match best {
            Some((mv, score)) => {
                debug!(
                    "AI ({:?}) picked {} with score {} in {:?}",
                    self.color,
                    mv,
                    score,
                    start.elapsed()
                );
                Some(mv)
            }
            None => moves.choose(&mut self.rng).copied(),
        }
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        AiPlayer::new(Color::Black, DEFAULT_DEPTH)
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
    fn depth_is_clamped() {
        assert_eq!(AiPlayer::with_seed(Color::White, 0, 1).depth(), 1);
        assert_eq!(AiPlayer::with_seed(Color::White, 40, 1).depth(), 6);
        assert_eq!(AiPlayer::default().depth(), DEFAULT_DEPTH);
        assert_eq!(AiPlayer::default().color(), Color::Black);
    }

    #[test]
    fn takes_a_free_queen_at_depth_one() {
        let mut board = Board::empty(BoardConfig::default());
        board.place_piece(sq("e1"), Piece::new(PieceType::King, Color::White));
        board.place_piece(sq("a1"), Piece::new(PieceType::Rook, Color::White));
        board.place_piece(sq("e8"), Piece::new(PieceType::King, Color::Black));
        board.place_piece(sq("a6"), Piece::new(PieceType::Queen, Color::Black));

        let mut ai = AiPlayer::with_seed(Color::White, 1, 7);
        let chosen = ai.choose_best_move(&mut board);
        assert_eq!(chosen, Some(Move::new(sq("a1"), sq("a6"))));
        assert!(board.history().is_empty());
    }

    #[test]
    fn ties_go_to_the_first_enumerated_move() {
        let mut board = Board::new();
        let mut ai = AiPlayer::with_seed(Color::White, 1, 7);
        assert_eq!(
            ai.choose_best_move(&mut board),
            Some(Move::new(sq("a2"), sq("a3")))
        );
    }

    #[test]
    fn greedy_capture_is_refuted_at_depth_two() {
        let mut board = Board::empty(BoardConfig::default());
        board.place_piece(sq("h1"), Piece::new(PieceType::King, Color::White));
        board.place_piece(sq("d1"), Piece::new(PieceType::Queen, Color::White));
        board.place_piece(sq("h8"), Piece::new(PieceType::King, Color::Black));
        board.place_piece(sq("d5"), Piece::new(PieceType::Pawn, Color::Black));
        board.place_piece(sq("e6"), Piece::new(PieceType::Pawn, Color::Black));
        let capture = Move::new(sq("d1"), sq("d5"));

        let mut greedy = AiPlayer::with_seed(Color::White, 1, 7);
        assert_eq!(greedy.choose_best_move(&mut board), Some(capture));

        let mut careful = AiPlayer::with_seed(Color::White, 2, 7);
        let chosen = careful.choose_best_move(&mut board).unwrap();
        assert_ne!(chosen, capture);
    }

    #[test]
    fn no_move_when_mated() {
        let mut board = Board::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            board.play_move(Move::new(sq(from), sq(to))).unwrap();
        }
        let mut ai = AiPlayer::with_seed(Color::White, 3, 7);
        assert_eq!(ai.choose_best_move(&mut board), None);
    }
}
