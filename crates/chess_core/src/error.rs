//! Errors raised by the board when a caller hands it something it cannot act on.
//!
//! Chess-rule outcomes (check, mate, stalemate, an empty move list) are board
//! state, not errors, and never show up here.

use crate::{Color, Position};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Board dimension outside the supported range
    #[error("unsupported board size {size} (expected {min}..={max})")]
    UnsupportedBoardSize { size: usize, min: usize, max: usize },

    /// No piece stands on the square a move starts from
    #[error("no piece at {0}")]
    EmptySquare(Position),

    /// A move refers to a square outside the board
    #[error("{0} is off the board")]
    OffBoard(Position),

    /// The piece being moved does not belong to the side to move
    #[error("it is {expected:?}'s turn")]
    WrongTurn { expected: Color },

    /// The move is not in the legal set of the piece on its source square
    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid algebraic square {0:?}")]
    InvalidAlgebraic(String),
}

/// Result alias for board operations
pub type ChessResult<T> = Result<T, ChessError>;
