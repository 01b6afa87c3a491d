use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Piece, Position};

/// A piece relocation. `captured` is a snapshot of whatever the generator saw
/// on the target (or en-passant) square.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub captured: Option<Piece>,
}

// Moves compare by coordinates only, so a bare `Move::new(from, to)` from an
// input layer matches the generated move carrying a capture snapshot.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    pub fn capture(from: Position, to: Position, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// How an applied move changed the board beyond moving one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    /// The captured pawn stood beside the mover, not on the target square.
    EnPassant { captured_at: Position },
    /// A pawn turned into a queen. The record's mover snapshot is the pawn.
    Promotion,
    /// `rook` is the rook as it stood on `rook_from` before castling.
    Castle {
        rook_from: Position,
        rook_to: Position,
        rook: Piece,
    },
}

/// History entry holding everything `Board::undo_move` needs to invert an apply.
#[derive(Debug, Clone, Copy)]
pub struct MoveRecord {
    pub mv: Move,
    pub kind: MoveKind,
    /// The mover before it moved.
    pub piece: Piece,
    /// Piece actually removed from the board, wherever it stood.
    pub captured: Option<Piece>,
    /// Pawn carrying the en-passant flag before this move.
    pub en_passant_before: Option<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceType};

    #[test]
    fn equality_ignores_capture_snapshot() {
        let from = Position::new(4, 4);
        let to = Position::new(3, 3);
        let plain = Move::new(from, to);
        let taking = Move::capture(from, to, Piece::new(PieceType::Queen, Color::Black));
        assert_eq!(plain, taking);
        assert_ne!(plain, Move::new(from, Position::new(3, 5)));
    }

    #[test]
    fn display_marks_captures() {
        let from = Position::new(4, 4);
        let to = Position::new(3, 3);
        assert_eq!(Move::new(from, to).to_string(), "e4-d5");
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        assert_eq!(Move::capture(from, to, pawn).to_string(), "e4xd5");
    }
}
