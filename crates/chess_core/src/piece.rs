#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step. White starts at the bottom rows and
    /// walks toward row 0.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const QUEEN_RAYS: [(i8, i8); 8] = [
    (-1, -1), (-1, 1), (1, -1), (1, 1),
    (-1, 0), (1, 0), (0, -1), (0, 1),
];
const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, 1), (-2, -1), (2, 1), (2, -1),
    (-1, 2), (-1, -2), (1, 2), (1, -2),
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];

impl PieceType {
    /// Material value used by the evaluator.
    pub fn value(self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 100,
        }
    }

    pub fn glyph(self, color: Color) -> char {
        match (self, color) {
            (PieceType::King, Color::White) => '♔',
            (PieceType::Queen, Color::White) => '♕',
            (PieceType::Rook, Color::White) => '♖',
            (PieceType::Bishop, Color::White) => '♗',
            (PieceType::Knight, Color::White) => '♘',
            (PieceType::Pawn, Color::White) => '♙',
            (PieceType::King, Color::Black) => '♚',
            (PieceType::Queen, Color::Black) => '♛',
            (PieceType::Rook, Color::Black) => '♜',
            (PieceType::Bishop, Color::Black) => '♝',
            (PieceType::Knight, Color::Black) => '♞',
            (PieceType::Pawn, Color::Black) => '♟',
        }
    }

    /// Directions a sliding piece ray-casts along. Empty for non-sliders.
    pub fn rays(self) -> &'static [(i8, i8)] {
        match self {
            PieceType::Bishop => &DIAGONALS,
            PieceType::Rook => &ORTHOGONALS,
            PieceType::Queen => &QUEEN_RAYS,
            _ => &[],
        }
    }

    /// Fixed single-jump offsets for leapers. Empty for everything else.
    pub fn steps(self) -> &'static [(i8, i8)] {
        match self {
            PieceType::Knight => &KNIGHT_STEPS,
            PieceType::King => &KING_STEPS,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub has_moved: bool,
    /// Set on the pawn that just made a double step, which can be taken en passant.
    pub en_passant: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self {
            piece_type,
            color,
            has_moved: false,
            en_passant: false,
        }
    }

    pub fn value(&self) -> i32 {
        self.piece_type.value()
    }

    pub fn glyph(&self) -> char {
        self.piece_type.glyph(self.color)
    }

    pub fn is(&self, piece_type: PieceType) -> bool {
        self.piece_type == piece_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_values() {
        let values: Vec<i32> = [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ]
        .iter()
        .map(|t| t.value())
        .collect();
        assert_eq!(values, vec![1, 3, 3, 5, 9, 100]);
    }

    #[test]
    fn capability_table() {
        assert_eq!(PieceType::Queen.rays().len(), 8);
        assert!(PieceType::Knight.rays().is_empty());
        assert_eq!(PieceType::Knight.steps().len(), 8);
        assert!(PieceType::Pawn.steps().is_empty());
        assert!(PieceType::Pawn.rays().is_empty());
    }

    #[test]
    fn new_piece_is_unmoved() {
        let piece = Piece::new(PieceType::Rook, Color::Black);
        assert!(!piece.has_moved);
        assert!(!piece.en_passant);
        assert_eq!(piece.glyph(), '♜');
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
