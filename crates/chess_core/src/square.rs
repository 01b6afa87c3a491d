use crate::{Color, Piece, Position};

/// One cell of the board grid and its occupant, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub row: u8,
    pub col: u8,
    pub piece: Option<Piece>,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col, piece: None }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn has_piece(&self) -> bool {
        self.piece.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    pub fn has_team_piece(&self, color: Color) -> bool {
        matches!(self.piece, Some(p) if p.color == color)
    }

    pub fn has_enemy_piece(&self, color: Color) -> bool {
        matches!(self.piece, Some(p) if p.color != color)
    }

    pub fn is_empty_or_enemy(&self, color: Color) -> bool {
        self.is_empty() || self.has_enemy_piece(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceType;

    #[test]
    fn occupancy_queries() {
        let mut square = Square::new(3, 4);
        assert!(square.is_empty());
        assert!(square.is_empty_or_enemy(Color::White));

        square.piece = Some(Piece::new(PieceType::Knight, Color::Black));
        assert!(square.has_piece());
        assert!(square.has_enemy_piece(Color::White));
        assert!(square.has_team_piece(Color::Black));
        assert!(!square.is_empty_or_enemy(Color::Black));
        assert_eq!(square.position(), Position::new(3, 4));
    }
}
