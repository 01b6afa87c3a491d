use chess_core::{Board, Color};

/// Material balance from `perspective`'s side: the summed values of its
/// pieces minus the opponent's. Nothing positional is counted.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            if piece.color == perspective {
                piece.value()
            } else {
                -piece.value()
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{BoardConfig, Piece, PieceType, Position};

    #[test]
    fn start_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn counts_material_only() {
        let mut board = Board::empty(BoardConfig::default());
        board.place_piece(Position::new(7, 4), Piece::new(PieceType::King, Color::White));
        board.place_piece(Position::new(0, 4), Piece::new(PieceType::King, Color::Black));
        board.place_piece(Position::new(3, 3), Piece::new(PieceType::Queen, Color::White));
        board.place_piece(Position::new(1, 0), Piece::new(PieceType::Rook, Color::Black));
        board.place_piece(Position::new(1, 1), Piece::new(PieceType::Pawn, Color::Black));

        assert_eq!(evaluate(&board, Color::White), 3);
        assert_eq!(evaluate(&board, Color::Black), -3);
    }
}
