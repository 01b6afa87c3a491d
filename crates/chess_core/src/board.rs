use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::{
    config::STANDARD_SIZE, BoardConfig, ChessError, ChessResult, Color, Move, MoveKind,
    MoveRecord, Piece, PieceType, Position, Silent, SoundEffects, Square,
};

const BACK_RANK: [PieceType; STANDARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

/// The game state: square grid, side to move and the undo history.
///
/// Legality testing and search both apply a move as a simulation, inspect the
/// result and undo it on this same instance, so every apply has an exact
/// inverse recorded in `history`.
#[derive(Clone)]
pub struct Board {
    config: BoardConfig,
    squares: Vec<Square>,
    side_to_move: Color,
    history: Vec<MoveRecord>,
    sound: Arc<dyn SoundEffects>,
}

impl Board {
    /// Standard starting position on an 8x8 board.
    pub fn new() -> Self {
        let mut board = Self::empty(BoardConfig::default());
        board.setup_initial_position();
        board
    }

    /// Standard starting position for `config`. Only the 8x8 layout is defined.
    pub fn with_config(config: BoardConfig) -> ChessResult<Self> {
        if !config.is_standard() {
            return Err(ChessError::UnsupportedBoardSize {
                size: config.size(),
                min: STANDARD_SIZE,
                max: STANDARD_SIZE,
            });
        }
        let mut board = Self::empty(config);
        board.setup_initial_position();
        Ok(board)
    }

    /// A board with no pieces and White to move, for custom setups.
    pub fn empty(config: BoardConfig) -> Self {
        let size = config.size();
        let squares = (0..size)
            .flat_map(|row| (0..size).map(move |col| Square::new(row as u8, col as u8)))
            .collect();
        Self {
            config,
            squares,
            side_to_move: Color::White,
            history: Vec::new(),
            sound: Arc::new(Silent),
        }
    }

    pub fn with_sound(mut self, sound: Arc<dyn SoundEffects>) -> Self {
        self.sound = sound;
        self
    }

    pub fn set_sound(&mut self, sound: Arc<dyn SoundEffects>) {
        self.sound = sound;
    }

    fn setup_initial_position(&mut self) {
        let last = self.config.last_row() as u8;
        for (col, &piece_type) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            self.put(Position::new(0, col), Piece::new(piece_type, Color::Black));
            self.put(Position::new(1, col), Piece::new(PieceType::Pawn, Color::Black));
            self.put(Position::new(last - 1, col), Piece::new(PieceType::Pawn, Color::White));
            self.put(Position::new(last, col), Piece::new(piece_type, Color::White));
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> usize {
        self.config.size()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn square(&self, pos: Position) -> Option<&Square> {
        if !pos.is_on_board(self.size()) {
            return None;
        }
        self.squares.get(self.index(pos))
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.square(pos).and_then(|square| square.piece.as_ref())
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.squares
            .iter()
            .filter_map(|square| square.piece.as_ref().map(|piece| (square.position(), piece)))
    }

    /// Puts `piece` on `pos`, replacing any occupant. For building custom positions.
    /// Off-board positions are ignored and yield `None`.
    pub fn place_piece(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        if !pos.is_on_board(self.size()) {
            warn!("cannot place {:?} off the board at {:?}", piece.piece_type, pos);
            return None;
        }
        let idx = self.index(pos);
        self.squares[idx].piece.replace(piece)
    }

    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        if !pos.is_on_board(self.size()) {
            return None;
        }
        self.take(pos)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceType::King) && piece.color == color)
            .map(|(pos, _)| pos)
    }

    /// The pawn that may currently be taken en passant.
    pub fn en_passant_target(&self) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceType::Pawn) && piece.en_passant)
            .map(|(pos, _)| pos)
    }

    // Move generation

    /// Geometrically valid moves for the piece on `from`, ignoring king safety.
    pub fn generate_pseudo_moves(&self, from: Position) -> Vec<Move> {
        self.pseudo_moves(from, true)
    }

    fn pseudo_moves(&self, from: Position, castling: bool) -> Vec<Move> {
        let Some(&piece) = self.piece_at(from) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        match piece.piece_type {
            PieceType::Pawn => self.pawn_moves(piece, from, &mut moves),
            PieceType::Knight => self.step_moves(piece, from, &mut moves),
            PieceType::King => {
                self.step_moves(piece, from, &mut moves);
                if castling {
                    self.castle_moves(piece, from, &mut moves);
                }
            }
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                self.ray_moves(piece, from, &mut moves)
            }
        }
        moves
    }

    fn pawn_moves(&self, pawn: Piece, from: Position, moves: &mut Vec<Move>) {
        let size = self.size();
        let dir = pawn.color.pawn_direction();

        if let Some(one) = from.offset(dir, 0, size) {
            if self.is_empty(one) {
                moves.push(Move::new(from, one));
                if !pawn.has_moved {
                    if let Some(two) = from.offset(2 * dir, 0, size) {
                        if self.is_empty(two) {
                            moves.push(Move::new(from, two));
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(diagonal) = from.offset(dir, dc, size) else {
                continue;
            };
            let target = self.cell(diagonal);
            if target.has_enemy_piece(pawn.color) {
                moves.push(self.move_to(from, diagonal));
            } else if target.is_empty() {
                let passed = from
                    .offset(0, dc, size)
                    .and_then(|beside| self.piece_at(beside))
                    .filter(|p| p.is(PieceType::Pawn) && p.color != pawn.color && p.en_passant);
                if let Some(&passed) = passed {
                    moves.push(Move::capture(from, diagonal, passed));
                }
            }
        }
    }

    fn step_moves(&self, piece: Piece, from: Position, moves: &mut Vec<Move>) {
        let size = self.size();
        for &(dr, dc) in piece.piece_type.steps() {
            if let Some(to) = from.offset(dr, dc, size) {
                if self.cell(to).is_empty_or_enemy(piece.color) {
                    moves.push(self.move_to(from, to));
                }
            }
        }
    }

    fn ray_moves(&self, piece: Piece, from: Position, moves: &mut Vec<Move>) {
        let size = self.size();
        for &(dr, dc) in piece.piece_type.rays() {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc, size) {
                let target = self.cell(to);
                if target.is_empty() {
                    moves.push(Move::new(from, to));
                } else {
                    if target.has_enemy_piece(piece.color) {
                        moves.push(self.move_to(from, to));
                    }
                    break;
                }
                current = to;
            }
        }
    }

    fn castle_moves(&self, king: Piece, from: Position, moves: &mut Vec<Move>) {
        if king.has_moved {
            return;
        }
        let last_col = self.config.last_col() as u8;
        for (rook_col, dir) in [(0u8, -1i8), (last_col, 1i8)] {
            if from.col.abs_diff(rook_col) < 3 {
                continue;
            }
            let rook_ready = self
                .piece_at(Position::new(from.row, rook_col))
                .is_some_and(|p| p.is(PieceType::Rook) && p.color == king.color && !p.has_moved);
            if !rook_ready {
                continue;
            }
            let (low, high) = (from.col.min(rook_col), from.col.max(rook_col));
            if (low + 1..high).any(|col| !self.is_empty(Position::new(from.row, col))) {
                continue;
            }
            if let Some(to) = from.offset(0, 2 * dir, self.size()) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn is_castle(piece: &Piece, mv: &Move) -> bool {
        piece.is(PieceType::King) && mv.from.row == mv.to.row && mv.from.col.abs_diff(mv.to.col) == 2
    }

    /// Pseudo moves of the piece on `from` that do not leave its own king in check.
    pub fn generate_legal_moves(&mut self, from: Position) -> Vec<Move> {
        let Some(&piece) = self.piece_at(from) else {
            return Vec::new();
        };

        let candidates = self.pseudo_moves(from, true);
        let mut legal = Vec::with_capacity(candidates.len());
        for mv in candidates {
            if Self::is_castle(&piece, &mv) && !self.castle_path_safe(piece.color, &mv) {
                continue;
            }
            self.make(mv, true);
            let exposed = self.in_check(piece.color);
            self.unmake();
            if !exposed {
                legal.push(mv);
            }
        }
        legal
    }

    // The king may not castle out of check or across an attacked square.
    fn castle_path_safe(&self, color: Color, mv: &Move) -> bool {
        let crossed = Position::new(mv.from.row, (mv.from.col + mv.to.col) / 2);
        !self.in_check(color) && !self.is_square_attacked(crossed, color.opponent())
    }

    /// All legal moves of `color`, pieces visited in row-major order.
    pub fn legal_moves_for(&mut self, color: Color) -> Vec<Move> {
        let origins: Vec<Position> = self
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(pos, _)| pos)
            .collect();
        origins
            .into_iter()
            .flat_map(|from| self.generate_legal_moves(from))
            .collect()
    }

    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let origins: Vec<Position> = self
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(pos, _)| pos)
            .collect();
        origins
            .into_iter()
            .any(|from| !self.generate_legal_moves(from).is_empty())
    }

    /// Whether `mv` is in the current legal set of the piece standing on `from`.
    pub fn valid_move(&mut self, from: Position, mv: Move) -> bool {
        mv.from == from && self.generate_legal_moves(from).contains(&mv)
    }

    // Check detection

    pub fn in_check(&self, color: Color) -> bool {
        match self.king_position(color) {
            Some(king) => self.is_square_attacked(king, color.opponent()),
            None => {
                debug!("no {:?} king on the board, treating as not in check", color);
                false
            }
        }
    }

    /// Whether any piece of color `by` attacks `target`.
    pub fn is_square_attacked(&self, target: Position, by: Color) -> bool {
        let size = self.size();
        self.pieces()
            .filter(|(_, piece)| piece.color == by)
            .any(|(pos, piece)| match piece.piece_type {
                PieceType::Pawn => {
                    let dir = by.pawn_direction();
                    [-1, 1]
                        .iter()
                        .any(|&dc| pos.offset(dir, dc, size) == Some(target))
                }
                _ => self
                    .pseudo_moves(pos, false)
                    .iter()
                    .any(|mv| mv.to == target),
            })
    }

    // Applying and undoing moves

    /// Applies `mv` without checking legality; gate it with `valid_move`.
    ///
    /// Handles en-passant captures, promotion to a queen on an edge row and
    /// the rook hop of castling. Unless `simulation` is set the sound
    /// collaborator is told whether something was captured.
    pub fn apply_move(&mut self, mv: Move, simulation: bool) -> ChessResult<()> {
        for pos in [mv.from, mv.to] {
            if !pos.is_on_board(self.size()) {
                return Err(ChessError::OffBoard(pos));
            }
        }
        if self.piece_at(mv.from).is_none() {
            return Err(ChessError::EmptySquare(mv.from));
        }
        self.make(mv, simulation);
        Ok(())
    }

    /// Checks turn and legality, then applies `mv` with side effects.
    pub fn play_move(&mut self, mv: Move) -> ChessResult<()> {
        let piece = *self.piece_at(mv.from).ok_or(ChessError::EmptySquare(mv.from))?;
        if piece.color != self.side_to_move {
            return Err(ChessError::WrongTurn {
                expected: self.side_to_move,
            });
        }
        if !self.valid_move(mv.from, mv) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }
        self.apply_move(mv, false)
    }

    /// Reverts the most recent move, returning it.
    pub fn undo_move(&mut self) -> ChessResult<Move> {
        self.unmake()
            .map(|record| record.mv)
            .ok_or(ChessError::NothingToUndo)
    }

    pub(crate) fn make(&mut self, mv: Move, simulation: bool) -> bool {
        // Read before lifting the mover, which may be the flagged pawn itself.
        let en_passant_before = self.en_passant_target();
        let Some(mut piece) = self.take(mv.from) else {
            warn!("no piece at {} to move", mv.from);
            return false;
        };
        let before = piece;

        let (kind, captured) = if piece.is(PieceType::Pawn)
            && mv.from.col != mv.to.col
            && self.is_empty(mv.to)
        {
            let captured_at = Position::new(mv.from.row, mv.to.col);
            (MoveKind::EnPassant { captured_at }, self.take(captured_at))
        } else if Self::is_castle(&piece, &mv) {
            let captured = self.take(mv.to);
            let kind = self.castle_rook(piece.color, &mv).unwrap_or(MoveKind::Normal);
            (kind, captured)
        } else {
            let captured = self.take(mv.to);
            if piece.is(PieceType::Pawn) && self.is_promotion_row(mv.to.row) {
                piece = Piece::new(PieceType::Queen, piece.color);
                (MoveKind::Promotion, captured)
            } else {
                (MoveKind::Normal, captured)
            }
        };

        piece.has_moved = true;
        self.clear_en_passant_flags();
        self.put(mv.to, piece);
        if piece.is(PieceType::Pawn) && mv.from.row.abs_diff(mv.to.row) == 2 {
            self.set_en_passant_flag(mv.to);
        }

        let applied = Move { captured, ..mv };
        self.history.push(MoveRecord {
            mv: applied,
            kind,
            piece: before,
            captured,
            en_passant_before,
        });
        self.side_to_move = self.side_to_move.opponent();
        trace!("applied {} ({:?})", applied, kind);

        if !simulation {
            self.sound.play(captured.is_some());
        }
        true
    }

    fn castle_rook(&mut self, color: Color, mv: &Move) -> Option<MoveKind> {
        let rook_col = if mv.to.col > mv.from.col {
            self.config.last_col() as u8
        } else {
            0
        };
        let rook_from = Position::new(mv.from.row, rook_col);
        let rook = self
            .piece_at(rook_from)
            .copied()
            .filter(|p| p.is(PieceType::Rook) && p.color == color)?;
        let rook_to = Position::new(mv.from.row, (mv.from.col + mv.to.col) / 2);

        self.take(rook_from);
        self.put(rook_to, Piece { has_moved: true, ..rook });
        Some(MoveKind::Castle {
            rook_from,
            rook_to,
            rook,
        })
    }

    pub(crate) fn unmake(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        let MoveRecord {
            mv,
            kind,
            piece,
            captured,
            en_passant_before,
        } = record;

        self.take(mv.to);
        self.put(mv.from, piece);
        match kind {
            MoveKind::Normal | MoveKind::Promotion => self.set(mv.to, captured),
            MoveKind::EnPassant { captured_at } => self.set(captured_at, captured),
            MoveKind::Castle {
                rook_from,
                rook_to,
                rook,
            } => {
                self.take(rook_to);
                self.put(rook_from, rook);
            }
        }

        self.clear_en_passant_flags();
        if let Some(pos) = en_passant_before {
            self.set_en_passant_flag(pos);
        }
        self.side_to_move = self.side_to_move.opponent();
        trace!("undid {} ({:?})", mv, kind);
        Some(record)
    }

    /// Marks the pawn on `pos` as capturable en passant and clears the flag on
    /// every other pawn. `apply_move` already does this after a double step.
    pub fn set_en_passant_flag(&mut self, pos: Position) {
        if !self.piece_at(pos).is_some_and(|p| p.is(PieceType::Pawn)) {
            return;
        }
        self.clear_en_passant_flags();
        let idx = self.index(pos);
        if let Some(pawn) = self.squares[idx].piece.as_mut() {
            pawn.en_passant = true;
        }
    }

    fn clear_en_passant_flags(&mut self) {
        for piece in self.squares.iter_mut().filter_map(|sq| sq.piece.as_mut()) {
            piece.en_passant = false;
        }
    }

    fn is_promotion_row(&self, row: u8) -> bool {
        row == 0 || row as usize == self.config.last_row()
    }

    // Terminal states

    pub fn is_checkmate(&mut self) -> bool {
        let side = self.side_to_move;
        self.in_check(side) && !self.has_legal_move(side)
    }

    pub fn is_stalemate(&mut self) -> bool {
        let side = self.side_to_move;
        !self.in_check(side) && !self.has_legal_move(side)
    }

    pub fn is_game_over(&mut self) -> bool {
        let side = self.side_to_move;
        !self.has_legal_move(side)
    }

    pub fn status(&mut self) -> GameStatus {
        let side = self.side_to_move;
        if self.has_legal_move(side) {
            GameStatus::Ongoing
        } else if self.in_check(side) {
            GameStatus::Checkmate {
                winner: side.opponent(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Neither side can possibly mate: bare kings, a lone minor piece, or one
    /// bishop each on squares of the same color.
    pub fn has_insufficient_material(&self) -> bool {
        let mut white = Vec::new();
        let mut black = Vec::new();
        for (pos, piece) in self.pieces().filter(|(_, p)| !p.is(PieceType::King)) {
            match piece.color {
                Color::White => white.push((pos, piece.piece_type)),
                Color::Black => black.push((pos, piece.piece_type)),
            }
        }

        let is_minor = |t: PieceType| matches!(t, PieceType::Bishop | PieceType::Knight);
        match (white.as_slice(), black.as_slice()) {
            ([], []) => true,
            ([(_, t)], []) | ([], [(_, t)]) => is_minor(*t),
            ([(w, PieceType::Bishop)], [(b, PieceType::Bishop)]) => {
                (w.row + w.col) % 2 == (b.row + b.col) % 2
            }
            _ => false,
        }
    }

    // Grid access

    fn index(&self, pos: Position) -> usize {
        debug_assert!(pos.is_on_board(self.size()), "{:?} is off the board", pos);
        pos.row as usize * self.size() + pos.col as usize
    }

    fn cell(&self, pos: Position) -> &Square {
        &self.squares[self.index(pos)]
    }

    fn is_empty(&self, pos: Position) -> bool {
        self.cell(pos).is_empty()
    }

    fn move_to(&self, from: Position, to: Position) -> Move {
        Move {
            from,
            to,
            captured: self.cell(to).piece,
        }
    }

    fn take(&mut self, pos: Position) -> Option<Piece> {
        let idx = self.index(pos);
        self.squares[idx].piece.take()
    }

    fn put(&mut self, pos: Position, piece: Piece) {
        self.set(pos, Some(piece));
    }

    fn set(&mut self, pos: Position, piece: Option<Piece>) {
        let idx = self.index(pos);
        self.squares[idx].piece = piece;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("side_to_move", &self.side_to_move)
            .field("history", &self.history)
            .field("squares", &self.squares)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            write!(f, "{:>2} ", size - row)?;
            for col in 0..size {
                let glyph = self
                    .piece_at(Position::new(row as u8, col as u8))
                    .map_or('·', Piece::glyph);
                write!(f, "{}", glyph)?;
                if col + 1 < size {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..size {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
