use std::fmt;
use std::str::FromStr;

use crate::ChessError;

/// A board coordinate. Row 0 is Black's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Shifts by `(dr, dc)`, returning `None` when the result leaves a
    /// `size` x `size` board.
    pub fn offset(self, dr: i8, dc: i8, size: usize) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 || row >= size as i16 || col >= size as i16 {
            return None;
        }
        Some(Self::new(row as u8, col as u8))
    }

    pub fn is_on_board(self, size: usize) -> bool {
        (self.row as usize) < size && (self.col as usize) < size
    }

    /// Parses `"e2"` style notation for a standard 8x8 board.
    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            row: 8 - (rank as u8 - b'0'),
            col: file as u8 - b'a',
        })
    }

    pub fn to_algebraic(self) -> Option<String> {
        if !self.is_on_board(8) {
            return None;
        }
        Some(format!("{}{}", (b'a' + self.col) as char, 8 - self.row))
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or_else(|| ChessError::InvalidAlgebraic(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(square) => f.write_str(&square),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}
