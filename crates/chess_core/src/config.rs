use crate::{ChessError, ChessResult};

pub const STANDARD_SIZE: usize = 8;
pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 16;

/// Board geometry, fixed for the lifetime of a `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    size: usize,
}

impl BoardConfig {
    pub fn new(size: usize) -> ChessResult<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ChessError::UnsupportedBoardSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Self { size })
    }

    /// Number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn last_row(&self) -> usize {
        self.size - 1
    }

    pub fn last_col(&self) -> usize {
        self.size - 1
    }

    pub fn is_standard(&self) -> bool {
        self.size == STANDARD_SIZE
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { size: STANDARD_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_eight_by_eight() {
        let config = BoardConfig::default();
        assert_eq!(config.size(), 8);
        assert_eq!(config.last_row(), 7);
        assert_eq!(config.last_col(), 7);
        assert!(config.is_standard());
    }

    #[test]
    fn rejects_sizes_outside_range() {
        assert_eq!(
            BoardConfig::new(3),
            Err(ChessError::UnsupportedBoardSize { size: 3, min: 4, max: 16 })
        );
        assert!(BoardConfig::new(17).is_err());
        assert_eq!(BoardConfig::new(6).map(|c| c.size()), Ok(6));
    }
}
