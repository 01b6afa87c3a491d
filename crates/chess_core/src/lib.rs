// Core chess game logic modules
pub mod board;
pub mod config;
pub mod error;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;
pub mod sound;
pub mod square;

// Re-export main types for convenience
pub use board::{Board, GameStatus};
pub use config::BoardConfig;
pub use error::{ChessError, ChessResult};
pub use moves::{Move, MoveKind, MoveRecord};
pub use perft::perft;
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
pub use sound::{Silent, SoundEffects};
pub use square::Square;
