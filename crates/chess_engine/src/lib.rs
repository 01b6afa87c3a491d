pub mod ai;
pub mod evaluation;
pub mod search;

pub use ai::{AiPlayer, DEFAULT_DEPTH};
pub use evaluation::evaluate;
pub use search::{enumerate_moves, minimax, search, INFINITY};
