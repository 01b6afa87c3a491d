use std::sync::Arc;

use anyhow::Result;
use chess_core::{Board, Color, GameStatus, SoundEffects};
use chess_engine::{AiPlayer, DEFAULT_DEPTH};
use clap::Parser;
use log::{debug, info};
use tracing_subscriber::EnvFilter;

/// Plays the engine against itself and prints the final position.
#[derive(Parser, Debug)]
#[command(name = "chess-minimax", version)]
struct Args {
    /// Search depth for both sides
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Stop after this many half-moves
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Seed for the engines' fallback move choice
    #[arg(long)]
    seed: Option<u64>,
}

/// Stands in for audio playback by logging the cue.
struct LoggedSound;

impl SoundEffects for LoggedSound {
    fn play(&self, capture: bool) {
        debug!("sound: {}", if capture { "capture" } else { "move" });
    }
}

fn player(color: Color, depth: u8, seed: Option<u64>) -> AiPlayer {
    match seed {
        Some(seed) => AiPlayer::with_seed(color, depth, seed.wrapping_add(color as u64)),
        None => AiPlayer::new(color, depth),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut board = Board::new().with_sound(Arc::new(LoggedSound));
    let mut white = player(Color::White, args.depth, args.seed);
    let mut black = player(Color::Black, args.depth, args.seed);
    info!("self-play at depth {}", white.depth());

    let mut plies = 0;
    let outcome = loop {
        match board.status() {
            GameStatus::Checkmate { winner } => break format!("checkmate, {:?} wins", winner),
            GameStatus::Stalemate => break "stalemate".to_string(),
            GameStatus::Ongoing => {}
        }
        if board.has_insufficient_material() {
            break "draw by insufficient material".to_string();
        }
        if plies >= args.max_plies {
            break format!("stopped after {} plies", plies);
        }

        let mover = board.side_to_move();
        let ai = match mover {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(mv) = ai.choose_best_move(&mut board) else {
            break "no move available".to_string();
        };
        board.play_move(mv)?;
        plies += 1;
        info!("{:>3}. {:?} {}", plies, mover, mv);
    };

    println!("{}", board);
    println!("{}", outcome);
    Ok(())
}
