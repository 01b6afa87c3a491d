//! Leaf-node counting over the legal move tree, used to pin down move
//! generation against known counts.

use crate::Board;

pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let side = board.side_to_move();
    let moves = board.legal_moves_for(side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        board.make(mv, true);
        nodes += perft(board, depth - 1);
        board.unmake();
    }
    nodes
}
