//! Perft: the standard move-generator correctness oracle.
//!
//! Counts leaf nodes of the game tree by recursive apply/unapply, for
//! comparison against published reference values.

use crate::{Board, MoveList};

/// Counts leaf nodes at the given depth; depth 0 is one node.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    board.generate_legal_into(&mut moves);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        let undo = board.apply(m);
        nodes += perft(board, depth - 1);
        board.unapply(undo);
    }
    nodes
}

/// Node counts per root move, sorted by move text. The totals sum to
/// `perft` at the same depth, which pins down a wrong subtree fast.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    let mut moves = MoveList::new();
    board.generate_legal_into(&mut moves);

    let mut results = Vec::with_capacity(moves.len());
    for &m in &moves {
        let nodes = if depth > 1 {
            let undo = board.apply(m);
            let nodes = perft(board, depth - 1);
            board.unapply(undo);
            nodes
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
