//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth.
//! Union chess has no published reference counts, so it mostly serves as a
//! regression and termination check for the chain search.

use union_core::Color;

use super::legal_moves;
use crate::{Board, TurnContext};

/// Counts the number of leaf nodes at the given depth.
///
/// Each reply is generated with the turn context advanced over the move
/// just played, the same way [`Game`](crate::Game) does it.
pub fn perft(board: &Board, side: Color, ctx: &TurnContext, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, side, ctx);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut after = *board;
        after.apply(m);
        let next = ctx.advance(board, &after, m, side);
        nodes += perft(&after, side.opposite(), &next, depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(
    board: &Board,
    side: Color,
    ctx: &TurnContext,
    depth: u32,
) -> Vec<(String, u64)> {
    let moves = legal_moves(board, side, ctx);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut after = *board;
        after.apply(m);
        let nodes = if depth > 1 {
            let next = ctx.advance(board, &after, m, side);
            perft(&after, side.opposite(), &next, depth - 1)
        } else {
            1
        };
        results.push((m.to_string(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
