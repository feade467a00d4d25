//! Move generation.
//!
//! Moves are generated per piece from simple destination templates. Kings
//! and unions get one-hop moves only; every other piece goes through the
//! chain search, since landing on a union can hand the turn to a displaced
//! piece that has to move on.

mod chain;
pub mod perft;
mod safety;
mod templates;

use tracing::debug;
use union_core::{Color, Move, PieceKind, Square};

use crate::{Board, TurnContext};

pub use safety::{attacked_squares, is_king_capturable, is_square_attacked};

/// How castling is treated while generating king moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Castling {
    /// No castling moves at all.
    Off,
    /// Castling when rights and an empty path allow it.
    Unchecked,
    /// As `Unchecked`, and the king may not start on, cross or land on an
    /// attacked square.
    Safe,
}

/// Generates every complete move of the piece `side` controls on `origin`.
///
/// Returns nothing when `origin` holds no piece of `side`. The moves are not
/// checked for king safety.
pub fn piece_moves(
    board: &Board,
    origin: Square,
    side: Color,
    ctx: &TurnContext,
    castling: Castling,
) -> Vec<Move> {
    let piece = board[origin];
    match piece.kind_of(side) {
        None => Vec::new(),
        Some(kind) if piece.is_union() || kind == PieceKind::King => {
            templates::candidates(board, origin, piece, side, ctx, castling)
                .into_iter()
                .map(|to| Move::normal(origin, to))
                .collect()
        }
        Some(_) => chain::search(board, origin, side, ctx),
    }
}

/// Generates all moves for `side` without the king-safety filter.
pub fn pseudo_legal_moves(board: &Board, side: Color, ctx: &TurnContext) -> Vec<Move> {
    board
        .squares_of(side)
        .flat_map(|origin| piece_moves(board, origin, side, ctx, Castling::Unchecked))
        .collect()
}

/// Generates all legal moves for `side`.
///
/// A move is legal when, once played, no unfiltered reply of the opponent
/// ends on `side`'s king.
pub fn legal_moves(board: &Board, side: Color, ctx: &TurnContext) -> Vec<Move> {
    let moves: Vec<Move> = board
        .squares_of(side)
        .flat_map(|origin| piece_moves(board, origin, side, ctx, Castling::Safe))
        .filter(|mv| {
            let mut after = *board;
            after.apply(mv);
            !is_king_capturable(&after, side)
        })
        .collect();

    debug!(side = %side, count = moves.len(), "generated legal moves");
    moves
}

impl Board {
    /// Generates all legal moves for `side` on this board.
    pub fn legal_moves(&self, side: Color, ctx: &TurnContext) -> Vec<Move> {
        legal_moves(self, side, ctx)
    }
}
