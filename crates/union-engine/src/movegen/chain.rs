//! Chain move enumeration.

use std::collections::{HashSet, VecDeque};

use tracing::trace;
use union_core::{Color, Move, Piece, Square};

use super::{templates::candidates, Castling};
use crate::{Board, TurnContext};

/// A point in the chain search: the board so far and the piece in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ChainState {
    board: Board,
    mover: Piece,
    square: Square,
    /// The square an en-passant hop emptied earlier in this chain.
    forbidden: Option<Square>,
}

/// Enumerates every complete move of the single piece on `origin`.
///
/// Each hop lands the piece in hand on a candidate square. If that evicts a
/// piece of the same color from a union, the evicted piece is the next
/// mover; otherwise the move is complete. States are explored breadth-first
/// and never twice, so the search ends even when pieces can cycle through
/// a ring of unions.
pub(crate) fn search(board: &Board, origin: Square, side: Color, ctx: &TurnContext) -> Vec<Move> {
    let mut start = *board;
    let mover = start.take(origin);

    let initial = ChainState {
        board: start,
        mover,
        square: origin,
        forbidden: None,
    };

    let mut seen = HashSet::new();
    seen.insert(initial);
    let mut queue = VecDeque::new();
    queue.push_back((initial, Move::new(origin)));

    let mut moves = Vec::new();
    while let Some((state, prefix)) = queue.pop_front() {
        let destinations = candidates(
            &state.board,
            state.square,
            state.mover,
            side,
            ctx,
            Castling::Off,
        );
        for to in destinations {
            if state.forbidden == Some(to) {
                continue;
            }
            let mut next = state.board;
            let hop = next.hop(state.mover, state.square, to);
            if !hop.joined.continues() {
                moves.push(prefix.extended(to));
                continue;
            }
            let successor = ChainState {
                board: next,
                mover: hop.joined.displaced,
                square: to,
                forbidden: hop.victim.map(|(sq, _)| sq).or(state.forbidden),
            };
            if seen.insert(successor) {
                queue.push_back((successor, prefix.extended(to)));
            }
        }
    }

    trace!(
        origin = %origin,
        states = seen.len(),
        moves = moves.len(),
        "chain search finished"
    );
    moves
}
