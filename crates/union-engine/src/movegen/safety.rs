//! Attacked squares and king safety.
//!
//! Both tests look at the opponent's pseudo-legal replies only, with no
//! en-passant target and no castling rights. Replies are never themselves
//! filtered for safety, which bounds the recursion to one ply.

use std::collections::HashSet;

use union_core::{Color, PieceKind, Square};

use super::pseudo_legal_moves;
use crate::{Board, TurnContext};

/// Returns every square `attacker` could finish a move on.
///
/// Moves made by a union are left out: a union only ever moves onto empty
/// squares, so it never threatens anything by itself.
pub fn attacked_squares(board: &Board, attacker: Color) -> HashSet<Square> {
    pseudo_legal_moves(board, attacker, &TurnContext::NONE)
        .into_iter()
        .filter(|mv| !board[mv.origin()].is_union())
        .map(|mv| mv.destination())
        .collect()
}

/// Returns true if `attacker` could finish a move on `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, attacker: Color) -> bool {
    attacked_squares(board, attacker).contains(&sq)
}

/// Returns true if the opponent of `side` has a reply that ends on `side`'s king.
pub fn is_king_capturable(board: &Board, side: Color) -> bool {
    pseudo_legal_moves(board, side.opposite(), &TurnContext::NONE)
        .iter()
        .any(|mv| board[mv.destination()].kind_of(side) == Some(PieceKind::King))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn attacked_squares_at_start() {
        let board = Board::new();
        // Pushes count; diagonals onto empty squares do not.
        assert!(is_square_attacked(&board, sq("e3"), Color::White));
        assert!(is_square_attacked(&board, sq("f3"), Color::White));
        assert!(!is_square_attacked(&board, sq("e5"), Color::White));
        assert!(is_square_attacked(&board, sq("e5"), Color::Black));
    }

    #[test]
    fn union_moves_do_not_attack() {
        let board = Board::decode("8/8/8/8/3URn4/8/8/8").unwrap();
        assert!(attacked_squares(&board, Color::White).is_empty());
        assert!(attacked_squares(&board, Color::Black).is_empty());
    }

    #[test]
    fn rook_threatens_king() {
        let board = Board::decode("4k3/8/8/8/8/8/8/4R2K").unwrap();
        assert!(is_king_capturable(&board, Color::Black));
        assert!(!is_king_capturable(&board, Color::White));
    }

    #[test]
    fn blocked_threat() {
        let board = Board::decode("4k3/4p3/8/8/8/8/8/4R2K").unwrap();
        assert!(!is_king_capturable(&board, Color::Black));
    }

    #[test]
    fn kings_never_capture() {
        let board = Board::decode("8/8/8/8/8/8/3k4/4K3").unwrap();
        assert!(!is_king_capturable(&board, Color::White));
        assert!(!is_king_capturable(&board, Color::Black));
    }
}
