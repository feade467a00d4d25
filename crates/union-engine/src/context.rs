//! Per-turn legality state: castling rights and the en-passant target.

use std::fmt;

use union_core::{Color, Move, PieceKind, Square};

use crate::Board;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses the castling field of a position string ("KQkq", "Kq", "-").
    ///
    /// Unknown characters are ignored; the position-string parser has
    /// already validated the field.
    pub fn from_field(field: &str) -> Self {
        let flags = field.chars().fold(0, |flags, c| {
            flags
                | match c {
                    'K' => Self::WHITE_KINGSIDE,
                    'Q' => Self::WHITE_QUEENSIDE,
                    'k' => Self::BLACK_KINGSIDE,
                    'q' => Self::BLACK_QUEENSIDE,
                    _ => 0,
                }
        });
        CastlingRights::new(flags)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        for (color, king, queen) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            if self.can_castle_kingside(color) {
                write!(f, "{}", king)?;
            }
            if self.can_castle_queenside(color) {
                write!(f, "{}", queen)?;
            }
        }
        Ok(())
    }
}

/// Legality state that changes from turn to turn.
///
/// The board never updates this itself. Whoever runs the turns (see
/// [`Game`](crate::Game)) advances it after each move with
/// [`TurnContext::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnContext {
    /// The square a pawn may capture onto by en passant this turn.
    pub en_passant: Option<Square>,
    /// Castling rights for both sides.
    pub castling: CastlingRights,
}

impl TurnContext {
    /// No en-passant target and no castling rights.
    pub const NONE: TurnContext = TurnContext {
        en_passant: None,
        castling: CastlingRights::NONE,
    };

    /// The context at the start of a game: all rights, no en-passant target.
    pub const INITIAL: TurnContext = TurnContext {
        en_passant: None,
        castling: CastlingRights::ALL,
    };

    #[inline]
    pub const fn new(en_passant: Option<Square>, castling: CastlingRights) -> Self {
        TurnContext {
            en_passant,
            castling,
        }
    }

    /// Computes the opponent's context after `side` played `mv`.
    ///
    /// `before` and `after` are the board on either side of the move.
    pub fn advance(&self, before: &Board, after: &Board, mv: &Move, side: Color) -> TurnContext {
        let mut castling = self.castling;

        let origin = before[mv.origin()];
        if !origin.is_union() && origin.kind_of(side) == Some(PieceKind::King) {
            castling.remove_color(side);
        }

        // Moving a rook away and landing on it both spoil that corner.
        for &sq in mv.positions() {
            match sq {
                Square::H1 => castling.remove_kingside(Color::White),
                Square::A1 => castling.remove_queenside(Color::White),
                Square::H8 => castling.remove_kingside(Color::Black),
                Square::A8 => castling.remove_queenside(Color::Black),
                _ => {}
            }
        }

        TurnContext {
            en_passant: double_step_target(after, mv, side),
            castling,
        }
    }
}

impl Default for TurnContext {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// The square passed over when the last hop of `mv` was a pawn double step.
fn double_step_target(after: &Board, mv: &Move, side: Color) -> Option<Square> {
    let positions = mv.positions();
    let [.., from, to] = positions else {
        return None;
    };
    let is_pawn = after[*to].kind_of(side) == Some(PieceKind::Pawn);
    let rows = from.row().abs_diff(to.row());
    if is_pawn && rows == 2 && from.column() == to.column() {
        Square::new((from.row() + to.row()) / 2, to.column())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn played(board: &Board, mv: &str) -> (Board, Move) {
        let mv: Move = mv.parse().unwrap();
        let mut after = *board;
        after.apply(&mv);
        (after, mv)
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        rights.remove_color(Color::Black);
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
        assert_eq!(rights.to_string(), "Q");
    }

    #[test]
    fn castling_field_roundtrip() {
        for field in ["KQkq", "Kq", "k", "-"] {
            assert_eq!(CastlingRights::from_field(field).to_string(), field);
        }
        assert_eq!(CastlingRights::from_field("-"), CastlingRights::NONE);
        assert_eq!(CastlingRights::from_field("KQkq"), CastlingRights::ALL);
    }

    #[test]
    fn double_step_sets_target() {
        let board = Board::new();
        let (after, mv) = played(&board, "e2e4");
        let next = TurnContext::INITIAL.advance(&board, &after, &mv, Color::White);
        assert_eq!(next.en_passant, Some(sq("e3")));
        assert_eq!(next.castling, CastlingRights::ALL);

        let (after, mv) = played(&board, "e2e3");
        let next = TurnContext::INITIAL.advance(&board, &after, &mv, Color::White);
        assert_eq!(next.en_passant, None);
    }

    #[test]
    fn knight_jump_is_not_a_double_step() {
        let board = Board::new();
        let (after, mv) = played(&board, "g1f3");
        let next = TurnContext::INITIAL.advance(&board, &after, &mv, Color::White);
        assert_eq!(next.en_passant, None);
    }

    #[test]
    fn king_move_clears_both_rights() {
        let board = Board::decode("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let (after, mv) = played(&board, "e1e2");
        let next = TurnContext::INITIAL.advance(&board, &after, &mv, Color::White);
        assert!(!next.castling.can_castle_kingside(Color::White));
        assert!(!next.castling.can_castle_queenside(Color::White));
        assert!(next.castling.can_castle_kingside(Color::Black));
    }

    #[test]
    fn rook_corner_clears_matching_right() {
        let board = Board::decode("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let (after, mv) = played(&board, "h1h8");
        let next = TurnContext::INITIAL.advance(&board, &after, &mv, Color::White);
        assert!(!next.castling.can_castle_kingside(Color::White));
        assert!(next.castling.can_castle_queenside(Color::White));
        assert!(!next.castling.can_castle_kingside(Color::Black));
        assert!(next.castling.can_castle_queenside(Color::Black));
    }
}
