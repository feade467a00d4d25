//! Square occupants: empty, a single piece, or a union of one piece per side.

use crate::{Color, PieceKind};
use std::fmt;

/// What a square holds, derived from its two per-side slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupancy {
    Empty,
    White,
    Black,
    Union,
}

impl Occupancy {
    /// The occupancy of a square holding a single piece of `color`.
    #[inline]
    pub const fn of(color: Color) -> Self {
        match color {
            Color::White => Occupancy::White,
            Color::Black => Occupancy::Black,
        }
    }
}

/// The occupant of one square.
///
/// A piece has one slot per side. Occupancy is never stored: it is computed
/// from which slots are filled, so it cannot drift out of sync with them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    white: Option<PieceKind>,
    black: Option<PieceKind>,
}

/// The outcome of [`Piece::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    /// The new occupant of the target square.
    pub piece: Piece,
    /// The piece evicted from the mover's slot, or [`Piece::EMPTY`] if the
    /// slot was free and the hop ends the chain.
    pub displaced: Piece,
}

impl Join {
    /// Returns true if the displaced piece must keep moving.
    #[inline]
    pub const fn continues(&self) -> bool {
        !self.displaced.is_empty()
    }
}

impl Piece {
    /// An empty square.
    pub const EMPTY: Piece = Piece {
        white: None,
        black: None,
    };

    /// Creates a piece from its two slots.
    #[inline]
    pub const fn new(white: Option<PieceKind>, black: Option<PieceKind>) -> Self {
        Piece { white, black }
    }

    /// Creates a single piece of one side.
    #[inline]
    pub const fn single(color: Color, kind: PieceKind) -> Self {
        match color {
            Color::White => Piece::new(Some(kind), None),
            Color::Black => Piece::new(None, Some(kind)),
        }
    }

    /// Creates a union of a white and a black piece.
    #[inline]
    pub const fn union(white: PieceKind, black: PieceKind) -> Self {
        Piece::new(Some(white), Some(black))
    }

    /// The white slot.
    #[inline]
    pub const fn white(self) -> Option<PieceKind> {
        self.white
    }

    /// The black slot.
    #[inline]
    pub const fn black(self) -> Option<PieceKind> {
        self.black
    }

    /// The slot belonging to `color`.
    #[inline]
    pub const fn kind_of(self, color: Color) -> Option<PieceKind> {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Returns a copy with the slot of `color` replaced.
    #[inline]
    pub const fn with_slot(self, color: Color, kind: Option<PieceKind>) -> Self {
        match color {
            Color::White => Piece::new(kind, self.black),
            Color::Black => Piece::new(self.white, kind),
        }
    }

    /// Derives the occupancy from the two slots.
    #[inline]
    pub const fn occupancy(self) -> Occupancy {
        match (self.white, self.black) {
            (None, None) => Occupancy::Empty,
            (Some(_), None) => Occupancy::White,
            (None, Some(_)) => Occupancy::Black,
            (Some(_), Some(_)) => Occupancy::Union,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.white.is_none() && self.black.is_none()
    }

    #[inline]
    pub const fn is_union(self) -> bool {
        self.white.is_some() && self.black.is_some()
    }

    /// The color of a single piece; `None` for empty squares and unions.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self.occupancy() {
            Occupancy::White => Some(Color::White),
            Occupancy::Black => Some(Color::Black),
            Occupancy::Empty | Occupancy::Union => None,
        }
    }

    /// The color and kind of a single piece.
    #[inline]
    pub const fn as_single(self) -> Option<(Color, PieceKind)> {
        match (self.white, self.black) {
            (Some(kind), None) => Some((Color::White, kind)),
            (None, Some(kind)) => Some((Color::Black, kind)),
            _ => None,
        }
    }

    /// Lands the single piece `mover` on this square.
    ///
    /// The mover overwrites the slot of its own color and whatever held that
    /// slot before is handed back as [`Join::displaced`]. Landing on an empty
    /// square or on a lone opposing piece therefore ends the chain, while
    /// landing on a union (or an own-colored piece) evicts a piece that must
    /// move on.
    ///
    /// # Panics
    ///
    /// Panics if `mover` is empty or a union.
    pub fn join(self, mover: Piece) -> Join {
        let (color, kind) = mover
            .as_single()
            .expect("only a single piece can join a square");
        let displaced = match self.kind_of(color) {
            Some(evicted) => Piece::single(color, evicted),
            None => Piece::EMPTY,
        };
        Join {
            piece: self.with_slot(color, Some(kind)),
            displaced,
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({})", self)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.white, self.black) {
            (None, None) => f.write_str("empty"),
            (Some(w), None) => write!(f, "white {}", w),
            (None, Some(b)) => write!(f, "black {}", b),
            (Some(w), Some(b)) => write!(f, "union of white {} and black {}", w, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_slot() -> impl Strategy<Value = Option<PieceKind>> {
        prop::option::of(prop::sample::select(PieceKind::ALL.to_vec()))
    }

    fn any_single() -> impl Strategy<Value = Piece> {
        (
            prop::sample::select(Color::ALL.to_vec()),
            prop::sample::select(PieceKind::ALL.to_vec()),
        )
            .prop_map(|(color, kind)| Piece::single(color, kind))
    }

    #[test]
    fn occupancy_follows_slots() {
        assert_eq!(Piece::EMPTY.occupancy(), Occupancy::Empty);
        assert_eq!(
            Piece::single(Color::White, PieceKind::Pawn).occupancy(),
            Occupancy::White
        );
        assert_eq!(
            Piece::single(Color::Black, PieceKind::Pawn).occupancy(),
            Occupancy::Black
        );
        assert_eq!(
            Piece::union(PieceKind::Rook, PieceKind::Knight).occupancy(),
            Occupancy::Union
        );
    }

    #[test]
    fn join_empty_square_is_terminal() {
        let pawn = Piece::single(Color::White, PieceKind::Pawn);
        let join = Piece::EMPTY.join(pawn);
        assert_eq!(join.piece, pawn);
        assert!(!join.continues());
    }

    #[test]
    fn join_lone_enemy_forms_union() {
        let pawn = Piece::single(Color::White, PieceKind::Pawn);
        let knight = Piece::single(Color::Black, PieceKind::Knight);
        let join = knight.join(pawn);
        assert_eq!(join.piece, Piece::union(PieceKind::Pawn, PieceKind::Knight));
        assert!(join.piece.is_union());
        assert_eq!(join.displaced, Piece::EMPTY);
    }

    #[test]
    fn join_union_displaces_own_color() {
        let union = Piece::union(PieceKind::Bishop, PieceKind::Rook);
        let queen = Piece::single(Color::Black, PieceKind::Queen);
        let join = union.join(queen);
        assert_eq!(join.piece, Piece::union(PieceKind::Bishop, PieceKind::Queen));
        assert_eq!(join.displaced, Piece::single(Color::Black, PieceKind::Rook));
        assert!(join.continues());
    }

    #[test]
    #[should_panic]
    fn join_with_union_mover_panics() {
        let _ = Piece::EMPTY.join(Piece::union(PieceKind::Pawn, PieceKind::Pawn));
    }

    #[test]
    fn display() {
        assert_eq!(Piece::EMPTY.to_string(), "empty");
        assert_eq!(
            Piece::single(Color::Black, PieceKind::Knight).to_string(),
            "black knight"
        );
        assert_eq!(
            format!("{:?}", Piece::union(PieceKind::Pawn, PieceKind::Knight)),
            "Piece(union of white pawn and black knight)"
        );
    }

    proptest! {
        #[test]
        fn union_iff_both_slots(white in any_slot(), black in any_slot()) {
            let piece = Piece::new(white, black);
            let occupancy = piece.occupancy();
            prop_assert_eq!(occupancy == Occupancy::Union, white.is_some() && black.is_some());
            prop_assert_eq!(occupancy == Occupancy::Empty, white.is_none() && black.is_none());
            prop_assert_eq!(piece.is_union(), piece.occupancy() == Occupancy::Union);
        }

        #[test]
        fn join_displaces_matching_slot(
            white in any_slot(),
            black in any_slot(),
            mover in any_single(),
        ) {
            let target = Piece::new(white, black);
            let (color, kind) = mover.as_single().unwrap();
            let join = target.join(mover);

            prop_assert_eq!(join.piece.kind_of(color), Some(kind));
            prop_assert_eq!(
                join.piece.kind_of(color.opposite()),
                target.kind_of(color.opposite())
            );
            prop_assert_eq!(join.displaced.kind_of(color), target.kind_of(color));
            prop_assert_eq!(join.displaced.kind_of(color.opposite()), None);
            if target.kind_of(color.opposite()).is_some() {
                prop_assert!(join.piece.is_union());
            }
        }
    }
}
