//! The 8x8 board.

use std::fmt;
use std::ops::Index;

use union_core::{
    decode_placement, encode_placement, Color, Piece, PieceKind, Placement, PositionError,
    PositionString, Square,
};

/// An 8x8 grid of pieces.
///
/// Boards are plain values: copying one is cheap and the search copies them
/// freely instead of sharing them. There is no structural invariant beyond
/// each square holding a valid [`Piece`], so positions without kings (or with
/// several) are representable.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: Placement,
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[Piece::EMPTY; 8]; 8],
        }
    }

    /// Creates the standard starting position.
    pub fn new() -> Self {
        Self::decode(PositionString::STARTING_PLACEMENT).expect("STARTING_PLACEMENT is valid")
    }

    /// Creates a board from decoded contents.
    pub const fn from_placement(squares: Placement) -> Self {
        Board { squares }
    }

    /// Decodes a board from its position string.
    pub fn decode(s: &str) -> Result<Self, PositionError> {
        decode_placement(s).map(Board::from_placement)
    }

    /// Replaces this board's contents with a decoded position string.
    ///
    /// On failure the board is left untouched.
    pub fn load(&mut self, s: &str) -> Result<(), PositionError> {
        *self = Self::decode(s)?;
        Ok(())
    }

    /// Encodes the board as a position string.
    pub fn encode(&self) -> String {
        encode_placement(&self.squares)
    }

    /// Returns the board contents indexed by `[row][column]`.
    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.squares
    }

    /// Returns the occupant of a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.row() as usize][sq.column() as usize]
    }

    /// Places a piece on a square, replacing its occupant.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.row() as usize][sq.column() as usize] = piece;
    }

    /// Empties a square and returns what was on it.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Piece {
        std::mem::take(&mut self.squares[sq.row() as usize][sq.column() as usize])
    }

    /// Iterates over the squares holding a piece of `color`, unions included.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.piece_at(sq).kind_of(color).is_some())
    }

    /// Counts the pieces of one kind and color, unions included.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.kind_of(color) == Some(kind))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Board {
    type Output = Piece;

    #[inline]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.row() as usize][sq.column() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.encode())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
