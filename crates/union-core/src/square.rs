//! Board square representation.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing an algebraic square name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square '{0}': expected a file and a rank")]
    InvalidLength(String),

    #[error("invalid file '{0}': expected 'a'-'h'")]
    InvalidFile(char),

    #[error("invalid rank '{0}': expected '1'-'8'")]
    InvalidRank(char),
}

/// A square on the board, indexed 0-63.
///
/// Squares are indexed row-major from White's side:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// Row 0 is White's back row and column 0 is the a-file. A square that would
/// fall off the board is represented by `None` rather than a sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from a row and column (both 0-7).
    #[inline]
    pub const fn new(row: u8, column: u8) -> Option<Self> {
        if row < 8 && column < 8 {
            Some(Square(row * 8 + column))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::InvalidLength(s.to_string()));
        };
        if !('a'..='h').contains(&file) {
            return Err(SquareError::InvalidFile(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(SquareError::InvalidRank(rank));
        }
        Ok(Square((rank as u8 - b'1') * 8 + (file as u8 - b'a')))
    }

    /// Iterates over all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0 for rank 1, 7 for rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0 for the a-file, 7 for the h-file).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square shifted by the given deltas, if it stays on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_column: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let column = self.column() as i8 + d_column;
        if row < 0 || column < 0 {
            return None;
        }
        Square::new(row as u8, column as u8)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.column()) as char;
        let rank = (b'1' + self.row()) as char;
        format!("{}{}", file, rank)
    }

    // Corner and back-row squares used by castling
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
