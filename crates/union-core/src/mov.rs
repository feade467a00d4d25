//! Move representation.

use crate::{Piece, Square, SquareError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a move from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move '{0}': expected at least two squares")]
    TooShort(String),

    #[error("invalid move: {0}")]
    InvalidSquare(#[from] SquareError),
}

/// One turn: an origin square followed by every hop taken during the turn.
///
/// Most moves have a single hop. A move becomes a chain when a hop lands on a
/// square whose own-colored member is evicted and has to keep moving; every
/// square after the first is then the landing square of the next hop.
///
/// A move is only a plan. It has no effect until it is applied to a board.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Move {
    positions: Vec<Square>,
}

impl Move {
    /// Creates a move that has not hopped anywhere yet.
    #[inline]
    pub fn new(origin: Square) -> Self {
        Move {
            positions: vec![origin],
        }
    }

    /// Creates a single-hop move.
    #[inline]
    pub fn normal(from: Square, to: Square) -> Self {
        Move {
            positions: vec![from, to],
        }
    }

    /// Creates a move from its full list of squares.
    ///
    /// Returns `None` for an empty list.
    pub fn from_positions(positions: Vec<Square>) -> Option<Self> {
        if positions.is_empty() {
            None
        } else {
            Some(Move { positions })
        }
    }

    /// Appends a hop destination.
    #[inline]
    pub fn push(&mut self, to: Square) {
        self.positions.push(to);
    }

    /// Returns a copy of this move extended by one hop.
    pub fn extended(&self, to: Square) -> Self {
        let mut positions = Vec::with_capacity(self.positions.len() + 1);
        positions.extend_from_slice(&self.positions);
        positions.push(to);
        Move { positions }
    }

    /// The square the moving piece starts on.
    #[inline]
    pub fn origin(&self) -> Square {
        self.positions[0]
    }

    /// The square the last hop lands on.
    #[inline]
    pub fn destination(&self) -> Square {
        self.positions[self.positions.len() - 1]
    }

    /// All squares of the move, origin first.
    #[inline]
    pub fn positions(&self) -> &[Square] {
        &self.positions
    }

    /// The number of hops taken.
    #[inline]
    pub fn hops(&self) -> usize {
        self.positions.len() - 1
    }

    /// Returns true if more than one piece moves during this turn.
    #[inline]
    pub fn is_chain(&self) -> bool {
        self.hops() > 1
    }

    /// Iterates over the (from, to) pair of every hop.
    pub fn hop_pairs(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.positions.windows(2).map(|w| (w[0], w[1]))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses `e2 -> e4`, `e2->e4->d5` or the compact `e2e4` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let positions = if compact.contains("->") {
            compact
                .split("->")
                .map(Square::from_algebraic)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            if compact.len() % 2 != 0 || !compact.is_ascii() {
                return Err(MoveParseError::TooShort(s.to_string()));
            }
            (0..compact.len())
                .step_by(2)
                .map(|i| Square::from_algebraic(&compact[i..i + 2]))
                .collect::<Result<Vec<_>, _>>()?
        };
        if positions.len() < 2 {
            return Err(MoveParseError::TooShort(s.to_string()));
        }
        Ok(Move { positions })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sq) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", sq)?;
        }
        Ok(())
    }
}

/// One atomic piece transfer produced while applying a move.
///
/// Steps exist for presentation (animation, logging); legality never looks
/// at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStep {
    /// The piece that travelled.
    pub piece: Piece,
    /// The occupant of `to` once the piece arrived.
    pub result: Piece,
    pub from: Square,
    pub to: Square,
}

impl fmt::Display for MoveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {} ({})", self.piece, self.from, self.to, self.result)
    }
}
