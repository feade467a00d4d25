//! Core types for union chess.
//!
//! In union chess a capture never removes a piece. The attacker and the
//! defender fuse into a single square holding one piece per side (a *union*),
//! and a piece landing on a union evicts its own-coloured member, which must
//! keep moving in the same turn.
//!
//! This crate provides the value types shared by the engine and its callers:
//! - [`Color`], [`PieceKind`] and [`Piece`] (with the [`Piece::join`] primitive)
//! - [`Square`] for board coordinates
//! - [`Move`] and [`MoveStep`] for turns and their animation steps
//! - Position string parsing and serialization

mod color;
mod kind;
mod mov;
mod piece;
mod position;
mod square;

pub use color::Color;
pub use kind::PieceKind;
pub use mov::{Move, MoveParseError, MoveStep};
pub use piece::{Join, Occupancy, Piece};
pub use position::{
    decode_placement, encode_placement, Placement, PositionError, PositionString,
};
pub use square::{Square, SquareError};
