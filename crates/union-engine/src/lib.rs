//! Rules engine for union chess.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid of [`Piece`](union_core::Piece) values with
//!   position-string encode/decode and move application
//! - [`TurnContext`] - the en-passant target and castling rights for a turn
//! - Legal move generation, including chain moves through unions
//! - [`Game`] - turn bookkeeping on top of the board
//!
//! # Architecture
//!
//! Boards are small `Copy` values. Every search step works on its own copy,
//! so sibling branches of the chain search never share mutable state.
//!
//! Chain moves are enumerated breadth-first over (board, mover, square)
//! states with a seen-set, which keeps the search finite even when a piece
//! can be shuffled around a ring of unions.
//!
//! Legality has a single rule: after the move, no unfiltered reply of the
//! opponent may land on the mover's king.
//!
//! # Example
//!
//! ```
//! use union_core::Color;
//! use union_engine::{legal_moves, Board, TurnContext};
//!
//! let mut board = Board::new();
//! let moves = legal_moves(&board, Color::White, &TurnContext::default());
//! assert_eq!(moves.len(), 20);
//!
//! let e4 = moves.iter().find(|m| m.to_string() == "e2 -> e4").unwrap();
//! board.apply(e4);
//! assert_eq!(board.encode(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
//! ```

mod apply;
mod board;
mod context;
mod game;
pub mod movegen;

pub use board::Board;
pub use context::{CastlingRights, TurnContext};
pub use game::{Game, GameError, GameMove};
pub use movegen::{
    attacked_squares, is_king_capturable, is_square_attacked, legal_moves, piece_moves,
    pseudo_legal_moves, Castling,
};
