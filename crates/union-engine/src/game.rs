//! Turn-by-turn game management.
//!
//! The board knows nothing about whose turn it is or which rights are
//! still alive. [`Game`] keeps that state and updates it after every move.

use thiserror::Error;
use tracing::debug;
use union_core::{Color, Move, MoveParseError, MoveStep, PieceKind, PositionError, PositionString};

use crate::{legal_moves, Board, CastlingRights, TurnContext};

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    /// The move as played.
    pub mov: Move,
    /// The piece transfers the move produced.
    pub steps: Vec<MoveStep>,
}

/// Error type for game operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The move text could not be parsed.
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveParseError),
}

/// A union chess game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    context: TurnContext,
    /// Plies since a union was formed or a pawn promoted.
    halfmove_clock: u32,
    fullmove_number: u32,
    moves: Vec<GameMove>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            side_to_move: Color::White,
            context: TurnContext::INITIAL,
            halfmove_clock: 0,
            fullmove_number: 1,
            moves: Vec::new(),
        }
    }

    /// Creates a game from a game-state line.
    pub fn from_position_string(s: &str) -> Result<Self, PositionError> {
        let parsed = PositionString::parse(s)?;
        Ok(Game {
            board: Board::from_placement(parsed.placement),
            side_to_move: parsed.side_to_move,
            context: TurnContext::new(
                parsed.en_passant,
                CastlingRights::from_field(&parsed.castling),
            ),
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            moves: Vec::new(),
        })
    }

    /// Encodes the current state as a game-state line.
    pub fn to_position_string(&self) -> String {
        PositionString {
            placement: *self.board.placement(),
            side_to_move: self.side_to_move,
            castling: self.context.castling.to_string(),
            en_passant: self.context.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_position_string()
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the castling rights and en-passant target for this turn.
    pub fn context(&self) -> &TurnContext {
        &self.context
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the move history.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, self.side_to_move, &self.context)
    }

    /// Plays a move and advances the turn.
    pub fn make_move(&mut self, m: &Move) -> Result<Vec<MoveStep>, GameError> {
        if !self.legal_moves().contains(m) {
            return Err(GameError::IllegalMove(m.to_string()));
        }

        let side = self.side_to_move;
        let before = self.board;
        let steps = self.board.apply(m);
        self.context = self.context.advance(&before, &self.board, m, side);

        if resets_clock(&before, &self.board, m) {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if side == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = side.opposite();

        debug!(side = %side, mv = %m, steps = steps.len(), "move played");
        self.moves.push(GameMove {
            mov: m.clone(),
            steps: steps.clone(),
        });
        Ok(steps)
    }

    /// Plays a move written as `e2 -> e4`, `e2->e4->d5` or `e2e4`.
    pub fn make_move_str(&mut self, s: &str) -> Result<Vec<MoveStep>, GameError> {
        let m: Move = s.parse()?;
        self.make_move(&m)
    }
}

/// Whether a move is irreversible: a lone piece forming a union in one hop,
/// or a promotion.
fn resets_clock(before: &Board, after: &Board, m: &Move) -> bool {
    let pawns = |board: &Board| {
        Color::ALL
            .iter()
            .map(|&color| board.count(PieceKind::Pawn, color))
            .sum::<usize>()
    };
    let forms_union = !m.is_chain()
        && !before[m.origin()].is_union()
        && after[m.destination()].is_union();
    forms_union || pawns(before) != pawns(after)
}
