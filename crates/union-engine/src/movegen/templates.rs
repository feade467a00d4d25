//! Per-piece destination templates.

use union_core::{Color, Occupancy, Piece, PieceKind, Square};

use super::{safety::attacked_squares, Castling};
use crate::apply::king_home;
use crate::{Board, TurnContext};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Returns every square `piece`, standing on `origin`, may land on for `side`.
///
/// `piece` is the mover itself, which need not be on the board: during a
/// chain it is held in hand while the board shows the union it left.
pub(crate) fn candidates(
    board: &Board,
    origin: Square,
    piece: Piece,
    side: Color,
    ctx: &TurnContext,
    castling: Castling,
) -> Vec<Square> {
    let Some(kind) = piece.kind_of(side) else {
        return Vec::new();
    };
    let union = piece.is_union();
    match kind {
        PieceKind::Pawn => pawn(board, origin, union, side, ctx),
        PieceKind::Knight => knight(board, origin, union, side),
        PieceKind::Bishop => rays(board, origin, union, side, &BISHOP_DIRECTIONS),
        PieceKind::Rook => rays(board, origin, union, side, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            let mut squares = rays(board, origin, union, side, &ROOK_DIRECTIONS);
            squares.extend(rays(board, origin, union, side, &BISHOP_DIRECTIONS));
            squares
        }
        PieceKind::King => {
            let mut squares = king(board, origin);
            if !union && castling != Castling::Off && origin == king_home(side) {
                squares.extend(castles(board, side, ctx, castling));
            }
            squares
        }
    }
}

fn pawn(
    board: &Board,
    origin: Square,
    union: bool,
    side: Color,
    ctx: &TurnContext,
) -> Vec<Square> {
    let mut squares = Vec::new();
    let dir = side.pawn_direction();

    if let Some(one) = origin.offset(dir, 0).filter(|&sq| board[sq].is_empty()) {
        squares.push(one);
        // Pawns sent back to the back row by a chain may still double step.
        let back = side.back_row() as i8;
        let row = origin.row() as i8;
        if row == back || row == back + dir {
            if let Some(two) = origin.offset(2 * dir, 0).filter(|&sq| board[sq].is_empty()) {
                squares.push(two);
            }
        }
    }

    if union {
        return squares;
    }

    for d_col in [-1, 1] {
        let Some(target) = origin.offset(dir, d_col) else {
            continue;
        };
        if board[target].kind_of(side.opposite()).is_some() {
            squares.push(target);
        } else if ctx.en_passant == Some(target) && board[target].is_empty() {
            let victim = Square::new(origin.row(), target.column());
            let passed = victim.map(|sq| board[sq].kind_of(side.opposite()));
            if passed == Some(Some(PieceKind::Pawn)) {
                squares.push(target);
            }
        }
    }
    squares
}

fn knight(board: &Board, origin: Square, union: bool, side: Color) -> Vec<Square> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| origin.offset(d_row, d_col))
        .filter(|&sq| lands(board[sq], union, side))
        .collect()
}

fn rays(
    board: &Board,
    origin: Square,
    union: bool,
    side: Color,
    directions: &[(i8, i8)],
) -> Vec<Square> {
    let mut squares = Vec::new();
    for &(d_row, d_col) in directions {
        let mut current = origin;
        while let Some(next) = current.offset(d_row, d_col) {
            let occupant = board[next];
            if occupant.is_empty() {
                squares.push(next);
                current = next;
                continue;
            }
            if lands(occupant, union, side) {
                squares.push(next);
            }
            break;
        }
    }
    squares
}

fn king(board: &Board, origin: Square) -> Vec<Square> {
    KING_OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| origin.offset(d_row, d_col))
        .filter(|&sq| board[sq].is_empty())
        .collect()
}

/// Whether a piece may finish a jump or slide on `occupant`.
///
/// Unions only move onto empty squares; single pieces go anywhere except
/// onto a lone piece of their own color.
fn lands(occupant: Piece, union: bool, side: Color) -> bool {
    if union {
        occupant.is_empty()
    } else {
        occupant.occupancy() != Occupancy::of(side)
    }
}

/// Castling destinations for a lone king on its home square.
///
/// Besides the matching right and an empty path, the corner must still hold
/// a lone rook of `side`. A rook that has joined a union does not castle.
fn castles(board: &Board, side: Color, ctx: &TurnContext, castling: Castling) -> Vec<Square> {
    let row = side.back_row();
    let at = |col: u8| Square::new(row, col);
    let rook = Piece::single(side, PieceKind::Rook);

    // (right, rook corner, squares that must be empty, squares the king crosses)
    let wings = [
        (ctx.castling.can_castle_kingside(side), 7, 5..=6, [4, 5, 6]),
        (ctx.castling.can_castle_queenside(side), 0, 1..=3, [4, 3, 2]),
    ];

    let mut attacked = None;
    let mut squares = Vec::new();
    for (right, corner, between, path) in wings {
        if !right || at(corner).map(|sq| board[sq]) != Some(rook) {
            continue;
        }
        if !between
            .into_iter()
            .all(|col| at(col).is_some_and(|sq| board[sq].is_empty()))
        {
            continue;
        }
        if castling == Castling::Safe {
            let attacked = attacked.get_or_insert_with(|| attacked_squares(board, side.opposite()));
            if path.iter().any(|&col| at(col).is_some_and(|sq| attacked.contains(&sq))) {
                continue;
            }
        }
        squares.extend(at(path[2]));
    }
    squares
}
