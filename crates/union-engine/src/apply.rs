//! Playing moves on a board.

use union_core::{Color, Join, Move, MoveStep, Piece, PieceKind, Square};

use crate::Board;

/// The outcome of a single piece landing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hop {
    /// What now stands on the landing square, and who was evicted from it.
    pub joined: Join,
    /// The en-passant victim's original square and the piece taken from it.
    pub victim: Option<(Square, Piece)>,
}

impl Board {
    /// Lands the single piece `mover`, which has already left `from`, on `to`.
    ///
    /// A pawn reaching its last row is promoted to a queen. A pawn moving
    /// diagonally onto an empty square captures en passant: the pawn it
    /// passed is pulled onto `to` first and joined there.
    pub(crate) fn hop(&mut self, mover: Piece, from: Square, to: Square) -> Hop {
        let mut mover = mover;
        let mut victim = None;

        if let Some((color, PieceKind::Pawn)) = mover.as_single() {
            if from.column() != to.column() && self[to].is_empty() {
                victim = Square::new(from.row(), to.column()).map(|sq| (sq, self.take(sq)));
            }
            if to.row() == color.promotion_row() {
                mover = Piece::single(color, PieceKind::Queen);
            }
        }

        let occupant = match victim {
            Some((_, piece)) => piece,
            None => self[to],
        };
        let joined = occupant.join(mover);
        self.set(to, joined.piece);
        Hop { joined, victim }
    }

    /// Plays `mv` on this board and returns the individual piece transfers.
    ///
    /// Moves are trusted to come from [`legal_moves`](crate::legal_moves) or
    /// [`piece_moves`](crate::piece_moves) for this exact board.
    ///
    /// # Panics
    ///
    /// Panics if the move has no hops, starts on an empty square, or does not
    /// fit the board (a chain that ends with a piece still displaced, or a
    /// union asked to hop more than once).
    pub fn apply(&mut self, mv: &Move) -> Vec<MoveStep> {
        assert!(mv.hops() > 0, "move {} has no destination", mv);
        let origin = mv.origin();
        let mut mover = self.take(origin);
        assert!(!mover.is_empty(), "move {} starts on an empty square", mv);

        if mover.is_union() {
            let to = mv.destination();
            assert!(
                !mv.is_chain() && self[to].is_empty(),
                "union move {} must be a single hop onto an empty square",
                mv
            );
            self.set(to, mover);
            return vec![MoveStep {
                piece: mover,
                result: mover,
                from: origin,
                to,
            }];
        }

        let castling = if mv.is_chain() {
            None
        } else {
            castling_rook(mover, origin, mv.destination())
        };

        let mut steps = Vec::with_capacity(mv.hops() + 1);
        for (from, to) in mv.hop_pairs() {
            assert!(!mover.is_empty(), "move {} continues after its chain ended", mv);
            let hop = self.hop(mover, from, to);
            if let Some((sq, piece)) = hop.victim {
                steps.push(MoveStep {
                    piece,
                    result: piece,
                    from: sq,
                    to,
                });
            }
            steps.push(MoveStep {
                piece: mover,
                result: hop.joined.piece,
                from,
                to,
            });
            mover = hop.joined.displaced;
        }
        assert!(mover.is_empty(), "move {} leaves {} displaced", mv, mover);

        if let Some((from, to)) = castling {
            let rook = self.take(from);
            self.set(to, rook);
            steps.push(MoveStep {
                piece: rook,
                result: rook,
                from,
                to,
            });
        }

        steps
    }
}

/// The rook's path when a lone king steps two files along its row.
pub(crate) fn castling_rook(king: Piece, from: Square, to: Square) -> Option<(Square, Square)> {
    let (color, kind) = king.as_single()?;
    if kind != PieceKind::King || from.row() != to.row() || from.row() != color.back_row() {
        return None;
    }
    let row = color.back_row();
    match (from.column(), to.column()) {
        (4, 6) => Some((Square::new(row, 7)?, Square::new(row, 5)?)),
        (4, 2) => Some((Square::new(row, 0)?, Square::new(row, 3)?)),
        _ => None,
    }
}

/// Home square of a side's king.
pub(crate) fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(position: &str, mv: &str) -> (Board, Vec<MoveStep>) {
        let mut board = Board::decode(position).unwrap();
        let steps = board.apply(&mv.parse().unwrap());
        (board, steps)
    }

    #[test]
    fn simple_move() {
        let mut board = Board::new();
        let steps = board.apply(&"e2 -> e4".parse().unwrap());
        assert_eq!(board.encode(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].piece, Piece::single(Color::White, PieceKind::Pawn));
        assert_eq!(steps[0].result, steps[0].piece);
    }

    #[test]
    fn capture_forms_union() {
        let (board, steps) = play("8/8/8/3n4/4P3/8/8/8", "e4d5");
        assert_eq!(board.encode(), "8/8/8/3UPn4/8/8/8/8");
        assert_eq!(steps[0].result, Piece::union(PieceKind::Pawn, PieceKind::Knight));
    }

    #[test]
    fn chain_relocates_displaced_piece() {
        let (board, steps) = play("8/8/8/UNp7/8/8/8/R7", "a1 -> a5 -> c6");
        assert_eq!(board.encode(), "8/8/2N5/URp7/8/8/8/8");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].piece, Piece::single(Color::White, PieceKind::Knight));
        assert_eq!(steps[1].from, sq("a5"));
    }

    #[test]
    #[should_panic]
    fn unfinished_chain_panics() {
        play("8/8/8/UNp7/8/8/8/R7", "a1a5");
    }

    #[test]
    fn union_moves_whole() {
        let (board, steps) = play("8/8/8/8/3UBr4/8/8/8", "d4f6");
        assert_eq!(board.encode(), "8/8/5UBr2/8/8/8/8/8");
        assert_eq!(steps[0].piece, Piece::union(PieceKind::Bishop, PieceKind::Rook));
    }

    #[test]
    fn en_passant_pulls_victim() {
        let (board, steps) = play("8/8/8/3pP3/8/8/8/8", "e5d6");
        assert_eq!(board.encode(), "8/8/3UPp4/8/8/8/8/8");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].from, sq("d5"));
        assert_eq!(steps[0].to, sq("d6"));
    }

    #[test]
    fn promotion_to_queen() {
        let (board, _) = play("8/4P3/8/8/8/8/8/8", "e7e8");
        assert_eq!(board.encode(), "4Q3/8/8/8/8/8/8/8");
        let (board, _) = play("3r4/4P3/8/8/8/8/8/8", "e7d8");
        assert_eq!(board.encode(), "3UQr4/8/8/8/8/8/8/8");
    }

    #[test]
    fn castling_moves_rook() {
        let (board, steps) = play("r3k2r/8/8/8/8/8/8/R3K2R", "e1g1");
        assert_eq!(board.encode(), "r3k2r/8/8/8/8/8/8/R4RK1");
        assert_eq!(steps.len(), 2);
        let (board, _) = play("r3k2r/8/8/8/8/8/8/R3K2R", "e8c8");
        assert_eq!(board.encode(), "2kr3r/8/8/8/8/8/8/R3K2R");
    }

    #[test]
    fn castling_rook_squares() {
        let king = Piece::single(Color::White, PieceKind::King);
        assert_eq!(
            castling_rook(king, Square::E1, sq("g1")),
            Some((Square::H1, sq("f1")))
        );
        assert_eq!(castling_rook(king, Square::E1, sq("f1")), None);
        let rook = Piece::single(Color::White, PieceKind::Rook);
        assert_eq!(castling_rook(rook, Square::E1, sq("g1")), None);
        assert_eq!(king_home(Color::Black), Square::E8);
    }
}
