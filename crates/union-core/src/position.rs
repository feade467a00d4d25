//! Position strings: the compact board encoding and the full game-state line.
//!
//! The board encoding is FEN-like. Each rank is written from the a-file to
//! the h-file, highest rank first, separated by `/`. Runs of empty squares
//! are digits, single pieces are letters (uppercase White, lowercase Black),
//! and a union is `U` followed by its white letter and then its black letter:
//!
//! ```text
//! rnbqkbnr/ppp1pppp/8/3UPp4/8/8/PPPP1PPP/RNBQKBNR
//! ```
//!
//! The game-state line appends the side to move, castling rights, the
//! en-passant target and the two move counters, as in FEN.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Board contents indexed by `[row][column]`, row 0 being rank 1.
pub type Placement = [[Piece; 8]; 8];

/// Errors that can occur when parsing position strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("empty position string")]
    Empty,

    #[error("rank {rank} covers {files} files, expected 8")]
    RankLength { rank: u8, files: u32 },

    #[error("invalid character '{character}' in rank {rank}")]
    InvalidCharacter { character: char, rank: u8 },

    #[error("invalid union in rank {rank}: expected 'U', a white letter and a black letter")]
    InvalidUnion { rank: u8 },

    #[error("missing '/' after rank {rank}")]
    MissingSeparator { rank: u8 },

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),

    #[error("invalid position string: expected 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Encodes a board's contents.
pub fn encode_placement(placement: &Placement) -> String {
    let mut out = String::with_capacity(64);

    for row in (0..8).rev() {
        if row < 7 {
            out.push('/');
        }
        let mut empty_count = 0;
        for piece in &placement[row] {
            let (white, black) = (piece.white(), piece.black());
            if white.is_none() && black.is_none() {
                empty_count += 1;
                continue;
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
                empty_count = 0;
            }
            match (white, black) {
                (Some(w), Some(b)) => {
                    out.push('U');
                    out.push(w.to_char(Color::White));
                    out.push(b.to_char(Color::Black));
                }
                (Some(w), None) => out.push(w.to_char(Color::White)),
                (None, Some(b)) => out.push(b.to_char(Color::Black)),
                (None, None) => unreachable!("empty squares are counted above"),
            }
        }
        if empty_count > 0 {
            out.push_str(&empty_count.to_string());
        }
    }

    out
}

/// Decodes a board encoding.
///
/// Nothing is produced unless the whole string is valid, so callers can
/// decode into a fresh value and only then replace their board.
pub fn decode_placement(s: &str) -> Result<Placement, PositionError> {
    if s.is_empty() {
        return Err(PositionError::Empty);
    }

    let mut placement = [[Piece::EMPTY; 8]; 8];
    let mut chars = s.chars().peekable();

    for row in (0..8usize).rev() {
        let rank = row as u8 + 1;
        decode_rank(&mut chars, rank, &mut placement[row])?;

        if row > 0 && chars.next() != Some('/') {
            return Err(PositionError::MissingSeparator { rank });
        }
    }

    let rest: String = chars.collect();
    if !rest.is_empty() {
        return Err(PositionError::TrailingInput(rest));
    }

    Ok(placement)
}

fn decode_rank(
    chars: &mut Peekable<Chars<'_>>,
    rank: u8,
    squares: &mut [Piece; 8],
) -> Result<(), PositionError> {
    let mut files = 0u32;

    while files < 8 {
        let c = match chars.peek() {
            Some('/') | None => return Err(PositionError::RankLength { rank, files }),
            Some(&c) => c,
        };
        chars.next();

        match c {
            '1'..='8' => {
                files += c as u32 - '0' as u32;
                if files > 8 {
                    return Err(PositionError::RankLength { rank, files });
                }
            }
            'U' => {
                let white = chars.next().and_then(PieceKind::from_char);
                let black = chars.next().and_then(PieceKind::from_char);
                match (white, black) {
                    (Some((w, Color::White)), Some((b, Color::Black))) => {
                        squares[files as usize] = Piece::union(w, b);
                    }
                    _ => return Err(PositionError::InvalidUnion { rank }),
                }
                files += 1;
            }
            _ => match PieceKind::from_char(c) {
                Some((kind, color)) => {
                    squares[files as usize] = Piece::single(color, kind);
                    files += 1;
                }
                None => return Err(PositionError::InvalidCharacter { character: c, rank }),
            },
        }
    }

    Ok(())
}

/// A parsed game-state line.
///
/// This holds validated raw components. The engine turns it into a board
/// and a turn context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionString {
    /// Board contents.
    pub placement: Placement,
    /// The side to move.
    pub side_to_move: Color,
    /// Castling availability (e.g., "KQkq", "-").
    pub castling: String,
    /// En-passant target square: the square a double-stepping pawn passed over.
    pub en_passant: Option<Square>,
    /// Moves since the last irreversible move (union creation or promotion).
    pub halfmove_clock: u32,
    /// Fullmove number
    pub fullmove_number: u32,
}

impl PositionString {
    /// The standard starting board.
    pub const STARTING_PLACEMENT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// The standard starting game state.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a game-state line.
    pub fn parse(s: &str) -> Result<Self, PositionError> {
        let parts: Vec<&str> = s.split_whitespace().collect();

        if parts.is_empty() {
            return Err(PositionError::Empty);
        }
        if parts.len() != 6 {
            return Err(PositionError::InvalidPartCount(parts.len()));
        }

        let placement = decode_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(PositionError::InvalidSideToMove(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3])?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| PositionError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| PositionError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(PositionString {
            placement,
            side_to_move,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn validate_castling(castling: &str) -> Result<(), PositionError> {
        if castling == "-" {
            return Ok(());
        }

        let mut seen = String::new();
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(PositionError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
            if seen.contains(c) {
                return Err(PositionError::InvalidCastlingRights(format!(
                    "duplicate '{}'",
                    c
                )));
            }
            seen.push(c);
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, PositionError> {
        if ep == "-" {
            return Ok(None);
        }

        let sq = Square::from_algebraic(ep)
            .map_err(|_| PositionError::InvalidEnPassantSquare(ep.to_string()))?;
        // Pawns double-step from their first two rows, so the passed-over
        // square is on rank 2, 3, 6 or 7.
        if !matches!(sq.row(), 1 | 2 | 5 | 6) {
            return Err(PositionError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(Some(sq))
    }

    /// Converts back to a game-state line.
    pub fn to_position_string(&self) -> String {
        let castling = if self.castling.is_empty() {
            "-"
        } else {
            self.castling.as_str()
        };
        let en_passant = self
            .en_passant
            .map(Square::to_algebraic)
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} {} {}",
            encode_placement(&self.placement),
            self.side_to_move.to_char(),
            castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for PositionString {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

impl fmt::Display for PositionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_position_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_piece() -> impl Strategy<Value = Piece> {
        let slot = || prop::option::of(prop::sample::select(PieceKind::ALL.to_vec()));
        (slot(), slot()).prop_map(|(w, b)| Piece::new(w, b))
    }

    fn any_placement() -> impl Strategy<Value = Placement> {
        prop::collection::vec(any_piece(), 64).prop_map(|pieces| {
            let mut placement = [[Piece::EMPTY; 8]; 8];
            for (i, piece) in pieces.into_iter().enumerate() {
                placement[i / 8][i % 8] = piece;
            }
            placement
        })
    }

    #[test]
    fn startpos_placement_roundtrip() {
        let placement = decode_placement(PositionString::STARTING_PLACEMENT).unwrap();
        assert_eq!(
            placement[0][4],
            Piece::single(Color::White, PieceKind::King)
        );
        assert_eq!(
            placement[7][3],
            Piece::single(Color::Black, PieceKind::Queen)
        );
        assert_eq!(placement[3][3], Piece::EMPTY);
        assert_eq!(
            encode_placement(&placement),
            PositionString::STARTING_PLACEMENT
        );
    }

    #[test]
    fn union_cell() {
        let s = "rnbqkbnr/ppp1pppp/8/3UPp4/8/8/PPPP1PPP/RNBQKBNR";
        let placement = decode_placement(s).unwrap();
        assert_eq!(placement[4][3], Piece::union(PieceKind::Pawn, PieceKind::Pawn));
        assert_eq!(encode_placement(&placement), s);
    }

    #[test]
    fn decode_rejects_empty() {
        assert_eq!(decode_placement(""), Err(PositionError::Empty));
    }

    #[test]
    fn decode_rejects_short_and_long_ranks() {
        assert_eq!(
            decode_placement("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PositionError::RankLength { rank: 8, files: 7 })
        );
        assert_eq!(
            decode_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN"),
            Err(PositionError::RankLength { rank: 1, files: 7 })
        );
        assert_eq!(
            decode_placement("rnbqkbnr/pppppppp/45/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(PositionError::RankLength { rank: 6, files: 9 })
        );
    }

    #[test]
    fn decode_rejects_bad_letters() {
        assert_eq!(
            decode_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR"),
            Err(PositionError::InvalidCharacter {
                character: 'X',
                rank: 2
            })
        );
        assert_eq!(
            decode_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN0"),
            Err(PositionError::InvalidCharacter {
                character: '0',
                rank: 1
            })
        );
    }

    #[test]
    fn decode_rejects_bad_unions() {
        for bad in ["Upp", "UPP", "UpP", "UP", "UPx", "U"] {
            let s = format!("{}7/8/8/8/8/8/8/8", bad);
            assert_eq!(
                decode_placement(&s),
                Err(PositionError::InvalidUnion { rank: 8 }),
                "{}",
                s
            );
        }
    }

    #[test]
    fn decode_rejects_missing_separator() {
        assert_eq!(
            decode_placement("rnbqkbnrpppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/"),
            Err(PositionError::MissingSeparator { rank: 8 })
        );
        assert_eq!(
            decode_placement("8/8/8/8/8/8/8"),
            Err(PositionError::MissingSeparator { rank: 2 })
        );
    }

    #[test]
    fn decode_rejects_trailing_input() {
        assert_eq!(
            decode_placement("8/8/8/8/8/8/8/8/8"),
            Err(PositionError::TrailingInput("/8".to_string()))
        );
    }

    #[test]
    fn parse_startpos() {
        let pos = PositionString::parse(PositionString::STARTPOS).unwrap();
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.castling, "KQkq");
        assert_eq!(pos.en_passant, None);
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.to_position_string(), PositionString::STARTPOS);
        assert_eq!(PositionString::default(), pos);
    }

    #[test]
    fn game_state_roundtrip() {
        let original = "rnbqkbnr/pppp1ppp/8/8/3UPp4/8/PPP1PPPP/RNBQKBNR b Kq e3 4 12";
        let pos = PositionString::parse(original).unwrap();
        assert_eq!(pos.en_passant, Square::from_algebraic("e3").ok());
        assert_eq!(pos.to_string(), original);
    }

    #[test]
    fn game_state_errors() {
        assert_eq!(PositionString::parse(""), Err(PositionError::Empty));
        assert_eq!(
            PositionString::parse("8/8/8/8/8/8/8/8 w"),
            Err(PositionError::InvalidPartCount(2))
        );
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(PositionError::InvalidSideToMove(_))
        ));
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/8 w KK - 0 1"),
            Err(PositionError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(PositionError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(PositionError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(PositionError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(PositionError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            PositionString::parse("8/8/8/8/8/8/8/9 w - - 0 1"),
            Err(PositionError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn error_display() {
        let err = PositionError::RankLength { rank: 3, files: 9 };
        assert_eq!(err.to_string(), "rank 3 covers 9 files, expected 8");
        let err = PositionError::InvalidCharacter {
            character: 'x',
            rank: 1,
        };
        assert!(err.to_string().contains('x'));
    }

    proptest! {
        #[test]
        fn placement_roundtrip(placement in any_placement()) {
            let encoded = encode_placement(&placement);
            prop_assert_eq!(decode_placement(&encoded), Ok(placement));
        }
    }
}
