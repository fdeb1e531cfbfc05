//! FEN (Forsyth-Edwards Notation) decoding and encoding.
//!
//! Only the fields the engine understands are kept: piece placement,
//! active color and castling availability. The en passant, halfmove and
//! fullmove fields are validated when present and otherwise ignored.

use crate::{Color, PieceKind, Square};
use std::fmt;
use thiserror::Error;

/// Errors produced while decoding a FEN string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling availability: {0}")]
    InvalidCastling(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassant(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
}

/// Castling availability as written in the third FEN field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenCastling {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl FenCastling {
    /// All four wings available.
    pub const ALL: FenCastling = FenCastling {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut castling = FenCastling::default();
        if field == "-" {
            return Ok(castling);
        }
        for c in field.chars() {
            let slot = match c {
                'K' => &mut castling.white_kingside,
                'Q' => &mut castling.white_queenside,
                'k' => &mut castling.black_kingside,
                'q' => &mut castling.black_queenside,
                _ => return Err(FenError::InvalidCastling(field.to_string())),
            };
            if *slot {
                return Err(FenError::InvalidCastling(field.to_string()));
            }
            *slot = true;
        }
        Ok(castling)
    }
}

impl fmt::Display for FenCastling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        if flags.iter().all(|(on, _)| !on) {
            return f.write_str("-");
        }
        for (on, c) in flags {
            if on {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// A decoded FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenPosition {
    /// Every occupied square, in FEN reading order (a8 to h1).
    pub placement: Vec<(Square, Color, PieceKind)>,
    /// Side to move.
    pub active: Color,
    /// Castling availability.
    pub castling: FenCastling,
}

impl FenPosition {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Decodes a FEN string.
    ///
    /// Missing trailing fields default to White to move and no castling.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.is_empty() || fields.len() > 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = parse_placement(fields[0])?;

        let active = match fields.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = match fields.get(2) {
            Some(field) => FenCastling::parse(field)?,
            None => FenCastling::default(),
        };

        if let Some(&ep) = fields.get(3) {
            if ep != "-" && Square::from_algebraic(ep).is_none() {
                return Err(FenError::InvalidEnPassant(ep.to_string()));
            }
        }

        for counter in fields.iter().skip(4) {
            counter
                .parse::<u32>()
                .map_err(|_| FenError::InvalidCounter(counter.to_string()))?;
        }

        Ok(FenPosition {
            placement,
            active,
            castling,
        })
    }
}

impl fmt::Display for FenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board: [Option<(Color, PieceKind)>; 64] = [None; 64];
        for &(sq, color, kind) in &self.placement {
            board[sq.index() as usize] = Some((color, kind));
        }

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match board[rank * 8 + file] {
                    Some((color, kind)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", kind.to_fen_char(color))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }

        write!(f, " {} {} - 0 1", self.active.to_fen_char(), self.castling)
    }
}

/// Decodes the piece-placement field into `(square, color, kind)` triples.
pub fn parse_placement(field: &str) -> Result<Vec<(Square, Color, PieceKind)>, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placement = Vec::new();
    for (row, text) in rows.iter().enumerate() {
        // FEN lists the eighth rank first.
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid skip '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
                file += skip as u8;
                if file > 8 {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "rank {} overflows",
                        rank + 1
                    )));
                }
            } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                let sq = Square::new(file, rank).ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!("rank {} overflows", rank + 1))
                })?;
                placement.push((sq, color, kind));
                file += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    rank + 1
                )));
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares",
                rank + 1,
                file
            )));
        }
    }
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos() {
        let fen = FenPosition::parse(FenPosition::STARTPOS).unwrap();
        assert_eq!(fen.placement.len(), 32);
        assert_eq!(fen.active, Color::White);
        assert_eq!(fen.castling, FenCastling::ALL);
        assert!(fen
            .placement
            .contains(&(Square::E1, Color::White, PieceKind::King)));
        assert!(fen
            .placement
            .contains(&(Square::D8, Color::Black, PieceKind::Queen)));
    }

    #[test]
    fn display_round_trip() {
        let fen = FenPosition::parse(FenPosition::STARTPOS).unwrap();
        assert_eq!(fen.to_string(), FenPosition::STARTPOS);

        let text = "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1";
        assert_eq!(FenPosition::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn placement_only() {
        let fen = FenPosition::parse("7k/8/8/8/8/8/8/K7").unwrap();
        assert_eq!(fen.active, Color::White);
        assert_eq!(fen.castling, FenCastling::default());
        assert_eq!(
            fen.placement,
            vec![
                (Square::H8, Color::Black, PieceKind::King),
                (Square::A1, Color::White, PieceKind::King),
            ]
        );
    }

    #[test]
    fn rejects_bad_placement() {
        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("45/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Enough skips to wrap an 8-bit counter back to 8.
        let long_rank = format!("{}/8/8/8/8/8/8/8 w - - 0 1", "8".repeat(33));
        assert!(matches!(
            FenPosition::parse(&long_rank),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("ppppppppp/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("7x/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn rejects_bad_fields() {
        assert_eq!(
            FenPosition::parse("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::InvalidActiveColor("x".to_string()))
        );
        assert_eq!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w KK - 0 1"),
            Err(FenError::InvalidCastling("KK".to_string()))
        );
        assert_eq!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w - z9 0 1"),
            Err(FenError::InvalidEnPassant("z9".to_string()))
        );
        assert_eq!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(FenError::InvalidCounter("x".to_string()))
        );
        assert_eq!(FenPosition::parse(""), Err(FenError::InvalidFieldCount(0)));
    }
}
