//! Move representation.

use crate::Square;
use std::fmt;

/// What kind of move this is beyond its origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Any non-castling move, capture or not.
    Normal = 0,
    /// King and h-file rook swap sides (O-O).
    CastleKingside = 1,
    /// King and a-file rook swap sides (O-O-O).
    CastleQueenside = 2,
}

/// A move: origin, destination and flag.
///
/// Packed into 14 bits: 6 bits origin, 6 bits destination, 2 bits flag.
/// Castling is expressed as the king's move (`e1g1`, `e8c8`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6) | ((flag as u16) << 12))
    }

    /// Creates a non-castling move.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Origin square.
    #[inline]
    pub const fn from(self) -> Square {
        match Square::from_index((self.0 & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Destination square.
    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_index(((self.0 >> 6) & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match (self.0 >> 12) & 0b11 {
            1 => MoveFlag::CastleKingside,
            2 => MoveFlag::CastleQueenside,
            _ => MoveFlag::Normal,
        }
    }

    /// Coordinate notation, e.g. `"g1f3"`.
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from(), self.to())
    }

    /// Parses coordinate notation.
    ///
    /// The result always carries [`MoveFlag::Normal`]; callers match it
    /// against generated moves to recover castling flags. A trailing
    /// promotion letter is rejected because promotion is not supported.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        Some(Move::normal(from, to))
    }

    /// Returns true when origin and destination coincide with `other`,
    /// ignoring the flag.
    #[inline]
    pub fn same_squares(self, other: Move) -> bool {
        self.from() == other.from() && self.to() == other.to()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flag() {
            MoveFlag::Normal => write!(f, "Move({})", self.to_uci()),
            flag => write!(f, "Move({}, {:?})", self.to_uci(), flag),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn packs_squares_and_flag() {
        let m = Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside);
        assert_eq!(m.from(), Square::E1);
        assert_eq!(m.to(), Square::G1);
        assert_eq!(m.flag(), MoveFlag::CastleKingside);

        let m = Move::normal(Square::H8, Square::A1);
        assert_eq!(m.from(), Square::H8);
        assert_eq!(m.to(), Square::A1);
        assert_eq!(m.flag(), MoveFlag::Normal);
    }

    #[test]
    fn uci_text() {
        let m = Move::normal(sq("g1"), sq("f3"));
        assert_eq!(m.to_uci(), "g1f3");
        assert_eq!(Move::from_uci("g1f3"), Some(m));
        assert_eq!(m.to_string(), "g1f3");
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
    }

    #[test]
    fn castling_prints_as_king_move() {
        let m = Move::new(Square::E8, Square::C8, MoveFlag::CastleQueenside);
        assert_eq!(m.to_uci(), "e8c8");
        assert!(m.same_squares(Move::from_uci("e8c8").unwrap()));
        assert_ne!(m, Move::from_uci("e8c8").unwrap());
    }

    #[test]
    fn rejects_malformed_uci() {
        assert_eq!(Move::from_uci("e2"), None);
        assert_eq!(Move::from_uci("e2e"), None);
        assert_eq!(Move::from_uci("e2e9"), None);
        assert_eq!(Move::from_uci("e7e8q"), None);
        assert_eq!(Move::from_uci("0000"), None);
    }
}
