//! Bitboard representation and edge-safe shifts.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! chess board. Shifting a bitboard moves every set square one step in a
//! compass direction; the squares on the edge that the step would wrap
//! through are masked out *before* the shift.

use chess_core::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A 64-bit board representation.
///
/// Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8 (little-endian rank-file mapping).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    // File masks
    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    // Rank masks
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// Creates a bitboard from a raw u64.
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.mask())
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the bitboard is not empty.
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns true if any square is shared with `other`.
    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the number of set bits (population count).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.mask() != 0
    }

    /// Sets the given square.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= sq.mask();
    }

    /// Clears the given square.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !sq.mask();
    }

    /// Returns the lowest set square, if any.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Pops and returns the lowest set square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Moves every set square one step in `dir`.
    ///
    /// Squares on the edge that `dir` would cross are dropped before the
    /// shift, so a piece on the h-file can never reappear on the a-file.
    #[inline]
    pub const fn step(self, dir: Direction) -> Bitboard {
        let bits = self.0 & !dir.edge().0;
        let shift = dir.shift();
        if shift >= 0 {
            Bitboard(bits << shift)
        } else {
            Bitboard(bits >> -shift)
        }
    }
}

/// The eight compass directions a piece can move in.
///
/// North is toward rank 8, east is toward the h-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Queen and king directions.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Bit offset of one step: +8 north, +1 east.
    #[inline]
    pub const fn shift(self) -> i32 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
        }
    }

    /// Squares a step in this direction would leave the board from.
    #[inline]
    pub const fn edge(self) -> Bitboard {
        let mask = match self {
            Direction::North => Bitboard::RANK_8.0,
            Direction::South => Bitboard::RANK_1.0,
            Direction::East => Bitboard::FILE_H.0,
            Direction::West => Bitboard::FILE_A.0,
            Direction::NorthEast => Bitboard::RANK_8.0 | Bitboard::FILE_H.0,
            Direction::NorthWest => Bitboard::RANK_8.0 | Bitboard::FILE_A.0,
            Direction::SouthEast => Bitboard::RANK_1.0 | Bitboard::FILE_H.0,
            Direction::SouthWest => Bitboard::RANK_1.0 | Bitboard::FILE_A.0,
        };
        Bitboard(mask)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let bit = 1u64 << (rank * 8 + file);
                f.write_str(if self.0 & bit != 0 { "X " } else { ". " })?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Iterator over set squares in a bitboard, lowest index first.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Bitboard::EMPTY, |bb, sq| bb | Bitboard::from_square(sq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(squares: &[&str]) -> Bitboard {
        squares
            .iter()
            .map(|s| Square::from_algebraic(s).unwrap())
            .collect()
    }

    #[test]
    fn edge_masks() {
        assert_eq!(Bitboard::FILE_A.count(), 8);
        assert_eq!(Bitboard::RANK_8.count(), 8);
        assert!(Bitboard::FILE_A.contains(Square::A8));
        assert!(Bitboard::FILE_H.contains(Square::H1));
        assert_eq!(Bitboard::RANK_1 & Bitboard::FILE_A, bb(&["a1"]));
    }

    #[test]
    fn steps_move_one_square() {
        let d4 = bb(&["d4"]);
        assert_eq!(d4.step(Direction::North), bb(&["d5"]));
        assert_eq!(d4.step(Direction::South), bb(&["d3"]));
        assert_eq!(d4.step(Direction::East), bb(&["e4"]));
        assert_eq!(d4.step(Direction::West), bb(&["c4"]));
        assert_eq!(d4.step(Direction::NorthEast), bb(&["e5"]));
        assert_eq!(d4.step(Direction::NorthWest), bb(&["c5"]));
        assert_eq!(d4.step(Direction::SouthEast), bb(&["e3"]));
        assert_eq!(d4.step(Direction::SouthWest), bb(&["c3"]));
    }

    #[test]
    fn steps_never_wrap_across_files() {
        let h4 = bb(&["h4"]);
        assert!(h4.step(Direction::East).is_empty());
        assert!(h4.step(Direction::NorthEast).is_empty());
        assert!(h4.step(Direction::SouthEast).is_empty());

        let a4 = bb(&["a4"]);
        assert!(a4.step(Direction::West).is_empty());
        assert!(a4.step(Direction::NorthWest).is_empty());
        assert!(a4.step(Direction::SouthWest).is_empty());
    }

    #[test]
    fn steps_fall_off_top_and_bottom() {
        assert!(Bitboard::RANK_8.step(Direction::North).is_empty());
        assert!(Bitboard::RANK_1.step(Direction::South).is_empty());
        assert!(Bitboard::RANK_8.step(Direction::NorthWest).is_empty());
        assert!(Bitboard::RANK_1.step(Direction::SouthEast).is_empty());
    }

    #[test]
    fn iteration_is_ascending() {
        let squares: Vec<Square> = bb(&["h8", "a1", "e4"]).into_iter().collect();
        assert_eq!(
            squares,
            vec![
                Square::A1,
                Square::from_algebraic("e4").unwrap(),
                Square::H8
            ]
        );
    }

    #[test]
    fn pop_lsb() {
        let mut b = Bitboard::new(0b1010);
        assert_eq!(b.pop_lsb().map(|s| s.index()), Some(1));
        assert_eq!(b.pop_lsb().map(|s| s.index()), Some(3));
        assert_eq!(b.pop_lsb(), None);
    }

    #[test]
    fn display_marks_squares() {
        let text = bb(&["a1"]).to_string();
        assert!(text.starts_with("8 . . . . . . . ."));
        assert!(text.contains("1 X . . . . . . ."));
    }
}
