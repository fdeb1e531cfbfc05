//! Piece placement.
//!
//! A [`Position`] only knows where the pieces stand. Side to move and
//! castling availability travel separately (see [`crate::CastlingRights`])
//! so that a search can thread them down the tree as plain values.

use chess_core::{Color, FenError, FenPosition, PieceKind, Square};
use std::fmt;

use crate::Bitboard;

/// Piece placement as six per-kind sets and two per-color sets.
///
/// The pieces of one kind and color are `pieces[kind] & colors[color]`;
/// occupancy is the union of the color sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Bitboards for each piece kind, both colors, indexed by `PieceKind`.
    pieces: [Bitboard; 6],

    /// Bitboards for each color's pieces.
    colors: [Bitboard; 2],
}

impl Position {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
        }
    }

    /// Creates the standard starting arrangement.
    pub const fn new_game() -> Self {
        Position {
            pieces: [
                Bitboard(0x00FF_0000_0000_FF00), // pawns
                Bitboard(0x4200_0000_0000_0042), // knights
                Bitboard(0x2400_0000_0000_0024), // bishops
                Bitboard(0x8100_0000_0000_0081), // rooks
                Bitboard(0x0800_0000_0000_0008), // queens
                Bitboard(0x1000_0000_0000_0010), // kings
            ],
            colors: [
                Bitboard(0x0000_0000_0000_FFFF),
                Bitboard(0xFFFF_0000_0000_0000),
            ],
        }
    }

    /// Builds a board from `(square, color, kind)` triples.
    ///
    /// A later entry for an already occupied square replaces the earlier one.
    pub fn from_placement<I>(placement: I) -> Self
    where
        I: IntoIterator<Item = (Square, Color, PieceKind)>,
    {
        let mut position = Position::empty();
        for (sq, color, kind) in placement {
            position.remove(sq);
            position.put(sq, color, kind);
        }
        position
    }

    /// Builds a board from the placement field of a FEN string.
    ///
    /// Any side-to-move or castling fields are validated and discarded.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenPosition::parse(fen)?;
        Ok(Self::from_placement(parsed.placement))
    }

    /// Every occupied square, a1 first.
    pub fn placement(&self) -> Vec<(Square, Color, PieceKind)> {
        self.occupied()
            .into_iter()
            .filter_map(|sq| self.piece_at(sq).map(|(kind, color)| (sq, color, kind)))
            .collect()
    }

    /// Returns the piece kind on the square(s) of `mask`, if any.
    ///
    /// With a multi-square mask the first kind in `PieceKind::ALL` order that
    /// intersects it wins.
    pub fn piece_kind_at(&self, mask: Bitboard) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].intersects(mask))
    }

    /// Returns the color occupying the square(s) of `mask`, if any.
    pub fn color_at(&self, mask: Bitboard) -> Option<Color> {
        Color::BOTH
            .into_iter()
            .find(|color| self.colors[color.index()].intersects(mask))
    }

    /// Returns the piece kind and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(PieceKind, Color)> {
        let mask = Bitboard::from_square(sq);
        let color = self.color_at(mask)?;
        let kind = self.piece_kind_at(mask)?;
        Some((kind, color))
    }

    /// Returns a bitboard of pieces of the given kind and color.
    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.pieces[kind.index()] & self.colors[color.index()]
    }

    /// Returns every piece of one color.
    #[inline]
    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Returns the square of `color`'s king, if it has one.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(PieceKind::King, color).lsb()
    }

    /// Checks the structural invariants of the board.
    ///
    /// Piece sets are pairwise disjoint, color sets are disjoint, and the
    /// union of piece sets equals the union of color sets.
    pub fn is_consistent(&self) -> bool {
        let mut union = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            let set = self.pieces[kind.index()];
            if union.intersects(set) {
                return false;
            }
            union |= set;
        }
        !self.colors[0].intersects(self.colors[1]) && union == self.occupied()
    }

    /// Places a piece on an empty square.
    #[inline]
    pub(crate) fn put(&mut self, sq: Square, color: Color, kind: PieceKind) {
        self.pieces[kind.index()].set(sq);
        self.colors[color.index()].set(sq);
    }

    /// Clears a square, whatever stands on it.
    #[inline]
    pub(crate) fn remove(&mut self, sq: Square) {
        for set in self.pieces.iter_mut().chain(self.colors.iter_mut()) {
            set.clear(sq);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(kind, color)| kind.to_fen_char(color));
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game_matches_startpos_fen() {
        let parsed = Position::from_fen(FenPosition::STARTPOS).unwrap();
        assert_eq!(Position::new_game(), parsed);
        assert!(parsed.is_consistent());
    }

    #[test]
    fn new_game_counts() {
        let pos = Position::new_game();
        assert_eq!(pos.occupied().count(), 32);
        assert_eq!(pos.color_occupancy(Color::White).count(), 16);
        assert_eq!(pos.pieces_of(PieceKind::Pawn, Color::Black).count(), 8);
        assert_eq!(pos.king_square(Color::White), Some(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn piece_queries() {
        let pos = Position::new_game();
        let e1 = Bitboard::from_square(Square::E1);
        assert_eq!(pos.piece_kind_at(e1), Some(PieceKind::King));
        assert_eq!(pos.color_at(e1), Some(Color::White));
        assert_eq!(
            pos.piece_at(Square::D8),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
        assert_eq!(pos.piece_kind_at(Bitboard::from_square(sq("e4"))), None);
        assert_eq!(pos.color_at(Bitboard::from_square(sq("e4"))), None);
    }

    #[test]
    fn placement_round_trip() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/8/R3K3 w - - 0 1").unwrap();
        let rebuilt = Position::from_placement(pos.placement());
        assert_eq!(rebuilt, pos);
        assert_eq!(pos.placement().len(), 4);
    }

    #[test]
    fn later_placement_replaces_earlier() {
        let pos = Position::from_placement([
            (sq("d4"), Color::White, PieceKind::Rook),
            (sq("d4"), Color::Black, PieceKind::Knight),
        ]);
        assert_eq!(pos.piece_at(sq("d4")), Some((PieceKind::Knight, Color::Black)));
        assert!(pos.is_consistent());
    }

    #[test]
    fn inconsistent_board_is_detected() {
        let mut pos = Position::empty();
        pos.put(sq("d4"), Color::White, PieceKind::Rook);
        pos.put(sq("d4"), Color::White, PieceKind::Bishop);
        assert!(!pos.is_consistent());
    }

    #[test]
    fn display_uses_fen_letters() {
        let text = Position::new_game().to_string();
        assert!(text.starts_with("8 r n b q k b n r"));
        assert!(text.contains("1 R N B Q K B N R"));
    }
}
