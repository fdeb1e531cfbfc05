//! Castling availability and validation.
//!
//! [`CastlingRights`] is a small `Copy` value. The search hands each child
//! node the rights derived from its parent's move, so nothing needs to be
//! restored when a move is taken back.

use chess_core::{Color, FenCastling, Move, MoveFlag, PieceKind, Square};
use std::fmt;

use crate::movegen::is_square_attacked;
use crate::{Bitboard, MoveRecord, Position};

/// Side of the board a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    /// Kingside first, the order castling moves are generated in.
    pub const BOTH: [Wing; 2] = [Wing::Kingside, Wing::Queenside];

    /// The move flag for castling to this wing.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match self {
            Wing::Kingside => MoveFlag::CastleKingside,
            Wing::Queenside => MoveFlag::CastleQueenside,
        }
    }

    /// The wing a castling flag refers to.
    #[inline]
    pub const fn from_flag(flag: MoveFlag) -> Option<Wing> {
        match flag {
            MoveFlag::CastleKingside => Some(Wing::Kingside),
            MoveFlag::CastleQueenside => Some(Wing::Queenside),
            MoveFlag::Normal => None,
        }
    }
}

/// Fixed squares involved in one of the four castling moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRoute {
    pub color: Color,
    pub wing: Wing,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty.
    pub between: Bitboard,
    /// Squares the king crosses or lands on; none may be attacked.
    pub transit: Bitboard,
}

const fn squares(list: &[Square]) -> Bitboard {
    let mut bits = 0u64;
    let mut i = 0;
    while i < list.len() {
        bits |= list[i].mask();
        i += 1;
    }
    Bitboard(bits)
}

static ROUTES: [CastlingRoute; 4] = [
    CastlingRoute {
        color: Color::White,
        wing: Wing::Kingside,
        king_from: Square::E1,
        king_to: Square::G1,
        rook_from: Square::H1,
        rook_to: Square::F1,
        between: squares(&[Square::F1, Square::G1]),
        transit: squares(&[Square::F1, Square::G1]),
    },
    CastlingRoute {
        color: Color::White,
        wing: Wing::Queenside,
        king_from: Square::E1,
        king_to: Square::C1,
        rook_from: Square::A1,
        rook_to: Square::D1,
        between: squares(&[Square::B1, Square::C1, Square::D1]),
        transit: squares(&[Square::C1, Square::D1]),
    },
    CastlingRoute {
        color: Color::Black,
        wing: Wing::Kingside,
        king_from: Square::E8,
        king_to: Square::G8,
        rook_from: Square::H8,
        rook_to: Square::F8,
        between: squares(&[Square::F8, Square::G8]),
        transit: squares(&[Square::F8, Square::G8]),
    },
    CastlingRoute {
        color: Color::Black,
        wing: Wing::Queenside,
        king_from: Square::E8,
        king_to: Square::C8,
        rook_from: Square::A8,
        rook_to: Square::D8,
        between: squares(&[Square::B8, Square::C8, Square::D8]),
        transit: squares(&[Square::C8, Square::D8]),
    },
];

impl CastlingRoute {
    /// Looks up the route for a color and wing.
    #[inline]
    pub fn of(color: Color, wing: Wing) -> &'static CastlingRoute {
        &ROUTES[color.index() * 2 + wing as usize]
    }

    /// The king move that encodes this castle.
    #[inline]
    pub const fn king_move(&self) -> Move {
        Move::new(self.king_from, self.king_to, self.wing.flag())
    }

    #[inline]
    const fn bit(&self) -> u8 {
        1 << (self.color as u8 * 2 + self.wing as u8)
    }
}

/// Which of the four castling moves are still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Returns true if `color` may still castle to `wing`.
    #[inline]
    pub fn has(self, color: Color, wing: Wing) -> bool {
        self.0 & CastlingRoute::of(color, wing).bit() != 0
    }

    /// Returns these rights with one wing removed.
    #[inline]
    #[must_use]
    pub fn without(self, color: Color, wing: Wing) -> Self {
        CastlingRights(self.0 & !CastlingRoute::of(color, wing).bit())
    }

    /// Returns these rights with both of `color`'s wings removed.
    #[inline]
    #[must_use]
    pub fn without_color(self, color: Color) -> Self {
        self.without(color, Wing::Kingside)
            .without(color, Wing::Queenside)
    }

    /// Rights in force after the move described by `record`.
    ///
    /// Moving the king forfeits both wings, moving a rook off its home
    /// square forfeits that wing, and capturing a rook on its home square
    /// forfeits the wing for the rook's owner.
    #[must_use]
    pub fn after(self, record: &MoveRecord) -> Self {
        let mut rights = self;
        let mover = record.color;

        match record.piece {
            PieceKind::King => rights = rights.without_color(mover),
            PieceKind::Rook => {
                for wing in Wing::BOTH {
                    if CastlingRoute::of(mover, wing).rook_from == record.mv.from() {
                        rights = rights.without(mover, wing);
                    }
                }
            }
            _ => {}
        }

        if record.captured == Some(PieceKind::Rook) {
            let owner = mover.opposite();
            for wing in Wing::BOTH {
                if CastlingRoute::of(owner, wing).rook_from == record.mv.to() {
                    rights = rights.without(owner, wing);
                }
            }
        }

        rights
    }

    /// The rights as a FEN castling field.
    pub fn to_fen(self) -> FenCastling {
        FenCastling {
            white_kingside: self.has(Color::White, Wing::Kingside),
            white_queenside: self.has(Color::White, Wing::Queenside),
            black_kingside: self.has(Color::Black, Wing::Kingside),
            black_queenside: self.has(Color::Black, Wing::Queenside),
        }
    }
}

impl From<FenCastling> for CastlingRights {
    fn from(fen: FenCastling) -> Self {
        let flags = [
            (fen.white_kingside, Color::White, Wing::Kingside),
            (fen.white_queenside, Color::White, Wing::Queenside),
            (fen.black_kingside, Color::Black, Wing::Kingside),
            (fen.black_queenside, Color::Black, Wing::Queenside),
        ];
        let bits = flags
            .iter()
            .filter(|(on, _, _)| *on)
            .fold(0, |bits, &(_, color, wing)| {
                bits | CastlingRoute::of(color, wing).bit()
            });
        CastlingRights(bits)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// Returns true if `color` may castle to `wing` right now.
///
/// The right must still be held with king and rook on their home squares,
/// the king must not be in check, the squares between them must be empty,
/// and no square the king crosses or lands on may be attacked.
pub fn can_castle(position: &Position, rights: CastlingRights, color: Color, wing: Wing) -> bool {
    let route = CastlingRoute::of(color, wing);
    let enemy = color.opposite();

    if !rights.has(color, wing)
        || !position
            .pieces_of(PieceKind::King, color)
            .contains(route.king_from)
        || !position
            .pieces_of(PieceKind::Rook, color)
            .contains(route.rook_from)
    {
        return false;
    }

    if is_square_attacked(position, route.king_from, enemy) {
        return false;
    }

    !position.occupied().intersects(route.between)
        && route
            .transit
            .into_iter()
            .all(|sq| !is_square_attacked(position, sq, enemy))
}

/// Castling moves `color` may play, kingside first.
pub fn castling_moves(
    position: &Position,
    rights: CastlingRights,
    color: Color,
) -> impl Iterator<Item = Move> + '_ {
    Wing::BOTH
        .into_iter()
        .filter(move |&wing| can_castle(position, rights, color, wing))
        .map(move |wing| CastlingRoute::of(color, wing).king_move())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_move;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn rights_after(fen: &str, mv: Move) -> CastlingRights {
        let mut pos = position(fen);
        let record = make_move(&mut pos, mv, Color::White, CastlingRights::ALL).unwrap();
        CastlingRights::ALL.after(&record)
    }

    const OPEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    #[test]
    fn route_lookup() {
        let route = CastlingRoute::of(Color::Black, Wing::Queenside);
        assert_eq!(route.king_to, Square::C8);
        assert_eq!(route.rook_to, Square::D8);
        assert_eq!(route.between.count(), 3);
        assert_eq!(route.transit.count(), 2);
        assert_eq!(route.king_move().to_uci(), "e8c8");
    }

    #[test]
    fn fen_conversion() {
        let rights = CastlingRights::from(FenCastling::ALL);
        assert_eq!(rights, CastlingRights::ALL);
        assert_eq!(rights.to_string(), "KQkq");
        let rights = rights.without_color(Color::White);
        assert_eq!(rights.to_string(), "kq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");
    }

    #[test]
    fn both_wings_available_on_open_back_rank() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves: Vec<String> = castling_moves(&pos, CastlingRights::ALL, Color::White)
            .map(|m| m.to_uci())
            .collect();
        assert_eq!(moves, vec!["e1g1", "e1c1"]);
        let moves: Vec<String> = castling_moves(&pos, CastlingRights::ALL, Color::Black)
            .map(|m| m.to_uci())
            .collect();
        assert_eq!(moves, vec!["e8g8", "e8c8"]);
    }

    #[test]
    fn no_castling_without_the_right() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let rights = CastlingRights::ALL.without(Color::White, Wing::Kingside);
        assert!(!can_castle(&pos, rights, Color::White, Wing::Kingside));
        assert!(can_castle(&pos, rights, Color::White, Wing::Queenside));
    }

    #[test]
    fn no_castling_when_rook_missing() {
        let pos = position("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1");
        assert!(can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Kingside));
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Queenside));
    }

    #[test]
    fn no_castling_out_of_check() {
        let pos = position("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Kingside));
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Queenside));
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // Black rook on f8 covers f1.
        let pos = position("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Kingside));
        assert!(can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Queenside));
    }

    #[test]
    fn no_castling_into_attacked_square() {
        let pos = position("2r1k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Queenside));
        assert!(can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Kingside));
    }

    #[test]
    fn b_file_attack_does_not_block_queenside() {
        // Only b1 is attacked; the king never crosses it.
        let pos = position("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Queenside));
    }

    #[test]
    fn no_castling_through_pieces() {
        let pos = position("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Kingside));
        assert!(!can_castle(&pos, CastlingRights::ALL, Color::White, Wing::Queenside));
    }

    #[test]
    fn king_move_forfeits_both_wings() {
        let rights = rights_after(OPEN, Move::normal(Square::E1, Square::F1));
        assert!(!rights.has(Color::White, Wing::Kingside));
        assert!(!rights.has(Color::White, Wing::Queenside));
        assert!(rights.has(Color::Black, Wing::Kingside));
    }

    #[test]
    fn rook_move_forfeits_its_wing() {
        let rights = rights_after(OPEN, Move::normal(Square::A1, sq("a5")));
        assert!(rights.has(Color::White, Wing::Kingside));
        assert!(!rights.has(Color::White, Wing::Queenside));
    }

    #[test]
    fn capturing_home_rook_forfeits_owner_wing() {
        let rights = rights_after(OPEN, Move::normal(Square::H1, Square::H8));
        assert!(!rights.has(Color::White, Wing::Kingside));
        assert!(!rights.has(Color::Black, Wing::Kingside));
        assert!(rights.has(Color::White, Wing::Queenside));
        assert!(rights.has(Color::Black, Wing::Queenside));
    }

    #[test]
    fn castling_forfeits_both_wings() {
        let castle = CastlingRoute::of(Color::White, Wing::Kingside).king_move();
        let rights = rights_after(OPEN, castle);
        assert_eq!(rights.to_string(), "kq");
    }
}
