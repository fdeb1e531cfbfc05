//! Attack and target generation.
//!
//! Sliding pieces scan rays one masked step at a time until they run into a
//! piece or off the board. Knight, king and pawn-capture targets are
//! precomputed at compile time from the same masked steps.

use crate::{Bitboard, Direction, Position};
use chess_core::{Color, PieceKind, Square};

/// Longest possible ray on an 8x8 board.
const MAX_RAY_STEPS: usize = 7;

/// Knight targets for each square.
const KNIGHT_ATTACKS: [Bitboard; 64] = compute_knight_attacks();

/// King targets for each square.
const KING_ATTACKS: [Bitboard; 64] = compute_king_attacks();

/// Pawn capture targets for each color and square.
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();

/// Returns knight targets from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king targets from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns the two forward diagonals a pawn of `color` attacks.
///
/// Occupancy is ignored: this is what the pawn threatens, not where it may
/// move.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Casts rays from `from` in each direction.
///
/// A ray includes the first occupied square it meets and stops there.
/// Friendly pieces are not filtered out.
pub fn slide(from: Square, directions: &[Direction], occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &dir in directions {
        let mut ray = Bitboard::from_square(from);
        for _ in 0..MAX_RAY_STEPS {
            ray = ray.step(dir);
            if ray.is_empty() {
                break;
            }
            attacks |= ray;
            if ray.intersects(occupied) {
                break;
            }
        }
    }
    attacks
}

/// Returns rook attacks from `sq` given the board occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    slide(sq, &Direction::ORTHOGONAL, occupied)
}

/// Returns bishop attacks from `sq` given the board occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    slide(sq, &Direction::DIAGONAL, occupied)
}

/// Returns queen attacks from `sq` given the board occupancy.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    slide(sq, &Direction::ALL, occupied)
}

/// Forward direction for a pawn of `color`.
#[inline]
pub const fn pawn_forward(color: Color) -> Direction {
    match color {
        Color::White => Direction::North,
        Color::Black => Direction::South,
    }
}

/// Returns the non-capturing pawn targets: one step forward onto an empty
/// square, and two from the pawn's starting rank when both are empty.
pub fn pawn_pushes(sq: Square, color: Color, occupied: Bitboard) -> Bitboard {
    let forward = pawn_forward(color);
    let empty = !occupied;
    let single = Bitboard::from_square(sq).step(forward) & empty;
    if sq.rank() == color.pawn_rank() {
        single | (single.step(forward) & empty)
    } else {
        single
    }
}

/// Squares a piece of `kind` and `color` on `sq` attacks on this board,
/// including squares held by its own side.
pub fn attacks_from(position: &Position, sq: Square, color: Color, kind: PieceKind) -> Bitboard {
    let occupied = position.occupied();
    match kind {
        PieceKind::Pawn => pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::King => king_attacks(sq),
    }
}

/// Pseudo-legal destinations for the piece on `sq`.
///
/// Own-king safety is not considered and castling is not included.
pub fn piece_targets(position: &Position, sq: Square, color: Color, kind: PieceKind) -> Bitboard {
    let own = position.color_occupancy(color);
    match kind {
        PieceKind::Pawn => {
            let theirs = position.color_occupancy(color.opposite());
            pawn_pushes(sq, color, position.occupied()) | (pawn_attacks(sq, color) & theirs)
        }
        _ => attacks_from(position, sq, color, kind) & !own,
    }
}

/// Every square attacked by at least one piece of `by`.
pub fn attacked_squares(position: &Position, by: Color) -> Bitboard {
    let mut attacked = Bitboard::EMPTY;
    for kind in PieceKind::ALL {
        for sq in position.pieces_of(kind, by) {
            attacked |= attacks_from(position, sq, by, kind);
        }
    }
    attacked
}

/// Returns true if any piece of `by` attacks `sq`.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    let occupied = position.occupied();
    let queens = position.pieces_of(PieceKind::Queen, by);

    pawn_attacks(sq, by.opposite()).intersects(position.pieces_of(PieceKind::Pawn, by))
        || knight_attacks(sq).intersects(position.pieces_of(PieceKind::Knight, by))
        || king_attacks(sq).intersects(position.pieces_of(PieceKind::King, by))
        || rook_attacks(sq, occupied).intersects(position.pieces_of(PieceKind::Rook, by) | queens)
        || bishop_attacks(sq, occupied)
            .intersects(position.pieces_of(PieceKind::Bishop, by) | queens)
}

/// Applies a sequence of masked steps.
const fn walk(from: Bitboard, steps: &[Direction]) -> Bitboard {
    let mut bb = from;
    let mut i = 0;
    while i < steps.len() {
        bb = bb.step(steps[i]);
        i += 1;
    }
    bb
}

/// Computes knight attacks for all squares at compile time.
const fn compute_knight_attacks() -> [Bitboard; 64] {
    use Direction::*;
    const JUMPS: [[Direction; 3]; 8] = [
        [North, North, East],
        [North, North, West],
        [South, South, East],
        [South, South, West],
        [East, East, North],
        [East, East, South],
        [West, West, North],
        [West, West, South],
    ];

    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let from = Bitboard(1u64 << sq);
        let mut bb = 0u64;
        let mut j = 0;
        while j < JUMPS.len() {
            bb |= walk(from, &JUMPS[j]).0;
            j += 1;
        }
        attacks[sq] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

/// Computes king attacks for all squares at compile time.
const fn compute_king_attacks() -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let from = Bitboard(1u64 << sq);
        let mut bb = 0u64;
        let mut d = 0;
        while d < Direction::ALL.len() {
            bb |= from.step(Direction::ALL[d]).0;
            d += 1;
        }
        attacks[sq] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

/// Computes pawn attacks for all squares at compile time.
const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0;
    while sq < 64 {
        let from = Bitboard(1u64 << sq);
        attacks[0][sq] = Bitboard(
            from.step(Direction::NorthEast).0 | from.step(Direction::NorthWest).0,
        );
        attacks[1][sq] = Bitboard(
            from.step(Direction::SouthEast).0 | from.step(Direction::SouthWest).0,
        );
        sq += 1;
    }
    attacks
}
