//! Static evaluation.
//!
//! Scores are in centipawns from White's point of view: positive favors
//! White, negative favors Black.
//!
//! Piece-square tables are written as seen from the owner's side with the
//! owner's back rank as the last row. Black looks a square up directly,
//! White through the half-turn rotation `63 - i`.

use chess_core::{Color, PieceKind, Square};

use crate::Position;

/// Phase weight at which the endgame tables fully replace the middlegame
/// ones.
pub const PHASE_MAX: i32 = 256;

/// Phase used by [`evaluate`]. Only the middlegame tables count.
pub const ENDGAME_PHASE: i32 = 0;

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const PAWN_TABLE_ENDGAME: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    80, 80, 80, 80, 80, 80, 80, 80,
    50, 50, 50, 50, 50, 50, 50, 50,
    30, 30, 30, 30, 30, 30, 30, 30,
    20, 20, 20, 20, 20, 20, 20, 20,
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

#[rustfmt::skip]
const KING_TABLE_ENDGAME: [i32; 64] = [
    -50, -40, -30, -20, -20, -30, -40, -50,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -50, -30, -30, -30, -30, -30, -30, -50,
];

/// Middlegame and endgame tables for a piece kind.
fn tables(kind: PieceKind) -> (&'static [i32; 64], &'static [i32; 64]) {
    match kind {
        PieceKind::Pawn => (&PAWN_TABLE, &PAWN_TABLE_ENDGAME),
        PieceKind::Knight => (&KNIGHT_TABLE, &KNIGHT_TABLE),
        PieceKind::Bishop => (&BISHOP_TABLE, &BISHOP_TABLE),
        PieceKind::Rook => (&ROOK_TABLE, &ROOK_TABLE),
        PieceKind::Queen => (&QUEEN_TABLE, &QUEEN_TABLE),
        PieceKind::King => (&KING_TABLE, &KING_TABLE_ENDGAME),
    }
}

/// Table index of `sq` for a piece of `color`.
#[inline]
fn table_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq.mirrored().index() as usize,
        Color::Black => sq.index() as usize,
    }
}

/// Sum of piece values, White minus Black.
pub fn material_score(position: &Position) -> i32 {
    let mut score = 0;
    for color in Color::BOTH {
        for kind in PieceKind::ALL {
            let count = position.pieces_of(kind, color).count() as i32;
            score += color.sign() * count * kind.value();
        }
    }
    score
}

/// Piece-square score at a given phase, `0` (middlegame) to [`PHASE_MAX`]
/// (endgame), White minus Black.
pub fn positional_score_at_phase(position: &Position, phase: i32) -> i32 {
    let phase = phase.clamp(0, PHASE_MAX);
    let mut score = 0;
    for color in Color::BOTH {
        for kind in PieceKind::ALL {
            let (middlegame, endgame) = tables(kind);
            for sq in position.pieces_of(kind, color) {
                let i = table_index(sq, color);
                let blended =
                    (middlegame[i] * (PHASE_MAX - phase) + endgame[i] * phase) / PHASE_MAX;
                score += color.sign() * blended;
            }
        }
    }
    score
}

/// Piece-square score, White minus Black.
pub fn positional_score(position: &Position) -> i32 {
    positional_score_at_phase(position, ENDGAME_PHASE)
}

/// Static evaluation: material plus piece placement.
///
/// Mate and stalemate are not recognized here.
pub fn evaluate(position: &Position) -> i32 {
    material_score(position) + positional_score(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn start_position_is_balanced() {
        let pos = Position::new_game();
        assert_eq!(material_score(&pos), 0);
        assert_eq!(positional_score(&pos), 0);
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn material_counts_piece_values() {
        let pos = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        assert_eq!(material_score(&pos), 900);
        let pos = position("3qk3/1r6/8/8/8/8/8/3QK3 w - - 0 1");
        assert_eq!(material_score(&pos), -500);
    }

    #[test]
    fn knight_prefers_the_center() {
        let rim = position("4k3/8/8/8/8/8/8/N3K3 w - - 0 1");
        let center = position("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        assert!(positional_score(&center) > positional_score(&rim));
    }

    #[test]
    fn advanced_pawn_scores_higher() {
        let home = position("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let advanced = position("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert!(positional_score(&advanced) > positional_score(&home));
    }

    #[test]
    fn rotated_position_negates_score() {
        // Black pieces on the half-turn images of White's squares.
        let white = position("8/8/8/8/8/2N5/1P6/B5K1 w - - 0 1");
        let black = position("1k5b/6p1/5n2/8/8/8/8/8 w - - 0 1");
        assert_eq!(evaluate(&white), -evaluate(&black));
    }

    #[test]
    fn king_table_values() {
        // White king on g1 (index 6) reads table entry 57.
        let pos = position("8/8/8/8/8/8/8/6K1 w - - 0 1");
        assert_eq!(positional_score(&pos), KING_TABLE[57]);
        assert_eq!(positional_score(&pos), 30);
    }

    #[test]
    fn endgame_phase_uses_endgame_tables() {
        let pos = position("8/8/8/8/4K3/8/8/8 w - - 0 1");
        let e4 = Square::from_algebraic("e4").unwrap();
        let i = table_index(e4, Color::White);
        assert_eq!(positional_score_at_phase(&pos, 0), KING_TABLE[i]);
        assert_eq!(
            positional_score_at_phase(&pos, PHASE_MAX),
            KING_TABLE_ENDGAME[i]
        );
        assert_eq!(positional_score(&pos), positional_score_at_phase(&pos, 0));
    }
}
