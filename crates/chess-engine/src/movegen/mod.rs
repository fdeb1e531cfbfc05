//! Move generation.
//!
//! Moves are generated pseudo-legally per piece and then filtered by
//! playing each one on the board and checking whether the mover's own king
//! is left attacked.

mod attacks;
pub mod perft;

use crate::castling::castling_moves;
use crate::make::{apply_move, reverse_move};
use crate::{Bitboard, CastlingRights, Position};
use chess_core::{Color, Move, PieceKind, Square};

pub use attacks::{
    attacked_squares, attacks_from, bishop_attacks, is_square_attacked, king_attacks,
    knight_attacks, pawn_attacks, pawn_forward, pawn_pushes, piece_targets, queen_attacks,
    rook_attacks, slide,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::normal(Square::A1, Square::A1); Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Finds the move with the same origin and destination as `m`.
    pub fn find(&self, m: Move) -> Option<Move> {
        self.as_slice().iter().copied().find(|c| c.same_squares(m))
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Destinations available to one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMoves {
    pub from: Square,
    pub piece: PieceKind,
    pub targets: Bitboard,
}

impl PieceMoves {
    /// One move per target square, ascending.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.targets
            .into_iter()
            .map(move |to| Move::normal(self.from, to))
    }
}

/// Returns true if `color`'s king is attacked.
///
/// A side without a king is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    position
        .king_square(color)
        .is_some_and(|king| is_square_attacked(position, king, color.opposite()))
}

/// Pseudo-legal targets for every piece of `color`, origin ascending.
pub fn pseudo_moves(position: &Position, color: Color) -> Vec<PieceMoves> {
    position
        .color_occupancy(color)
        .into_iter()
        .filter_map(|from| {
            let piece = position.piece_kind_at(Bitboard::from_square(from))?;
            Some(PieceMoves {
                from,
                piece,
                targets: piece_targets(position, from, color, piece),
            })
        })
        .collect()
}

/// Legal non-castling moves for `color`, origin ascending.
///
/// Each candidate is played on `position` and taken back; the board is
/// unchanged on return. Pieces without a legal move are omitted.
pub fn legal_moves(position: &mut Position, color: Color) -> Vec<PieceMoves> {
    let mut result = Vec::new();
    for candidate in pseudo_moves(position, color) {
        let mut legal = Bitboard::EMPTY;
        for to in candidate.targets {
            let captured = apply_move(position, candidate.from, to, color, candidate.piece);
            if !is_in_check(position, color) {
                legal.set(to);
            }
            reverse_move(position, candidate.from, to, color, candidate.piece, captured);
        }
        if legal.is_not_empty() {
            result.push(PieceMoves {
                targets: legal,
                ..candidate
            });
        }
    }
    result
}

/// Every legal move for `color`, castling included.
///
/// Order: origin ascending, then destination ascending, then castling
/// moves with kingside first.
pub fn generate_moves(position: &mut Position, rights: CastlingRights, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for piece in legal_moves(position, color) {
        for m in piece.moves() {
            moves.push(m);
        }
    }
    for m in castling_moves(position, rights, color) {
        moves.push(m);
    }
    moves
}

/// Returns true if `color` has at least one legal move.
pub fn has_legal_moves(position: &mut Position, rights: CastlingRights, color: Color) -> bool {
    !legal_moves(position, color).is_empty()
        || castling_moves(position, rights, color).next().is_some()
}

/// `color` is in check and has no legal move.
pub fn is_checkmate(position: &mut Position, rights: CastlingRights, color: Color) -> bool {
    is_in_check(position, color) && !has_legal_moves(position, rights, color)
}

/// `color` is not in check and has no legal move.
pub fn is_stalemate(position: &mut Position, rights: CastlingRights, color: Color) -> bool {
    !is_in_check(position, color) && !has_legal_moves(position, rights, color)
}
