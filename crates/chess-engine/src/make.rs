//! Making and taking back moves in place.
//!
//! The search keeps a single [`Position`] and mutates it on the way down the
//! tree. Every change made by [`make_move`] is described by the returned
//! [`MoveRecord`], and [`unmake_move`] uses that record to restore the board
//! bit for bit.

use chess_core::{Color, Move, PieceKind, Square};

use crate::castling::{CastlingRoute, Wing};
use crate::{CastlingRights, Position};

/// Everything needed to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The move that was made.
    pub mv: Move,
    /// Side that made it.
    pub color: Color,
    /// Kind of the piece that moved (the king, for castling).
    pub piece: PieceKind,
    /// Kind of the piece that was captured, if any.
    pub captured: Option<PieceKind>,
    /// Castling rights before the move.
    pub rights: CastlingRights,
}

impl MoveRecord {
    /// Castling rights after this move.
    #[inline]
    pub fn rights_after(&self) -> CastlingRights {
        self.rights.after(self)
    }
}

/// Moves a piece of `color` and `kind` from `from` to `to`.
///
/// An opposing piece on `to` is removed and its kind returned. The
/// destination must not hold a piece of `color`.
pub fn apply_move(
    position: &mut Position,
    from: Square,
    to: Square,
    color: Color,
    kind: PieceKind,
) -> Option<PieceKind> {
    let captured = position
        .piece_at(to)
        .filter(|&(_, owner)| owner != color)
        .map(|(victim, _)| victim);
    position.remove(to);
    position.remove(from);
    position.put(to, color, kind);
    captured
}

/// Inverse of [`apply_move`].
///
/// Puts the piece back on `from` and restores the captured piece, if any,
/// on `to` for the opponent.
pub fn reverse_move(
    position: &mut Position,
    from: Square,
    to: Square,
    color: Color,
    kind: PieceKind,
    captured: Option<PieceKind>,
) {
    position.remove(to);
    position.put(from, color, kind);
    if let Some(victim) = captured {
        position.put(to, color.opposite(), victim);
    }
}

/// Plays `mv` for `color`, castling included.
///
/// Returns `None`, leaving the board untouched, when `color` has no piece on
/// the origin square. Legality is not checked.
pub fn make_move(
    position: &mut Position,
    mv: Move,
    color: Color,
    rights: CastlingRights,
) -> Option<MoveRecord> {
    let (piece, owner) = position.piece_at(mv.from())?;
    if owner != color {
        return None;
    }

    let captured = match Wing::from_flag(mv.flag()) {
        Some(wing) => {
            let route = CastlingRoute::of(color, wing);
            apply_move(position, route.king_from, route.king_to, color, PieceKind::King);
            apply_move(position, route.rook_from, route.rook_to, color, PieceKind::Rook);
            None
        }
        None => apply_move(position, mv.from(), mv.to(), color, piece),
    };

    Some(MoveRecord {
        mv,
        color,
        piece,
        captured,
        rights,
    })
}

/// Takes back the move described by `record`.
pub fn unmake_move(position: &mut Position, record: &MoveRecord) {
    match Wing::from_flag(record.mv.flag()) {
        Some(wing) => {
            let route = CastlingRoute::of(record.color, wing);
            reverse_move(
                position,
                route.rook_from,
                route.rook_to,
                record.color,
                PieceKind::Rook,
                None,
            );
            reverse_move(
                position,
                route.king_from,
                route.king_to,
                record.color,
                PieceKind::King,
                None,
            );
        }
        None => reverse_move(
            position,
            record.mv.from(),
            record.mv.to(),
            record.color,
            record.piece,
            record.captured,
        ),
    }
}
