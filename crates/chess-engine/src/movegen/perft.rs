//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::generate_moves;
use crate::make::{make_move, unmake_move};
use crate::{CastlingRights, Position};
use chess_core::Color;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &mut Position, rights: CastlingRights, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position, rights, color);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        let Some(record) = make_move(position, m, color, rights) else {
            continue;
        };
        nodes += perft(position, record.rights_after(), color.opposite(), depth - 1);
        unmake_move(position, &record);
    }
    nodes
}

/// Perft with divide: node count below each root move, sorted by move text.
pub fn perft_divide(
    position: &mut Position,
    rights: CastlingRights,
    color: Color,
    depth: u32,
) -> Vec<(String, u64)> {
    let moves = generate_moves(position, rights, color);
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        let Some(record) = make_move(position, m, color, rights) else {
            continue;
        };
        let nodes = if depth > 1 {
            perft(position, record.rights_after(), color.opposite(), depth - 1)
        } else {
            1
        };
        unmake_move(position, &record);
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
