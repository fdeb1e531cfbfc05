//! Fixed-depth alpha-beta search.
//!
//! White maximizes and Black minimizes the White-relative evaluation. A
//! single [`Position`] is shared by the whole tree: each branch makes its
//! move, recurses and unmakes it. Castling rights are passed down as values.

use chess_core::{Color, Move};
use tracing::{debug, trace};

use crate::eval::evaluate;
use crate::make::{make_move, unmake_move};
use crate::movegen::{generate_moves, is_in_check};
use crate::{CastlingRights, Position};

/// Score of a side mated at the root. Mates found deeper score
/// `MATE_SCORE - ply` so that shorter mates are preferred.
pub const MATE_SCORE: i32 = 1_000_000;

/// Bound used for the initial alpha-beta window.
pub const INFINITY: i32 = 2 * MATE_SCORE;

/// Deepest ply a mate score can be reported for.
const MAX_PLY: i32 = 1_000;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// White-relative score of the position.
    pub score: i32,
    /// Best move for the side to move, `None` at depth 0 or without legal moves.
    pub best: Option<Move>,
    /// Nodes visited.
    pub nodes: u64,
}

/// Number of plies to the mate a score announces, if it is a mate score.
pub fn mate_distance(score: i32) -> Option<u32> {
    let plies = MATE_SCORE - score.abs();
    (0..MAX_PLY).contains(&plies).then_some(plies as u32)
}

/// Search state shared across one tree walk.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `depth` plies below `position` with `side` to move.
    ///
    /// Returns the fail-soft score and the first move that reached it in
    /// generation order. `position` is unchanged on return.
    pub fn search(
        &mut self,
        position: &mut Position,
        rights: CastlingRights,
        side: Color,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> (i32, Option<Move>) {
        self.alpha_beta(position, rights, side, depth, 0, alpha, beta)
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        position: &mut Position,
        rights: CastlingRights,
        side: Color,
        depth: u32,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        if depth == 0 {
            return (evaluate(position), None);
        }

        let moves = generate_moves(position, rights, side);

        if moves.is_empty() {
            let score = if is_in_check(position, side) {
                // The side to move is mated.
                -side.sign() * (MATE_SCORE - ply)
            } else {
                0
            };
            return (score, None);
        }

        let maximizing = side == Color::White;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;

        for &mv in &moves {
            let Some(record) = make_move(position, mv, side, rights) else {
                continue;
            };
            let (score, _) = self.alpha_beta(
                position,
                record.rights_after(),
                side.opposite(),
                depth - 1,
                ply + 1,
                alpha,
                beta,
            );
            unmake_move(position, &record);

            if ply == 0 {
                trace!(%mv, score, "root move");
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

/// Searches `depth` plies with a full window and reports the best move.
pub fn best_move(
    position: &mut Position,
    rights: CastlingRights,
    side: Color,
    depth: u32,
) -> SearchOutcome {
    let mut searcher = Searcher::new();
    let (score, best) = searcher.search(position, rights, side, depth, -INFINITY, INFINITY);
    let outcome = SearchOutcome {
        score,
        best,
        nodes: searcher.nodes(),
    };
    debug!(
        ?side,
        depth,
        score,
        best = %best.map_or_else(|| "(none)".to_string(), |m| m.to_uci()),
        nodes = outcome.nodes,
        "search finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn depth_zero_is_static_eval() {
        let mut pos = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::White, 0);
        assert_eq!(outcome.score, evaluate(&pos));
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.nodes, 1);
    }

    #[test]
    fn captures_hanging_queen() {
        let mut pos = position("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::White, 1);
        assert_eq!(outcome.best.map(|m| m.to_uci()).as_deref(), Some("d1d5"));
        assert!(outcome.score > 0);
    }

    #[test]
    fn black_minimizes() {
        let mut pos = position("4k3/8/8/3Q4/8/8/7K/3r4 b - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::Black, 1);
        assert_eq!(outcome.best.map(|m| m.to_uci()).as_deref(), Some("d1d5"));
        assert!(outcome.score < 0);
    }

    #[test]
    fn finds_mate_in_one() {
        // Ra1-a8 mates; the g6 king covers g7 and h7.
        let mut pos = position("7k/8/6K1/8/8/8/8/R7 w - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::White, 2);
        assert_eq!(outcome.best.map(|m| m.to_uci()).as_deref(), Some("a1a8"));
        assert_eq!(outcome.score, MATE_SCORE - 1);
        assert_eq!(mate_distance(outcome.score), Some(1));
    }

    #[test]
    fn mated_root_has_no_move() {
        let mut pos = position("7k/7Q/6K1/8/8/8/8/8 b - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::Black, 3);
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.score, MATE_SCORE);
    }

    #[test]
    fn stalemated_root_scores_zero() {
        let mut pos = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::Black, 3);
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn search_restores_the_board() {
        let mut pos = Position::new_game();
        best_move(&mut pos, CastlingRights::ALL, Color::White, 3);
        assert_eq!(pos, Position::new_game());
    }

    #[test]
    fn search_is_deterministic() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let first = best_move(&mut position(fen), CastlingRights::ALL, Color::White, 3);
        let second = best_move(&mut position(fen), CastlingRights::ALL, Color::White, 3);
        assert_eq!(first, second);
        assert!(first.best.is_some());
    }

    #[test]
    fn ties_go_to_the_first_move() {
        // From b1 the king reaches a1, a2 and b2, all worth 20; a1 is scanned first.
        let mut pos = position("7k/8/8/8/8/8/8/1K6 w - - 0 1");
        let outcome = best_move(&mut pos, CastlingRights::NONE, Color::White, 1);
        assert_eq!(outcome.best.map(|m| m.to_uci()).as_deref(), Some("b1a1"));
    }

    #[test]
    fn mate_distance_detects_mate_scores() {
        assert_eq!(mate_distance(MATE_SCORE - 3), Some(3));
        assert_eq!(mate_distance(-(MATE_SCORE - 4)), Some(4));
        assert_eq!(mate_distance(250), None);
        assert_eq!(mate_distance(0), None);
    }
}
