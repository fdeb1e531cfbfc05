//! Bitboard chess engine core.
//!
//! This crate provides:
//! - [`Bitboard`] and [`Direction`] - 64-bit board sets with edge-safe shifts
//! - [`Position`] - piece placement as per-kind and per-color bitboards
//! - Make/unmake of moves in place ([`make_move`], [`unmake_move`])
//! - [`CastlingRights`] and castling validation
//! - Legal move generation by make-test-unmake filtering
//! - [`evaluate`] - material plus piece-square tables
//! - [`best_move`] - fixed-depth alpha-beta search
//! - [`Game`] - a playable game with undo
//!
//! # Example
//!
//! ```
//! use chess_engine::{generate_moves, CastlingRights, Game, Position};
//! use chess_core::Color;
//!
//! // Using Position directly
//! let mut position = Position::new_game();
//! let moves = generate_moves(&mut position, CastlingRights::ALL, Color::White);
//! assert_eq!(moves.len(), 20);
//!
//! // Using Game for full game management
//! let mut game = Game::new();
//! game.play_uci("e2e4").unwrap();
//! game.play_uci("e7e5").unwrap();
//! let outcome = game.best_move(2);
//! assert!(outcome.best.is_some());
//! ```

mod bitboard;
mod castling;
pub mod eval;
mod game;
mod make;
pub mod movegen;
mod position;
pub mod search;

pub use bitboard::{Bitboard, BitboardIter, Direction};
pub use castling::{can_castle, castling_moves, CastlingRights, CastlingRoute, Wing};
pub use eval::evaluate;
pub use game::{Game, GameError, GameStatus};
pub use make::{apply_move, make_move, reverse_move, unmake_move, MoveRecord};
pub use movegen::{
    generate_moves, is_checkmate, is_in_check, is_square_attacked, is_stalemate, legal_moves,
    MoveList, PieceMoves,
};
pub use position::Position;
pub use search::{best_move, SearchOutcome, Searcher, MATE_SCORE};
