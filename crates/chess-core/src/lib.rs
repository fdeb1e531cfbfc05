//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the engine, the protocol
//! layer and the bot:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Square`] for board coordinates and single-square masks
//! - [`Move`] and [`MoveFlag`] for move representation
//! - FEN decoding into a [`FenPosition`]

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{parse_placement, FenCastling, FenError, FenPosition};
pub use mov::{Move, MoveFlag};
pub use piece::PieceKind;
pub use square::Square;
