//! Game management on top of the board primitives.
//!
//! A [`Game`] owns the board, the side to move and the castling rights,
//! validates moves against the legal move list and keeps the records needed
//! to take them back.

use crate::make::{make_move, unmake_move};
use crate::movegen::{generate_moves, is_in_check};
use crate::search::{best_move, SearchOutcome};
use crate::{CastlingRights, MoveList, MoveRecord, Position};
use chess_core::{Color, FenError, FenPosition, Move};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The text is not a coordinate move.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// There is no move to take back.
    #[error("no move to undo")]
    NothingToUndo,
}

/// Whether the game can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    /// Returns true once the side to move has no legal move.
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// A chess game: board, side to move, castling rights and history.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    side_to_move: Color,
    castling: CastlingRights,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Game {
            position: Position::new_game(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            history: Vec::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenPosition::parse(fen)?;
        Ok(Game {
            position: Position::from_placement(parsed.placement),
            side_to_move: parsed.active,
            castling: parsed.castling.into(),
            history: Vec::new(),
        })
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the castling rights in force.
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        let mut scratch = self.position.clone();
        generate_moves(&mut scratch, self.castling, self.side_to_move)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(&self.position, self.side_to_move)
    }

    /// Returns whether the side to move is mated, stalemated or can play on.
    pub fn status(&self) -> GameStatus {
        if !self.legal_moves().is_empty() {
            GameStatus::Ongoing
        } else if self.is_check() {
            GameStatus::Checkmate {
                winner: self.side_to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Plays a move for the side to move.
    ///
    /// The move is matched against the legal moves by origin and
    /// destination, so a plain `e1g1` is accepted as kingside castling.
    pub fn play(&mut self, mv: Move) -> Result<Move, GameError> {
        let legal = self
            .legal_moves()
            .find(mv)
            .ok_or_else(|| GameError::IllegalMove(mv.to_uci()))?;
        let record = make_move(&mut self.position, legal, self.side_to_move, self.castling)
            .ok_or_else(|| GameError::IllegalMove(mv.to_uci()))?;

        self.castling = record.rights_after();
        self.side_to_move = self.side_to_move.opposite();
        self.history.push(record);
        Ok(legal)
    }

    /// Plays a move given in coordinate notation such as `"e2e4"`.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, GameError> {
        let mv = Move::from_uci(text).ok_or_else(|| GameError::InvalidNotation(text.to_string()))?;
        self.play(mv)
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let record = self.history.pop().ok_or(GameError::NothingToUndo)?;
        unmake_move(&mut self.position, &record);
        self.castling = record.rights;
        self.side_to_move = record.color;
        Ok(record.mv)
    }

    /// Searches the current position to `depth` plies.
    pub fn best_move(&mut self, depth: u32) -> SearchOutcome {
        best_move(&mut self.position, self.castling, self.side_to_move, depth)
    }

    /// Converts the game state to a FEN string.
    ///
    /// Counters are not tracked, so the record always ends in `- 0 1`.
    pub fn to_fen(&self) -> String {
        FenPosition {
            placement: self.position.placement(),
            active: self.side_to_move,
            castling: self.castling.to_fen(),
        }
        .to_string()
    }
}
