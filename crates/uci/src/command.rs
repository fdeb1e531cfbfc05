//! UCI command parsing.

use crate::UciError;

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Switch debug output on or off.
    Debug(bool),
    /// Check if engine is ready.
    IsReady,
    /// The next position belongs to a different game.
    UciNewGame,
    /// Set up position.
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    /// Start calculating.
    Go(GoOptions),
    /// Stop calculating.
    Stop,
    /// Quit the engine.
    Quit,
    /// Unknown command (for forward compatibility).
    Unknown(String),
}

/// Options for the `go` command.
///
/// Only a fixed depth is honored; time controls are accepted and skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Search to this depth.
    pub depth: Option<u32>,
}

impl GuiCommand {
    /// Parse a UCI command string.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");

        match cmd {
            "uci" => Ok(GuiCommand::Uci),
            "debug" => Self::parse_debug(parts),
            "isready" => Ok(GuiCommand::IsReady),
            "ucinewgame" => Ok(GuiCommand::UciNewGame),
            "stop" => Ok(GuiCommand::Stop),
            "quit" => Ok(GuiCommand::Quit),
            "position" => Self::parse_position(parts),
            "go" => Self::parse_go(parts),
            _ => Ok(GuiCommand::Unknown(input.to_string())),
        }
    }

    fn parse_debug<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        match parts.next() {
            Some("on") | None => Ok(GuiCommand::Debug(true)),
            Some("off") => Ok(GuiCommand::Debug(false)),
            Some(other) => Err(UciError::ParseError(format!(
                "Expected 'on' or 'off', got '{}'",
                other
            ))),
        }
    }

    fn parse_position<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let fen = match parts.next() {
            Some("startpos") => {
                match parts.next() {
                    Some("moves") | None => {}
                    Some(other) => {
                        return Err(UciError::ParseError(format!(
                            "Expected 'moves', got '{}'",
                            other
                        )));
                    }
                }
                None
            }
            Some("fen") => {
                // FEN fields run until "moves" or the end of the line.
                let fen_parts: Vec<&str> = parts.by_ref().take_while(|&p| p != "moves").collect();
                if fen_parts.is_empty() {
                    return Err(UciError::ParseError("Missing FEN".to_string()));
                }
                Some(fen_parts.join(" "))
            }
            Some(other) => {
                return Err(UciError::ParseError(format!(
                    "Expected 'startpos' or 'fen', got '{}'",
                    other
                )));
            }
            None => {
                return Err(UciError::ParseError(
                    "Expected 'startpos' or 'fen'".to_string(),
                ));
            }
        };

        let moves = parts.map(str::to_string).collect();
        Ok(GuiCommand::Position { fen, moves })
    }

    fn parse_go<'a>(parts: impl Iterator<Item = &'a str>) -> Result<Self, UciError> {
        let mut opts = GoOptions::default();
        let parts: Vec<&str> = parts.collect();
        let mut i = 0;

        while i < parts.len() {
            if parts[i] == "depth" {
                i += 1;
                let value = parts.get(i).copied().unwrap_or("");
                opts.depth = Some(value.parse().map_err(|_| {
                    UciError::ParseError(format!("Invalid depth '{}'", value))
                })?);
            }
            i += 1;
        }

        Ok(GuiCommand::Go(opts))
    }
}
