//! UCI command handling over a [`Game`].

use crate::config::Config;
use chess_core::Color;
use chess_engine::search::mate_distance;
use chess_engine::Game;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::{debug, info, warn};
use uci::{EngineInfo, GoOptions, GuiCommand, Score, UciEngine, UciError};

/// Engine state between GUI commands.
pub struct Session {
    config: Config,
    game: Game,
    debug: bool,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            config,
            game: Game::new(),
            debug: false,
        }
    }

    /// Serves commands until `quit` or end of input.
    ///
    /// Malformed commands are reported as `info string` and skipped; only
    /// I/O failures end the loop with an error.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        uci: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        loop {
            let cmd = match uci.read_command() {
                Ok(cmd) => cmd,
                Err(UciError::ParseError(msg)) => {
                    warn!(%msg, "rejected command");
                    uci.send_string(&msg)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.handle(cmd, uci)?.is_break() {
                return Ok(());
            }
        }
    }

    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        cmd: GuiCommand,
        uci: &mut UciEngine<R, W>,
    ) -> Result<ControlFlow<()>, UciError> {
        match cmd {
            GuiCommand::Uci => {
                uci.send_id(&self.config.name, &self.config.author)?;
                uci.send_uciok()?;
            }
            GuiCommand::Debug(on) => {
                self.debug = on;
                debug!(on, "debug output toggled");
            }
            GuiCommand::IsReady => uci.send_readyok()?,
            GuiCommand::UciNewGame => self.game = Game::new(),
            GuiCommand::Position { fen, moves } => self.set_position(fen.as_deref(), &moves, uci)?,
            GuiCommand::Go(opts) => self.go(opts, uci)?,
            // Searches finish before the next command is read.
            GuiCommand::Stop => {}
            GuiCommand::Quit => return Ok(ControlFlow::Break(())),
            GuiCommand::Unknown(line) => debug!(%line, "ignoring unknown command"),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn set_position<R: BufRead, W: Write>(
        &mut self,
        fen: Option<&str>,
        moves: &[String],
        uci: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        self.game = match fen {
            None => Game::new(),
            Some(fen) => match Game::from_fen(fen) {
                Ok(game) => game,
                Err(e) => {
                    warn!(fen, error = %e, "falling back to the starting position");
                    uci.send_string(&format!("invalid fen: {}", e))?;
                    Game::new()
                }
            },
        };

        for text in moves {
            if let Err(e) = self.game.play_uci(text) {
                warn!(error = %e, "stopped replaying moves");
                uci.send_string(&e.to_string())?;
                break;
            }
        }

        if self.debug {
            uci.send_string(&format!("position {}", self.game.to_fen()))?;
        }
        Ok(())
    }

    fn go<R: BufRead, W: Write>(
        &mut self,
        opts: GoOptions,
        uci: &mut UciEngine<R, W>,
    ) -> Result<(), UciError> {
        // Depth 0 would return no move at all.
        let depth = opts.depth.unwrap_or(self.config.depth).max(1);
        let side = self.game.side_to_move();
        debug!("searching {:?} to move at depth {}\n{}", side, depth, self.game.position());
        let outcome = self.game.best_move(depth);
        let best = outcome.best.map(|mv| mv.to_uci());
        info!(
            depth,
            score = outcome.score,
            nodes = outcome.nodes,
            best = best.as_deref().unwrap_or("none"),
            "search done"
        );

        uci.send_info(EngineInfo {
            depth: Some(depth),
            score: Some(uci_score(outcome.score, side)),
            nodes: Some(outcome.nodes),
            pv: best.iter().cloned().collect(),
            string: None,
        })?;
        uci.send_bestmove(best.as_deref())
    }
}

/// Converts a White-relative search score to the side to move's view.
fn uci_score(score: i32, side: Color) -> Score {
    let relative = score * side.sign();
    match mate_distance(score) {
        Some(plies) => {
            let moves = (plies as i32 + 1) / 2;
            Score::Mate(if relative > 0 { moves } else { -moves })
        }
        None => Score::Cp(relative),
    }
}
