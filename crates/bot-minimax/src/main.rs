//! Minimax bot with alpha-beta pruning.
//!
//! Speaks UCI on stdin/stdout and answers every `go` with a fixed-depth
//! search. Logs go to stderr so they never mix with protocol output.

mod config;
mod session;

use clap::Parser;
use config::Config;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uci::stdio_engine;

/// Minimax Bot - fixed-depth alpha-beta UCI engine.
#[derive(Parser)]
#[command(name = "bot-minimax")]
#[command(about = "Fixed-depth alpha-beta chess engine speaking UCI")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth used when `go` does not give one
    #[arg(long)]
    depth: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(depth) = args.depth {
        anyhow::ensure!(depth > 0, "search depth must be at least 1");
        config.depth = depth;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting {}", config.name);
    tracing::info!("Default depth: {}", config.depth);

    let mut engine = stdio_engine();
    Session::new(config).run(&mut engine)?;

    tracing::info!("Shutting down");
    Ok(())
}
