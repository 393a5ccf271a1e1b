//! Checkboard - play two-player chess at the console.
//!
//! Moves are entered as raw square indices (0 = a1, 63 = h8). One side can
//! be played by a scripted remote opponent that replies from a file.

mod command;
mod config;
mod opponent;
mod output;
mod play;

use anyhow::Context;
use checkboard_core::layout::STANDARD_LAYOUT;
use checkboard_core::Color;
use checkboard_engine::GameSession;
use clap::Parser;
use config::{CliConfig, Side};
use opponent::ScriptedOpponent;
use output::Printer;
use play::Driver;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Checkboard - two-player chess at the console.
#[derive(Parser)]
#[command(name = "checkboard")]
#[command(about = "Play two-player chess by square index")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "checkboard.toml")]
    config: PathBuf,

    /// Starting layout, e.g. "4k3/8/8/8/8/8/8/4K2R"
    #[arg(long)]
    layout: Option<String>,

    /// Black moves first
    #[arg(long)]
    black_to_move: bool,

    /// File with scripted opponent replies, one "from, to" per line
    #[arg(long)]
    opponent_script: Option<PathBuf>,

    /// Side played by the scripted opponent
    #[arg(long, value_enum)]
    opponent_side: Option<Side>,

    /// Draw pieces with letters instead of chess symbols
    #[arg(long)]
    ascii: bool,

    /// Print legal destinations after a rejected move
    #[arg(long)]
    hints: bool,

    /// Write one JSON object per event instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = CliConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    tracing::info!("Config: {:?}", config);

    let turn = if args.black_to_move {
        Color::Black
    } else {
        Color::White
    };
    let layout = args.layout.as_deref().unwrap_or(STANDARD_LAYOUT);
    let session = GameSession::from_layout(layout, turn)
        .with_context(|| format!("invalid layout {:?}", layout))?;

    let side: Color = args.opponent_side.unwrap_or(config.opponent.side).into();
    let opponent = match args.opponent_script.or(config.opponent.script) {
        Some(path) => {
            tracing::info!("Opponent script: {:?} playing {}", path, side);
            let opponent = ScriptedOpponent::open(side, &path)
                .with_context(|| format!("reading opponent script {}", path.display()))?;
            Some(opponent)
        }
        None => None,
    };

    let printer = Printer {
        json: args.json,
        unicode: config.display.unicode && !args.ascii,
    };
    let hints = args.hints || config.display.hints;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut driver = Driver::new(session, opponent, printer, hints, stdout.lock());
    driver.run(stdin.lock())
}
