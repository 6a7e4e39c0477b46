//! Strictly Arcade - Unified CLI
//!
//! Runs the board controller against the terminal simulator and offers
//! configuration helpers.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_arcade::hardware::terminal::{KeyboardInput, SystemClock, TerminalSession};
use strictly_arcade::{ArcadeConfig, GameController};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            hold_ms,
            log_file,
        } => run_play(config, hold_ms, &log_file),
        Command::Config => print_default_config(),
        Command::Check { path } => check_config(&path),
    }
}

/// Run the controller on the terminal simulator until quit.
#[instrument(skip_all)]
fn run_play(config: Option<PathBuf>, hold_ms: u64, log_file: &Path) -> Result<()> {
    // Log to file to avoid interfering with the simulator
    let log = std::fs::File::create(log_file)
        .with_context(|| format!("creating log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log))
        .with_ansi(false)
        .try_init();

    let config = match config {
        Some(path) => ArcadeConfig::from_file(&path)?,
        None => ArcadeConfig::default(),
    };
    info!(?config, "Starting Strictly Arcade");

    let session = TerminalSession::start()?;
    let input = KeyboardInput::new(*config.button_pins(), hold_ms);
    let mut controller = GameController::new(
        config,
        session.indicators(),
        session.display(),
        input,
        SystemClock::new(),
    )?;

    controller.boot();
    while !controller.input().quit_requested() {
        controller.tick();
    }

    info!(
        red = controller.scores().red(),
        blue = controller.scores().blue(),
        "Simulator stopped"
    );
    Ok(())
}

/// Print the default configuration.
fn print_default_config() -> Result<()> {
    print!("{}", ArcadeConfig::default().to_toml()?);
    Ok(())
}

/// Validate a configuration file and echo the effective settings.
fn check_config(path: &Path) -> Result<()> {
    let config = ArcadeConfig::from_file(path)?;
    println!("{} is valid", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
