//! Command-line interface for strictly_arcade.

use clap::{Parser, Subcommand};

/// Strictly Arcade - tic-tac-toe on a button-and-light board
#[derive(Parser, Debug)]
#[command(name = "strictly_arcade")]
#[command(about = "Button-and-light tic-tac-toe controller", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on the terminal simulator (keys 1-9 are the buttons)
    Play {
        /// Board configuration (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// How long a key press holds its button down (ms)
        #[arg(long, default_value = "120")]
        hold_ms: u64,

        /// Log file (the terminal is taken by the simulator)
        #[arg(long, default_value = "strictly_arcade.log")]
        log_file: std::path::PathBuf,
    },

    /// Print the default configuration as TOML
    Config,

    /// Load and validate a configuration file
    Check {
        /// Path to the configuration file
        path: std::path::PathBuf,
    },
}
