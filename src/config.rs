//! Board configuration.
//!
//! Every field has a default matching the stock wiring and timings, so an
//! empty TOML file is a valid configuration.

use crate::hardware::Rgb;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Timings, wiring and colors for one board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Settle window for in-play presses (ms).
    debounce_ms: u64,

    /// Settle window for the reset press (ms).
    reset_debounce_ms: u64,

    /// Minimum time between two hardware flushes (ms).
    render_interval_ms: u64,

    /// Combined score above which the next reset also starts a new match.
    match_reset_threshold: u32,

    /// Pause at the end of every control-loop tick (ms).
    tick_delay_ms: u64,

    /// How long the boot title stays up (ms).
    splash_ms: u64,

    /// How long a round result stays up before the reset prompt (ms).
    result_hold_ms: u64,

    /// Physical pin for each logical button, row-major.
    button_pins: [u8; 9],

    /// Red player's indicator color.
    player_a_color: [u8; 3],

    /// Blue player's indicator color.
    player_b_color: [u8; 3],
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            reset_debounce_ms: 30,
            render_interval_ms: 30,
            match_reset_threshold: 3,
            tick_delay_ms: 50,
            splash_ms: 200,
            result_hold_ms: 1_500,
            button_pins: [12, 2, 3, 4, 5, 6, 7, 8, 9],
            player_a_color: [255, 0, 0],
            player_b_color: [0, 0, 255],
        }
    }
}

impl ArcadeConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            debounce_ms = config.debounce_ms,
            render_interval_ms = config.render_interval_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Rejects configurations the controller cannot run with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = self.player_a();
        let b = self.player_b();
        if a.is_off() || b.is_off() {
            return Err(ConfigError::new(
                "Player colors must not be all-zero (that encodes an empty cell)",
            ));
        }
        if a == b {
            return Err(ConfigError::new(format!("Both players use color {}", a)));
        }

        let unique: HashSet<u8> = self.button_pins.iter().copied().collect();
        if unique.len() != self.button_pins.len() {
            return Err(ConfigError::new(format!(
                "Button pins must be distinct: {:?}",
                self.button_pins
            )));
        }

        if self.reset_debounce_ms < self.debounce_ms {
            return Err(ConfigError::new(format!(
                "reset_debounce_ms ({}) must not be shorter than debounce_ms ({})",
                self.reset_debounce_ms, self.debounce_ms
            )));
        }
        Ok(())
    }

    /// Red player's color.
    pub fn player_a(&self) -> Rgb {
        Rgb::from(self.player_a_color)
    }

    /// Blue player's color.
    pub fn player_b(&self) -> Rgb {
        Rgb::from(self.player_b_color)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
