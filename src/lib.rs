//! Strictly Arcade - tic-tac-toe on a button-and-light board
//!
//! A 3x3 grid of color indicators, nine momentary buttons and a 16x2
//! character display, driven by a single cooperative control loop.
//!
//! # Architecture
//!
//! - **Games**: grid, turn and win/draw rules (pure, hardware-free)
//! - **Input**: debounced button sampling
//! - **Render**: dirty-flag buffers and a rate-limited flush coordinator
//! - **Controller**: the round/match state machine and reset flow
//! - **Hardware**: driver traits, test doubles and a terminal simulator
//!
//! # Example
//!
//! ```
//! use strictly_arcade::hardware::mock::{
//!     ManualClock, RecordingDisplay, RecordingIndicators, ScriptedInput,
//! };
//! use strictly_arcade::{ArcadeConfig, GameController, Mode};
//!
//! let clock = ManualClock::default();
//! let mut controller = GameController::new(
//!     ArcadeConfig::default(),
//!     RecordingIndicators::new(),
//!     RecordingDisplay::new(),
//!     ScriptedInput::new(clock.clone()),
//!     clock,
//! )
//! .unwrap();
//! controller.boot();
//! assert_eq!(controller.mode(), Mode::Playing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod games;
pub mod hardware;
mod input;
mod render;

// Crate-level exports - Configuration
pub use config::{ArcadeConfig, ConfigError};

// Crate-level exports - Controller
pub use controller::{GameController, Mode, Scoreboard, messages};

// Crate-level exports - Input and rendering
pub use input::InputSampler;
pub use render::{
    Flush, IndicatorBuffer, LINE_WIDTH, OutputBuffers, RenderCoordinator, TextBuffer,
};

// Crate-level exports - Game types
pub use games::tictactoe::{
    AlternatingTurnInvariant, ButtonId, Cell, ClaimOutcome, Grid, Invariant, InvariantSet,
    InvariantViolation, Outcome, Player, Position, Round, RoundInvariants, SingleWinnerInvariant,
    WIN_LINES, evaluate, find_line, is_full, line_owner,
};

// Crate-level exports - Hardware boundary
pub use hardware::{
    Clock, DisplayDriver, HardwareError, IndicatorDriver, InputSource, PinLevel, Rgb,
};
