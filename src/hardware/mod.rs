//! Hardware boundary: the collaborators the controller drives.
//!
//! The controller never talks to pins or buses directly. It receives an
//! indicator strip, a character display, a digital input source and a
//! clock at construction and only goes through these traits.
//!
//! - [`mock`]: deterministic in-memory doubles for tests
//! - [`terminal`]: a terminal simulator of the button/light board

pub mod mock;
pub mod terminal;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 24-bit indicator color. All-zero encodes an unlit (empty) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Unlit indicator.
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns true for the all-zero color.
    pub fn is_off(self) -> bool {
        self == Self::OFF
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Logical level of a button line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PinLevel {
    /// Button pressed.
    Active,
    /// Button released.
    Inactive,
}

impl PinLevel {
    /// Returns true if the button reads as pressed.
    pub fn is_active(self) -> bool {
        self == PinLevel::Active
    }
}

/// Hardware error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Hardware error: {} at {}:{}", message, file, line)]
pub struct HardwareError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HardwareError {
    /// Creates a new hardware error with caller location tracking.
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

impl From<std::io::Error> for HardwareError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Nine addressable color indicators, one per cell.
///
/// `set_color` and `clear_all` only touch the driver's own buffer; nothing
/// reaches the strip until [`show`](IndicatorDriver::show).
pub trait IndicatorDriver {
    /// Returns true once the strip is initialized.
    fn is_ready(&self) -> bool;

    /// Buffers a color for one indicator (0-8).
    fn set_color(&mut self, index: usize, color: Rgb);

    /// Buffers every indicator as unlit.
    fn clear_all(&mut self);

    /// Transmits the buffered colors.
    fn show(&mut self) -> Result<(), HardwareError>;
}

/// Two-line character display.
pub trait DisplayDriver {
    /// Returns true once the display is initialized.
    fn is_ready(&self) -> bool;

    /// Blanks the display.
    fn clear(&mut self) -> Result<(), HardwareError>;

    /// Moves the write position.
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), HardwareError>;

    /// Writes text at the cursor.
    fn write_text(&mut self, text: &str) -> Result<(), HardwareError>;
}

/// Raw digital inputs, addressed by physical pin.
pub trait InputSource {
    /// Samples one pin.
    fn read(&mut self, pin: u8) -> PinLevel;
}

/// Monotonic millisecond clock with a blocking delay.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    /// Blocks the control loop for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "#ff0010");
        assert!(Rgb::from([0, 0, 0]).is_off());
    }

    #[test]
    fn test_error_tracks_location() {
        let err = HardwareError::new("strip missing");
        assert!(err.file.ends_with("mod.rs"));
        assert!(err.to_string().contains("strip missing"));
    }
}
