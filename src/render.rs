//! Deferred, rate-limited rendering.
//!
//! Game logic writes into [`OutputBuffers`] immediately and marks what it
//! touched; the [`RenderCoordinator`] decides, once per tick, whether the
//! buffers are pushed to the indicator strip and the display. Several
//! logical changes between two flushes are coalesced into one hardware
//! write, and a throttled request is simply dropped: the dirty flags stay
//! set for the next call.

use crate::hardware::{DisplayDriver, HardwareError, IndicatorDriver, Rgb};
use tracing::{debug, instrument, warn};

/// Characters per display line.
pub const LINE_WIDTH: usize = 16;

/// Two display lines, each at most [`LINE_WIDTH`] characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    lines: [String; 2],
}

impl TextBuffer {
    /// Replaces both lines, truncating each to [`LINE_WIDTH`].
    ///
    /// Returns true if the content changed.
    pub fn set(&mut self, line0: &str, line1: &str) -> bool {
        let next = [truncate(line0), truncate(line1)];
        if next == self.lines {
            return false;
        }
        self.lines = next;
        true
    }

    /// Returns one line (0 or 1).
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }

    /// Returns both lines.
    pub fn lines(&self) -> &[String; 2] {
        &self.lines
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(LINE_WIDTH).collect()
}

/// Colors for the nine indicators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorBuffer {
    colors: [Rgb; 9],
}

impl IndicatorBuffer {
    /// Sets one indicator; out-of-range indices are ignored.
    ///
    /// Returns true if the color changed.
    pub fn set(&mut self, index: usize, color: Rgb) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) if *slot != color => {
                *slot = color;
                true
            }
            _ => false,
        }
    }

    /// Turns every indicator off.
    pub fn clear(&mut self) {
        self.colors = [Rgb::OFF; 9];
    }

    /// Returns all colors.
    pub fn colors(&self) -> &[Rgb; 9] {
        &self.colors
    }
}

/// Both render buffers, written by game logic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffers {
    /// Indicator colors mirroring the grid.
    pub indicators: IndicatorBuffer,
    /// Display text derived from round and match state.
    pub text: TextBuffer,
}

/// What a flush request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// Called inside the minimum interval; nothing happened.
    Throttled,
    /// Interval elapsed; reports which outputs were pushed.
    Done {
        /// Indicator strip transmitted.
        indicators: bool,
        /// Display rewritten.
        text: bool,
    },
}

impl Flush {
    /// Returns true if any hardware was written.
    pub fn wrote_anything(&self) -> bool {
        matches!(
            self,
            Flush::Done { indicators: true, .. } | Flush::Done { text: true, .. }
        )
    }
}

/// Holds the dirty flags and the throttle for both outputs.
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    min_interval_ms: u64,
    last_flush: Option<u64>,
    indicators_dirty: bool,
    text_dirty: bool,
}

impl RenderCoordinator {
    /// Creates a coordinator; the first request is never throttled.
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_flush: None,
            indicators_dirty: false,
            text_dirty: false,
        }
    }

    /// Marks the indicator buffer as changed.
    pub fn mark_indicators(&mut self) {
        self.indicators_dirty = true;
    }

    /// Marks the text buffer as changed.
    pub fn mark_text(&mut self) {
        self.text_dirty = true;
    }

    /// Indicator buffer differs from what the strip shows.
    pub fn indicators_dirty(&self) -> bool {
        self.indicators_dirty
    }

    /// Text buffer differs from what the display shows.
    pub fn text_dirty(&self) -> bool {
        self.text_dirty
    }

    /// Time of the last unthrottled request.
    pub fn last_flush(&self) -> Option<u64> {
        self.last_flush
    }

    /// Pushes dirty buffers unless the last flush was under the interval ago.
    #[instrument(skip(self, buffers, indicators, display))]
    pub fn request_flush<I, D>(
        &mut self,
        now: u64,
        buffers: &OutputBuffers,
        indicators: &mut I,
        display: &mut D,
    ) -> Flush
    where
        I: IndicatorDriver,
        D: DisplayDriver,
    {
        if let Some(last) = self.last_flush
            && now.saturating_sub(last) < self.min_interval_ms
        {
            debug!(since_last = now.saturating_sub(last), "Flush throttled");
            return Flush::Throttled;
        }
        self.flush_now(now, buffers, indicators, display)
    }

    /// Pushes dirty buffers regardless of the throttle.
    ///
    /// Still records `now` as the last flush time.
    #[instrument(skip(self, buffers, indicators, display))]
    pub fn flush_now<I, D>(
        &mut self,
        now: u64,
        buffers: &OutputBuffers,
        indicators: &mut I,
        display: &mut D,
    ) -> Flush
    where
        I: IndicatorDriver,
        D: DisplayDriver,
    {
        let mut flushed_indicators = false;
        if self.indicators_dirty && indicators.is_ready() {
            match push_indicators(&buffers.indicators, indicators) {
                Ok(()) => {
                    self.indicators_dirty = false;
                    flushed_indicators = true;
                }
                Err(e) => warn!(error = %e, "Indicator flush failed, will retry"),
            }
        }

        let mut flushed_text = false;
        if self.text_dirty && display.is_ready() {
            match push_text(&buffers.text, display) {
                Ok(()) => {
                    self.text_dirty = false;
                    flushed_text = true;
                }
                Err(e) => warn!(error = %e, "Display flush failed, will retry"),
            }
        }

        self.last_flush = Some(now);
        Flush::Done {
            indicators: flushed_indicators,
            text: flushed_text,
        }
    }
}

fn push_indicators<I: IndicatorDriver>(
    buffer: &IndicatorBuffer,
    driver: &mut I,
) -> Result<(), HardwareError> {
    for (index, color) in buffer.colors().iter().enumerate() {
        driver.set_color(index, *color);
    }
    driver.show()
}

fn push_text<D: DisplayDriver>(buffer: &TextBuffer, driver: &mut D) -> Result<(), HardwareError> {
    driver.clear()?;
    for (row, line) in buffer.lines().iter().enumerate() {
        driver.set_cursor(0, row as u8)?;
        driver.write_text(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::mock::{RecordingDisplay, RecordingIndicators};

    #[test]
    fn test_text_truncates_to_sixteen() {
        let mut text = TextBuffer::default();
        assert!(text.set("ERROR: Unknown Color", ""));
        assert_eq!(text.line(0), "ERROR: Unknown C");
    }

    #[test]
    fn test_unchanged_text_reports_no_change() {
        let mut text = TextBuffer::default();
        assert!(text.set("Press to reset", ""));
        assert!(!text.set("Press to reset", ""));
    }

    #[test]
    fn test_indicator_set_ignores_out_of_range() {
        let mut buffer = IndicatorBuffer::default();
        assert!(!buffer.set(9, Rgb::new(1, 2, 3)));
        assert!(buffer.set(0, Rgb::new(1, 2, 3)));
        assert!(!buffer.set(0, Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_clean_buffers_write_nothing() {
        let mut coordinator = RenderCoordinator::new(30);
        let mut leds = RecordingIndicators::new();
        let mut lcd = RecordingDisplay::new();
        let flush = coordinator.request_flush(0, &OutputBuffers::default(), &mut leds, &mut lcd);
        assert!(!flush.wrote_anything());
        assert_eq!(leds.shows(), 0);
        assert_eq!(lcd.clears(), 0);
    }
}
