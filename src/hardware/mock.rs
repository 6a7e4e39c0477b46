//! Deterministic in-memory hardware for tests.
//!
//! Every double records what reached it so tests can assert on what the
//! board would actually show. Time only moves when someone calls
//! [`Clock::delay_ms`] or [`ManualClock::advance`], which makes debounce
//! windows and render throttling exactly reproducible.

use super::{Clock, DisplayDriver, HardwareError, IndicatorDriver, InputSource, PinLevel, Rgb};
use derive_new::new;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared manual clock; clones observe the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Creates a clock starting at `start` ms.
    pub fn starting_at(start: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Moves time forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

/// A pin held active over `[from, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Press {
    /// Physical pin.
    pub pin: u8,
    /// First active millisecond.
    pub from: u64,
    /// First inactive millisecond after the press.
    pub until: u64,
}

/// Input source replaying scheduled presses against a [`ManualClock`].
///
/// Clones share the schedule, so a test can keep a handle after moving
/// the input into the controller.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    clock: ManualClock,
    presses: Rc<RefCell<Vec<Press>>>,
}

impl ScriptedInput {
    /// Creates an input with nothing pressed.
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            presses: Rc::default(),
        }
    }

    /// Holds `pin` active for `hold_ms` starting now.
    pub fn press(&self, pin: u8, hold_ms: u64) {
        let now = self.clock.now_ms();
        self.schedule(Press::new(pin, now, now + hold_ms));
    }

    /// Adds a press at an arbitrary time.
    pub fn schedule(&self, press: Press) {
        self.presses.borrow_mut().push(press);
    }
}

impl InputSource for ScriptedInput {
    fn read(&mut self, pin: u8) -> PinLevel {
        let now = self.clock.now_ms();
        let held = self
            .presses
            .borrow()
            .iter()
            .any(|p| p.pin == pin && p.from <= now && now < p.until);
        if held {
            PinLevel::Active
        } else {
            PinLevel::Inactive
        }
    }
}

/// Indicator strip recording what was transmitted.
#[derive(Debug, Clone)]
pub struct RecordingIndicators {
    ready: bool,
    buffered: [Rgb; 9],
    shown: [Rgb; 9],
    shows: usize,
    failures: usize,
}

impl RecordingIndicators {
    /// Creates an initialized strip.
    pub fn new() -> Self {
        Self {
            ready: true,
            buffered: [Rgb::OFF; 9],
            shown: [Rgb::OFF; 9],
            shows: 0,
            failures: 0,
        }
    }

    /// Creates a strip that never becomes ready.
    pub fn unready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Makes the next `count` transmissions fail.
    pub fn fail_next(&mut self, count: usize) {
        self.failures = count;
    }

    /// Colors as last transmitted.
    pub fn shown(&self) -> &[Rgb; 9] {
        &self.shown
    }

    /// Number of successful transmissions.
    pub fn shows(&self) -> usize {
        self.shows
    }
}

impl Default for RecordingIndicators {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorDriver for RecordingIndicators {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_color(&mut self, index: usize, color: Rgb) {
        if let Some(slot) = self.buffered.get_mut(index) {
            *slot = color;
        }
    }

    fn clear_all(&mut self) {
        self.buffered = [Rgb::OFF; 9];
    }

    fn show(&mut self) -> Result<(), HardwareError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(HardwareError::new("strip did not acknowledge"));
        }
        self.shown = self.buffered;
        self.shows += 1;
        Ok(())
    }
}

/// Two-line display recording the rendered characters.
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    ready: bool,
    lines: [String; 2],
    cursor: (usize, usize),
    clears: usize,
    failures: usize,
}

impl RecordingDisplay {
    /// Creates an initialized display.
    pub fn new() -> Self {
        Self {
            ready: true,
            lines: Default::default(),
            cursor: (0, 0),
            clears: 0,
            failures: 0,
        }
    }

    /// Creates a display that never becomes ready.
    pub fn unready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Makes the next `count` writes fail.
    pub fn fail_next(&mut self, count: usize) {
        self.failures = count;
    }

    /// Text currently on the given row.
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }

    /// Number of times the display was cleared (one per full redraw).
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayDriver for RecordingDisplay {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn clear(&mut self) -> Result<(), HardwareError> {
        self.lines = Default::default();
        self.cursor = (0, 0);
        self.clears += 1;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), HardwareError> {
        if row > 1 {
            return Err(HardwareError::new(format!("row {} out of range", row)));
        }
        self.cursor = (col as usize, row as usize);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), HardwareError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(HardwareError::new("display bus timeout"));
        }
        let (col, row) = self.cursor;
        let line = &mut self.lines[row];
        let kept: String = line.chars().take(col).collect();
        *line = format!("{kept:<col$}{text}");
        self.cursor.0 += text.chars().count();
        Ok(())
    }
}
