//! Debounced button sampling.
//!
//! Buttons are scanned in logical order. A line that reads active is
//! given a settle window and sampled again; only a press that survives the
//! window is reported, and the first one wins. The settle wait blocks the
//! whole control loop.
//!
//! An accepted button is latched until it reads released, so one physical
//! press yields one event no matter how long it is held.

use crate::games::tictactoe::ButtonId;
use crate::hardware::{Clock, InputSource};
use tracing::{debug, instrument, trace};

/// Scans the nine buttons and applies debounce.
#[derive(Debug, Clone)]
pub struct InputSampler {
    pins: [u8; 9],
    settle_ms: u64,
    latched: Option<ButtonId>,
}

impl InputSampler {
    /// Creates a sampler over the given logical-to-physical pin map.
    pub fn new(pins: [u8; 9], settle_ms: u64) -> Self {
        Self {
            pins,
            settle_ms,
            latched: None,
        }
    }

    /// Physical pin behind a logical button.
    pub fn pin(&self, button: ButtonId) -> u8 {
        self.pins[button.index()]
    }

    /// Button waiting to be released, if any.
    pub fn latched(&self) -> Option<ButtonId> {
        self.latched
    }

    /// Polls with the default settle window.
    pub fn poll<P, C>(&mut self, input: &mut P, clock: &mut C) -> Option<ButtonId>
    where
        P: InputSource,
        C: Clock,
    {
        self.poll_with(input, clock, self.settle_ms)
    }

    /// Polls with an explicit settle window.
    ///
    /// Returns the first button in scan order that is still active after
    /// `settle_ms`; the remaining buttons are not sampled.
    #[instrument(skip(self, input, clock))]
    pub fn poll_with<P, C>(
        &mut self,
        input: &mut P,
        clock: &mut C,
        settle_ms: u64,
    ) -> Option<ButtonId>
    where
        P: InputSource,
        C: Clock,
    {
        if let Some(held) = self.latched
            && !input.read(self.pin(held)).is_active()
        {
            trace!(button = %held, "Latched button released");
            self.latched = None;
        }

        for button in ButtonId::all() {
            if self.latched == Some(button) {
                continue;
            }

            let pin = self.pin(button);
            if !input.read(pin).is_active() {
                continue;
            }
            clock.delay_ms(settle_ms);
            if input.read(pin).is_active() {
                debug!(%button, pin, "Press accepted");
                self.latched = Some(button);
                return Some(button);
            }
            debug!(%button, pin, "Press rejected as bounce");
        }
        None
    }
}
