//! Reset flow: leaving idle for a new round, and a new match when the
//! combined score has passed the threshold.

use super::{GameController, Mode, messages};
use crate::games::tictactoe::ButtonId;
use crate::hardware::{Clock, DisplayDriver, IndicatorDriver, InputSource};
use tracing::{info, instrument};

impl<I, D, P, C> GameController<I, D, P, C>
where
    I: IndicatorDriver,
    D: DisplayDriver,
    P: InputSource,
    C: Clock,
{
    /// Starts the next round if a deliberate reset press is found.
    ///
    /// Uses the longer reset settle window, so short taps are ignored. The
    /// threshold compares the combined score, not the number of rounds
    /// played: draws never count towards it.
    #[instrument(skip(self))]
    pub(super) fn try_reset(&mut self) -> Option<ButtonId> {
        let settle = *self.config.reset_debounce_ms();
        let button = self
            .sampler
            .poll_with(&mut self.input, &mut self.clock, settle)?;

        self.round.reset();
        self.buffers.indicators.clear();
        self.render.mark_indicators();
        self.write_text(messages::NEXT_ROUND);

        if self.scores.total() > *self.config.match_reset_threshold() {
            info!(
                red = self.scores.red,
                blue = self.scores.blue,
                "Match complete, scores cleared"
            );
            self.scores.reset();
        }

        self.mode = Mode::Playing;
        info!(%button, "New round, red to move");
        Some(button)
    }
}
