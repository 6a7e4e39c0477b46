//! Game controller: the state machine behind the control loop.
//!
//! The controller exclusively owns the round, the scores and the render
//! buffers, plus the hardware handles it was built with. One call to
//! [`GameController::tick`] is one iteration of the control loop:
//!
//! 1. sample input (debounced, blocking for the settle window)
//! 2. apply the press: a claim while playing, a reset while idle
//! 3. after every accepted claim, evaluate the grid before anything else
//! 4. ask the render coordinator to flush whatever changed
//!
//! Game-level rejections (occupied cell, wrong mode, off-board index) are
//! not errors; they come back as a [`ClaimOutcome`] and are logged.

pub mod messages;
mod reset;

use crate::config::{ArcadeConfig, ConfigError};
use crate::games::tictactoe::{
    ButtonId, Cell, ClaimOutcome, Outcome, Player, Round, WIN_LINES, evaluate, line_owner,
};
use crate::hardware::{Clock, DisplayDriver, IndicatorDriver, InputSource, Rgb};
use crate::input::InputSampler;
use crate::render::{OutputBuffers, RenderCoordinator};
use derive_more::Display;
use tracing::{debug, info, instrument, warn};

/// Whether a round is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Mode {
    /// Waiting for a reset press.
    Idle,
    /// Accepting claims.
    Playing,
}

/// Wins per player for the current match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    red: u32,
    blue: u32,
}

impl Scoreboard {
    /// Red's wins.
    pub fn red(&self) -> u32 {
        self.red
    }

    /// Blue's wins.
    pub fn blue(&self) -> u32 {
        self.blue
    }

    /// Wins of both players together.
    pub fn total(&self) -> u32 {
        self.red + self.blue
    }

    fn record_win(&mut self, player: Player) {
        match player {
            Player::A => self.red += 1,
            Player::B => self.blue += 1,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Single control-loop aggregate for one board.
pub struct GameController<I, D, P, C> {
    config: ArcadeConfig,
    indicators: I,
    display: D,
    input: P,
    clock: C,
    sampler: InputSampler,
    render: RenderCoordinator,
    buffers: OutputBuffers,
    round: Round,
    scores: Scoreboard,
    mode: Mode,
    idle_since: u64,
}

impl<I, D, P, C> GameController<I, D, P, C>
where
    I: IndicatorDriver,
    D: DisplayDriver,
    P: InputSource,
    C: Clock,
{
    /// Creates a controller in [`Mode::Idle`] around the given hardware.
    #[instrument(skip_all)]
    pub fn new(
        config: ArcadeConfig,
        indicators: I,
        display: D,
        input: P,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = InputSampler::new(*config.button_pins(), *config.debounce_ms());
        let render = RenderCoordinator::new(*config.render_interval_ms());
        let idle_since = clock.now_ms();
        Ok(Self {
            config,
            indicators,
            display,
            input,
            clock,
            sampler,
            render,
            buffers: OutputBuffers::default(),
            round: Round::new(),
            scores: Scoreboard::default(),
            mode: Mode::Idle,
            idle_since,
        })
    }

    /// Power-up sequence.
    ///
    /// Blanks the indicators, shows the title immediately, holds it for the
    /// splash time and starts the first round without waiting for a reset.
    #[instrument(skip(self))]
    pub fn boot(&mut self) {
        if self.indicators.is_ready() {
            self.indicators.clear_all();
        }
        self.buffers.indicators.clear();
        self.render.mark_indicators();
        self.write_text(messages::TITLE);

        let now = self.clock.now_ms();
        self.render
            .flush_now(now, &self.buffers, &mut self.indicators, &mut self.display);
        self.clock.delay_ms(*self.config.splash_ms());

        self.round.reset();
        self.mode = Mode::Playing;
        info!("Boot complete, red to move");
    }

    /// Runs one control-loop iteration.
    ///
    /// Returns the press accepted this tick, if any.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn tick(&mut self) -> Option<ButtonId> {
        let pressed = match self.mode {
            Mode::Playing => self.play_tick(),
            Mode::Idle => self.idle_tick(),
        };

        let now = self.clock.now_ms();
        self.render
            .request_flush(now, &self.buffers, &mut self.indicators, &mut self.display);
        self.clock.delay_ms(*self.config.tick_delay_ms());
        pressed
    }

    fn play_tick(&mut self) -> Option<ButtonId> {
        let button = self.sampler.poll(&mut self.input, &mut self.clock)?;
        self.claim(button.index());
        Some(button)
    }

    fn idle_tick(&mut self) -> Option<ButtonId> {
        let waited = self.clock.now_ms().saturating_sub(self.idle_since);
        if waited >= *self.config.result_hold_ms() {
            self.write_text(messages::RESET_PROMPT);
        }
        self.try_reset()
    }

    /// Claims cell `index` for the player to move, then settles the round.
    ///
    /// Rejections leave the grid and the turn untouched.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn claim(&mut self, index: usize) -> ClaimOutcome {
        if self.mode != Mode::Playing {
            debug!("Claim ignored while idle");
            return ClaimOutcome::NotPlaying;
        }

        let outcome = self.round.claim(index);
        if let ClaimOutcome::Claimed { player, position } = outcome {
            info!(%player, %position, "Cell claimed");
            self.paint(position.to_index(), Cell::Claimed(player));
            self.settle_round();
        }
        outcome
    }

    /// Evaluates the grid after a claim and acts on the result.
    fn settle_round(&mut self) {
        match evaluate(self.round.grid()) {
            Outcome::Line(line) => {
                let owner = line_owner(self.round.grid(), line);
                self.finish_with_line(line, owner);
            }
            Outcome::Draw => {
                info!(grid = %self.round.grid().display(), "Round drawn");
                self.write_text(messages::TIE);
                self.enter_idle();
            }
            Outcome::NoResult => {
                let text = messages::turn(self.round.to_move());
                self.write_text((text.as_str(), ""));
            }
        }
    }

    fn finish_with_line(&mut self, line: usize, owner: Option<Player>) {
        let cells = WIN_LINES[line];
        for index in self.round.keep_line(cells) {
            self.paint(index, Cell::Empty);
        }

        match owner {
            Some(player) => {
                self.scores.record_win(player);
                info!(
                    %player,
                    ?cells,
                    red = self.scores.red,
                    blue = self.scores.blue,
                    "Round won"
                );
                let score = messages::score(self.scores.red, self.scores.blue);
                let winner = messages::winner(player);
                self.write_text((score.as_str(), winner.as_str()));
            }
            None => {
                warn!(
                    ?cells,
                    grid = %self.round.grid().display(),
                    "Winning line has no known owner"
                );
                self.write_text(messages::UNKNOWN_RESULT);
            }
        }
        self.enter_idle();
    }

    fn enter_idle(&mut self) {
        self.mode = Mode::Idle;
        self.idle_since = self.clock.now_ms();
        debug!(at = self.idle_since, "Waiting for reset");
    }

    fn paint(&mut self, index: usize, cell: Cell) {
        let color = match cell {
            Cell::Empty => Rgb::OFF,
            Cell::Claimed(Player::A) => self.config.player_a(),
            Cell::Claimed(Player::B) => self.config.player_b(),
        };
        if self.buffers.indicators.set(index, color) {
            self.render.mark_indicators();
        }
    }

    fn write_text(&mut self, (line0, line1): (&str, &str)) {
        if self.buffers.text.set(line0, line1) {
            self.render.mark_text();
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Match scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Render buffers as last written.
    pub fn buffers(&self) -> &OutputBuffers {
        &self.buffers
    }

    /// Dirty flags and throttle state.
    pub fn render(&self) -> &RenderCoordinator {
        &self.render
    }

    /// Indicator driver.
    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Mutable indicator driver.
    pub fn indicators_mut(&mut self) -> &mut I {
        &mut self.indicators
    }

    /// Display driver.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable display driver.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Input source.
    pub fn input(&self) -> &P {
        &self.input
    }

    /// Clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }
}
