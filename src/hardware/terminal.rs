//! Terminal simulator of the button/light board.
//!
//! Keys `1`-`9` stand in for the nine buttons (row-major, `1` is top-left),
//! the indicator grid and the 16x2 display are drawn with ratatui. A key
//! press holds its button active for a configurable time, long enough to
//! pass both debounce windows.

use super::{Clock, DisplayDriver, HardwareError, IndicatorDriver, InputSource, PinLevel, Rgb};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const LCD_COLS: usize = 16;

/// What the simulated hardware currently shows.
struct Panel {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    leds: [Rgb; 9],
    lcd: [String; 2],
    cursor: (usize, usize),
}

impl Panel {
    fn redraw(&mut self) -> Result<(), HardwareError> {
        let leds = self.leds;
        let lcd = self.lcd.clone();
        self.terminal.draw(|frame| {
            let [board_area, lcd_area, help_area] = Layout::vertical([
                Constraint::Length(5),
                Constraint::Length(4),
                Constraint::Min(1),
            ])
            .areas(frame.area());

            let rows: Vec<Line> = leds
                .chunks(3)
                .map(|row| {
                    Line::from(
                        row.iter()
                            .map(|c| led_span(*c))
                            .collect::<Vec<_>>(),
                    )
                })
                .collect();
            frame.render_widget(
                Paragraph::new(rows).block(Block::bordered().title(" Board ")),
                board_area,
            );

            let width = LCD_COLS;
            let text: Vec<Line> = lcd
                .iter()
                .map(|l| Line::from(format!("{l:<width$}")))
                .collect();
            frame.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(Color::Black).bg(Color::Green))
                    .block(Block::bordered().title(" LCD ")),
                lcd_area,
            );

            frame.render_widget(
                Paragraph::new("keys 1-9: buttons (1 = top-left)   q/Esc: quit"),
                help_area,
            );
        })?;
        Ok(())
    }
}

fn led_span(color: Rgb) -> Span<'static> {
    if color.is_off() {
        Span::styled(" ·· ", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            " ██ ",
            Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
        )
    }
}

/// Owns the terminal for the duration of a simulation run.
///
/// Raw mode and the alternate screen are restored on drop.
pub struct TerminalSession {
    panel: Rc<RefCell<Panel>>,
}

impl TerminalSession {
    /// Takes over the terminal.
    #[instrument]
    pub fn start() -> Result<Self, HardwareError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info!("Terminal simulator started");
        Ok(Self {
            panel: Rc::new(RefCell::new(Panel {
                terminal,
                leds: [Rgb::OFF; 9],
                lcd: Default::default(),
                cursor: (0, 0),
            })),
        })
    }

    /// Indicator strip drawn in this terminal.
    pub fn indicators(&self) -> TerminalIndicators {
        TerminalIndicators {
            panel: Rc::clone(&self.panel),
            pending: [Rgb::OFF; 9],
        }
    }

    /// Character display drawn in this terminal.
    pub fn display(&self) -> TerminalDisplay {
        TerminalDisplay {
            panel: Rc::clone(&self.panel),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to leave raw mode");
        }
        let mut panel = self.panel.borrow_mut();
        if let Err(e) = execute!(panel.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
        let _ = panel.terminal.show_cursor();
    }
}

/// Indicator strip rendered as a colored 3x3 block grid.
pub struct TerminalIndicators {
    panel: Rc<RefCell<Panel>>,
    pending: [Rgb; 9],
}

impl IndicatorDriver for TerminalIndicators {
    fn is_ready(&self) -> bool {
        true
    }

    fn set_color(&mut self, index: usize, color: Rgb) {
        if let Some(slot) = self.pending.get_mut(index) {
            *slot = color;
        }
    }

    fn clear_all(&mut self) {
        self.pending = [Rgb::OFF; 9];
    }

    fn show(&mut self) -> Result<(), HardwareError> {
        let mut panel = self.panel.borrow_mut();
        panel.leds = self.pending;
        panel.redraw()
    }
}

/// 16x2 character display rendered below the grid.
pub struct TerminalDisplay {
    panel: Rc<RefCell<Panel>>,
}

impl DisplayDriver for TerminalDisplay {
    fn is_ready(&self) -> bool {
        true
    }

    fn clear(&mut self) -> Result<(), HardwareError> {
        let mut panel = self.panel.borrow_mut();
        panel.lcd = Default::default();
        panel.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), HardwareError> {
        if row > 1 || col as usize >= LCD_COLS {
            return Err(HardwareError::new(format!(
                "cursor ({}, {}) outside 16x2",
                col, row
            )));
        }
        self.panel.borrow_mut().cursor = (col as usize, row as usize);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), HardwareError> {
        let mut panel = self.panel.borrow_mut();
        let (col, row) = panel.cursor;
        let kept: String = panel.lcd[row].chars().take(col).collect();
        let room = LCD_COLS.saturating_sub(col);
        let written: String = text.chars().take(room).collect();
        panel.lcd[row] = format!("{kept:<col$}{written}");
        panel.cursor.0 += written.chars().count();
        panel.redraw()
    }
}

/// Keyboard standing in for the nine buttons.
#[derive(Debug)]
pub struct KeyboardInput {
    pins: [u8; 9],
    hold: Duration,
    held_until: [Option<Instant>; 9],
    quit: bool,
}

impl KeyboardInput {
    /// Maps keys `1`-`9` onto `pins` (logical button order).
    pub fn new(pins: [u8; 9], hold_ms: u64) -> Self {
        Self {
            pins,
            hold: Duration::from_millis(hold_ms),
            held_until: [None; 9],
            quit: false,
        }
    }

    /// Returns true once `q` or `Esc` was pressed.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn pump_events(&mut self) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    warn!(error = %e, "Keyboard poll failed");
                    return;
                }
            }
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "Keyboard read failed");
                    return;
                }
            };
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("Quit requested");
                    self.quit = true;
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    debug!(button = index, "Key press");
                    self.held_until[index] = Some(Instant::now() + self.hold);
                }
                _ => {}
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn read(&mut self, pin: u8) -> PinLevel {
        self.pump_events();
        let held = self
            .pins
            .iter()
            .position(|p| *p == pin)
            .and_then(|index| self.held_until[index])
            .is_some_and(|until| Instant::now() < until);
        if held {
            PinLevel::Active
        } else {
            PinLevel::Inactive
        }
    }
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts counting from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
