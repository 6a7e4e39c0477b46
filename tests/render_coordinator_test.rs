//! Tests for the dirty-flag render coordinator.

use strictly_arcade::hardware::mock::{RecordingDisplay, RecordingIndicators};
use strictly_arcade::{Flush, OutputBuffers, RenderCoordinator, Rgb};

fn buffers_with_text(line0: &str) -> OutputBuffers {
    let mut buffers = OutputBuffers::default();
    buffers.text.set(line0, "");
    buffers
}

#[test]
fn test_second_request_inside_interval_is_a_no_op() {
    let mut coordinator = RenderCoordinator::new(30);
    let mut leds = RecordingIndicators::new();
    let mut lcd = RecordingDisplay::new();
    let buffers = buffers_with_text("RED's turn");

    coordinator.mark_text();
    let first = coordinator.request_flush(1_000, &buffers, &mut leds, &mut lcd);
    assert_eq!(
        first,
        Flush::Done {
            indicators: false,
            text: true
        }
    );

    coordinator.mark_text();
    assert_eq!(
        coordinator.request_flush(1_010, &buffers, &mut leds, &mut lcd),
        Flush::Throttled
    );
    assert!(coordinator.text_dirty());
    assert_eq!(lcd.clears(), 1);

    let third = coordinator.request_flush(1_035, &buffers, &mut leds, &mut lcd);
    assert!(third.wrote_anything());
    assert!(!coordinator.text_dirty());
    assert_eq!(lcd.clears(), 2);
    assert_eq!(coordinator.last_flush(), Some(1_035));
}

#[test]
fn test_changes_between_flushes_are_coalesced() {
    let mut coordinator = RenderCoordinator::new(30);
    let mut leds = RecordingIndicators::new();
    let mut lcd = RecordingDisplay::new();
    let mut buffers = OutputBuffers::default();

    coordinator.request_flush(0, &buffers, &mut leds, &mut lcd);
    for (t, index) in [(5, 0), (10, 4), (20, 8)] {
        buffers.indicators.set(index, Rgb::new(255, 0, 0));
        coordinator.mark_indicators();
        assert_eq!(
            coordinator.request_flush(t, &buffers, &mut leds, &mut lcd),
            Flush::Throttled
        );
    }
    assert_eq!(leds.shows(), 0);

    coordinator.request_flush(30, &buffers, &mut leds, &mut lcd);
    assert_eq!(leds.shows(), 1);
    assert_eq!(leds.shown(), buffers.indicators.colors());
}

#[test]
fn test_text_lines_reach_the_display() {
    let mut coordinator = RenderCoordinator::new(30);
    let mut leds = RecordingIndicators::new();
    let mut lcd = RecordingDisplay::new();
    let mut buffers = OutputBuffers::default();
    buffers.text.set("Red 1 vs Blue 0", "RED wins!");

    coordinator.mark_text();
    coordinator.request_flush(0, &buffers, &mut leds, &mut lcd);
    assert_eq!(lcd.line(0), "Red 1 vs Blue 0");
    assert_eq!(lcd.line(1), "RED wins!");
}

#[test]
fn test_unready_display_is_skipped_and_stays_dirty() {
    let mut coordinator = RenderCoordinator::new(30);
    let mut leds = RecordingIndicators::new();
    let mut lcd = RecordingDisplay::unready();
    let buffers = buffers_with_text("Tic Tac Toe");

    coordinator.mark_text();
    coordinator.mark_indicators();
    let flush = coordinator.request_flush(0, &buffers, &mut leds, &mut lcd);

    assert_eq!(
        flush,
        Flush::Done {
            indicators: true,
            text: false
        }
    );
    assert!(coordinator.text_dirty());
    assert_eq!(lcd.clears(), 0);
}

#[test]
fn test_failed_transmission_is_retried() {
    let mut coordinator = RenderCoordinator::new(30);
    let mut leds = RecordingIndicators::new();
    let mut lcd = RecordingDisplay::new();
    let buffers = OutputBuffers::default();
    leds.fail_next(1);

    coordinator.mark_indicators();
    coordinator.request_flush(0, &buffers, &mut leds, &mut lcd);
    assert!(coordinator.indicators_dirty());
    assert_eq!(leds.shows(), 0);

    coordinator.request_flush(30, &buffers, &mut leds, &mut lcd);
    assert!(!coordinator.indicators_dirty());
    assert_eq!(leds.shows(), 1);
}
