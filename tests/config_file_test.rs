//! Tests for loading configuration files.

use std::io::Write;
use strictly_arcade::{ArcadeConfig, Rgb};

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "match_reset_threshold = 5").unwrap();
    writeln!(file, "player_b_color = [0, 255, 0]").unwrap();

    let config = ArcadeConfig::from_file(&path).unwrap();
    assert_eq!(*config.match_reset_threshold(), 5);
    assert_eq!(config.player_b(), Rgb::new(0, 255, 0));
    assert_eq!(*config.button_pins(), [12, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArcadeConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "debounce_ms = \"soon\"\n").unwrap();

    let err = ArcadeConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse"));
}
